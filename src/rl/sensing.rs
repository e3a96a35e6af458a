use crate::constants::{NUM_RAYS, RAY_MAX_RANGE, RAY_STEP};
use crate::environment::Planet;
use crate::models::Vehicle;
use nalgebra as na;

/// Casts NUM_RAYS rays fanned across -90..+90 degrees relative to the
/// vehicle orientation and reports, per ray, the distance to the first
/// sampled point at or below ground level, or RAY_MAX_RANGE if none.
///
/// Every ray point is compared against the terrain height at the vehicle's
/// own x, not the height under the point itself. Trained value functions
/// depend on this input distribution, so the approximation is load-bearing.
pub fn sense_terrain(vehicle: &Vehicle, planet: &Planet) -> [f64; NUM_RAYS] {
    let (ground, _) = planet
        .terrain()
        .height_at(vehicle.position.x, vehicle.terrain_segment);

    let spread = 180.0 / (NUM_RAYS - 1) as f64;
    let mut distances = [RAY_MAX_RANGE; NUM_RAYS];

    for (i, distance) in distances.iter_mut().enumerate() {
        let theta = (vehicle.angle - 90.0 + i as f64 * spread).to_radians();
        // Downward fan: the middle ray points straight down when upright.
        let direction = na::Vector2::new(theta.sin(), -theta.cos());

        let mut range = RAY_STEP;
        while range <= RAY_MAX_RANGE {
            let point = vehicle.position + direction * range;
            if point.y <= ground {
                *distance = range;
                break;
            }
            range += RAY_STEP;
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleProperties;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (Planet, Vehicle) {
        let mut rng = StdRng::seed_from_u64(17);
        let planet = Planet::new(6000.0, 1000.0, 1.0, 9.8, &mut rng).unwrap();
        let mut vehicle =
            Vehicle::new(VehicleProperties::new(1500.0, 100.0, 0.5, 1000.0, 4.0).unwrap());
        let zone = planet.terrain().landing_zone();
        vehicle.position = na::Vector2::new(zone.center_x(), zone.height() + 95.0);
        (planet, vehicle)
    }

    #[test]
    fn center_ray_reports_the_altitude_above_ground() {
        let (planet, vehicle) = setup();
        let distances = sense_terrain(&vehicle, &planet);
        // Upright, the middle ray points straight down; 95 m up rounds to the
        // next 10 m sampling step.
        assert_eq!(distances[NUM_RAYS / 2], 100.0);
    }

    #[test]
    fn horizontal_rays_run_out_of_range() {
        let (planet, vehicle) = setup();
        let distances = sense_terrain(&vehicle, &planet);
        // The +/-90 degree rays travel parallel to the ground, above it.
        assert_eq!(distances[0], RAY_MAX_RANGE);
        assert_eq!(distances[NUM_RAYS - 1], RAY_MAX_RANGE);
    }

    #[test]
    fn high_altitude_leaves_every_ray_unobstructed() {
        let (planet, mut vehicle) = setup();
        vehicle.position.y += 2.0 * RAY_MAX_RANGE;
        for distance in sense_terrain(&vehicle, &planet) {
            assert_eq!(distance, RAY_MAX_RANGE);
        }
    }
}
