use super::sensing::sense_terrain;
use crate::constants::*;
use crate::environment::Planet;
use crate::models::Vehicle;
use nalgebra as na;

/// Fixed observation layout. The length and field order are a contract with
/// the value network: changing either requires retraining.
pub const OBS_RADIUS: usize = 0;
pub const OBS_ATMOSPHERE: usize = 1;
pub const OBS_DENSITY: usize = 2;
pub const OBS_GRAVITY: usize = 3;
pub const OBS_MAX_THRUST: usize = 4;
pub const OBS_MAX_FUEL: usize = 5;
pub const OBS_DRAG_COEFF: usize = 6;
pub const OBS_SURFACE_AREA: usize = 7;
pub const OBS_MASS: usize = 8;
pub const OBS_PAD_DX: usize = 9;
pub const OBS_PAD_DY: usize = 10;
pub const OBS_VX: usize = 11;
pub const OBS_VY: usize = 12;
pub const OBS_ANGLE: usize = 13;
pub const OBS_FUEL: usize = 14;
pub const OBS_RAYS: usize = 15;
pub const OBS_LEN: usize = OBS_RAYS + NUM_RAYS;

fn min_max(value: f64, (lo, hi): (f64, f64)) -> f64 {
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Signed horizontal offset from x to target_x taking the shorter of the two
/// wrap-around paths; result lies in [-ground_length/2, ground_length/2).
pub fn pad_offset(x: f64, target_x: f64, ground_length: f64) -> f64 {
    let half = ground_length / 2.0;
    (target_x - x + half).rem_euclid(ground_length) - half
}

/// Builds the normalized observation vector for the current state.
pub fn observe(vehicle: &Vehicle, planet: &Planet) -> na::DVector<f64> {
    let mut obs = na::DVector::zeros(OBS_LEN);

    obs[OBS_RADIUS] = min_max(planet.radius, RADIUS_RANGE);
    obs[OBS_ATMOSPHERE] = min_max(planet.atmosphere_thickness, ATMOSPHERE_RANGE);
    obs[OBS_DENSITY] = min_max(planet.air_ground_density, DENSITY_RANGE);
    obs[OBS_GRAVITY] = min_max(planet.gravity_constant, GRAVITY_RANGE);

    let props = vehicle.properties;
    obs[OBS_MAX_THRUST] = min_max(props.max_thrust, MAX_THRUST_RANGE);
    obs[OBS_MAX_FUEL] = min_max(props.max_fuel, MAX_FUEL_RANGE);
    obs[OBS_DRAG_COEFF] = min_max(props.drag_coeff, DRAG_COEFF_RANGE);
    obs[OBS_SURFACE_AREA] = min_max(props.surface_area, SURFACE_AREA_RANGE);
    obs[OBS_MASS] = min_max(props.mass, MASS_RANGE);

    let zone = planet.terrain().landing_zone();
    let dx = pad_offset(vehicle.position.x, zone.center_x(), planet.ground_length);
    obs[OBS_PAD_DX] = (dx / (planet.ground_length / 2.0)).clamp(-1.0, 1.0);
    obs[OBS_PAD_DY] =
        ((vehicle.position.y - zone.height()) / planet.atmosphere_thickness).clamp(-1.0, 1.0);

    obs[OBS_VX] = (vehicle.velocity.x / VELOCITY_SCALE).clamp(-1.0, 1.0);
    obs[OBS_VY] = (vehicle.velocity.y / VELOCITY_SCALE).clamp(-1.0, 1.0);
    obs[OBS_ANGLE] = vehicle.angle / MAX_TILT;
    obs[OBS_FUEL] = vehicle.fuel;

    let rays = sense_terrain(vehicle, planet);
    for (i, distance) in rays.iter().enumerate() {
        obs[OBS_RAYS + i] = distance / RAY_MAX_RANGE;
    }

    obs
}
