use crate::constants::{MAX_HORIZONTAL_LANDING_SPEED, MAX_VERTICAL_LANDING_SPEED};
use crate::environment::Planet;
use crate::models::{FlightStatus, Vehicle};

/// Classifies the vehicle against the interpolated terrain height at its
/// current x, refreshing the vehicle's cached terrain segment.
///
/// On contact the verdict is Landed only when every gate holds: x inside the
/// landing pad, upright orientation, horizontal speed under the limit and a
/// descent no faster than the vertical limit. Any other contact is Crashed.
pub fn detect_terrain_collision(vehicle: &mut Vehicle, planet: &Planet) -> FlightStatus {
    let (height, segment) = planet
        .terrain()
        .height_at(vehicle.position.x, vehicle.terrain_segment);
    vehicle.terrain_segment = segment;

    if vehicle.position.y > height {
        return FlightStatus::Flying;
    }

    let zone = planet.terrain().landing_zone();
    let on_pad = zone.contains(vehicle.position.x.rem_euclid(planet.ground_length));
    let upright = vehicle.angle == 0.0;
    let slow_enough_h = vehicle.velocity.x.abs() < MAX_HORIZONTAL_LANDING_SPEED;
    let slow_enough_v = vehicle.velocity.y >= -MAX_VERTICAL_LANDING_SPEED;

    if on_pad && upright && slow_enough_h && slow_enough_v {
        FlightStatus::Landed
    } else {
        FlightStatus::Crashed
    }
}
