use super::collision::detect_terrain_collision;
use super::forces::{drag_force, gravity_force, thrust_force};
use crate::environment::Planet;
use crate::models::{FlightStatus, Vehicle};

/// Advances the vehicle by one tick of explicit Euler integration, resolves
/// terrain contact and deducts fuel. A no-op once the vehicle is landed or
/// crashed.
pub fn update_vehicle_state(vehicle: &mut Vehicle, planet: &Planet, dt: f64) {
    if vehicle.status.is_terminal() {
        return;
    }

    let props = vehicle.properties;
    let air_density = planet.atmosphere_density(vehicle.position.y);

    let total_force = gravity_force(props.mass, planet.gravity_constant)
        + drag_force(
            &vehicle.velocity,
            props.drag_coeff,
            air_density,
            props.surface_area,
        )
        + thrust_force(vehicle.thrust, props.max_thrust, vehicle.angle);

    let acceleration = total_force / props.mass;
    vehicle.velocity += acceleration * dt;
    vehicle.position += vehicle.velocity * dt;
    // Toroidal world: horizontal position wraps around the circumference.
    vehicle.position.x = vehicle.position.x.rem_euclid(planet.ground_length);

    let verdict = detect_terrain_collision(vehicle, planet);
    if verdict != FlightStatus::Flying {
        // Snap to the surface. The impact velocity is preserved so the reward
        // pass can read the touchdown speed.
        let (height, segment) = planet
            .terrain()
            .height_at(vehicle.position.x, vehicle.terrain_segment);
        vehicle.terrain_segment = segment;
        vehicle.position.y = height;
    }
    vehicle.status = verdict;

    let burned = vehicle.thrust * props.max_thrust * dt / props.max_fuel;
    vehicle.fuel = (vehicle.fuel - burned).max(0.0);
}
