use nalgebra as na;

/// Aerodynamic drag opposing the velocity: 0.5 * rho * Cd * A * |v|^2 along
/// -v/|v|. Zero at rest.
pub fn drag_force(
    velocity: &na::Vector2<f64>,
    drag_coeff: f64,
    air_density: f64,
    surface_area: f64,
) -> na::Vector2<f64> {
    let speed: f64 = velocity.magnitude();
    if speed == 0.0 {
        return na::Vector2::zeros();
    }

    let force_magnitude: f64 = -0.5 * drag_coeff * surface_area * air_density * speed.powi(2);
    velocity.normalize() * force_magnitude
}

/// Thrust along the body axis, angle measured in degrees from vertical.
pub fn thrust_force(thrust_fraction: f64, max_thrust: f64, angle_deg: f64) -> na::Vector2<f64> {
    let theta = angle_deg.to_radians();
    let magnitude = thrust_fraction * max_thrust;
    na::Vector2::new(magnitude * theta.sin(), magnitude * theta.cos())
}

pub fn gravity_force(mass: f64, gravity_constant: f64) -> na::Vector2<f64> {
    na::Vector2::new(0.0, -mass * gravity_constant)
}
