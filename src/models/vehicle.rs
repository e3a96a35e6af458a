use crate::config::VehicleProperties;
use crate::constants::{MAX_ANGLE_DELTA, MAX_THRUST_RATE, MAX_TILT};
use crate::models::status::FlightStatus;
use nalgebra as na;

/// Initial conditions for one episode.
#[derive(Debug, Clone, Copy)]
pub struct StartState {
    pub x: f64,
    pub y: f64,
    /// Descent speed, resolved along the start angle (positive = moving).
    pub speed: f64,
    pub thrust: f64,
    /// Orientation in degrees from vertical.
    pub angle: f64,
}

/// The single owned, mutable simulation record. The physics step, the
/// environment adapter and the pilot all operate on this by reference;
/// nobody keeps an independent copy.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub properties: VehicleProperties,
    /// x wraps modulo the planet circumference, y is altitude (m).
    pub position: na::Vector2<f64>,
    pub velocity: na::Vector2<f64>,
    /// Orientation in degrees from vertical, within [-MAX_TILT, MAX_TILT].
    pub angle: f64,
    /// Fuel fraction in [0, 1] of `properties.max_fuel`.
    pub fuel: f64,
    /// Thrust fraction in [0, 1] of `properties.max_thrust`.
    pub thrust: f64,
    pub status: FlightStatus,
    /// Cached bracketing terrain segment for height lookups. Contract: may be
    /// stale after horizontal motion; `Terrain::height_at` bounds-checks it
    /// against the query x and falls back to a binary search, returning the
    /// refreshed index to store here.
    pub terrain_segment: usize,
}

impl Vehicle {
    pub fn new(properties: VehicleProperties) -> Self {
        Self {
            properties,
            position: na::Vector2::zeros(),
            velocity: na::Vector2::zeros(),
            angle: 0.0,
            fuel: 1.0,
            thrust: 0.0,
            status: FlightStatus::Flying,
            terrain_segment: 0,
        }
    }

    /// Reinitializes kinematics and status for a new episode. The physical
    /// constants are untouched. The start angle is held to the same tilt
    /// bound the pilot commands enforce.
    pub fn reset(&mut self, start: &StartState) {
        let angle = start.angle.clamp(-MAX_TILT, MAX_TILT);
        let a = angle.to_radians();
        self.position = na::Vector2::new(start.x, start.y);
        self.velocity = na::Vector2::new(start.speed * a.sin(), -start.speed * a.cos());
        self.angle = angle;
        self.fuel = 1.0;
        self.thrust = start.thrust;
        self.status = FlightStatus::Flying;
        self.terrain_segment = 0;
    }

    /// Accepts pilot commands, rate-limited: thrust moves toward the requested
    /// fraction by at most MAX_THRUST_RATE per call, the angle changes by at
    /// most MAX_ANGLE_DELTA degrees per call. An empty tank forces thrust to
    /// zero regardless of the request.
    pub fn pilot_commands(&mut self, thrust: Option<f64>, angle_delta: Option<f64>) {
        if let Some(target) = thrust {
            if self.fuel <= 0.0 {
                self.thrust = 0.0;
            } else {
                let step = (target - self.thrust).clamp(-MAX_THRUST_RATE, MAX_THRUST_RATE);
                self.thrust = (self.thrust + step).clamp(0.0, 1.0);
            }
        }
        if let Some(delta) = angle_delta {
            let step = delta.clamp(-MAX_ANGLE_DELTA, MAX_ANGLE_DELTA);
            self.angle = (self.angle + step).clamp(-MAX_TILT, MAX_TILT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_vehicle() -> Vehicle {
        Vehicle::new(VehicleProperties::new(1500.0, 100.0, 0.5, 1000.0, 4.0).unwrap())
    }

    #[test]
    fn thrust_command_is_rate_limited() {
        let mut vehicle = test_vehicle();
        vehicle.pilot_commands(Some(1.0), None);
        assert_abs_diff_eq!(vehicle.thrust, MAX_THRUST_RATE);
        vehicle.pilot_commands(Some(1.0), None);
        assert_abs_diff_eq!(vehicle.thrust, 2.0 * MAX_THRUST_RATE);
        vehicle.pilot_commands(Some(0.0), None);
        assert_abs_diff_eq!(vehicle.thrust, MAX_THRUST_RATE);
    }

    #[test]
    fn angle_command_is_rate_limited_and_clamped() {
        let mut vehicle = test_vehicle();
        vehicle.pilot_commands(None, Some(40.0));
        assert_abs_diff_eq!(vehicle.angle, MAX_ANGLE_DELTA);
        for _ in 0..20 {
            vehicle.pilot_commands(None, Some(40.0));
        }
        assert_abs_diff_eq!(vehicle.angle, MAX_TILT);
    }

    #[test]
    fn empty_tank_forces_thrust_to_zero() {
        let mut vehicle = test_vehicle();
        vehicle.thrust = 0.6;
        vehicle.fuel = 0.0;
        vehicle.pilot_commands(Some(1.0), None);
        assert_eq!(vehicle.thrust, 0.0);
    }

    #[test]
    fn reset_resolves_speed_along_start_angle() {
        let mut vehicle = test_vehicle();
        vehicle.reset(&StartState {
            x: 100.0,
            y: 800.0,
            speed: 10.0,
            thrust: 0.0,
            angle: 90.0,
        });
        assert_abs_diff_eq!(vehicle.velocity.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(vehicle.velocity.y, 0.0, epsilon = 1e-9);
        assert_eq!(vehicle.status, FlightStatus::Flying);
        assert_abs_diff_eq!(vehicle.fuel, 1.0);

        vehicle.reset(&StartState {
            x: 100.0,
            y: 800.0,
            speed: 10.0,
            thrust: 0.0,
            angle: 0.0,
        });
        assert_abs_diff_eq!(vehicle.velocity.y, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn reset_clamps_an_out_of_bounds_start_angle() {
        let mut vehicle = test_vehicle();
        vehicle.reset(&StartState {
            x: 0.0,
            y: 800.0,
            speed: 10.0,
            thrust: 0.0,
            angle: 170.0,
        });
        assert_abs_diff_eq!(vehicle.angle, MAX_TILT);
        // Velocity resolves along the clamped angle, not the request.
        assert_abs_diff_eq!(vehicle.velocity.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(vehicle.velocity.y, 0.0, epsilon = 1e-9);
    }
}
