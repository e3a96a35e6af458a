use super::dqn::DqnAgent;
use crate::constants::VELOCITY_SCALE;
use crate::rl::observation::OBS_VY;
use nalgebra as na;

/// A thrust/angle request handed to `Vehicle::pilot_commands`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    pub thrust: f64,
    pub angle_delta: f64,
}

impl Command {
    pub fn none() -> Self {
        Command {
            thrust: 0.0,
            angle_delta: 0.0,
        }
    }
}

/// The control-policy seam: given an observation, produce a thrust/angle
/// action. Implementations are interchangeable and selected by
/// configuration.
pub trait Pilot {
    fn name(&self) -> &str;
    fn act(&mut self, observation: &na::DVector<f64>) -> Command;
}

/// Fixed-threshold descent policy: full thrust when descending faster than
/// the target rate, engine off otherwise, no tilt control.
pub struct TargetRatePilot {
    /// m/s, negative = descending.
    pub target_descent_rate: f64,
}

impl Pilot for TargetRatePilot {
    fn name(&self) -> &str {
        "target_rate"
    }

    fn act(&mut self, observation: &na::DVector<f64>) -> Command {
        let vertical_speed = observation[OBS_VY] * VELOCITY_SCALE;
        let thrust = if vertical_speed < self.target_descent_rate {
            1.0
        } else {
            0.0
        };
        Command {
            thrust,
            angle_delta: 0.0,
        }
    }
}

impl Pilot for DqnAgent {
    fn name(&self) -> &str {
        "dqn"
    }

    /// Evaluation-mode flying is pure exploitation.
    fn act(&mut self, observation: &na::DVector<f64>) -> Command {
        let action = self.greedy(observation);
        Command {
            thrust: action.thrust,
            angle_delta: action.angle_delta,
        }
    }
}
