use crate::agent::{DqnAgent, Pilot, Transition};
use crate::environment::Planet;
use crate::models::{FlightStatus, Vehicle};
use crate::physics::update_vehicle_state;
use crate::rl::{compute_reward, observe, RewardCache};

#[derive(Debug, Clone, Copy)]
pub struct EpisodeOutcome {
    pub total_reward: f64,
    pub status: FlightStatus,
    pub ticks: usize,
}

/// One training episode. Each tick runs the strict sequence
/// observe -> act -> command -> physics step -> observe -> reward ->
/// remember -> learn, until the vehicle is terminal or the tick budget is
/// spent.
pub fn run_episode(
    planet: &Planet,
    vehicle: &mut Vehicle,
    agent: &mut DqnAgent,
    max_ticks: usize,
    dt: f64,
) -> EpisodeOutcome {
    let mut cache = RewardCache::for_vehicle(vehicle, planet);
    let mut observation = observe(vehicle, planet);
    let mut total_reward = 0.0;
    let mut ticks = 0;

    for _ in 0..max_ticks {
        let action = agent.act(&observation);
        vehicle.pilot_commands(Some(action.thrust), Some(action.angle_delta));
        update_vehicle_state(vehicle, planet, dt);

        let next_observation = observe(vehicle, planet);
        let (terms, next_cache) = compute_reward(vehicle, planet, &cache);
        let done = vehicle.status.is_terminal();

        agent.remember(Transition {
            state: observation,
            action: action.joint_index(),
            reward: terms.total,
            next_state: next_observation.clone(),
            done,
        });
        agent.replay();

        total_reward += terms.total;
        cache = next_cache;
        observation = next_observation;
        ticks += 1;

        if done {
            break;
        }
    }

    EpisodeOutcome {
        total_reward,
        status: vehicle.status,
        ticks,
    }
}

/// Drives any pilot without learning (evaluation mode). With `display` on,
/// read-only state snapshots are printed as the descent unfolds.
pub fn run_pilot_episode(
    planet: &Planet,
    vehicle: &mut Vehicle,
    pilot: &mut dyn Pilot,
    max_ticks: usize,
    dt: f64,
    display: bool,
) -> EpisodeOutcome {
    let mut cache = RewardCache::for_vehicle(vehicle, planet);
    let mut total_reward = 0.0;
    let mut ticks = 0;

    for tick in 0..max_ticks {
        let observation = observe(vehicle, planet);
        let command = pilot.act(&observation);
        vehicle.pilot_commands(Some(command.thrust), Some(command.angle_delta));
        update_vehicle_state(vehicle, planet, dt);

        let (terms, next_cache) = compute_reward(vehicle, planet, &cache);
        total_reward += terms.total;
        cache = next_cache;
        ticks += 1;

        if display && tick % 50 == 0 {
            println!(
                "t={:7.1}s x={:9.1} alt={:7.1} vx={:6.1} vy={:6.1} angle={:5.1} fuel={:.2} [{}]",
                tick as f64 * dt,
                vehicle.position.x,
                vehicle.position.y,
                vehicle.velocity.x,
                vehicle.velocity.y,
                vehicle.angle,
                vehicle.fuel,
                vehicle.status
            );
        }

        if vehicle.status.is_terminal() {
            break;
        }
    }

    EpisodeOutcome {
        total_reward,
        status: vehicle.status,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Command, Hyperparameters};
    use crate::config::VehicleProperties;
    use crate::models::StartState;
    use nalgebra as na;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct GroundedPilot;

    impl Pilot for GroundedPilot {
        fn name(&self) -> &str {
            "grounded"
        }
        fn act(&mut self, _observation: &na::DVector<f64>) -> Command {
            Command::none()
        }
    }

    #[test]
    fn episode_stops_at_a_terminal_state() {
        let mut rng = StdRng::seed_from_u64(31);
        let planet = Planet::new(6000.0, 1000.0, 1.0, 9.8, &mut rng).unwrap();
        let mut vehicle =
            Vehicle::new(VehicleProperties::new(1500.0, 100.0, 0.5, 1000.0, 4.0).unwrap());
        vehicle.reset(&StartState {
            x: planet.terrain().landing_zone().center_x(),
            y: planet.terrain().landing_zone().height() + 50.0,
            speed: 40.0,
            thrust: 0.0,
            angle: 30.0,
        });

        let mut pilot = GroundedPilot;
        let outcome = run_pilot_episode(&planet, &mut vehicle, &mut pilot, 5000, 0.1, false);
        assert_eq!(outcome.status, FlightStatus::Crashed);
        assert!(outcome.ticks < 5000);
        assert!(outcome.total_reward <= -1000.0 + 100.0);
    }

    #[test]
    fn training_episode_fills_the_replay_buffer() {
        let mut rng = StdRng::seed_from_u64(37);
        let planet = Planet::new(6000.0, 1000.0, 1.0, 9.8, &mut rng).unwrap();
        let mut vehicle =
            Vehicle::new(VehicleProperties::new(1500.0, 100.0, 0.5, 1000.0, 4.0).unwrap());
        vehicle.reset(&StartState {
            x: 0.0,
            y: 800.0,
            speed: 5.0,
            thrust: 0.0,
            angle: 0.0,
        });

        let mut agent = DqnAgent::new(
            crate::rl::OBS_LEN,
            Hyperparameters::default(),
            7,
        );
        let outcome = run_episode(&planet, &mut vehicle, &mut agent, 40, 0.1);
        assert_eq!(agent.replay_len(), outcome.ticks);
    }
}
