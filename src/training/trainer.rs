use super::curve::append_episode_reward;
use super::episode::run_episode;
use crate::agent::{checkpoint_path, latest_checkpoint, DqnAgent, Hyperparameters};
use crate::config::{ConfigError, VehicleProperties};
use crate::constants::*;
use crate::environment::Planet;
use crate::models::{StartState, Vehicle};
use crate::rl::OBS_LEN;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub num_episodes: usize,
    pub save_interval: usize,
    /// Start from a fresh network instead of resuming the latest checkpoint.
    pub reset_model: bool,
    pub save_dir: PathBuf,
    pub curve_path: PathBuf,
    pub max_ticks: usize,
    pub dt: f64,
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            num_episodes: 10_000,
            save_interval: 100,
            reset_model: false,
            save_dir: PathBuf::from("models_saved"),
            curve_path: PathBuf::from("training_loss.csv"),
            max_ticks: 2_000,
            dt: 0.1,
            seed: 0,
        }
    }
}

/// Runs the training loop: every episode flies a freshly randomized planet
/// and vehicle, appends the total reward to the curve file and periodically
/// checkpoints the value function. Resumes from the latest checkpoint unless
/// a reset is requested.
pub fn train(config: &TrainerConfig) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&config.save_dir)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut agent = DqnAgent::new(OBS_LEN, Hyperparameters::default(), rng.gen());

    let mut start_episode = 0;
    if !config.reset_model {
        if let Some((path, episode)) = latest_checkpoint(&config.save_dir)? {
            println!("Resuming from episode {} ({})", episode + 1, path.display());
            agent.load(&path)?;
            start_episode = episode;
        }
    }

    for episode in start_episode..config.num_episodes {
        let planet = random_planet(&mut rng)?;
        let mut vehicle = Vehicle::new(random_vehicle(&mut rng)?);
        vehicle.reset(&random_start(&planet, &mut rng));

        let outcome = run_episode(&planet, &mut vehicle, &mut agent, config.max_ticks, config.dt);

        println!(
            "Episode {}/{}: {} after {} ticks, total reward {:.2}, epsilon {:.4}",
            episode + 1,
            config.num_episodes,
            outcome.status,
            outcome.ticks,
            outcome.total_reward,
            agent.exploration()
        );
        append_episode_reward(&config.curve_path, episode + 1, outcome.total_reward)?;

        if (episode + 1) % config.save_interval == 0 {
            agent.save(&checkpoint_path(&config.save_dir, episode + 1))?;
        }
    }

    Ok(())
}

/// A planet drawn over the observation normalization ranges, with a density
/// floor so most training worlds have a usable atmosphere.
fn random_planet<R: Rng>(rng: &mut R) -> Result<Planet, ConfigError> {
    let radius = rng.gen_range(RADIUS_RANGE.0..RADIUS_RANGE.1);
    let atmosphere_thickness = rng.gen_range(ATMOSPHERE_RANGE.0..ATMOSPHERE_RANGE.1);
    let air_ground_density = rng.gen_range(0.2..DENSITY_RANGE.1);
    let gravity_constant = rng.gen_range(GRAVITY_RANGE.0..GRAVITY_RANGE.1);
    Planet::new(
        radius,
        atmosphere_thickness,
        air_ground_density,
        gravity_constant,
        rng,
    )
}

fn random_vehicle<R: Rng>(rng: &mut R) -> Result<VehicleProperties, ConfigError> {
    let max_thrust = rng.gen_range(MAX_THRUST_RANGE.0..MAX_THRUST_RANGE.1);
    let max_fuel = rng.gen_range(MAX_FUEL_RANGE.0..MAX_FUEL_RANGE.1);
    let drag_coeff = rng.gen_range(DRAG_COEFF_RANGE.0..DRAG_COEFF_RANGE.1);
    let surface_area = rng.gen_range(SURFACE_AREA_RANGE.0..SURFACE_AREA_RANGE.1);
    VehicleProperties::with_derived_mass(max_thrust, max_fuel, drag_coeff, surface_area)
}

/// Episodes begin at the top of the atmosphere, anywhere around the planet,
/// with a small initial descent and an arbitrary tilt.
fn random_start<R: Rng>(planet: &Planet, rng: &mut R) -> StartState {
    StartState {
        x: rng.gen_range(0.0..planet.ground_length),
        y: planet.atmosphere_thickness,
        speed: rng.gen_range(0.0..10.0),
        thrust: 0.0,
        angle: rng.gen_range(-MAX_TILT..MAX_TILT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn randomized_setups_are_always_constructible() {
        let mut rng = StdRng::seed_from_u64(55);
        for _ in 0..50 {
            let planet = random_planet(&mut rng).unwrap();
            let props = random_vehicle(&mut rng).unwrap();
            let start = random_start(&planet, &mut rng);
            assert!(start.x >= 0.0 && start.x < planet.ground_length);
            assert!(props.mass > 0.0);
        }
    }
}
