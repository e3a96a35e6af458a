use landfall::agent::{latest_checkpoint, DqnAgent, Hyperparameters, Pilot, TargetRatePilot};
use landfall::config::VehicleProperties;
use landfall::constants::MAX_VERTICAL_LANDING_SPEED;
use landfall::environment::Planet;
use landfall::models::{StartState, Vehicle};
use landfall::rl::OBS_LEN;
use landfall::training::{run_pilot_episode, train, TrainerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;

struct Args {
    mode: String,
    display: bool,
    reset: bool,
    episodes: usize,
    save_interval: usize,
    seed: u64,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args {
        mode: "train".to_string(),
        display: false,
        reset: false,
        episodes: 10_000,
        save_interval: 100,
        seed: 0,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "train" | "run" => args.mode = arg,
            "--display" => args.display = true,
            "--reset" => args.reset = true,
            "--episodes" => {
                args.episodes = iter.next().ok_or("--episodes needs a value")?.parse()?
            }
            "--save-interval" => {
                args.save_interval = iter.next().ok_or("--save-interval needs a value")?.parse()?
            }
            "--seed" => args.seed = iter.next().ok_or("--seed needs a value")?.parse()?,
            other => return Err(format!("unknown argument: {}", other).into()),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;

    match args.mode.as_str() {
        "train" => {
            let config = TrainerConfig {
                num_episodes: args.episodes,
                save_interval: args.save_interval,
                reset_model: args.reset,
                seed: args.seed,
                ..TrainerConfig::default()
            };
            train(&config)
        }
        _ => run_once(&args),
    }
}

/// Flies a single descent with the latest trained policy, or the threshold
/// pilot when no checkpoint exists yet.
fn run_once(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let planet = Planet::new(6000.0, 1000.0, 1.0, 9.8, &mut rng)?;
    let mut vehicle = Vehicle::new(VehicleProperties::new(1500.0, 100.0, 0.5, 1000.0, 4.0)?);
    vehicle.reset(&StartState {
        x: 5000.0,
        y: 800.0,
        speed: 0.0,
        thrust: 0.0,
        angle: 0.0,
    });

    let config = TrainerConfig::default();
    let mut pilot: Box<dyn Pilot> = match latest_checkpoint(&config.save_dir)? {
        Some((path, episode)) => {
            println!("Flying checkpoint from episode {}", episode);
            let mut agent = DqnAgent::new(OBS_LEN, Hyperparameters::default(), args.seed);
            agent.load(&path)?;
            Box::new(agent)
        }
        None => {
            println!("No checkpoint found, flying the target-rate pilot");
            Box::new(TargetRatePilot {
                target_descent_rate: -MAX_VERTICAL_LANDING_SPEED,
            })
        }
    };

    let outcome = run_pilot_episode(
        &planet,
        &mut vehicle,
        pilot.as_mut(),
        config.max_ticks,
        config.dt,
        args.display,
    );
    println!(
        "{} pilot: {} after {} ticks, total reward {:.2}",
        pilot.name(),
        outcome.status,
        outcome.ticks,
        outcome.total_reward
    );
    Ok(())
}
