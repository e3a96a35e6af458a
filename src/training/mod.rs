pub mod curve;
pub mod episode;
pub mod trainer;

pub use curve::{append_episode_reward, read_runs};
pub use episode::{run_episode, run_pilot_episode, EpisodeOutcome};
pub use trainer::{train, TrainerConfig};
