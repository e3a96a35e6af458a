pub mod checkpoint;
pub mod dqn;
pub mod network;
pub mod pilot;
pub mod replay;

pub use checkpoint::{checkpoint_path, latest_checkpoint, CheckpointError};
pub use dqn::{ChosenAction, DqnAgent, Hyperparameters};
pub use network::ValueNetwork;
pub use pilot::{Command, Pilot, TargetRatePilot};
pub use replay::{ReplayBuffer, Transition};
