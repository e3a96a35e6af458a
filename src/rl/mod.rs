pub mod observation;
pub mod reward;
pub mod sensing;

pub use observation::{observe, pad_offset, OBS_LEN};
pub use reward::{compute_reward, RewardCache, RewardTerms};
pub use sensing::sense_terrain;
