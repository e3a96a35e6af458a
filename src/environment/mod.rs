pub mod planet;
pub mod terrain;

pub use planet::Planet;
pub use terrain::{LandingZone, Terrain};
