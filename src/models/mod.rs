pub mod status;
pub mod vehicle;

pub use status::FlightStatus;
pub use vehicle::{StartState, Vehicle};
