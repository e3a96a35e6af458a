pub mod error;
pub mod vehicle;

pub use error::ConfigError;
pub use vehicle::VehicleProperties;
