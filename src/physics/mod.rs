pub mod collision;
pub mod forces;
pub mod step;

pub use collision::detect_terrain_collision;
pub use step::update_vehicle_state;
