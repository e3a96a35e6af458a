pub mod agent;
pub mod config;
pub mod constants;
pub mod environment;
pub mod models;
pub mod physics;
pub mod rl;
pub mod training;
