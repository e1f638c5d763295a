// Infrastructure layer - Configuration and the simulated sensor
pub mod config;
pub mod random_source;
