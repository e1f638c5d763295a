// Domain layer - Readings and dashboard snapshots
pub mod dashboard;
pub mod reading;
