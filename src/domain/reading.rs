// Temperature reading domain model
use chrono::{DateTime, Local};
use serde::Serialize;

/// A single temperature sample. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub value: f64,
    pub timestamp: DateTime<Local>,
}

impl Reading {
    pub fn new(value: f64, timestamp: DateTime<Local>) -> Self {
        Self { value, timestamp }
    }

    /// Reading stamped with the current local time.
    pub fn now(value: f64) -> Self {
        Self::new(value, Local::now())
    }
}
