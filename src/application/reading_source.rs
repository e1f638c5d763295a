// Source trait for temperature readings
use crate::domain::reading::Reading;

pub trait ReadingSource: Send + Sync {
    /// Produce a fresh reading stamped with the time of creation
    fn next_reading(&self) -> Reading;
}
