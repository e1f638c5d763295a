// Pseudo-random temperature source
use crate::application::reading_source::ReadingSource;
use crate::domain::reading::Reading;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::sync::Mutex;

pub struct RandomReadingSource {
    rng: Mutex<StdRng>,
    range: Range<f64>,
}

impl RandomReadingSource {
    /// Uniform draws from `range`. The range must be non-empty.
    pub fn new(range: Range<f64>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng: Mutex::new(rng),
            range,
        }
    }
}

impl ReadingSource for RandomReadingSource {
    fn next_reading(&self) -> Reading {
        let value = {
            // A poisoned rng is still a usable rng
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(self.range.clone())
        };
        Reading::now(value)
    }
}
