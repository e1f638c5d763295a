// Dashboard state domain model
use super::reading::Reading;
use serde::Serialize;

pub const DEFAULT_CAPACITY: usize = 20;

/// Immutable snapshot of the dashboard.
///
/// `history` is ordered oldest first, newest last. Transitions never mutate a
/// snapshot in place; they build the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    history: Vec<Reading>,
    paused: bool,
}

/// Statistics derived from the history of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub current: Option<f64>,
    pub average: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Reading] {
        &self.history
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Next state with `reading` appended, keeping only the newest `capacity` entries.
    pub fn with_reading(&self, reading: Reading, capacity: usize) -> Self {
        let mut history = Vec::with_capacity((self.history.len() + 1).min(capacity));
        let keep = (self.history.len() + 1).saturating_sub(capacity);
        history.extend(self.history.iter().skip(keep).cloned());
        if capacity > 0 {
            history.push(reading);
        }

        Self {
            history,
            paused: self.paused,
        }
    }

    pub fn with_pause_toggled(&self) -> Self {
        Self {
            history: self.history.clone(),
            paused: !self.paused,
        }
    }

    /// Value of the newest reading.
    pub fn current(&self) -> Option<f64> {
        self.history.last().map(|r| r.value)
    }

    pub fn average(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.history.iter().map(|r| r.value).sum();
        sum / self.history.len() as f64
    }

    pub fn min(&self) -> Option<f64> {
        self.history.iter().map(|r| r.value).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.history.iter().map(|r| r.value).reduce(f64::max)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            current: self.current(),
            average: self.average(),
            min: self.min(),
            max: self.max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(value: f64) -> Reading {
        Reading::now(value)
    }

    fn values(state: &DashboardState) -> Vec<f64> {
        state.history().iter().map(|r| r.value).collect()
    }

    #[test]
    fn test_empty_state_statistics() {
        let state = DashboardState::new();

        assert!(!state.is_paused());
        assert!(state.history().is_empty());
        assert_eq!(state.current(), None);
        assert_eq!(state.average(), 0.0);
        assert_eq!(state.min(), None);
        assert_eq!(state.max(), None);
    }

    #[test]
    fn test_statistics_over_history() {
        let state = [70.0, 80.0, 66.5]
            .into_iter()
            .fold(DashboardState::new(), |s, v| s.with_reading(reading(v), DEFAULT_CAPACITY));

        let stats = state.statistics();
        assert_eq!(stats.current, Some(66.5));
        assert!((stats.average - 72.166_666_666).abs() < 1e-6);
        assert_eq!(stats.min, Some(66.5));
        assert_eq!(stats.max, Some(80.0));
    }

    #[test]
    fn test_with_reading_evicts_oldest_first() {
        let state = (1..=25)
            .map(f64::from)
            .fold(DashboardState::new(), |s, v| s.with_reading(reading(v), DEFAULT_CAPACITY));

        assert_eq!(state.history().len(), DEFAULT_CAPACITY);
        let expected: Vec<f64> = (6..=25).map(f64::from).collect();
        assert_eq!(values(&state), expected);
        assert_eq!(state.current(), Some(25.0));
    }

    #[test]
    fn test_with_reading_leaves_previous_snapshot_untouched() {
        let before = DashboardState::new().with_reading(reading(70.0), 2);
        let after = before.with_reading(reading(71.0), 2);

        assert_eq!(values(&before), vec![70.0]);
        assert_eq!(values(&after), vec![70.0, 71.0]);
    }

    #[test]
    fn test_toggle_pause_keeps_history() {
        let state = DashboardState::new().with_reading(reading(72.0), DEFAULT_CAPACITY);

        let paused = state.with_pause_toggled();
        assert!(paused.is_paused());
        assert_eq!(paused.history(), state.history());

        let resumed = paused.with_pause_toggled();
        assert!(!resumed.is_paused());
        assert_eq!(resumed, state);
    }

    #[test]
    fn test_with_reading_preserves_pause_flag() {
        let state = DashboardState::new()
            .with_pause_toggled()
            .with_reading(reading(75.0), DEFAULT_CAPACITY);

        assert!(state.is_paused());
        assert_eq!(state.history().len(), 1);
    }
}
