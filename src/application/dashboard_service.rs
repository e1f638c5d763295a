// Dashboard service - Owns the reading history and the generator loop
use crate::application::reading_source::ReadingSource;
use crate::application::ticker::Ticker;
use crate::domain::dashboard::DashboardState;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinError;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("reading generator is not running")]
    NotRunning,
    #[error("reading generator task failed: {0}")]
    TickerFailed(#[from] JoinError),
}

/// State shared between the service handle and its ticker task.
struct Shared {
    state: watch::Sender<DashboardState>,
    source: Arc<dyn ReadingSource>,
    capacity: usize,
}

impl Shared {
    /// Append a fresh reading unless paused or the ticker that fired has been cancelled.
    ///
    /// Both checks run under the channel's write lock, so a cancellation
    /// issued through [`Shared::halt`] is never overtaken by a late tick.
    fn tick(&self, run: &CancellationToken) -> bool {
        self.state.send_if_modified(|state| {
            if run.is_cancelled() || state.is_paused() {
                return false;
            }

            let reading = self.source.next_reading();
            tracing::debug!(
                value = reading.value,
                history_len = (state.history().len() + 1).min(self.capacity),
                "publishing reading"
            );
            *state = state.with_reading(reading, self.capacity);
            true
        })
    }

    async fn halt(&self, ticker: Ticker) -> Result<(), JoinError> {
        self.state.send_if_modified(|_| {
            ticker.cancel();
            false
        });
        ticker.join().await
    }
}

/// Reading generator and state holder.
///
/// Snapshots are published through a watch channel: subscribers always see
/// the most recently published [`DashboardState`], never a partial update.
pub struct DashboardService {
    shared: Arc<Shared>,
    period: Duration,
    ticker: Mutex<Option<Ticker>>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn ReadingSource>, period: Duration, capacity: usize) -> Self {
        let (state, _) = watch::channel(DashboardState::new());

        Self {
            shared: Arc::new(Shared {
                state,
                source,
                capacity,
            }),
            period,
            ticker: Mutex::new(None),
        }
    }

    /// Start generating readings. A generator that is already running is
    /// stopped first, so at most one loop is ever active.
    pub async fn start(&self) {
        let mut slot = self.ticker.lock().await;

        if let Some(previous) = slot.take() {
            tracing::info!("restarting reading generator");
            if let Err(e) = self.shared.halt(previous).await {
                tracing::error!("previous reading generator failed: {}", e);
            }
        }

        let shared = self.shared.clone();
        *slot = Some(Ticker::spawn(self.period, move |run| {
            shared.tick(run);
        }));

        tracing::info!(
            period_ms = self.period.as_millis() as u64,
            capacity = self.shared.capacity,
            "reading generator started"
        );
    }

    /// Stop the generator. No reading is published after this returns.
    pub async fn stop(&self) -> Result<(), DashboardError> {
        let ticker = self.ticker.lock().await.take().ok_or_else(|| {
            tracing::warn!("stop requested but reading generator is not running");
            DashboardError::NotRunning
        })?;

        self.shared.halt(ticker).await?;
        tracing::info!("reading generator stopped");
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.ticker.lock().await.is_some()
    }

    /// Flip the pause flag and publish immediately. Returns the new flag.
    pub fn toggle_pause(&self) -> bool {
        let mut paused = false;
        self.shared.state.send_modify(|state| {
            *state = state.with_pause_toggled();
            paused = state.is_paused();
        });

        tracing::info!(paused, "pause toggled");
        paused
    }

    pub fn current_state(&self) -> DashboardState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.shared.state.subscribe()
    }

    /// Stream of snapshots, starting with the current one.
    pub fn updates(&self) -> WatchStream<DashboardState> {
        WatchStream::new(self.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::DEFAULT_CAPACITY;
    use crate::domain::reading::Reading;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::time;
    use tokio_stream::StreamExt;

    /// Produces 1.0, 2.0, 3.0, ... so tests can tell readings apart by creation order.
    #[derive(Default)]
    struct SequenceSource {
        created: AtomicU64,
    }

    impl SequenceSource {
        fn created(&self) -> u64 {
            self.created.load(Ordering::SeqCst)
        }
    }

    impl ReadingSource for SequenceSource {
        fn next_reading(&self) -> Reading {
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            Reading::now(n as f64)
        }
    }

    fn service() -> (DashboardService, Arc<SequenceSource>) {
        let source = Arc::new(SequenceSource::default());
        let service = DashboardService::new(source.clone(), DEFAULT_PERIOD, DEFAULT_CAPACITY);
        (service, source)
    }

    fn values(state: &DashboardState) -> Vec<f64> {
        state.history().iter().map(|r| r.value).collect()
    }

    #[test]
    fn test_initial_state() {
        let (service, _) = service();
        let state = service.current_state();

        assert!(state.history().is_empty());
        assert!(!state.is_paused());
    }

    #[test]
    fn test_history_length_tracks_ticks_up_to_capacity() {
        let (service, _) = service();
        let run = CancellationToken::new();

        for ticks in 1..=30usize {
            assert!(service.shared.tick(&run));
            assert_eq!(service.current_state().history().len(), ticks.min(DEFAULT_CAPACITY));
        }
    }

    #[test]
    fn test_pause_resume_scenario() {
        let (service, source) = service();
        let run = CancellationToken::new();

        for _ in 0..3 {
            service.shared.tick(&run);
        }
        let state = service.current_state();
        assert_eq!(values(&state), vec![1.0, 2.0, 3.0]);
        assert_eq!(state.current(), Some(3.0));
        assert!((state.average() - 2.0).abs() < 1e-9);

        assert!(service.toggle_pause());
        for _ in 0..2 {
            assert!(!service.shared.tick(&run));
        }
        assert_eq!(values(&service.current_state()), vec![1.0, 2.0, 3.0]);
        assert_eq!(source.created(), 3);

        assert!(!service.toggle_pause());
        for _ in 0..25 {
            service.shared.tick(&run);
        }

        // 28 readings created in total; the newest 20 remain in creation order
        let expected: Vec<f64> = (9..=28).map(|n| n as f64).collect();
        assert_eq!(values(&service.current_state()), expected);
    }

    #[test]
    fn test_toggle_parity_and_history() {
        let (service, _) = service();
        let run = CancellationToken::new();
        service.shared.tick(&run);
        let before = service.current_state();

        for _ in 0..4 {
            service.toggle_pause();
        }
        assert_eq!(service.current_state(), before);

        for _ in 0..3 {
            service.toggle_pause();
        }
        let after = service.current_state();
        assert!(after.is_paused());
        assert_eq!(after.history(), before.history());
    }

    #[test]
    fn test_cancelled_tick_is_noop() {
        let (service, source) = service();
        let run = CancellationToken::new();
        run.cancel();

        assert!(!service.shared.tick(&run));
        assert!(service.current_state().history().is_empty());
        assert_eq!(source.created(), 0);
    }

    #[test]
    fn test_toggle_publishes_to_subscribers() {
        let (service, _) = service();
        let mut rx = service.subscribe();
        assert!(!rx.has_changed().unwrap());

        service.toggle_pause();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_paused());
    }

    #[tokio::test(start_paused = true)]
    async fn test_generates_on_fixed_period() {
        let (service, _) = service();
        service.start().await;
        assert!(service.is_running().await);

        time::sleep(Duration::from_millis(4100)).await;
        assert_eq!(values(&service.current_state()), vec![1.0, 2.0, 3.0]);

        service.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_changes_after_stop() {
        let (service, source) = service();
        service.start().await;
        time::sleep(Duration::from_millis(2100)).await;

        service.stop().await.unwrap();
        assert!(!service.is_running().await);
        let frozen = service.current_state();
        let mut rx = service.subscribe();

        time::sleep(Duration::from_secs(30)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(service.current_state(), frozen);
        assert_eq!(source.created(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_stop_is_an_error() {
        let (service, _) = service();
        assert!(matches!(service.stop().await, Err(DashboardError::NotRunning)));

        service.start().await;
        service.stop().await.unwrap();
        assert!(matches!(service.stop().await, Err(DashboardError::NotRunning)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_single_loop() {
        let (service, _) = service();
        service.start().await;
        service.start().await;
        service.start().await;

        time::sleep(Duration::from_millis(4100)).await;
        assert_eq!(service.current_state().history().len(), 3);

        service.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_generator_keeps_history() {
        let (service, source) = service();
        service.start().await;
        time::sleep(Duration::from_millis(100)).await;
        service.toggle_pause();

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(values(&service.current_state()), vec![1.0]);
        assert_eq!(source.created(), 1);

        service.toggle_pause();
        time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(service.current_state().history().len(), 2);

        service.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_updates_stream_yields_latest_snapshot() {
        let (service, _) = service();
        let mut updates = service.updates();

        let first = updates.next().await.unwrap();
        assert!(first.history().is_empty());

        service.toggle_pause();
        service.toggle_pause();
        service.toggle_pause();

        let latest = updates.next().await.unwrap();
        assert!(latest.is_paused());
    }
}
