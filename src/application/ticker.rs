// Cancellable periodic task
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Handle to a spawned periodic loop.
///
/// The first tick fires immediately, then once per `period`. The callback
/// receives the loop's cancellation token so work that races with `cancel()`
/// can check it at the point where it commits side effects.
///
/// Dropping the handle cancels the loop.
pub struct Ticker {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the loop on the current tokio runtime. `period` must be non-zero.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(&CancellationToken) + Send + 'static,
    {
        let token = CancellationToken::new();
        let run = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = run.cancelled() => {
                        tracing::debug!("ticker loop shutting down");
                        break;
                    }
                    _ = interval.tick() => on_tick(&run),
                }
            }
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the loop to exit. Only returns once `cancel()` has been called.
    pub async fn join(mut self) -> Result<(), JoinError> {
        match self.handle.take() {
            Some(handle) => handle.await,
            None => Ok(()),
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
