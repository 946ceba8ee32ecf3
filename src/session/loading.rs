//! Rotating loading status messages.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Status messages cycled while a generation is pending.
pub const LOADING_MESSAGES: [&str; 6] = [
    "Planting the seeds of creativity...",
    "Watering your ideas...",
    "Letting the sunshine in...",
    "Tending to the digital soil...",
    "Your garden is blossoming...",
    "Almost ready for a stroll...",
];

/// Interval between message advances.
const ROTATION_PERIOD: Duration = Duration::from_millis(2500);

/// Periodic task advancing the loading message while a generation runs.
///
/// Starts at the first message and wraps. The task owns no session state,
/// only the shared index; dropping the ticker aborts it, so the rotation
/// stops exactly when loading ends. Each new ticker re-seeds at index 0.
pub(crate) struct LoadingTicker {
    index: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl LoadingTicker {
    /// Starts the rotation. Must be called within a tokio runtime.
    pub(crate) fn start() -> Self {
        let index = Arc::new(AtomicUsize::new(0));
        let task_index = Arc::clone(&index);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(ROTATION_PERIOD);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                task_index.fetch_add(1, Ordering::Relaxed);
            }
        });
        Self { index, handle }
    }

    /// The message to display right now.
    pub(crate) fn message(&self) -> &'static str {
        LOADING_MESSAGES[self.index.load(Ordering::Relaxed) % LOADING_MESSAGES.len()]
    }
}

impl Drop for LoadingTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        // Let the ticker task observe the advanced clock.
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_at_first_message() {
        let ticker = LoadingTicker::start();
        settle().await;
        assert_eq!(ticker.message(), LOADING_MESSAGES[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advances_every_period() {
        let ticker = LoadingTicker::start();
        settle().await;

        tokio::time::advance(ROTATION_PERIOD).await;
        settle().await;
        assert_eq!(ticker.message(), LOADING_MESSAGES[1]);

        tokio::time::advance(ROTATION_PERIOD).await;
        settle().await;
        assert_eq!(ticker.message(), LOADING_MESSAGES[2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wraps_after_last_message() {
        let ticker = LoadingTicker::start();
        settle().await;

        for _ in 0..LOADING_MESSAGES.len() {
            tokio::time::advance(ROTATION_PERIOD).await;
            settle().await;
        }
        assert_eq!(ticker.message(), LOADING_MESSAGES[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_ticker_reseeds_at_zero() {
        let ticker = LoadingTicker::start();
        settle().await;
        tokio::time::advance(ROTATION_PERIOD).await;
        settle().await;
        assert_eq!(ticker.message(), LOADING_MESSAGES[1]);
        drop(ticker);

        let ticker = LoadingTicker::start();
        settle().await;
        assert_eq!(ticker.message(), LOADING_MESSAGES[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_rotation() {
        let ticker = LoadingTicker::start();
        settle().await;
        let index = Arc::clone(&ticker.index);
        drop(ticker);

        tokio::time::advance(ROTATION_PERIOD * 3).await;
        settle().await;
        assert_eq!(index.load(Ordering::Relaxed), 0);
    }
}
