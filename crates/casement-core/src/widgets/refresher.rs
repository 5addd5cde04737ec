//! Polling trigger widget.
//!
//! The refresher makes asynchronous server-side changes visible to the
//! client: it tells the client how often to poll, and its server-side
//! task periodically drives a processing turn. The task never touches
//! the registry directly; it communicates through a tick callback,
//! typically an external-mutation enqueue plus a turn kick.

use std::time::Duration;

use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Attribute bundle painted to the client. A non-positive interval
/// tells the client to stop polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefresherState {
    pub polling_interval_ms: i64,
}

/// Server-side polling configuration.
#[derive(Debug, Default)]
pub struct Refresher {
    interval: Option<Duration>,
    dirty: bool,
}

impl Refresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the desired refresh interval. Zero or negative temporarily
    /// deactivates polling.
    pub fn set_interval_ms(&mut self, interval_ms: i64) {
        self.interval = if interval_ms > 0 {
            Some(Duration::from_millis(interval_ms as u64))
        } else {
            None
        };
        self.dirty = true;
    }

    /// Currently configured interval; `None` while inactive.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Encode the polling attribute if the configuration changed.
    pub fn encode(&mut self) -> Option<RefresherState> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(RefresherState {
            polling_interval_ms: self
                .interval
                .map(|i| i.as_millis() as i64)
                .unwrap_or(-1),
        })
    }
}

/// Spawn the periodic task behind a refresher.
///
/// Runs `on_tick` every `interval` until `cancel` is cancelled. The
/// callback is the task's only channel to the session; direct registry
/// writes from here are off the table.
pub fn spawn_refresh_task<F>(
    interval: Duration,
    cancel: CancellationToken,
    mut on_tick: F,
) -> tokio::task::JoinHandle<()>
where
    F: FnMut() + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; skip it so the first
        // callback lands one full interval in.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("refresh task cancelled");
                    break;
                }
                _ = ticker.tick() => on_tick(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn interval_contract() {
        let mut refresher = Refresher::new();
        assert_eq!(refresher.interval(), None);

        refresher.set_interval_ms(500);
        assert_eq!(refresher.interval(), Some(Duration::from_millis(500)));

        refresher.set_interval_ms(0);
        assert_eq!(refresher.interval(), None);

        refresher.set_interval_ms(-1);
        assert_eq!(refresher.interval(), None);
    }

    #[test]
    fn encode_coalesces_changes() {
        let mut refresher = Refresher::new();
        assert!(refresher.encode().is_none());

        refresher.set_interval_ms(250);
        assert_eq!(
            refresher.encode(),
            Some(RefresherState {
                polling_interval_ms: 250
            })
        );
        assert!(refresher.encode().is_none());

        refresher.set_interval_ms(-5);
        assert_eq!(
            refresher.encode(),
            Some(RefresherState {
                polling_interval_ms: -1
            })
        );
    }

    #[test]
    fn state_wire_field_name() {
        let state = RefresherState {
            polling_interval_ms: 1000,
        };
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"pollingIntervalMs":1000}"#
        );
    }

    #[tokio::test(start_paused = true)]
    async fn task_ticks_until_cancelled() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let cancel = CancellationToken::new();

        let task = spawn_refresh_task(Duration::from_millis(100), cancel.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(ticks.load(Ordering::SeqCst) >= 3);

        cancel.cancel();
        task.await.unwrap();
        let after_cancel = ticks.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), after_cancel);
    }

    #[tokio::test(start_paused = true)]
    async fn task_does_not_tick_immediately() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let cancel = CancellationToken::new();

        let task = spawn_refresh_task(Duration::from_millis(100), cancel.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        cancel.cancel();
        task.await.unwrap();
    }
}
