//! Background polling task.
//!
//! One tokio task owns the store and runs fetch → normalize → publish on a
//! fixed interval. Ticks never overlap: the wait for the next tick only
//! starts once the current one has been published.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::PollOutcome;
use crate::data::Series;
use crate::store::SnapshotStore;

/// Default interval between two ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Fetch one snapshot and normalize it.
///
/// A store failure skips normalization entirely. A malformed key rejects
/// the whole snapshot.
pub async fn fetch_series(store: &dyn SnapshotStore) -> PollOutcome {
    let raw = match store.get().await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Store unavailable ({}): {}", store.description(), e);
            return PollOutcome::Failed(e.to_string());
        }
    };

    match Series::from_snapshot(raw.as_ref()) {
        Ok(series) => {
            debug!("Normalized {} samples", series.len());
            PollOutcome::Ready(series)
        }
        Err(e) => {
            warn!("Rejected snapshot from {}: {}", store.description(), e);
            PollOutcome::Failed(e.to_string())
        }
    }
}

/// Spawns the polling task.
#[derive(Debug, Clone)]
pub struct Poller {
    store: Arc<dyn SnapshotStore>,
    interval: Duration,
}

impl Poller {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Set the wait between the end of one tick and the start of the next.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start polling, publishing every outcome on `sender`.
    ///
    /// Must be called from within a tokio runtime. The task ends when
    /// [`PollerHandle::stop`] is called, when the handle is dropped, or when
    /// every receiver of `sender` is gone.
    pub fn spawn(self, sender: watch::Sender<PollOutcome>) -> PollerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let Poller { store, interval } = self;

        let task = tokio::spawn(async move {
            info!("Polling {} every {:?}", store.description(), interval);

            loop {
                let outcome = tokio::select! {
                    outcome = fetch_series(store.as_ref()) => outcome,
                    _ = stop_rx.changed() => break,
                };

                if sender.send(outcome).is_err() {
                    debug!("All receivers dropped");
                    break;
                }

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = stop_rx.changed() => break,
                }
            }

            info!("Stopped polling {}", store.description());
        });

        PollerHandle {
            stop: stop_tx,
            task,
        }
    }
}

/// Handle to a running poller.
#[derive(Debug)]
pub struct PollerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the task to stop and wait for it to finish.
    ///
    /// An in-flight fetch is abandoned.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.task.await {
            warn!("Poller task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawSnapshot;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Store returning a fixed sequence of results, repeating the last one.
    #[derive(Debug)]
    struct ScriptedStore {
        script: Mutex<Vec<Result<Option<RawSnapshot>, StoreError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedStore {
        fn new(script: Vec<Result<Option<RawSnapshot>, StoreError>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SnapshotStore for ScriptedStore {
        async fn get(&self) -> Result<Option<RawSnapshot>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.remove(0)
            } else {
                match &script[0] {
                    Ok(snapshot) => Ok(snapshot.clone()),
                    Err(_) => Err(StoreError::Timeout),
                }
            }
        }

        fn description(&self) -> &str {
            "scripted"
        }
    }

    fn snapshot(entries: &[(&str, f64)]) -> RawSnapshot {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[tokio::test]
    async fn test_fetch_series_ready() {
        let store = ScriptedStore::new(vec![Ok(Some(snapshot(&[("10", 2.0), ("9", 1.0)])))]);
        match fetch_series(&store).await {
            PollOutcome::Ready(series) => {
                assert_eq!(series.len(), 2);
                assert_eq!(series.samples()[0].value, 1.0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_series_empty_path_is_ready() {
        let store = ScriptedStore::new(vec![Ok(None)]);
        assert!(matches!(
            fetch_series(&store).await,
            PollOutcome::Ready(series) if series.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_fetch_series_failures() {
        let store = ScriptedStore::new(vec![Err(StoreError::Timeout)]);
        assert!(matches!(
            fetch_series(&store).await,
            PollOutcome::Failed(msg) if msg == "Request timed out"
        ));

        let store = ScriptedStore::new(vec![Ok(Some(snapshot(&[("abc", 5.0)])))]);
        assert!(matches!(
            fetch_series(&store).await,
            PollOutcome::Failed(msg) if msg.contains("abc")
        ));
    }

    #[tokio::test]
    async fn test_poller_publishes_and_stops() {
        let store = Arc::new(ScriptedStore::new(vec![
            Err(StoreError::Timeout),
            Ok(Some(snapshot(&[("1", 20.0)]))),
        ]));
        let (tx, mut rx) = watch::channel(PollOutcome::Pending);

        let handle = Poller::new(store.clone())
            .interval(Duration::from_millis(10))
            .spawn(tx);

        rx.changed().await.unwrap();
        assert!(matches!(&*rx.borrow_and_update(), PollOutcome::Failed(_)));

        // Retries on the next tick
        rx.changed().await.unwrap();
        assert!(matches!(&*rx.borrow_and_update(), PollOutcome::Ready(s) if s.len() == 1));

        handle.stop().await;
        let calls = store.calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.calls.load(Ordering::SeqCst), calls);
    }

    #[tokio::test]
    async fn test_poller_ends_when_receivers_dropped() {
        let store = Arc::new(ScriptedStore::new(vec![Ok(None)]));
        let (tx, rx) = watch::channel(PollOutcome::Pending);
        drop(rx);

        let handle = Poller::new(store).interval(Duration::from_millis(10)).spawn(tx);
        tokio::time::timeout(Duration::from_secs(1), async {
            while !handle.is_finished() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
    }
}
