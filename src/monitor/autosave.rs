//! Periodic persistence of the click counters.
//!
//! The autosave thread wakes on a fixed interval and writes the record if it
//! changed since the last successful save. It exits as soon as the shutdown
//! signal is raised; the final flush is left to the quit sequence.

use crate::shutdown::ShutdownSignal;
use crate::store::{ClickStore, CounterState};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Configuration for the autosave loop.
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// How often to check for unsaved clicks (default: 2s).
    pub interval: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }
}

/// Saves the counters if they are dirty.
///
/// Returns `true` if a save happened. A failed save is logged and leaves the
/// state dirty so the next tick retries.
pub fn flush_if_dirty(counter: &CounterState, store: &ClickStore) -> bool {
    let Some((record, version)) = counter.pending() else {
        return false;
    };

    match store.save(&record) {
        Ok(()) => {
            counter.mark_clean(version);
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Autosave failed, will retry");
            false
        }
    }
}

/// Spawns the autosave thread.
///
/// # Example
/// ```ignore
/// let signal = Arc::new(ShutdownSignal::new());
/// let handle = spawn_autosave_thread(counter, store, Arc::clone(&signal), AutosaveConfig::default());
///
/// signal.raise();
/// handle.join().unwrap();
/// ```
pub fn spawn_autosave_thread(
    counter: Arc<CounterState>,
    store: Arc<ClickStore>,
    shutdown: Arc<ShutdownSignal>,
    config: AutosaveConfig,
) -> JoinHandle<()> {
    thread::spawn(move || {
        tracing::info!(
            interval_ms = config.interval.as_millis() as u64,
            "Autosave thread started"
        );

        while !shutdown.wait_timeout(config.interval) {
            flush_if_dirty(&counter, &store);
        }

        tracing::info!("Autosave thread shutting down");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ClickRecord, MouseButton};
    use std::time::Instant;

    fn setup(dir: &tempfile::TempDir) -> (Arc<CounterState>, Arc<ClickStore>) {
        let start = "2024-01-01T00:00:00".parse().unwrap();
        let counter = Arc::new(CounterState::from_record(
            ClickRecord::new(0, 0, Some(start)),
            start,
        ));
        let store = Arc::new(ClickStore::new(dir.path().join("clicks.json")));
        (counter, store)
    }

    #[test]
    fn test_flush_skips_clean_state() {
        let dir = tempfile::tempdir().unwrap();
        let (counter, store) = setup(&dir);
        assert!(!flush_if_dirty(&counter, &store));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_flush_writes_and_clears_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let (counter, store) = setup(&dir);
        counter.record_click(MouseButton::Right);

        assert!(flush_if_dirty(&counter, &store));
        assert!(!counter.is_dirty());
        assert_eq!(store.load().right, 1);
    }

    #[test]
    fn test_failed_flush_stays_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let (counter, store) = setup(&dir);
        std::fs::create_dir(store.path()).unwrap();
        std::fs::write(store.path().join("keep"), "x").unwrap();
        counter.record_click(MouseButton::Left);

        assert!(!flush_if_dirty(&counter, &store));
        assert!(counter.is_dirty());
    }

    #[test]
    fn test_thread_saves_within_interval() {
        let dir = tempfile::tempdir().unwrap();
        let (counter, store) = setup(&dir);
        let shutdown = Arc::new(ShutdownSignal::new());
        let config = AutosaveConfig {
            interval: Duration::from_millis(20),
        };
        let handle = spawn_autosave_thread(
            Arc::clone(&counter),
            Arc::clone(&store),
            Arc::clone(&shutdown),
            config,
        );

        counter.record_click(MouseButton::Left);
        counter.record_click(MouseButton::Left);

        let deadline = Instant::now() + Duration::from_secs(5);
        while counter.is_dirty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }

        shutdown.raise();
        handle.join().unwrap();
        assert_eq!(store.load().left, 2);
    }

    #[test]
    fn test_thread_stops_promptly() {
        let dir = tempfile::tempdir().unwrap();
        let (counter, store) = setup(&dir);
        let shutdown = Arc::new(ShutdownSignal::new());
        let handle = spawn_autosave_thread(
            counter,
            store,
            Arc::clone(&shutdown),
            AutosaveConfig {
                interval: Duration::from_secs(60),
            },
        );

        let started = Instant::now();
        shutdown.raise();
        handle.join().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
