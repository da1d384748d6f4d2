//! Lock-protected click counters.
//!
//! One mutex covers the totals, the dirty flag and the mutation version.
//! Every mutation pushes a snapshot to the attached [`StatsView`] before the
//! lock is released, so the tooltip always reflects the click that was just
//! counted.

use crate::store::types::{ClickRecord, MouseButton};
use crate::ui::StatsView;
use chrono::NaiveDateTime;
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Counters {
    record: ClickRecord,
    dirty: bool,
    /// Bumped on every mutation so a flush can tell if it went stale.
    version: u64,
}

/// Shared click totals.
pub struct CounterState {
    inner: Mutex<Counters>,
    view: OnceCell<Arc<dyn StatsView>>,
}

impl CounterState {
    /// Creates state from a loaded record.
    ///
    /// If the record has no `start`, it is stamped with `now` and the state is
    /// marked dirty so the new start gets persisted.
    pub fn from_record(mut record: ClickRecord, now: NaiveDateTime) -> Self {
        let dirty = record.start.is_none();
        if dirty {
            record.start = Some(now);
            tracing::info!(start = %now, "Starting a new counting epoch");
        }

        Self {
            inner: Mutex::new(Counters {
                record,
                dirty,
                version: 0,
            }),
            view: OnceCell::new(),
        }
    }

    /// Attaches the view refreshed on every mutation. Only the first call wins.
    pub fn set_view(&self, view: Arc<dyn StatsView>) {
        if self.view.set(view).is_err() {
            tracing::warn!("Stats view already attached, ignoring");
        }
    }

    /// Handles a raw button event. Only presses of left or right count.
    pub fn on_button_event(&self, button: MouseButton, pressed: bool) {
        if pressed {
            self.record_click(button);
        }
    }

    /// Counts one press of `button`. Buttons other than left/right are ignored.
    pub fn record_click(&self, button: MouseButton) {
        let mut counters = self.lock();
        match button {
            MouseButton::Left => counters.record.left += 1,
            MouseButton::Right => counters.record.right += 1,
            MouseButton::Middle | MouseButton::Other => return,
        }
        self.touch(&mut counters);
    }

    /// Zeroes both counters together. `start` is left as is.
    pub fn reset(&self) {
        let mut counters = self.lock();
        counters.record.left = 0;
        counters.record.right = 0;
        self.touch(&mut counters);
        tracing::info!("Click counters reset");
    }

    /// Current totals.
    pub fn snapshot(&self) -> ClickRecord {
        self.lock().record.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    /// Returns the record to flush and its version, if anything changed.
    pub fn pending(&self) -> Option<(ClickRecord, u64)> {
        let counters = self.lock();
        counters
            .dirty
            .then(|| (counters.record.clone(), counters.version))
    }

    /// Returns the record and its version regardless of the dirty flag.
    pub fn current(&self) -> (ClickRecord, u64) {
        let counters = self.lock();
        (counters.record.clone(), counters.version)
    }

    /// Clears the dirty flag after `version` has been saved.
    ///
    /// A mutation that landed after the snapshot was taken bumps the version,
    /// so the flag stays set and the next flush picks it up.
    pub fn mark_clean(&self, version: u64) -> bool {
        let mut counters = self.lock();
        if counters.version == version {
            counters.dirty = false;
            true
        } else {
            false
        }
    }

    fn touch(&self, counters: &mut Counters) {
        counters.dirty = true;
        counters.version = counters.version.wrapping_add(1);
        if let Some(view) = self.view.get() {
            view.refresh(&counters.record);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CounterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterState")
            .field("inner", &*self.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDateTime {
        "2024-01-01T00:00:00".parse().unwrap()
    }

    fn fresh() -> CounterState {
        CounterState::from_record(ClickRecord::new(0, 0, Some(start())), start())
    }

    #[derive(Default)]
    struct RecordingView(Mutex<Vec<ClickRecord>>);

    impl StatsView for RecordingView {
        fn refresh(&self, snapshot: &ClickRecord) {
            self.0.lock().unwrap().push(snapshot.clone());
        }
    }

    #[test]
    fn test_counts_only_left_and_right_presses() {
        let state = fresh();
        let events = [
            (MouseButton::Left, true),
            (MouseButton::Left, false),
            (MouseButton::Right, true),
            (MouseButton::Middle, true),
            (MouseButton::Other, true),
            (MouseButton::Left, true),
            (MouseButton::Right, false),
            (MouseButton::Left, true),
        ];
        for (button, pressed) in events {
            state.on_button_event(button, pressed);
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.left, 3);
        assert_eq!(snapshot.right, 1);
    }

    #[test]
    fn test_ignored_events_leave_state_clean() {
        let state = fresh();
        state.on_button_event(MouseButton::Left, false);
        state.on_button_event(MouseButton::Middle, true);
        assert!(!state.is_dirty());
        assert!(state.pending().is_none());
    }

    #[test]
    fn test_reset_zeroes_both_and_keeps_start() {
        let state = CounterState::from_record(ClickRecord::new(10, 5, Some(start())), start());
        state.reset();
        assert_eq!(state.snapshot(), ClickRecord::new(0, 0, Some(start())));
        assert!(state.is_dirty());
    }

    #[test]
    fn test_missing_start_is_stamped_and_dirty() {
        let now: NaiveDateTime = "2025-02-03T04:05:06".parse().unwrap();
        let state = CounterState::from_record(ClickRecord::default(), now);
        assert_eq!(state.snapshot().start, Some(now));
        assert!(state.is_dirty());
    }

    #[test]
    fn test_loaded_start_is_kept() {
        let now: NaiveDateTime = "2025-02-03T04:05:06".parse().unwrap();
        let state = CounterState::from_record(ClickRecord::new(10, 5, Some(start())), now);
        assert_eq!(state.snapshot(), ClickRecord::new(10, 5, Some(start())));
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_click_during_flush_stays_dirty() {
        let state = fresh();
        state.record_click(MouseButton::Left);

        let (record, version) = state.pending().unwrap();
        assert_eq!(record.left, 1);

        // Click lands while the record is being written.
        state.record_click(MouseButton::Left);
        assert!(!state.mark_clean(version));
        assert!(state.is_dirty());

        let (record, version) = state.pending().unwrap();
        assert_eq!(record.left, 2);
        assert!(state.mark_clean(version));
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_view_sees_every_mutation() {
        let state = fresh();
        let view = Arc::new(RecordingView::default());
        state.set_view(view.clone());

        state.record_click(MouseButton::Left);
        state.record_click(MouseButton::Right);
        state.record_click(MouseButton::Middle);
        state.reset();

        let seen = view.0.lock().unwrap();
        let totals: Vec<(u64, u64)> = seen.iter().map(|r| (r.left, r.right)).collect();
        assert_eq!(totals, vec![(1, 0), (1, 1), (0, 0)]);
    }

    #[test]
    fn test_concurrent_clicks_are_all_counted() {
        let state = Arc::new(fresh());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    let button = if i % 2 == 0 {
                        MouseButton::Left
                    } else {
                        MouseButton::Right
                    };
                    for _ in 0..250 {
                        state.record_click(button);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.left, 500);
        assert_eq!(snapshot.right, 500);
    }
}
