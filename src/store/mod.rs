//! Click storage.
//!
//! The persisted record, its JSON file store, and the lock-protected
//! in-memory counters shared across threads.

pub mod click_store;
pub mod counter_state;
pub mod types;

pub use click_store::*;
pub use counter_state::*;
pub use types::*;
