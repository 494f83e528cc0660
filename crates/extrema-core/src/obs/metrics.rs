use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// AggregateCounters
/// Ephemeral, in-memory counters for aggregate calls on this thread.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggregateCounters {
    // Selector
    pub selections: u64,
    pub slots_scanned: u64,
    pub missing_records_skipped: u64,
    pub null_keys_skipped: u64,
    pub empty_results: u64,

    // Accumulator
    pub accumulate_calls: u64,
    pub state_replacements: u64,
    pub cleanups: u64,

    // Liveness + failures
    pub progress_signals: u64,
    pub failures: u64,
}

thread_local! {
    static COUNTERS: RefCell<AggregateCounters> = RefCell::new(AggregateCounters::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&AggregateCounters) -> R) -> R {
    COUNTERS.with(|m| f(&m.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut AggregateCounters) -> R) -> R {
    COUNTERS.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = AggregateCounters::default());
}
