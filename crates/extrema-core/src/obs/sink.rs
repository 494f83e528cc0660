//! Metrics sink boundary.
//!
//! Aggregate logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.

use crate::{error::ErrorOrigin, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Select {
        slots_scanned: u64,
        missing_records: u64,
        null_keys: u64,
        selected: bool,
    },
    Accumulate {
        replaced: bool,
    },
    Cleanup,
    ProgressSignal,
    Failure {
        origin: ErrorOrigin,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the aggregate counters.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::Select {
                slots_scanned,
                missing_records,
                null_keys,
                selected,
            } => {
                m.selections = m.selections.saturating_add(1);
                m.slots_scanned = m.slots_scanned.saturating_add(slots_scanned);
                m.missing_records_skipped =
                    m.missing_records_skipped.saturating_add(missing_records);
                m.null_keys_skipped = m.null_keys_skipped.saturating_add(null_keys);
                if !selected {
                    m.empty_results = m.empty_results.saturating_add(1);
                }
            }
            MetricsEvent::Accumulate { replaced } => {
                m.accumulate_calls = m.accumulate_calls.saturating_add(1);
                if replaced {
                    m.state_replacements = m.state_replacements.saturating_add(1);
                }
            }
            MetricsEvent::Cleanup => m.cleanups = m.cleanups.saturating_add(1),
            MetricsEvent::ProgressSignal => {
                m.progress_signals = m.progress_signals.saturating_add(1);
            }
            MetricsEvent::Failure { .. } => m.failures = m.failures.saturating_add(1),
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the counters of the current thread.
#[must_use]
pub fn metrics_report() -> metrics::AggregateCounters {
    metrics::with_state(Clone::clone)
}

/// Reset all counters of the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
#[cfg(test)]
pub(crate) fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
