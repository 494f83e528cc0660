//! Liveness signalling for long scans.
//!
//! A scan over a large group can run for a long time inside a task that a
//! cluster watchdog kills when it goes silent. The selector calls the
//! injected reporter once per `progress_frequency` slots.

use crate::obs::sink::{self, MetricsEvent};
use std::sync::atomic::{AtomicU64, Ordering};

///
/// ProgressReporter
///

pub trait ProgressReporter: Send + Sync {
    fn progress(&self);
}

///
/// CountingProgress
///
/// Reporter that only counts signals; hosts poll `signals()` from a
/// heartbeat thread.
///

#[derive(Debug, Default)]
pub struct CountingProgress {
    signals: AtomicU64,
}

impl CountingProgress {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            signals: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn signals(&self) -> u64 {
        self.signals.load(Ordering::Relaxed)
    }
}

impl ProgressReporter for CountingProgress {
    fn progress(&self) {
        self.signals.fetch_add(1, Ordering::Relaxed);
    }
}

///
/// ProgressTicker
///
/// Per-scan slot counter that fires the reporter on every full batch.
///

pub(crate) struct ProgressTicker<'a> {
    reporter: Option<&'a dyn ProgressReporter>,
    frequency: u64,
    seen: u64,
}

impl<'a> ProgressTicker<'a> {
    pub(crate) fn new(reporter: Option<&'a dyn ProgressReporter>, frequency: u32) -> Self {
        Self {
            reporter,
            frequency: u64::from(frequency.max(1)),
            seen: 0,
        }
    }

    /// Count one scanned slot.
    pub(crate) fn tick(&mut self) {
        self.seen = self.seen.saturating_add(1);

        let Some(reporter) = self.reporter else {
            return;
        };
        if self.seen % self.frequency == 0 {
            reporter.progress();
            sink::record(MetricsEvent::ProgressSignal);
        }
    }

    pub(crate) const fn seen(&self) -> u64 {
        self.seen
    }
}

///
/// TESTS
///
