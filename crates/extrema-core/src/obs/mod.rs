//! Observability: progress signalling, runtime counters, and sink abstractions.
//!
//! Nothing here may influence aggregate results.

pub(crate) mod metrics;
pub mod progress;
pub(crate) mod sink;

// re-exports
pub use metrics::AggregateCounters;
pub use progress::{CountingProgress, ProgressReporter};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
