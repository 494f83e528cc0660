mod selector;

use crate::{
    aggregate::ExtremalRecordByField,
    obs::{MetricsEvent, MetricsSink, sink::with_metrics_sink},
    record,
    record::{Bag, Record},
    value::Value,
};
use std::{cell::RefCell, rc::Rc};

// ---- helpers -----------------------------------------------------------

// Record shaped (key, tag); the tag makes equal-keyed records distinguishable.
fn row(key: impl Into<Value>, tag: &str) -> Record {
    let key: Value = key.into();

    record![key, tag]
}

fn bag(records: impl IntoIterator<Item = Record>) -> Bag {
    records.into_iter().collect()
}

fn aggregate(order: &str) -> ExtremalRecordByField {
    ExtremalRecordByField::parse("1", Some(order)).expect("field 1 is a valid configuration")
}

fn key_of(record: Option<&Record>) -> Option<Value> {
    record.and_then(|record| record.field(0)).cloned()
}

// Sink that keeps every event in arrival order.
#[derive(Default)]
struct CapturingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CapturingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn capture_events(f: impl FnOnce()) -> Vec<MetricsEvent> {
    let sink = Rc::new(CapturingSink::default());
    with_metrics_sink(sink.clone(), f);

    sink.events.take()
}

// (number of scans, total slots scanned)
fn scan_totals(events: &[MetricsEvent]) -> (usize, u64) {
    events
        .iter()
        .filter_map(|event| match event {
            MetricsEvent::Select { slots_scanned, .. } => Some(*slots_scanned),
            _ => None,
        })
        .fold((0, 0), |(scans, slots), scanned| (scans + 1, slots + scanned))
}
