use super::{aggregate, bag, row};
use crate::{
    aggregate::{
        AggregateConfig, Direction, ExtremalRecordByField, ExtremalSelector, FieldIndex,
        FieldValueError,
    },
    error::{ErrorClass, ErrorOrigin},
    obs::{CountingProgress, metrics_report, metrics_reset_all},
    record,
    record::{Bag, Record},
    value::Value,
};
use std::sync::Arc;

#[test]
fn absent_and_empty_groups_yield_no_result() {
    let max = aggregate("max");

    assert_eq!(max.evaluate(None).expect("absent group is not an error"), None);
    assert_eq!(
        max.evaluate(Some(&Bag::new()))
            .expect("empty group is not an error"),
        None
    );
}

#[test]
fn selects_unique_maximum_and_minimum() {
    let group = bag([row(4i64, "a"), row(9i64, "b"), row(-2i64, "c"), row(5i64, "d")]);

    let max = aggregate("max")
        .evaluate(Some(&group))
        .expect("max should evaluate");
    let min = aggregate("min")
        .evaluate(Some(&group))
        .expect("min should evaluate");

    assert_eq!(max, Some(row(9i64, "b")));
    assert_eq!(min, Some(row(-2i64, "c")));
}

#[test]
fn first_record_wins_ties() {
    let group = bag([row(3i64, "first"), row(3i64, "second"), row(1i64, "low")]);

    let max = aggregate("max")
        .evaluate(Some(&group))
        .expect("max should evaluate");
    assert_eq!(max, Some(row(3i64, "first")));

    let group = bag([row(1i64, "first"), row(8i64, "high"), row(1i64, "second")]);
    let min = aggregate("least")
        .evaluate(Some(&group))
        .expect("min should evaluate");
    assert_eq!(min, Some(row(1i64, "first")));
}

#[test]
fn null_keys_are_skipped_regardless_of_position() {
    let expected = Some(row(7i64, "top"));
    let layouts = [
        bag([row(None::<i64>, "n1"), row(7i64, "top"), row(2i64, "x")]),
        bag([row(7i64, "top"), row(None::<i64>, "n1"), row(2i64, "x")]),
        bag([row(2i64, "x"), row(7i64, "top"), row(None::<i64>, "n1")]),
        bag([row(7i64, "top"), row(2i64, "x")]),
    ];

    for group in &layouts {
        let selected = aggregate("max")
            .evaluate(Some(group))
            .expect("null keys are not an error");
        assert_eq!(selected, expected);
    }
}

#[test]
fn all_null_group_yields_no_result() {
    let group = bag([row(None::<i64>, "a"), row(None::<i64>, "b")]);

    assert_eq!(
        aggregate("max")
            .evaluate(Some(&group))
            .expect("all-null group is not an error"),
        None
    );
    assert_eq!(
        aggregate("min")
            .evaluate(Some(&group))
            .expect("all-null group is not an error"),
        None
    );
}

#[test]
fn missing_slots_are_skipped() {
    let group = Bag::from_partials([None, Some(row(2i64, "a")), None, Some(row(5i64, "b"))]);

    let selected = aggregate("max")
        .evaluate(Some(&group))
        .expect("missing slots are not an error");
    assert_eq!(selected, Some(row(5i64, "b")));

    let only_missing = Bag::from_partials([None, None]);
    assert_eq!(
        aggregate("max")
            .evaluate(Some(&only_missing))
            .expect("missing slots are not an error"),
        None
    );
}

#[test]
fn selects_by_configured_field_position() {
    let function = ExtremalRecordByField::parse("3", Some("desc")).expect("field 3 is valid");
    let group = bag([
        record!["a", 1i64, "pear"],
        record!["b", 2i64, "apple"],
        record!["c", 3i64, "fig"],
    ]);

    let selected = function.evaluate(Some(&group)).expect("text keys compare");
    assert_eq!(selected, Some(record!["b", 2i64, "apple"]));
}

#[test]
fn result_is_an_unmodified_input_record() {
    let input = record![12i64, "payload", Value::List(vec![Value::Int(1)]), None::<u64>];
    let group = bag([row(1i64, "low"), input.clone()]);

    let selected = aggregate("max")
        .evaluate(Some(&group))
        .expect("list in a non-key field is fine");
    assert_eq!(selected, Some(input));
}

#[test]
fn out_of_range_field_is_an_internal_error() {
    let function = ExtremalRecordByField::parse("4", None).expect("field 4 is valid configuration");
    let group = bag([record![1i64, 2i64]]);

    let err = function
        .evaluate(Some(&group))
        .expect_err("record without field 4 must fail");

    assert_eq!(err.class, ErrorClass::Internal);
    assert_eq!(err.origin, ErrorOrigin::Evaluate);
    assert!(err.message.starts_with("error while computing extremal record by field 4 (max)"));
    assert!(matches!(
        err.field_error(),
        Some(FieldValueError::FieldOutOfRange { index: 3, arity: 2 })
    ));
}

#[test]
fn mismatched_key_variants_fail_the_group() {
    let group = bag([row(1i64, "int"), row("one", "text")]);

    let err = aggregate("max")
        .evaluate(Some(&group))
        .expect_err("mixed key variants must fail");

    assert!(matches!(
        err.field_error(),
        Some(FieldValueError::IncomparableValues { index: 0, .. })
    ));
}

#[test]
fn list_key_is_rejected_even_alone() {
    let group = bag([row(Value::List(vec![Value::Int(3)]), "list")]);

    let err = aggregate("max")
        .evaluate(Some(&group))
        .expect_err("list keys do not support ordering");

    assert!(matches!(
        err.field_error(),
        Some(FieldValueError::UnsupportedOrdering { kind: "list", .. })
    ));
}

#[test]
fn selector_direct_errors_report_selector_origin() {
    let selector = ExtremalSelector::new(AggregateConfig::new(
        FieldIndex::from_zero_based(2),
        Direction::Minimize,
    ));
    let group = bag([record![1i64]]);

    let err = selector
        .select(Some(&group))
        .expect_err("missing field must fail");
    assert_eq!(err.origin, ErrorOrigin::Selector);
    assert!(err.message.contains("by field 3 (min) in selector"));
}

#[test]
fn max_field_index_reports_out_of_range_without_overflow() {
    let selector = ExtremalSelector::new(AggregateConfig::new(
        FieldIndex::from_zero_based(usize::MAX),
        Direction::Maximize,
    ));
    let group = bag([record![1i64]]);

    let err = selector
        .select(Some(&group))
        .expect_err("huge field index must fail");

    assert!(matches!(
        err.field_error(),
        Some(FieldValueError::FieldOutOfRange { index: usize::MAX, arity: 1 })
    ));
    assert!(err.message.contains(&format!("by field {} (max)", usize::MAX)));
}

#[test]
fn select_from_accepts_lazy_slot_streams() {
    let records: Vec<Record> = (0..10i64).map(|n| row(n * 7 % 10, "lazy")).collect();
    let function = aggregate("max");

    let selected = function
        .selector()
        .select_from(records.iter().map(Some))
        .expect("lazy stream should evaluate");

    assert_eq!(selected.and_then(|record| record.field(0)), Some(&Value::Int(9)));
}

#[test]
fn progress_reporter_fires_per_full_batch() {
    metrics_reset_all();
    let reporter = Arc::new(CountingProgress::new());
    let config = AggregateConfig::default()
        .with_progress_frequency(10)
        .expect("10 is a valid cadence");
    let function = ExtremalRecordByField::new(config).with_reporter(reporter.clone());

    let mut group = Bag::new();
    for n in 0..25i64 {
        group.push(row(n, "p"));
    }
    group.push_missing();

    let selected = function
        .evaluate(Some(&group))
        .expect("group should evaluate");

    assert_eq!(selected, Some(row(24i64, "p")));
    assert_eq!(reporter.signals(), 2);
    assert_eq!(metrics_report().progress_signals, 2);
}

#[test]
fn scan_metrics_count_skipped_slots() {
    metrics_reset_all();
    let group = Bag::from_partials([
        Some(row(1i64, "a")),
        None,
        Some(row(None::<i64>, "n")),
        Some(row(3i64, "b")),
    ]);

    aggregate("max")
        .evaluate(Some(&group))
        .expect("group should evaluate");

    let counters = metrics_report();
    assert_eq!(counters.selections, 1);
    assert_eq!(counters.slots_scanned, 4);
    assert_eq!(counters.missing_records_skipped, 1);
    assert_eq!(counters.null_keys_skipped, 1);
    assert_eq!(counters.empty_results, 0);
}
