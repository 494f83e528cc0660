//! Module: aggregate::field
//! Responsibility: comparison-key extraction and strict key comparison.
//! Does not own: scan order, tie-break policy, or progress signalling.
//! Boundary: the selector is the only caller; failures surface as `FieldValueError`.

use crate::{aggregate::config::FieldIndex, record::Record, value::Value};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// FieldValueError
///
/// Typed key extraction/comparison failures. These reflect bad or
/// inconsistent input data, so they are never retried.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FieldValueError {
    #[error("field index {index} is out of range for record of arity {arity}")]
    FieldOutOfRange { index: usize, arity: usize },

    #[error("comparison key does not support ordering: field={index} kind={kind}")]
    UnsupportedOrdering { index: usize, kind: &'static str },

    #[error(
        "comparison keys are incomparable under strict ordering: field={index} left={left:?} right={right:?}"
    )]
    IncomparableValues {
        index: usize,
        left: Box<Value>,
        right: Box<Value>,
    },
}

/// Extract the comparison key of one record.
///
/// Returns `Ok(None)` for a null key: the record is ineligible, not invalid.
pub(crate) fn extract_key(
    record: &Record,
    field_index: FieldIndex,
) -> Result<Option<&Value>, FieldValueError> {
    let index = field_index.get();
    let Some(value) = record.field(index) else {
        return Err(FieldValueError::FieldOutOfRange {
            index,
            arity: record.arity(),
        });
    };
    if value.is_null() {
        return Ok(None);
    }
    if !value.supports_ordering() {
        return Err(FieldValueError::UnsupportedOrdering {
            index,
            kind: value.kind_label(),
        });
    }

    Ok(Some(value))
}

/// Compare two extracted keys under strict same-variant ordering semantics.
pub(crate) fn compare_keys(
    field_index: FieldIndex,
    left: &Value,
    right: &Value,
) -> Result<Ordering, FieldValueError> {
    Value::strict_order_cmp(left, right).ok_or_else(|| FieldValueError::IncomparableValues {
        index: field_index.get(),
        left: Box::new(left.clone()),
        right: Box::new(right.clone()),
    })
}

///
/// TESTS
///
