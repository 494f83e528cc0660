//! Records, bags of record slots, and the pass-through record schema.

use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// Record
///
/// Ordered, fixed-arity sequence of typed fields. Cloning is a
/// field-by-field copy, so a cloned record never aliases host storage.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
pub struct Record(Vec<Value>);

impl Record {
    #[must_use]
    pub const fn new(fields: Vec<Value>) -> Self {
        Self(fields)
    }

    /// Number of fields in this record.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.0.len()
    }

    /// Borrow one field by 0-based position.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Overwrite one field in place; returns the previous value.
    ///
    /// Hosts reuse record storage between calls; this is the mutation they perform.
    pub fn set_field(&mut self, index: usize, value: Value) -> Option<Value> {
        self.0
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value))
    }

    #[must_use]
    pub fn into_fields(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Record {
    fn from(fields: Vec<Value>) -> Self {
        Self(fields)
    }
}

impl<V: Into<Value>> FromIterator<V> for Record {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Build a [`Record`] from a list of expressions convertible into [`Value`].
#[macro_export]
macro_rules! record {
    () => {
        $crate::record::Record::default()
    };
    ( $( $field:expr ),+ $(,)? ) => {
        $crate::record::Record::new(vec![ $( $crate::value::Value::from($field) ),+ ])
    };
}

///
/// Bag
///
/// Ordered collection of record slots handed over by the host for one group,
/// one partition slice, one batch, or one tier of partial results.
/// A `None` slot is a missing record and is skipped by every consumer.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Bag {
    slots: Vec<Option<Record>>,
}

impl Bag {
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Re-bag partial aggregate results; absent partials become missing slots.
    #[must_use]
    pub fn from_partials(partials: impl IntoIterator<Item = Option<Record>>) -> Self {
        Self {
            slots: partials.into_iter().collect(),
        }
    }

    pub fn push(&mut self, record: Record) {
        self.slots.push(Some(record));
    }

    pub fn push_missing(&mut self) {
        self.slots.push(None);
    }

    /// Drop every slot but keep the allocation for the next batch.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate slots in bag order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Record>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Mutable access to one present record, for hosts that reuse storage.
    pub fn record_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }
}

impl FromIterator<Record> for Bag {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}

impl FromIterator<Option<Record>> for Bag {
    fn from_iter<I: IntoIterator<Item = Option<Record>>>(iter: I) -> Self {
        Self::from_partials(iter)
    }
}

impl Extend<Record> for Bag {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.slots.extend(iter.into_iter().map(Some));
    }
}

///
/// FieldSchema
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name: String,
    pub kind: String,
}

impl FieldSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

///
/// RecordSchema
///
/// Host-supplied description of the input record layout. The aggregate
/// returns an unmodified input record, so its output schema is this one.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, PartialEq, Serialize)]
pub struct RecordSchema(Vec<FieldSchema>);

impl RecordSchema {
    #[must_use]
    pub const fn new(fields: Vec<FieldSchema>) -> Self {
        Self(fields)
    }
}

///
/// TESTS
///
