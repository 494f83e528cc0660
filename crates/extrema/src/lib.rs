//! ## Crate layout
//! - `core`: runtime values, records, the extremal-record aggregate and its
//!   one-shot / algebraic / accumulator adapters, observability.
//! - `error`: the stable public error type hosts match on.
//!
//! The `prelude` module mirrors the runtime surface a host needs to drive
//! the aggregate under any of its calling conventions.

pub use extrema_core as core;

pub mod error;

pub use error::Error;

use extrema_core::{
    aggregate::ExtremalRecordByField,
    record::{Bag, Record},
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-call evaluation over a materialized group, reporting the public error type.
///
/// `field_index` is 1-based; `order` follows the host order-token rules.
pub fn evaluate(
    field_index: &str,
    order: Option<&str>,
    group: Option<&Bag>,
) -> Result<Option<Record>, Error> {
    let function = ExtremalRecordByField::parse(field_index, order)?;

    Ok(function.evaluate(group)?)
}

///
/// Host Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        Error,
        core::{
            aggregate::{
                Accumulator as _, AggregateConfig, AggregateOptions, Algebraic as _,
                Direction, ExecutionMode, ExtremalRecordByField, FieldIndex,
            },
            obs::ProgressReporter,
            record::{Bag, Record, RecordSchema},
            types::{Float64, Timestamp},
            value::Value,
        },
    };
    pub use extrema_core::record;
}
