//! Core runtime for Extrema: values, records, the extremal-record selector,
//! its one-shot / algebraic / accumulator adapters, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod aggregate;
pub mod error;
pub mod obs;
pub mod record;
pub mod types;
pub mod value;

///
/// CONSTANTS
///

/// Number of scanned slots between two progress signals.
pub const PROGRESS_FREQUENCY: u32 = 10_000;

/// Default 1-based field position when the host passes no field option.
pub const DEFAULT_FIELD_INDEX: &str = "1";

/// Default ordering token when the host passes no order option.
pub const DEFAULT_ORDER: &str = "max";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        aggregate::{
            Accumulator, AggregateConfig, Algebraic, AlgebraicStage, Direction,
            ExtremalAccumulator, ExtremalRecordByField, FieldIndex,
        },
        record::{Bag, Record},
        value::Value,
    };
}
