//! Module: aggregate
//! Responsibility: the extremal-record aggregate and its three calling conventions.
//! Does not own: group formation, partitioning, or strategy choice (host concerns).
//! Boundary: one-shot, algebraic and accumulator adapters all funnel into `ExtremalSelector`.

mod accumulator;
mod algebraic;
mod config;
mod evaluate;
mod field;
mod selector;

#[cfg(test)]
mod tests;

pub use accumulator::{Accumulator, ExtremalAccumulator};
pub use algebraic::{Algebraic, AlgebraicStage, StageFunction};
pub use config::{AggregateConfig, AggregateOptions, ConfigError, Direction, FieldIndex};
pub use evaluate::{ExecutionMode, ExtremalRecordByField, ReturnKind};
pub use field::FieldValueError;
pub use selector::ExtremalSelector;
