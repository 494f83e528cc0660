//! Module: aggregate::config
//! Responsibility: construction-time options (field position, direction, progress cadence).
//! Does not own: selection or fold semantics.
//! Boundary: every adapter is built from one validated `AggregateConfig`.

use crate::{DEFAULT_FIELD_INDEX, DEFAULT_ORDER, PROGRESS_FREQUENCY, error::InternalError};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error as ThisError;

// Order tokens that select the minimum; matched as lowercase prefixes.
const MINIMIZE_PREFIXES: [&str; 5] = ["min", "desc", "-", "small", "least"];

///
/// ConfigError
///
/// Construction-time failures. An aggregate never runs misconfigured.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("field index is not an integer: {input}")]
    FieldIndexNotNumeric { input: String },

    #[error("field index cannot be less than 1: {input}")]
    FieldIndexBelowOne { input: String },

    #[error("progress frequency must be at least 1")]
    ZeroProgressFrequency,
}

///
/// Direction
///
/// Which extreme of the comparison key is selected.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Maximize,
    Minimize,
}

impl Direction {
    /// Parse one host order option.
    ///
    /// `None` and unrecognized tokens select `Maximize`; tokens starting with
    /// `min`, `desc`, `-`, `small` or `least` (case-insensitive) select `Minimize`.
    #[must_use]
    pub fn parse(order: Option<&str>) -> Self {
        let Some(order) = order else {
            return Self::Maximize;
        };
        let order = order.trim().to_lowercase();

        if MINIMIZE_PREFIXES
            .iter()
            .any(|prefix| order.starts_with(prefix))
        {
            Self::Minimize
        } else {
            Self::Maximize
        }
    }

    /// Return true when `candidate_vs_best` means the candidate strictly beats the best.
    ///
    /// Equal keys never replace, so the first record seen wins ties.
    #[must_use]
    pub const fn prefers(self, candidate_vs_best: Ordering) -> bool {
        matches!(
            (self, candidate_vs_best),
            (Self::Maximize, Ordering::Greater) | (Self::Minimize, Ordering::Less)
        )
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Maximize => "max",
            Self::Minimize => "min",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// FieldIndex
///
/// 0-based position of the comparison key, built from a 1-based option.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldIndex(usize);

impl FieldIndex {
    /// Parse one 1-based host option into a 0-based slot.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let position: i64 = input
            .trim()
            .parse()
            .map_err(|_| ConfigError::FieldIndexNotNumeric {
                input: input.to_string(),
            })?;

        // 1-based on the wire, 0-based internally
        let index = position.saturating_sub(1);
        let index = usize::try_from(index).map_err(|_| ConfigError::FieldIndexBelowOne {
            input: input.to_string(),
        })?;

        Ok(Self(index))
    }

    /// Build directly from a 0-based slot.
    #[must_use]
    pub const fn from_zero_based(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// 1-based position as the host spelled it; saturates at `usize::MAX`.
    #[must_use]
    pub const fn position(self) -> usize {
        self.0.saturating_add(1)
    }
}

impl fmt::Display for FieldIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position())
    }
}

///
/// AggregateConfig
///
/// Validated configuration shared by the one-shot, algebraic and
/// accumulator adapters. Fixed for the lifetime of an aggregate instance.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AggregateConfig {
    pub field_index: FieldIndex,
    pub direction: Direction,
    pub progress_frequency: u32,
}

impl AggregateConfig {
    /// Parse the two host string options.
    pub fn parse(field_index: &str, order: Option<&str>) -> Result<Self, InternalError> {
        let field_index = FieldIndex::parse(field_index).map_err(InternalError::config)?;

        Ok(Self {
            field_index,
            direction: Direction::parse(order),
            progress_frequency: PROGRESS_FREQUENCY,
        })
    }

    /// Maximize over the given 1-based field.
    pub fn for_field(field_index: &str) -> Result<Self, InternalError> {
        Self::parse(field_index, Some(DEFAULT_ORDER))
    }

    #[must_use]
    pub const fn new(field_index: FieldIndex, direction: Direction) -> Self {
        Self {
            field_index,
            direction,
            progress_frequency: PROGRESS_FREQUENCY,
        }
    }

    /// Override the progress cadence; zero is rejected.
    pub fn with_progress_frequency(mut self, frequency: u32) -> Result<Self, InternalError> {
        if frequency == 0 {
            return Err(InternalError::config(ConfigError::ZeroProgressFrequency));
        }
        self.progress_frequency = frequency;

        Ok(self)
    }
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self::new(FieldIndex::default(), Direction::Maximize)
    }
}

///
/// AggregateOptions
///
/// Raw option block as a host hands it over, e.g. decoded from a plan's
/// JSON arguments. All keys are optional.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregateOptions {
    pub field_index: Option<String>,
    pub order: Option<String>,
    pub progress_frequency: Option<u32>,
}

impl AggregateOptions {
    /// Validate this option block into a runnable configuration.
    pub fn into_config(self) -> Result<AggregateConfig, InternalError> {
        let field_index = self.field_index.as_deref().unwrap_or(DEFAULT_FIELD_INDEX);
        let config = AggregateConfig::parse(field_index, self.order.as_deref())?;

        match self.progress_frequency {
            Some(frequency) => config.with_progress_frequency(frequency),
            None => Ok(config),
        }
    }
}

///
/// TESTS
///
