//! Module: aggregate::evaluate
//! Responsibility: the host-facing aggregate function and its one-shot entry point.
//! Does not own: the scan itself (selector) or retained fold state (accumulator).
//! Boundary: every strategy adapter is built from one `ExtremalRecordByField`.

use crate::{
    aggregate::{
        accumulator::{Accumulator, ExtremalAccumulator},
        algebraic::{Algebraic, AlgebraicStage, StageFunction},
        config::{AggregateConfig, Direction, FieldIndex},
        selector::ExtremalSelector,
    },
    error::{ErrorOrigin, InternalError},
    obs::progress::ProgressReporter,
    record::{Bag, Record, RecordSchema},
};
use std::{fmt, sync::Arc};

///
/// ReturnKind
///
/// Declared result shape of the aggregate, reported to the host planner.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReturnKind {
    Record,
}

///
/// ExecutionMode
///
/// Calling convention a host picked for one group.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutionMode {
    OneShot,
    Algebraic,
    Accumulative,
}

///
/// ExtremalRecordByField
///
/// Aggregate returning the record with the extreme value at one field.
/// Cheap to clone; clones share the progress reporter and nothing else.
///

#[derive(Clone, Default)]
pub struct ExtremalRecordByField {
    config: AggregateConfig,
    reporter: Option<Arc<dyn ProgressReporter>>,
}

impl ExtremalRecordByField {
    #[must_use]
    pub const fn new(config: AggregateConfig) -> Self {
        Self {
            config,
            reporter: None,
        }
    }

    /// Build from the two host string options.
    pub fn parse(field_index: &str, order: Option<&str>) -> Result<Self, InternalError> {
        AggregateConfig::parse(field_index, order).map(Self::new)
    }

    /// Maximize over the given 1-based field.
    pub fn for_field(field_index: &str) -> Result<Self, InternalError> {
        AggregateConfig::for_field(field_index).map(Self::new)
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    #[must_use]
    pub const fn config(&self) -> AggregateConfig {
        self.config
    }

    #[must_use]
    pub const fn field_index(&self) -> FieldIndex {
        self.config.field_index
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.config.direction
    }

    /// Borrow a selector bound to this aggregate's configuration and reporter.
    #[must_use]
    pub fn selector(&self) -> ExtremalSelector<'_> {
        ExtremalSelector::new(self.config).with_reporter(self.reporter.as_deref())
    }

    /// One-shot evaluation over a fully materialized group.
    pub fn evaluate(&self, group: Option<&Bag>) -> Result<Option<Record>, InternalError> {
        let selected = self
            .selector()
            .select(group)
            .map_err(|err| err.with_origin(ErrorOrigin::Evaluate))?;

        Ok(selected.cloned())
    }

    /// The result is an unmodified input record, so the schema passes through.
    #[must_use]
    pub fn output_schema(&self, input: &RecordSchema) -> RecordSchema {
        input.clone()
    }

    #[must_use]
    pub const fn return_kind(&self) -> ReturnKind {
        ReturnKind::Record
    }

    /// Fresh accumulator with empty running state.
    #[must_use]
    pub fn accumulator(&self) -> ExtremalAccumulator {
        ExtremalAccumulator::new(self.clone())
    }

    /// Run the algebraic pipeline over a group already split into partitions.
    ///
    /// Initial runs per partition, one intermediate tier combines every
    /// initial result, and final runs over the single intermediate result.
    pub fn evaluate_partitioned<'a>(
        &self,
        partitions: impl IntoIterator<Item = &'a Bag>,
    ) -> Result<Option<Record>, InternalError> {
        let initial = self.initial();
        let partials = partitions
            .into_iter()
            .map(|partition| initial.combine(Some(partition)))
            .collect::<Result<Bag, _>>()?;

        let combined = self.intermediate().combine(Some(&partials))?;

        self.final_stage()
            .combine(Some(&Bag::from_partials([combined])))
    }

    /// Drive one materialized group through the requested calling convention.
    pub fn run(
        &self,
        mode: ExecutionMode,
        group: Option<&Bag>,
    ) -> Result<Option<Record>, InternalError> {
        tracing::debug!(
            field = self.config.field_index.position(),
            direction = %self.config.direction,
            ?mode,
            slots = group.map_or(0, Bag::len),
            "running extremal aggregate"
        );

        match mode {
            ExecutionMode::OneShot => self.evaluate(group),
            ExecutionMode::Algebraic => {
                let partial = self.initial().combine(group)?;

                self.final_stage()
                    .combine(Some(&Bag::from_partials([partial])))
            }
            ExecutionMode::Accumulative => {
                let mut accumulator = self.accumulator();
                accumulator.accumulate(group)?;
                let value = accumulator.value().cloned();
                accumulator.cleanup();

                Ok(value)
            }
        }
    }
}

impl Algebraic for ExtremalRecordByField {
    fn stage(&self, stage: AlgebraicStage) -> StageFunction {
        StageFunction::new(stage, self.clone())
    }
}

impl fmt::Debug for ExtremalRecordByField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtremalRecordByField")
            .field("config", &self.config)
            .field("has_reporter", &self.reporter.is_some())
            .finish()
    }
}
