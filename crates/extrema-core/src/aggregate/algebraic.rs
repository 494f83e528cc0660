//! Module: aggregate::algebraic
//! Responsibility: initial / intermediate / final combine stages for partial aggregation.
//! Does not own: how the host partitions a group or shapes its reduction tree.
//! Boundary: every stage is a full selector run over whatever bag it is handed.

use crate::{
    aggregate::evaluate::ExtremalRecordByField,
    error::{ErrorOrigin, InternalError},
    record::{Bag, Record},
};
use std::fmt;

///
/// AlgebraicStage
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlgebraicStage {
    Initial,
    Intermediate,
    Final,
}

impl fmt::Display for AlgebraicStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initial => "initial",
            Self::Intermediate => "intermediate",
            Self::Final => "final",
        };
        write!(f, "{label}")
    }
}

///
/// Algebraic
///
/// Aggregates expressible as three combine stages. Selecting an extremum is
/// associative and commutative with identity "no result", so one combine
/// function serves all three.
///

pub trait Algebraic {
    /// Build the combine function for one stage.
    fn stage(&self, stage: AlgebraicStage) -> StageFunction;

    /// Applied to raw leaf-level slices of a group.
    fn initial(&self) -> StageFunction {
        self.stage(AlgebraicStage::Initial)
    }

    /// Applied zero or more times to bags of earlier partial results.
    fn intermediate(&self) -> StageFunction {
        self.stage(AlgebraicStage::Intermediate)
    }

    /// Applied once at the root; its result is the externally visible answer.
    fn final_stage(&self) -> StageFunction {
        self.stage(AlgebraicStage::Final)
    }
}

///
/// StageFunction
///
/// One independently invokable combine stage, configured exactly like the
/// aggregate that produced it.
///

#[derive(Clone, Debug)]
pub struct StageFunction {
    stage: AlgebraicStage,
    function: ExtremalRecordByField,
}

impl StageFunction {
    pub(crate) const fn new(stage: AlgebraicStage, function: ExtremalRecordByField) -> Self {
        Self { stage, function }
    }

    #[must_use]
    pub const fn stage(&self) -> AlgebraicStage {
        self.stage
    }

    /// Combine one bag of records or partial results into a single partial result.
    pub fn combine(&self, partials: Option<&Bag>) -> Result<Option<Record>, InternalError> {
        let selected = self
            .function
            .selector()
            .select(partials)
            .map_err(|err| err.with_origin(ErrorOrigin::Algebraic))?;

        tracing::trace!(
            stage = %self.stage,
            inputs = partials.map_or(0, Bag::len),
            selected = selected.is_some(),
            "algebraic combine"
        );

        Ok(selected.cloned())
    }
}
