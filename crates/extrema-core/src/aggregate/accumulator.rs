//! Module: aggregate::accumulator
//! Responsibility: incremental batch folding into one retained extremal record.
//! Does not own: batch formation or group boundaries (the host calls `cleanup`).
//! Boundary: retained records are always owned copies, never host storage.

use crate::{
    aggregate::evaluate::ExtremalRecordByField,
    error::{ErrorOrigin, InternalError},
    obs::sink::{self, MetricsEvent},
    record::{Bag, Record},
};

///
/// Accumulator
///
/// Streaming aggregate contract: fold batches one at a time, read the
/// running value at any point, reset between groups. Calls on one instance
/// are strictly sequential.
///
/// The running value is compared ahead of each batch's candidate, so a
/// later record with an equal key never displaces it. Batch-first folding
/// would keep the later record instead; only ties are affected.
///

pub trait Accumulator {
    /// Fold one batch into the running state.
    fn accumulate(&mut self, batch: Option<&Bag>) -> Result<(), InternalError>;

    /// Current running value, without consuming it.
    fn value(&self) -> Option<&Record>;

    /// Reset the running state; required between logically distinct groups.
    fn cleanup(&mut self);
}

///
/// ExtremalAccumulator
///
/// Running state is at most one record: the extremum over every non-null
/// keyed record folded since the last cleanup.
///

#[derive(Clone, Debug)]
pub struct ExtremalAccumulator {
    function: ExtremalRecordByField,
    intermediate: Option<Record>,
}

impl ExtremalAccumulator {
    #[must_use]
    pub const fn new(function: ExtremalRecordByField) -> Self {
        Self {
            function,
            intermediate: None,
        }
    }

    #[must_use]
    pub const fn function(&self) -> &ExtremalRecordByField {
        &self.function
    }

    /// Take the running value and reset the state in one step.
    pub const fn take_value(&mut self) -> Option<Record> {
        self.intermediate.take()
    }
}

impl Accumulator for ExtremalAccumulator {
    fn accumulate(&mut self, batch: Option<&Bag>) -> Result<(), InternalError> {
        let selector = self.function.selector();
        let candidate = selector
            .select(batch)
            .map_err(|err| err.with_origin(ErrorOrigin::Accumulator))?;

        // new batch has no eligible record, don't consider it
        let Some(candidate) = candidate else {
            sink::record(MetricsEvent::Accumulate { replaced: false });
            return Ok(());
        };

        let replaced = match self.intermediate.as_ref() {
            None => true,
            Some(current) => selector
                .prefers_candidate(current, candidate)
                .map_err(|err| err.with_origin(ErrorOrigin::Accumulator))?,
        };
        if replaced {
            // copy: the host may reuse the batch storage after this call
            self.intermediate = Some(candidate.clone());
        }

        sink::record(MetricsEvent::Accumulate { replaced });
        tracing::trace!(
            field = self.function.field_index().position(),
            replaced,
            "accumulator folded batch"
        );

        Ok(())
    }

    fn value(&self) -> Option<&Record> {
        self.intermediate.as_ref()
    }

    fn cleanup(&mut self) {
        self.intermediate = None;
        sink::record(MetricsEvent::Cleanup);
    }
}
