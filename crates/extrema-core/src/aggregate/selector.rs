//! Module: aggregate::selector
//! Responsibility: the single-scan extremal-record reduction every strategy funnels into.
//! Does not own: strategy shapes (one-shot, algebraic, accumulator) or state retention.
//! Boundary: borrows its input and returns a borrowed winner; callers copy what they keep.

use crate::{
    aggregate::{
        config::AggregateConfig,
        field::{self, FieldValueError},
    },
    error::{ErrorOrigin, InternalError},
    obs::{
        progress::{ProgressReporter, ProgressTicker},
        sink::{self, MetricsEvent},
    },
    record::{Bag, Record},
    value::Value,
};
use std::fmt;

///
/// ExtremalSelector
///
/// Scans one bag of record slots exactly once and returns the record whose
/// comparison key is extreme under the configured direction.
///
/// - missing slots and null keys are skipped, never selected
/// - a candidate replaces the best-so-far only when strictly better, so the
///   first record seen wins ties within one scan
/// - extraction/comparison failures abort the scan; no partial result
///

#[derive(Clone, Copy)]
pub struct ExtremalSelector<'a> {
    config: AggregateConfig,
    reporter: Option<&'a dyn ProgressReporter>,
}

impl<'a> ExtremalSelector<'a> {
    #[must_use]
    pub const fn new(config: AggregateConfig) -> Self {
        Self {
            config,
            reporter: None,
        }
    }

    #[must_use]
    pub const fn with_reporter(mut self, reporter: Option<&'a dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[must_use]
    pub const fn config(&self) -> AggregateConfig {
        self.config
    }

    /// Select the extremal record of one group.
    ///
    /// An absent group or an empty bag yields `None` without scanning.
    pub fn select<'r>(&self, group: Option<&'r Bag>) -> Result<Option<&'r Record>, InternalError> {
        let Some(bag) = group else {
            return Ok(None);
        };
        if bag.is_empty() {
            return Ok(None);
        }

        self.select_from(bag.slots())
    }

    /// Select the extremal record from any ordered stream of record slots.
    pub fn select_from<'r, I>(&self, slots: I) -> Result<Option<&'r Record>, InternalError>
    where
        I: IntoIterator<Item = Option<&'r Record>>,
    {
        let field_index = self.config.field_index;
        let direction = self.config.direction;

        let mut ticker = ProgressTicker::new(self.reporter, self.config.progress_frequency);
        let mut missing_records = 0u64;
        let mut null_keys = 0u64;
        let mut best: Option<(&'r Record, &'r Value)> = None;

        for slot in slots {
            ticker.tick();

            let Some(record) = slot else {
                missing_records += 1;
                continue;
            };
            let key = match field::extract_key(record, field_index) {
                Ok(Some(key)) => key,
                Ok(None) => {
                    null_keys += 1;
                    continue;
                }
                Err(err) => return Err(self.fail(err)),
            };

            let replace = match best {
                Some((_, best_key)) => {
                    let ordering = field::compare_keys(field_index, key, best_key)
                        .map_err(|err| self.fail(err))?;
                    direction.prefers(ordering)
                }
                None => true,
            };
            if replace {
                best = Some((record, key));
            }
        }

        let selected = best.map(|(record, _)| record);
        sink::record(MetricsEvent::Select {
            slots_scanned: ticker.seen(),
            missing_records,
            null_keys,
            selected: selected.is_some(),
        });
        tracing::trace!(
            field = field_index.position(),
            %direction,
            slots_scanned = ticker.seen(),
            missing_records,
            null_keys,
            selected = selected.is_some(),
            "extremal scan finished"
        );

        Ok(selected)
    }

    /// Decide whether `candidate` displaces a retained `current` record.
    ///
    /// Folds retained state only: no scan metrics, no progress ticks. Equal
    /// keys keep `current`; a keyless side never wins.
    pub(crate) fn prefers_candidate(
        &self,
        current: &Record,
        candidate: &Record,
    ) -> Result<bool, InternalError> {
        let field_index = self.config.field_index;
        let current_key = field::extract_key(current, field_index).map_err(|err| self.fail(err))?;
        let candidate_key =
            field::extract_key(candidate, field_index).map_err(|err| self.fail(err))?;

        match (current_key, candidate_key) {
            (Some(current_key), Some(candidate_key)) => {
                let ordering = field::compare_keys(field_index, candidate_key, current_key)
                    .map_err(|err| self.fail(err))?;

                Ok(self.config.direction.prefers(ordering))
            }
            (None, Some(_)) => Ok(true),
            (_, None) => Ok(false),
        }
    }

    // Wrap one field failure with the stable diagnostic for this aggregate.
    fn fail(&self, err: FieldValueError) -> InternalError {
        sink::record(MetricsEvent::Failure {
            origin: ErrorOrigin::Selector,
        });
        tracing::warn!(
            field = self.config.field_index.position(),
            direction = %self.config.direction,
            error = %err,
            "extremal scan failed"
        );

        InternalError::field_failure(ErrorOrigin::Selector, ScanContext(self.config), err)
    }
}

// Diagnostic context rendered into wrapped failures.
struct ScanContext(AggregateConfig);

impl fmt::Display for ScanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "by field {} ({})", self.0.field_index, self.0.direction)
    }
}
