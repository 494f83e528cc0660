use crate::aggregate::{ConfigError, FieldValueError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without a typed detail payload.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a configuration error raised while building an aggregate.
    pub(crate) fn config(err: ConfigError) -> Self {
        Self {
            class: ErrorClass::InvalidConfig,
            origin: ErrorOrigin::Config,
            message: err.to_string(),
            detail: Some(ErrorDetail::Config(err)),
        }
    }

    /// Wrap a field extraction/comparison failure with the component context.
    ///
    /// The message prefix is stable so hosts can match on it in job logs.
    pub(crate) fn field_failure(
        origin: ErrorOrigin,
        context: impl fmt::Display,
        err: FieldValueError,
    ) -> Self {
        Self {
            class: ErrorClass::Internal,
            origin,
            message: format!("error while computing extremal record {context} in {origin}: {err}"),
            detail: Some(ErrorDetail::Field(err)),
        }
    }

    /// Re-home an error under an outer component without losing its detail.
    #[must_use]
    pub(crate) fn with_origin(mut self, origin: ErrorOrigin) -> Self {
        if self.origin != origin {
            self.message = self
                .message
                .replacen(&format!("in {}", self.origin), &format!("in {origin}"), 1);
            self.origin = origin;
        }

        self
    }

    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidConfig)
    }

    /// Borrow the typed field failure, if this error carries one.
    #[must_use]
    pub const fn field_error(&self) -> Option<&FieldValueError> {
        match &self.detail {
            Some(ErrorDetail::Field(err)) => Some(err),
            _ => None,
        }
    }

    /// Borrow the typed configuration failure, if this error carries one.
    #[must_use]
    pub const fn config_error(&self) -> Option<&ConfigError> {
        match &self.detail {
            Some(ErrorDetail::Config(err)) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Config(ConfigError),
    #[error("{0}")]
    Field(FieldValueError),
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidConfig,
    Internal,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidConfig => "invalid_config",
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Selector,
    Evaluate,
    Algebraic,
    Accumulator,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Selector => "selector",
            Self::Evaluate => "evaluate",
            Self::Algebraic => "algebraic",
            Self::Accumulator => "accumulator",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
