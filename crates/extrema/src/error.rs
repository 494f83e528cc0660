use derive_more::Display;
use extrema_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::InvalidConfig => ErrorKind::InvalidConfig,
            ErrorClass::Internal if err.field_error().is_some() => ErrorKind::InvalidInput,
            ErrorClass::Internal | ErrorClass::InvariantViolation => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

///
/// ErrorKind
/// Public error taxonomy for hosts.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Aggregate options could not be turned into a configuration.
    InvalidConfig,

    /// A record in the group cannot be keyed or compared; the group fails.
    InvalidInput,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
/// Public origin taxonomy for hosts.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Selector,
    Evaluate,
    Algebraic,
    Accumulator,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Selector => Self::Selector,
            CoreErrorOrigin::Evaluate => Self::Evaluate,
            CoreErrorOrigin::Algebraic => Self::Algebraic,
            CoreErrorOrigin::Accumulator => Self::Accumulator,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use extrema_core::aggregate::ExtremalRecordByField;

    #[test]
    fn config_failure_maps_to_invalid_config() {
        let internal = ExtremalRecordByField::parse("zero", None)
            .expect_err("non-numeric field index must be rejected");

        let err = Error::from(internal);
        assert_eq!(err.kind, ErrorKind::InvalidConfig);
        assert_eq!(err.origin, ErrorOrigin::Config);
    }

    #[test]
    fn invariant_violation_maps_to_internal() {
        let internal = InternalError::new(
            ErrorClass::InvariantViolation,
            CoreErrorOrigin::Accumulator,
            "broken",
        );

        let err = Error::from(internal);
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.origin, ErrorOrigin::Accumulator);
        assert_eq!(err.to_string(), "broken");
    }

    #[test]
    fn error_round_trips_through_json() {
        let err = Error::new(ErrorKind::InvalidInput, ErrorOrigin::Evaluate, "bad key");

        let json = serde_json::to_string(&err).expect("error serializes");
        assert_eq!(
            json,
            r#"{"kind":"InvalidInput","origin":"Evaluate","message":"bad key"}"#
        );
        let back: Error = serde_json::from_str(&json).expect("error deserializes");
        assert_eq!(back, err);
    }
}
