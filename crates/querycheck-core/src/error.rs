use crate::{diagnostic::TypeMismatchError, schema::SchemaError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// CheckError
///
/// Everything a checker pass can end with.
/// `Mismatch` is recoverable by configuration; `Internal` never is.
///

#[derive(Debug, ThisError)]
pub enum CheckError {
    #[error(transparent)]
    Mismatch(#[from] TypeMismatchError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CheckError {
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }

    #[must_use]
    pub const fn as_mismatch(&self) -> Option<&TypeMismatchError> {
        match self {
            Self::Mismatch(err) => Some(err),
            Self::Internal(_) => None,
        }
    }
}

impl From<SchemaError> for CheckError {
    fn from(err: SchemaError) -> Self {
        Self::Internal(err.into())
    }
}

///
/// InternalError
///
/// Structured failure with a stable internal classification.
/// Raised when the checker meets a tree or metadata shape it cannot handle;
/// always fatal, never routed through a diagnostic sink.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a resolver-origin invariant violation.
    pub(crate) fn resolver_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Resolver,
            message.into(),
        )
    }

    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self.class, ErrorClass::InvariantViolation)
    }
}

impl From<SchemaError> for InternalError {
    fn from(err: SchemaError) -> Self {
        let class = match err {
            SchemaError::CompositeIdentifier { .. }
            | SchemaError::MissingIdentifier { .. }
            | SchemaError::DuplicateEntity { .. }
            | SchemaError::DuplicateField { .. } => ErrorClass::Unsupported,
            SchemaError::UnknownAlias { .. }
            | SchemaError::UnknownEntity { .. }
            | SchemaError::UnknownField { .. }
            | SchemaError::UnknownAssociation { .. } => ErrorClass::NotFound,
        };

        Self::new(class, ErrorOrigin::Schema, err.to_string())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Resolver,
    Schema,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resolver => "resolver",
            Self::Schema => "schema",
        };
        write!(f, "{label}")
    }
}
