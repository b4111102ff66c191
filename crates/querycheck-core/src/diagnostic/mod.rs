//! Mismatch delivery boundary.
//!
//! The walker never decides on its own whether a mismatch aborts the pass.
//! It hands every `TypeMismatchError` to a `DiagnosticsPolicy`, which either
//! aborts or forwards the error to a `DiagnosticSink` and continues.

mod registry;


pub use registry::{registered_sink, set_diagnostic_sink, with_diagnostic_sink};

use crate::types::{CompatibleTypeSet, TypeToken};
use std::{fmt, sync::Arc};
use thiserror::Error as ThisError;

/// Default log target for mismatch diagnostics.
pub const DEFAULT_LOG_TARGET: &str = "querycheck";

///
/// TypeMismatchError
///
/// A parameter whose resolved type is outside the field's compatible set
/// (after widening).
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error(
    "parameter \"{parameter}\" is of type \"{actual}\", but expected {expected} (because it's used in expression with {field})"
)]
pub struct TypeMismatchError {
    pub parameter: String,
    pub actual: TypeToken,
    /// Field-accepted types before widening.
    pub expected: ExpectedTypes,
    /// `alias.field`, or the bare alias.
    pub field: String,
}

impl TypeMismatchError {
    #[must_use]
    pub fn new(
        parameter: impl Into<String>,
        actual: TypeToken,
        expected: CompatibleTypeSet,
        field: impl Into<String>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            actual,
            expected: ExpectedTypes(expected),
            field: field.into(),
        }
    }
}

///
/// ExpectedTypes
///
/// Renders `"t"` for a single type and `one of: ["a", "b"]` otherwise.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpectedTypes(pub CompatibleTypeSet);

impl ExpectedTypes {
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0.names()
    }
}

impl fmt::Display for ExpectedTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "\"{single}\""),
            many => {
                let names = many
                    .iter()
                    .map(|token| format!("\"{token}\""))
                    .collect::<Vec<_>>();
                write!(f, "one of: [{}]", names.join(", "))
            }
        }
    }
}

///
/// DiagnosticContext
///

#[derive(Clone, Copy, Debug)]
pub struct DiagnosticContext<'a> {
    pub exception: &'a TypeMismatchError,
}

///
/// DiagnosticSink
///
/// Receiver of non-fatal mismatch reports.
///

pub trait DiagnosticSink: Send + Sync {
    fn notify(&self, message: &str, context: DiagnosticContext<'_>);
}

///
/// LogSink
///
/// Forwards diagnostics to the `log` facade at error level.
///

#[derive(Clone, Debug)]
pub struct LogSink {
    target: String,
}

impl LogSink {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_TARGET)
    }
}

impl DiagnosticSink for LogSink {
    fn notify(&self, message: &str, context: DiagnosticContext<'_>) {
        log::error!(
            target: self.target.as_str(),
            "{message} [parameter={}, field={}]",
            context.exception.parameter,
            context.exception.field,
        );
    }
}

///
/// Disposition
///

#[derive(Debug, Eq, PartialEq)]
pub enum Disposition {
    Continue,
    Abort(TypeMismatchError),
}

///
/// DiagnosticsPolicy
///
/// Strategy deciding what a mismatch does to the running pass.
///

pub trait DiagnosticsPolicy {
    fn report(&self, error: TypeMismatchError) -> Disposition;
}

///
/// FailFast
///
/// Every mismatch aborts the pass.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FailFast;

impl DiagnosticsPolicy for FailFast {
    fn report(&self, error: TypeMismatchError) -> Disposition {
        Disposition::Abort(error)
    }
}

///
/// ForwardToSink
///
/// Every mismatch goes to the held sink; the pass continues.
///

#[derive(Clone)]
pub struct ForwardToSink {
    sink: Arc<dyn DiagnosticSink>,
}

impl ForwardToSink {
    #[must_use]
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }
}

impl DiagnosticsPolicy for ForwardToSink {
    fn report(&self, error: TypeMismatchError) -> Disposition {
        deliver(self.sink.as_ref(), &error);

        Disposition::Continue
    }
}

impl fmt::Debug for ForwardToSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardToSink").finish_non_exhaustive()
    }
}

///
/// RegisteredSink
///
/// Consults the process-wide registration at report time: forward and
/// continue when a live sink is registered, abort otherwise.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RegisteredSink;

impl DiagnosticsPolicy for RegisteredSink {
    fn report(&self, error: TypeMismatchError) -> Disposition {
        match registered_sink() {
            Some(sink) => {
                deliver(sink.as_ref(), &error);
                Disposition::Continue
            }
            None => Disposition::Abort(error),
        }
    }
}

fn deliver(sink: &dyn DiagnosticSink, error: &TypeMismatchError) {
    let message = error.to_string();
    sink.notify(&message, DiagnosticContext { exception: error });
}
