//! ## Crate layout
//! - `core`: the checker engine (filter AST, resolver, compatibility
//!   matrix, walker, diagnostics, configuration).
//!
//! Most hosts only need the `prelude`: describe the schema, bind
//! parameters, build a `QueryChecker` and install it into a `VisitorChain`.

pub use querycheck_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{CheckError, InternalError};

///
/// Host Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::{CheckerConfig, DeliveryMode},
        diagnostic::{
            DiagnosticContext, RegisteredSink, TypeMismatchError, set_diagnostic_sink,
            with_diagnostic_sink,
        },
        prelude::*,
    };
}
