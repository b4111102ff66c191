//! Core engine for querycheck: verifies that every comparison between a
//! mapped field and a bound parameter in a query's WHERE/HAVING tree uses
//! compatible operand types, before the query ever executes.
//!
//! Layering, leaves first:
//! - `schema` and `params` describe the host collaborators (entity metadata,
//!   parameter bindings, generic type inference).
//! - `resolve` turns field paths and parameters into `TypeToken`s.
//! - `compat` decides compatibility with normalization and widening.
//! - `walker` traverses the filter tree; `diagnostic` delivers mismatches.
#![warn(unreachable_pub)]

pub mod ast;
pub mod compat;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod hook;
pub mod params;
pub mod resolve;
pub mod schema;
pub mod types;
pub mod walker;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::{CheckError, InternalError};

///
/// Prelude
///
/// Vocabulary needed to describe a schema, bind parameters and run a check.
///

pub mod prelude {
    pub use crate::{
        ast::{AliasDecl, Comparison, CompareOp, Condition, FieldPath, Operand, Statement, Term},
        diagnostic::{DiagnosticSink, DiagnosticsPolicy, FailFast, ForwardToSink, LogSink},
        error::CheckError,
        hook::{StatementVisitor, VisitorChain},
        params::{ParameterBag, Value},
        schema::{EntityModel, Schema},
        types::{BuiltinType, ColumnType, TypePath, TypeToken},
        walker::QueryChecker,
    };
}
