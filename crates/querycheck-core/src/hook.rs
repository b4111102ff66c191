//! Host integration surface.
//!
//! The host pipeline runs a list of statement visitors after parsing. The
//! checker is one such visitor; `VisitorChain::install` appends it after
//! whatever visitors the host already configured.

use crate::{ast::Statement, error::CheckError, walker::QueryChecker};

///
/// StatementVisitor
///
/// Inspects a parsed statement; an error means the host should refuse to
/// execute it.
///

pub trait StatementVisitor {
    fn walk_select_statement(&self, statement: &Statement) -> Result<(), CheckError>;
}

impl StatementVisitor for QueryChecker<'_> {
    fn walk_select_statement(&self, statement: &Statement) -> Result<(), CheckError> {
        Self::walk_select_statement(self, statement)
    }
}

///
/// VisitorChain
///
/// Ordered visitor list; the first failing visitor stops the chain.
///

#[derive(Default)]
pub struct VisitorChain<'a> {
    visitors: Vec<Box<dyn StatementVisitor + 'a>>,
}

impl<'a> VisitorChain<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `visitor` after every visitor already installed.
    pub fn install(&mut self, visitor: impl StatementVisitor + 'a) -> &mut Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    pub fn walk(&self, statement: &Statement) -> Result<(), CheckError> {
        for visitor in &self.visitors {
            visitor.walk_select_statement(statement)?;
        }

        Ok(())
    }
}

impl StatementVisitor for VisitorChain<'_> {
    fn walk_select_statement(&self, statement: &Statement) -> Result<(), CheckError> {
        self.walk(statement)
    }
}
