//! Filter-tree traversal.
//!
//! `QueryChecker` walks a statement's WHERE and HAVING trees in document
//! order, depth first. Every comparison whose operands are a field path and
//! a parameter is resolved and checked; mismatches go to the configured
//! `DiagnosticsPolicy`, which decides whether the walk continues.

mod scope;


use crate::{
    ast::{
        ArithmeticExpr, Comparison, Condition, FieldPath, Operand, ParameterRef, Statement, Term,
    },
    compat,
    config::CheckerConfig,
    diagnostic::{Disposition, DiagnosticsPolicy, RegisteredSink, TypeMismatchError},
    error::CheckError,
    params::{DefaultTypeInference, ParameterStore, TypeInference},
    resolve::TypeResolver,
    schema::SchemaMetadata,
};
use scope::Scope;

///
/// QueryChecker
///
/// Checks field/parameter comparisons of one statement against the schema
/// and the bound parameters. Defaults to `DefaultTypeInference` and the
/// `RegisteredSink` policy.
///

pub struct QueryChecker<'a> {
    resolver: TypeResolver<'a>,
    policy: Box<dyn DiagnosticsPolicy + 'a>,
}

impl<'a> QueryChecker<'a> {
    #[must_use]
    pub fn new(schema: &'a dyn SchemaMetadata, params: &'a dyn ParameterStore) -> Self {
        Self {
            resolver: TypeResolver::new(schema, params, &DefaultTypeInference),
            policy: Box::new(RegisteredSink),
        }
    }

    /// Checker whose delivery policy comes from `config`.
    #[must_use]
    pub fn from_config(
        schema: &'a dyn SchemaMetadata,
        params: &'a dyn ParameterStore,
        config: &CheckerConfig,
    ) -> Self {
        Self::new(schema, params).with_boxed_policy(config.policy())
    }

    #[must_use]
    pub fn with_policy(self, policy: impl DiagnosticsPolicy + 'a) -> Self {
        self.with_boxed_policy(Box::new(policy))
    }

    #[must_use]
    pub fn with_boxed_policy(mut self, policy: Box<dyn DiagnosticsPolicy + 'a>) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the host-side generic inference used as the last resort for
    /// bound values.
    #[must_use]
    pub fn with_inference(mut self, inference: &'a dyn TypeInference) -> Self {
        self.resolver = self.resolver.with_inference(inference);
        self
    }

    /// Entry point: check the WHERE clause, then the HAVING clause.
    pub fn walk_select_statement(&self, statement: &Statement) -> Result<(), CheckError> {
        self.walk_statement(statement, None)
    }

    fn walk_statement(
        &self,
        statement: &Statement,
        outer: Option<&Scope<'_>>,
    ) -> Result<(), CheckError> {
        let scope = Scope::new(&statement.from, outer);

        if let Some(condition) = &statement.where_clause {
            self.process_where_clause(condition, &scope)?;
        }
        if let Some(condition) = &statement.having_clause {
            self.process_having_clause(condition, &scope)?;
        }

        Ok(())
    }

    fn process_where_clause(
        &self,
        condition: &Condition,
        scope: &Scope<'_>,
    ) -> Result<(), CheckError> {
        self.process_condition(condition, scope)
    }

    fn process_having_clause(
        &self,
        condition: &Condition,
        scope: &Scope<'_>,
    ) -> Result<(), CheckError> {
        self.process_condition(condition, scope)
    }

    fn process_condition(
        &self,
        condition: &Condition,
        scope: &Scope<'_>,
    ) -> Result<(), CheckError> {
        match condition {
            Condition::Or(children) | Condition::And(children) => {
                for child in children {
                    self.process_condition(child, scope)?;
                }

                Ok(())
            }
            Condition::Not(inner) | Condition::Group(inner) => self.process_condition(inner, scope),
            Condition::Compare(comparison) => self.process_comparison(comparison, scope),
            Condition::Unchecked(_) => Ok(()),
        }
    }

    // Either side may hold the field or the parameter, so both orders run.
    fn process_comparison(
        &self,
        comparison: &Comparison,
        scope: &Scope<'_>,
    ) -> Result<(), CheckError> {
        let (Operand::Arithmetic(left), Operand::Arithmetic(right)) =
            (&comparison.left, &comparison.right)
        else {
            return Ok(());
        };

        self.process_comparison_inner(left, right, scope)?;
        self.process_comparison_inner(right, left, scope)
    }

    fn process_comparison_inner(
        &self,
        a: &ArithmeticExpr,
        b: &ArithmeticExpr,
        scope: &Scope<'_>,
    ) -> Result<(), CheckError> {
        if let (
            ArithmeticExpr::Simple(Term::Path(path)),
            ArithmeticExpr::Simple(Term::Parameter(param)),
        ) = (a, b)
        {
            self.verify_parameter_type(path, param, scope)?;
        }

        if let ArithmeticExpr::Subselect(subquery) = a {
            self.walk_statement(subquery, Some(scope))?;
        }

        Ok(())
    }

    fn verify_parameter_type(
        &self,
        path: &FieldPath,
        param: &ParameterRef,
        scope: &Scope<'_>,
    ) -> Result<(), CheckError> {
        let Some(actual) = self.resolver.resolve_param_type(param) else {
            log::debug!(
                "skipping parameter \"{}\" compared with {}: type unresolved",
                param.name,
                path.descriptor(),
            );
            return Ok(());
        };

        let entity = scope.entity_for(&path.alias)?;
        let expected = self.resolver.resolve_field_types(entity, path)?;
        if compat::is_compatible(&actual, &expected) {
            return Ok(());
        }

        let error = TypeMismatchError::new(&param.name, actual, expected, path.descriptor());
        match self.policy.report(error) {
            Disposition::Continue => Ok(()),
            Disposition::Abort(error) => Err(error.into()),
        }
    }
}
