use crate::types::TypePath;


///
/// Filter AST
///
/// Closed representation of a parsed SELECT statement's filter clauses.
/// Only the shapes the checker inspects are modelled precisely; every other
/// simple condition travels as `Condition::Unchecked`.
///

///
/// Statement
///
/// One SELECT statement or subselect. `from` lists the identification
/// variables the host bound for this statement.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statement {
    pub from: Vec<AliasDecl>,
    pub where_clause: Option<Condition>,
    pub having_clause: Option<Condition>,
}

impl Statement {
    #[must_use]
    pub fn select(from: impl IntoIterator<Item = AliasDecl>) -> Self {
        Self {
            from: from.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_where(mut self, condition: Condition) -> Self {
        self.where_clause = Some(condition);
        self
    }

    #[must_use]
    pub fn with_having(mut self, condition: Condition) -> Self {
        self.having_clause = Some(condition);
        self
    }
}

///
/// AliasDecl
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AliasDecl {
    pub alias: String,
    pub entity: TypePath,
}

impl AliasDecl {
    #[must_use]
    pub fn new(alias: impl Into<String>, entity: impl Into<TypePath>) -> Self {
        Self {
            alias: alias.into(),
            entity: entity.into(),
        }
    }
}

///
/// Condition
///
/// Boolean tree: OR of AND of NOT/leaf terms. `Group` is a parenthesized
/// sub-expression.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Or(Vec<Self>),
    And(Vec<Self>),
    Not(Box<Self>),
    Group(Box<Self>),
    Compare(Comparison),
    /// LIKE, IN, IS NULL, BETWEEN, EXISTS, MEMBER OF and friends.
    Unchecked(String),
}

impl Condition {
    #[must_use]
    pub const fn or(terms: Vec<Self>) -> Self {
        Self::Or(terms)
    }

    #[must_use]
    pub const fn and(factors: Vec<Self>) -> Self {
        Self::And(factors)
    }

    #[must_use]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    #[must_use]
    pub fn group(inner: Self) -> Self {
        Self::Group(Box::new(inner))
    }

    #[must_use]
    pub fn unchecked(text: impl Into<String>) -> Self {
        Self::Unchecked(text.into())
    }
}

impl From<Comparison> for Condition {
    fn from(comparison: Comparison) -> Self {
        Self::Compare(comparison)
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

///
/// Comparison
///

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub left: Operand,
    pub op: CompareOp,
    pub right: Operand,
}

impl Comparison {
    #[must_use]
    pub fn new(left: impl Into<Operand>, op: CompareOp, right: impl Into<Operand>) -> Self {
        Self {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    #[must_use]
    pub fn eq(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(left, CompareOp::Eq, right)
    }

    #[must_use]
    pub fn ne(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(left, CompareOp::Ne, right)
    }

    #[must_use]
    pub fn lt(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(left, CompareOp::Lt, right)
    }

    #[must_use]
    pub fn lte(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(left, CompareOp::Lte, right)
    }

    #[must_use]
    pub fn gt(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(left, CompareOp::Gt, right)
    }

    #[must_use]
    pub fn gte(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::new(left, CompareOp::Gte, right)
    }
}

///
/// Operand
///

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Arithmetic(ArithmeticExpr),
    /// `ALL (...)`, `ANY (...)`, `SOME (...)`; never type-checked.
    Quantified {
        quantifier: Quantifier,
        subquery: Box<Statement>,
    },
}

impl Operand {
    #[must_use]
    pub fn subselect(statement: Statement) -> Self {
        Self::Arithmetic(ArithmeticExpr::Subselect(Box::new(statement)))
    }
}

impl From<Term> for Operand {
    fn from(term: Term) -> Self {
        Self::Arithmetic(ArithmeticExpr::Simple(term))
    }
}

impl From<ArithmeticExpr> for Operand {
    fn from(expr: ArithmeticExpr) -> Self {
        Self::Arithmetic(expr)
    }
}

///
/// Quantifier
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Quantifier {
    All,
    Any,
    Some,
}

///
/// ArithmeticExpr
///
/// Either a simple arithmetic term or a parenthesized subselect.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ArithmeticExpr {
    Simple(Term),
    Subselect(Box<Statement>),
}

///
/// Term
///

#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    Path(FieldPath),
    Parameter(ParameterRef),
    Literal(Literal),
    Function {
        name: String,
        args: Vec<Self>,
    },
    Binary {
        op: ArithmeticOp,
        left: Box<Self>,
        right: Box<Self>,
    },
}

impl Term {
    /// State-field path `alias.field`.
    #[must_use]
    pub fn field(alias: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Path(FieldPath::state_field(alias, field))
    }

    /// Single-valued association path `alias.association`.
    #[must_use]
    pub fn association(alias: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Path(FieldPath::association(alias, field))
    }

    #[must_use]
    pub fn param(name: impl Into<String>) -> Self {
        Self::Parameter(ParameterRef::new(name))
    }

    #[must_use]
    pub const fn literal(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

///
/// ArithmeticOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

///
/// Literal
///

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

///
/// PathKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathKind {
    StateField,
    SingleValuedAssociation,
    CollectionValuedAssociation,
}

///
/// FieldPath
///
/// Reference to a mapped attribute of an aliased entity.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldPath {
    pub alias: String,
    pub field: Option<String>,
    pub kind: PathKind,
}

impl FieldPath {
    #[must_use]
    pub fn state_field(alias: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            field: Some(field.into()),
            kind: PathKind::StateField,
        }
    }

    #[must_use]
    pub fn association(alias: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            field: Some(field.into()),
            kind: PathKind::SingleValuedAssociation,
        }
    }

    /// `alias.field`, or the bare alias when no field is named.
    #[must_use]
    pub fn descriptor(&self) -> String {
        match &self.field {
            Some(field) => format!("{}.{field}", self.alias),
            None => self.alias.clone(),
        }
    }
}

///
/// ParameterRef
///
/// Named or positional input parameter; the leading `:` or `?` is not
/// part of the name.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParameterRef {
    pub name: String,
}

impl ParameterRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name
            .strip_prefix([':', '?'])
            .map_or_else(|| name.clone(), str::to_string);

        Self { name }
    }
}
