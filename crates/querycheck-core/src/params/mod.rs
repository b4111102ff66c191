//! Parameter bindings and the runtime values bound to them.
//!
//! The checker reads bindings only through `ParameterStore`; when a
//! parameter is absent (shape-only analysis) its comparisons are skipped.

mod infer;


pub use infer::{DefaultTypeInference, TypeInference};

use crate::{
    ast::ParameterRef,
    types::{TypePath, TypeToken},
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

///
/// Value
///
/// Runtime value bound to a parameter.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    List(Vec<Self>),
    Enum(EnumValue),
    Object(ObjectValue),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

///
/// EnumValue
///
/// One case of a backed enum: its type identity plus the backing value.
///

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub path: TypePath,
    pub backing: Box<Value>,
}

impl EnumValue {
    #[must_use]
    pub fn new(path: impl Into<TypePath>, backing: Value) -> Self {
        Self {
            path: path.into(),
            backing: Box::new(backing),
        }
    }
}

///
/// ObjectValue
///
/// Opaque object instance known only by its concrete runtime class name,
/// which may be a lazy-proxy class.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObjectValue {
    pub class: String,
}

impl ObjectValue {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }
}

///
/// Parameter
///

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// Type given explicitly at binding time.
    pub declared_type: Option<TypeToken>,
    /// Bound value; `None` when only the parameter's presence is known.
    pub value: Option<Value>,
}

///
/// ParameterStore
///

pub trait ParameterStore {
    fn lookup(&self, name: &str) -> Option<&Parameter>;
}

///
/// ParameterBag
///
/// In-memory `ParameterStore`. Names are stored without their `:`/`?` sigil.
///

#[derive(Clone, Debug, Default)]
pub struct ParameterBag {
    parameters: BTreeMap<String, Parameter>,
}

impl ParameterBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value without declaring its type.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.insert(name, None, Some(value.into()))
    }

    /// Bind a value with an explicitly declared type.
    pub fn set_typed(&mut self, name: &str, value: impl Into<Value>, ty: TypeToken) -> &mut Self {
        self.insert(name, Some(ty), Some(value.into()))
    }

    /// Declare a parameter without binding a value.
    pub fn declare(&mut self, name: &str, ty: Option<TypeToken>) -> &mut Self {
        self.insert(name, ty, None)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    fn insert(
        &mut self,
        name: &str,
        declared_type: Option<TypeToken>,
        value: Option<Value>,
    ) -> &mut Self {
        let name = ParameterRef::new(name).name;
        self.parameters.insert(
            name.clone(),
            Parameter {
                name,
                declared_type,
                value,
            },
        );
        self
    }
}

impl ParameterStore for ParameterBag {
    fn lookup(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }
}
