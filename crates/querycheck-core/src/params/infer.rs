use crate::{
    params::Value,
    types::{BindingKind, ColumnType, TypeToken},
};

///
/// TypeInference
///
/// Host-side generic inference of a binding type from a bound value.
/// Consulted only after the resolver's own value rules have been tried.
///

pub trait TypeInference {
    fn infer(&self, value: &Value) -> TypeToken;
}

///
/// DefaultTypeInference
///
/// Mirrors the binding layer's stock inference. Floats are deliberately not
/// distinguished here and fall through to a string binding.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTypeInference;

impl TypeInference for DefaultTypeInference {
    fn infer(&self, value: &Value) -> TypeToken {
        match value {
            Value::Int(_) => TypeToken::binding(BindingKind::Integer),
            Value::Bool(_) => TypeToken::column(ColumnType::Boolean),
            Value::DateTime(_) => TypeToken::column(ColumnType::DateTimeImmutable),
            Value::Date(_) => TypeToken::column(ColumnType::DateImmutable),
            Value::Enum(case) => self.infer(&case.backing),
            Value::List(items) => match items.first() {
                Some(Value::Int(_)) => TypeToken::binding(BindingKind::IntegerArray),
                Some(Value::Enum(case)) if matches!(*case.backing, Value::Int(_)) => {
                    TypeToken::binding(BindingKind::IntegerArray)
                }
                _ => TypeToken::binding(BindingKind::StringArray),
            },
            Value::Null | Value::Float(_) | Value::Text(_) | Value::Object(_) => {
                TypeToken::binding(BindingKind::String)
            }
        }
    }
}
