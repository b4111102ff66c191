use crate::types::{BindingKind, BuiltinType, ColumnType, CompatibleTypeSet, TypeToken};

///
/// Compatibility matrix
///
/// Decides whether a resolved parameter type may be compared against a
/// field. Both sides are normalized first so equivalent spellings (binding
/// kinds versus column types, bigint versus integer) meet in one canonical
/// form; the field side is then widened through `WIDENING_TABLE`.
///


///
/// WideningRule
///
/// One row of the widening table: parameters of any `accepts` type may be
/// compared against a field whose compatible set contains `field`.
/// Absence of a rule means no widening.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WideningRule {
    pub field: ColumnType,
    pub accepts: &'static [ColumnType],
}

pub const WIDENING_TABLE: &[WideningRule] = &[
    WideningRule {
        field: ColumnType::AsciiString,
        accepts: &[ColumnType::String],
    },
    WideningRule {
        field: ColumnType::Float,
        accepts: &[ColumnType::Integer, ColumnType::String],
    },
    WideningRule {
        field: ColumnType::Integer,
        accepts: &[ColumnType::String],
    },
];

/// Collapse equivalent tokens onto their canonical form.
#[must_use]
pub fn normalize(token: TypeToken) -> TypeToken {
    let token = match token {
        TypeToken::Builtin(BuiltinType::Custom(name)) => TypeToken::named(&name),
        other => other,
    };

    match token {
        TypeToken::Builtin(BuiltinType::Binding(BindingKind::Boolean)) => {
            TypeToken::column(ColumnType::Boolean)
        }
        TypeToken::Builtin(
            BuiltinType::Binding(BindingKind::Integer) | BuiltinType::Column(ColumnType::BigInt),
        ) => TypeToken::column(ColumnType::Integer),
        TypeToken::Builtin(
            BuiltinType::Binding(BindingKind::String) | BuiltinType::Column(ColumnType::Text),
        ) => TypeToken::column(ColumnType::String),
        other => other,
    }
}

/// Extra parameter types a field of `column` type also accepts.
#[must_use]
pub fn widen(column: ColumnType) -> &'static [ColumnType] {
    WIDENING_TABLE
        .iter()
        .find(|rule| rule.field == column)
        .map(|rule| rule.accepts)
        .unwrap_or_default()
}

/// Whether a normalized parameter type is in `compatible ∪ widen(compatible)`.
#[must_use]
pub fn is_compatible(param: &TypeToken, compatible: &CompatibleTypeSet) -> bool {
    if compatible.contains_token(param) {
        return true;
    }

    let Some(param_column) = param.as_column() else {
        return false;
    };

    compatible
        .iter()
        .filter_map(TypeToken::as_column)
        .any(|column| widen(column).contains(&param_column))
}
