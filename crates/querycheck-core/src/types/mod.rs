//! Semantic type vocabulary shared by the resolver and the compatibility matrix.
//!
//! A `TypeToken` is one of three disjoint kinds: a builtin type name, the
//! identity of an enum type, or the identity of a mapped entity. Tokens of
//! different kinds never compare equal, even when their rendered names
//! happen to coincide.


use derive_more::{Deref, IntoIterator};
use std::fmt;

///
/// TypePath
///
/// Fully-qualified identity of an entity or enum type (for dispatch and diagnostics).
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypePath(String);

impl TypePath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for TypePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

// Local helper to keep the column registry in one place.
macro_rules! column_types {
    ( $( $variant:ident => $name:literal ),* $(,)? ) => {
        ///
        /// ColumnType
        ///
        /// Known column types a mapped field can be declared with.
        /// Types outside this set travel as `BuiltinType::Custom`.
        ///

        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum ColumnType {
            $( $variant, )*
        }

        impl ColumnType {
            /// Every known column type, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )* ];

            /// Stable type name as used in mapping declarations.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }

            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(Self::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

column_types! {
    AsciiString => "ascii_string",
    BigInt => "bigint",
    Binary => "binary",
    Blob => "blob",
    Boolean => "boolean",
    Date => "date",
    DateImmutable => "date_immutable",
    DateInterval => "dateinterval",
    DateTime => "datetime",
    DateTimeImmutable => "datetime_immutable",
    DateTimeTz => "datetimetz",
    DateTimeTzImmutable => "datetimetz_immutable",
    Decimal => "decimal",
    Float => "float",
    Guid => "guid",
    Integer => "integer",
    Json => "json",
    SimpleArray => "simple_array",
    SmallInt => "smallint",
    String => "string",
    Text => "text",
    Time => "time",
    TimeImmutable => "time_immutable",
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// BindingKind
///
/// Driver-level binding kinds a parameter can be declared or inferred with.
/// These are distinct from column types; the compatibility matrix folds the
/// scalar ones onto their column counterparts.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BindingKind {
    Null,
    Integer,
    String,
    LargeObject,
    Boolean,
    Binary,
    Ascii,
    IntegerArray,
    StringArray,
    AsciiArray,
    BinaryArray,
}

impl BindingKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer => "integer",
            Self::String => "string",
            Self::LargeObject => "large_object",
            Self::Boolean => "boolean",
            Self::Binary => "binary",
            Self::Ascii => "ascii",
            Self::IntegerArray => "integer[]",
            Self::StringArray => "string[]",
            Self::AsciiArray => "ascii[]",
            Self::BinaryArray => "binary[]",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding::{}", self.name())
    }
}

///
/// BuiltinType
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum BuiltinType {
    Column(ColumnType),
    /// Host-registered type outside the known column set (e.g. `uuid`).
    Custom(String),
    Binding(BindingKind),
}

impl BuiltinType {
    /// Resolve a declared type name; unknown names become `Custom`.
    #[must_use]
    pub fn named(name: &str) -> Self {
        ColumnType::from_name(name).map_or_else(|| Self::Custom(name.to_string()), Self::Column)
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => column.fmt(f),
            Self::Custom(name) => f.write_str(name),
            Self::Binding(kind) => kind.fmt(f),
        }
    }
}

impl From<ColumnType> for BuiltinType {
    fn from(column: ColumnType) -> Self {
        Self::Column(column)
    }
}

///
/// TypeToken
///
/// Semantic type of one comparison operand.
/// Equality is by kind plus identity.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeToken {
    Builtin(BuiltinType),
    Enum(TypePath),
    Entity(TypePath),
}

impl TypeToken {
    #[must_use]
    pub const fn column(column: ColumnType) -> Self {
        Self::Builtin(BuiltinType::Column(column))
    }

    #[must_use]
    pub const fn binding(kind: BindingKind) -> Self {
        Self::Builtin(BuiltinType::Binding(kind))
    }

    /// Token for a declared type name such as `"string"` or `"uuid"`.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::Builtin(BuiltinType::named(name))
    }

    #[must_use]
    pub fn enum_type(path: impl Into<TypePath>) -> Self {
        Self::Enum(path.into())
    }

    #[must_use]
    pub fn entity(path: impl Into<TypePath>) -> Self {
        Self::Entity(path.into())
    }

    #[must_use]
    pub const fn as_column(&self) -> Option<ColumnType> {
        match self {
            Self::Builtin(BuiltinType::Column(column)) => Some(*column),
            _ => None,
        }
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => builtin.fmt(f),
            Self::Enum(path) | Self::Entity(path) => path.fmt(f),
        }
    }
}

impl From<ColumnType> for TypeToken {
    fn from(column: ColumnType) -> Self {
        Self::column(column)
    }
}

impl From<BindingKind> for TypeToken {
    fn from(kind: BindingKind) -> Self {
        Self::binding(kind)
    }
}

///
/// CompatibleTypeSet
///
/// Ordered list of tokens one field may legally be compared against,
/// before widening. Order is significant for diagnostics.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct CompatibleTypeSet(#[into_iterator(owned, ref)] Vec<TypeToken>);

impl CompatibleTypeSet {
    #[must_use]
    pub fn contains_token(&self, token: &TypeToken) -> bool {
        self.0.contains(token)
    }

    /// Rendered names in set order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<TypeToken> for CompatibleTypeSet {
    fn from_iter<I: IntoIterator<Item = TypeToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
