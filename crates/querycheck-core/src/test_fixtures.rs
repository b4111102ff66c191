use crate::{
    ast::AliasDecl,
    diagnostic::{DiagnosticContext, DiagnosticSink, TypeMismatchError},
    params::{EnumValue, ObjectValue, Value},
    schema::{EntityModel, Schema},
    types::{BuiltinType, ColumnType},
};
use std::sync::{Mutex, PoisonError};

pub(crate) const MANY_TYPES: &str = "fixture::entity::TestEntityWithManyFieldTypes";
pub(crate) const SIMPLE: &str = "fixture::entity::SimpleTestEntity";
pub(crate) const SIMPLE_UUID: &str = "fixture::entity::SimpleTestEntityWithUuid";
pub(crate) const INT_ENUM: &str = "fixture::enums::TestEntityWithManyFieldTypesIntEnum";
pub(crate) const STRING_ENUM: &str = "fixture::enums::TestEntityWithManyFieldTypesStringEnum";
pub(crate) const UUID_CLASS: &str = "uuid::Uuid";

///
/// fixture_schema
///
/// Schema with one entity per column kind plus two association targets,
/// one keyed by integer and one keyed by a custom `uuid` type.
///

pub(crate) fn fixture_schema() -> Schema {
    let many = EntityModel::new(MANY_TYPES)
        .with_id("id", ColumnType::Integer)
        .with_field("stringField", ColumnType::String)
        .with_field("textField", ColumnType::Text)
        .with_field("floatField", ColumnType::Float)
        .with_field("bigintField", ColumnType::BigInt)
        .with_field("booleanField", ColumnType::Boolean)
        .with_field("jsonField", ColumnType::Json)
        .with_field("asciiStringField", ColumnType::AsciiString)
        .with_field("dateTimeImmutableField", ColumnType::DateTimeImmutable)
        .with_enum_field("intEnumField", ColumnType::Integer, INT_ENUM)
        .with_enum_field("stringEnumField", ColumnType::String, STRING_ENUM)
        .with_to_one("simpleTestEntity", SIMPLE)
        .with_to_one("simpleTestEntityWithUuid", SIMPLE_UUID);

    let simple = EntityModel::new(SIMPLE)
        .with_id("id", ColumnType::Integer)
        .with_field("value", ColumnType::String);

    let simple_uuid = EntityModel::new(SIMPLE_UUID).with_id("uuid", BuiltinType::named("uuid"));

    Schema::from_models([many, simple, simple_uuid]).expect("fixture schema should be valid")
}

/// `FROM TestEntityWithManyFieldTypes e LEFT JOIN e.simpleTestEntity se LEFT JOIN e.simpleTestEntityWithUuid sewu`
pub(crate) fn fixture_aliases() -> Vec<AliasDecl> {
    vec![
        AliasDecl::new("e", MANY_TYPES),
        AliasDecl::new("se", SIMPLE),
        AliasDecl::new("sewu", SIMPLE_UUID),
    ]
}

pub(crate) fn int_enum_a() -> Value {
    Value::Enum(EnumValue::new(INT_ENUM, Value::Int(1)))
}

pub(crate) fn string_enum_a() -> Value {
    Value::Enum(EnumValue::new(STRING_ENUM, Value::Text("a".to_string())))
}

pub(crate) fn simple_entity() -> Value {
    Value::Object(ObjectValue::new(SIMPLE))
}

pub(crate) fn simple_uuid_entity() -> Value {
    Value::Object(ObjectValue::new(SIMPLE_UUID))
}

pub(crate) fn raw_uuid() -> Value {
    Value::Object(ObjectValue::new(UUID_CLASS))
}

///
/// RecordingSink
///
/// Test sink capturing every delivered (message, error) pair in order.
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    entries: Mutex<Vec<(String, TypeMismatchError)>>,
}

impl RecordingSink {
    pub(crate) fn entries(&self) -> Vec<(String, TypeMismatchError)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|(message, _)| message)
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn notify(&self, message: &str, context: DiagnosticContext<'_>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message.to_string(), context.exception.clone()));
    }
}
