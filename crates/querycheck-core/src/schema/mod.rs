//! Entity metadata boundary.
//!
//! The checker reads mapping information only through `SchemaMetadata`.
//! `Schema` is the in-memory implementation hosts populate from their own
//! mapping layer (and the one tests use).


use crate::types::{BuiltinType, TypePath};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

/// Namespace segment lazy-loading proxies are generated under.
pub const PROXY_MARKER: &str = "__CG__";

const PROXY_SEGMENT: &str = "::__CG__::";

/// Strip the lazy-proxy namespace from a runtime class name.
///
/// `proxies::__CG__::app::User` becomes `app::User`; any other name is
/// returned unchanged.
#[must_use]
pub fn real_class_name(class: &str) -> &str {
    class
        .rfind(PROXY_SEGMENT)
        .map_or(class, |offset| &class[offset + PROXY_SEGMENT.len()..])
}

///
/// SchemaMetadata
///
/// Field, association and entity lookups consumed by the type resolver.
///

pub trait SchemaMetadata {
    fn entity_model(&self, path: &TypePath) -> Option<&EntityModel>;

    /// Whether the runtime class (possibly a lazy proxy) is a mapped entity.
    fn is_mapped_entity(&self, runtime_class: &str) -> bool {
        self.entity_model(&TypePath::new(real_class_name(runtime_class)))
            .is_some()
    }

    /// Root of the inheritance hierarchy the runtime class belongs to.
    fn root_entity_class(&self, runtime_class: &str) -> Option<TypePath> {
        self.entity_model(&TypePath::new(real_class_name(runtime_class)))
            .map(|model| model.root_path().clone())
    }

    fn entity(&self, path: &TypePath) -> Result<&EntityModel, SchemaError> {
        self.entity_model(path)
            .ok_or_else(|| SchemaError::UnknownEntity { entity: path.clone() })
    }

    fn field_mapping(
        &self,
        entity: &TypePath,
        field: &str,
    ) -> Result<FieldMapping<'_>, SchemaError> {
        let model = self.entity(entity)?;
        let field_model = model.field(field).ok_or_else(|| SchemaError::UnknownField {
            entity: entity.clone(),
            field: field.to_string(),
        })?;

        Ok(FieldMapping {
            declared: &field_model.column,
            enum_type: field_model.enum_type.as_ref(),
            is_identifier: model.is_single_identifier(field),
        })
    }

    fn association_target(
        &self,
        entity: &TypePath,
        field: &str,
    ) -> Result<AssociationTarget<'_>, SchemaError> {
        let model = self.entity(entity)?;
        let association = model
            .association(field)
            .filter(|association| association.kind == AssociationKind::ToOne)
            .ok_or_else(|| SchemaError::UnknownAssociation {
                entity: entity.clone(),
                field: field.to_string(),
            })?;
        let target = self.entity(&association.target)?;
        let identifier = target.single_identifier()?;

        Ok(AssociationTarget { target, identifier })
    }
}

///
/// FieldMapping
///

#[derive(Clone, Copy, Debug)]
pub struct FieldMapping<'a> {
    pub declared: &'a BuiltinType,
    pub enum_type: Option<&'a TypePath>,
    pub is_identifier: bool,
}

///
/// AssociationTarget
///

#[derive(Clone, Copy, Debug)]
pub struct AssociationTarget<'a> {
    pub target: &'a EntityModel,
    pub identifier: &'a str,
}

///
/// EntityModel
/// Runtime mapping metadata for one entity.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityModel {
    /// Fully-qualified type path (for dispatch and diagnostics).
    pub path: TypePath,
    /// Inheritance root; `None` when the entity is its own root.
    pub root: Option<TypePath>,
    /// Identifier field names, in declaration order.
    pub identifier: Vec<String>,
    pub fields: Vec<FieldModel>,
    pub associations: Vec<AssociationModel>,
}

impl EntityModel {
    #[must_use]
    pub fn new(path: impl Into<TypePath>) -> Self {
        Self {
            path: path.into(),
            root: None,
            identifier: Vec::new(),
            fields: Vec::new(),
            associations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<TypePath>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Declare an identifier field; call more than once for composite keys.
    #[must_use]
    pub fn with_id(mut self, name: impl Into<String>, column: impl Into<BuiltinType>) -> Self {
        let name = name.into();
        self.identifier.push(name.clone());
        self.with_field(name, column)
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, column: impl Into<BuiltinType>) -> Self {
        self.fields.push(FieldModel {
            name: name.into(),
            column: column.into(),
            enum_type: None,
        });
        self
    }

    #[must_use]
    pub fn with_enum_field(
        mut self,
        name: impl Into<String>,
        column: impl Into<BuiltinType>,
        enum_type: impl Into<TypePath>,
    ) -> Self {
        self.fields.push(FieldModel {
            name: name.into(),
            column: column.into(),
            enum_type: Some(enum_type.into()),
        });
        self
    }

    #[must_use]
    pub fn with_to_one(mut self, name: impl Into<String>, target: impl Into<TypePath>) -> Self {
        self.associations.push(AssociationModel {
            name: name.into(),
            target: target.into(),
            kind: AssociationKind::ToOne,
        });
        self
    }

    #[must_use]
    pub fn with_to_many(mut self, name: impl Into<String>, target: impl Into<TypePath>) -> Self {
        self.associations.push(AssociationModel {
            name: name.into(),
            target: target.into(),
            kind: AssociationKind::ToMany,
        });
        self
    }

    #[must_use]
    pub fn root_path(&self) -> &TypePath {
        self.root.as_ref().unwrap_or(&self.path)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn association(&self, name: &str) -> Option<&AssociationModel> {
        self.associations
            .iter()
            .find(|association| association.name == name)
    }

    /// The one identifier field; composite or missing identifiers are errors.
    pub fn single_identifier(&self) -> Result<&str, SchemaError> {
        match self.identifier.as_slice() {
            [single] => Ok(single.as_str()),
            [] => Err(SchemaError::MissingIdentifier {
                entity: self.path.clone(),
            }),
            _ => Err(SchemaError::CompositeIdentifier {
                entity: self.path.clone(),
            }),
        }
    }

    fn is_single_identifier(&self, field: &str) -> bool {
        matches!(self.identifier.as_slice(), [single] if single == field)
    }
}

///
/// FieldModel
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldModel {
    pub name: String,
    pub column: BuiltinType,
    /// Enum type the column value is hydrated into, when enum-backed.
    pub enum_type: Option<TypePath>,
}

///
/// AssociationModel
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssociationModel {
    pub name: String,
    pub target: TypePath,
    pub kind: AssociationKind,
}

///
/// AssociationKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssociationKind {
    ToOne,
    ToMany,
}

///
/// Schema
///
/// In-memory `SchemaMetadata` keyed by entity path.
///

#[derive(Clone, Debug, Default)]
pub struct Schema {
    entities: BTreeMap<TypePath, EntityModel>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema and validate its mapping contracts.
    pub fn from_models(models: impl IntoIterator<Item = EntityModel>) -> Result<Self, SchemaError> {
        let mut entities = BTreeMap::new();
        for model in models {
            validate_entity(&model)?;
            if entities.contains_key(&model.path) {
                return Err(SchemaError::DuplicateEntity { entity: model.path });
            }
            entities.insert(model.path.clone(), model);
        }

        let schema = Self { entities };
        for model in schema.entities.values() {
            for association in &model.associations {
                schema.entity(&association.target)?;
            }
        }

        Ok(schema)
    }

    /// Register one entity, replacing any previous model with the same path.
    pub fn register(&mut self, model: EntityModel) -> Result<(), SchemaError> {
        validate_entity(&model)?;
        self.entities.insert(model.path.clone(), model);

        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl SchemaMetadata for Schema {
    fn entity_model(&self, path: &TypePath) -> Option<&EntityModel> {
        self.entities.get(path)
    }
}

fn validate_entity(model: &EntityModel) -> Result<(), SchemaError> {
    let mut seen = BTreeSet::new();
    for name in model
        .fields
        .iter()
        .map(|field| field.name.as_str())
        .chain(model.associations.iter().map(|association| association.name.as_str()))
    {
        if !seen.insert(name) {
            return Err(SchemaError::DuplicateField {
                entity: model.path.clone(),
                field: name.to_string(),
            });
        }
    }

    for id in &model.identifier {
        if model.field(id).is_none() {
            return Err(SchemaError::UnknownField {
                entity: model.path.clone(),
                field: id.clone(),
            });
        }
    }

    Ok(())
}

///
/// SchemaError
///
/// Metadata lookups that failed or mapping contracts that do not hold.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("unknown alias '{alias}'")]
    UnknownAlias { alias: String },

    #[error("unknown entity '{entity}'")]
    UnknownEntity { entity: TypePath },

    #[error("duplicate entity '{entity}'")]
    DuplicateEntity { entity: TypePath },

    #[error("entity '{entity}' has no field '{field}'")]
    UnknownField { entity: TypePath, field: String },

    #[error("entity '{entity}' declares field '{field}' more than once")]
    DuplicateField { entity: TypePath, field: String },

    #[error("entity '{entity}' has no single-valued association '{field}'")]
    UnknownAssociation { entity: TypePath, field: String },

    #[error("entity '{entity}' has a composite identifier; a single identifier field is required")]
    CompositeIdentifier { entity: TypePath },

    #[error("entity '{entity}' declares no identifier field")]
    MissingIdentifier { entity: TypePath },
}
