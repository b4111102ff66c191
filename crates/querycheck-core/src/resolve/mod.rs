use crate::{
    ast::{FieldPath, ParameterRef, PathKind},
    compat::normalize,
    error::{CheckError, InternalError},
    params::{ParameterStore, TypeInference, Value},
    schema::SchemaMetadata,
    types::{ColumnType, CompatibleTypeSet, TypePath, TypeToken},
};


///
/// TypeResolver
///
/// Turns the two sides of a checked comparison into type tokens: the set of
/// tokens a field accepts, and the single token a parameter carries.
/// Borrows every collaborator; one resolver lives for one checker pass.
///

#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    schema: &'a dyn SchemaMetadata,
    params: &'a dyn ParameterStore,
    inference: &'a dyn TypeInference,
}

impl<'a> TypeResolver<'a> {
    #[must_use]
    pub const fn new(
        schema: &'a dyn SchemaMetadata,
        params: &'a dyn ParameterStore,
        inference: &'a dyn TypeInference,
    ) -> Self {
        Self {
            schema,
            params,
            inference,
        }
    }

    #[must_use]
    pub fn with_inference(mut self, inference: &'a dyn TypeInference) -> Self {
        self.inference = inference;
        self
    }

    /// Compatible types of `path`, whose alias is bound to `entity`.
    ///
    /// Single-valued associations delegate to the target's identifier field.
    /// Any other path shape is an invariant violation.
    pub fn resolve_field_types(
        &self,
        entity: &TypePath,
        path: &FieldPath,
    ) -> Result<CompatibleTypeSet, CheckError> {
        let field = path.field.as_deref().ok_or_else(|| {
            InternalError::resolver_invariant(format!(
                "path expression '{}' names no field",
                path.descriptor()
            ))
        })?;

        match path.kind {
            PathKind::StateField => self.field_types(entity, field),
            PathKind::SingleValuedAssociation => {
                let target = self.schema.association_target(entity, field)?;

                self.field_types(&target.target.path, target.identifier)
            }
            PathKind::CollectionValuedAssociation => {
                Err(InternalError::resolver_invariant(format!(
                    "unsupported path expression type for '{}'",
                    path.descriptor()
                ))
                .into())
            }
        }
    }

    /// Resolved type of a parameter, or `None` when the check must be skipped.
    #[must_use]
    pub fn resolve_param_type(&self, param: &ParameterRef) -> Option<TypeToken> {
        let parameter = self.params.lookup(&param.name)?;

        if let Some(declared) = &parameter.declared_type {
            return Some(normalize(declared.clone()));
        }

        match parameter.value.as_ref()? {
            Value::Null => None,
            Value::Float(_) => Some(TypeToken::column(ColumnType::Float)),
            Value::Enum(case) => Some(TypeToken::Enum(case.path.clone())),
            Value::Object(object) if self.schema.is_mapped_entity(&object.class) => self
                .schema
                .root_entity_class(&object.class)
                .map(TypeToken::Entity),
            value => Some(normalize(self.inference.infer(value))),
        }
    }

    // Order: owning entity (identifier only), enum backing, declared type.
    fn field_types(
        &self,
        entity: &TypePath,
        field: &str,
    ) -> Result<CompatibleTypeSet, CheckError> {
        let mapping = self.schema.field_mapping(entity, field)?;
        let mut tokens = Vec::with_capacity(3);

        if mapping.is_identifier {
            let model = self.schema.entity(entity)?;
            tokens.push(TypeToken::Entity(model.root_path().clone()));
        }
        if let Some(enum_type) = mapping.enum_type {
            tokens.push(TypeToken::Enum(enum_type.clone()));
        }
        tokens.push(TypeToken::Builtin(mapping.declared.clone()));

        Ok(tokens.into_iter().map(normalize).collect())
    }
}
