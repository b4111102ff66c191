use crate::{ast::AliasDecl, schema::SchemaError, types::TypePath};

///
/// Scope
///
/// Identification variables visible to one statement. A subselect sees its
/// own aliases first, then every enclosing statement's.
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct Scope<'s> {
    aliases: &'s [AliasDecl],
    parent: Option<&'s Scope<'s>>,
}

impl<'s> Scope<'s> {
    pub(crate) const fn new(aliases: &'s [AliasDecl], parent: Option<&'s Scope<'s>>) -> Self {
        Self { aliases, parent }
    }

    pub(crate) fn entity_for(&self, alias: &str) -> Result<&'s TypePath, SchemaError> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(decl) = current.aliases.iter().find(|decl| decl.alias == alias) {
                return Ok(&decl.entity);
            }
            scope = current.parent;
        }

        Err(SchemaError::UnknownAlias {
            alias: alias.to_string(),
        })
    }
}
