//! Apollo Client support: the `@client` and `@connection` directives.

use crate::assemble::AssembledDocument;
use crate::{Result, ValidateError};
use apollo_compiler::ast;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use graphql_config::ValidateConfig;
use std::sync::Arc;

const APOLLO_CLIENT_DIRECTIVES: &str = r"
directive @client(always: Boolean) on FIELD
directive @connection(key: String!, filter: [String]) on FIELD
";

/// Make the Apollo Client directives known to a schema.
///
/// Directives the schema already defines are left alone.
pub fn apollo_schema(schema: &Valid<Schema>) -> Result<Valid<Schema>> {
    let directives = ast::Document::parse(APOLLO_CLIENT_DIRECTIVES, "apollo-client.graphql")
        .map_err(|with_errors| ValidateError::SchemaTransform(with_errors.errors.to_string()))?;

    let mut schema = schema.clone().into_inner();
    Arc::make_mut(&mut schema.sources).extend(
        directives
            .sources
            .iter()
            .map(|(file_id, file)| (*file_id, Arc::clone(file))),
    );
    for definition in &directives.definitions {
        if let ast::Definition::DirectiveDefinition(directive) = definition {
            schema
                .directive_definitions
                .entry(directive.name.clone())
                .or_insert_with(|| directive.clone());
        }
    }

    tracing::debug!("Registered Apollo Client directives");
    schema
        .validate()
        .map_err(|with_errors| ValidateError::SchemaTransform(with_errors.errors.to_string()))
}

/// What to do with fields marked `@client`, which only exist on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientFieldsTransform {
    /// Remove `@client` fields entirely.
    StripFields,
    /// Keep the fields and only remove the `@client` directive.
    KeepFields,
}

impl ClientFieldsTransform {
    /// The transform to run, or `None` when Apollo support is disabled.
    #[must_use]
    pub const fn from_config(config: &ValidateConfig) -> Option<Self> {
        if !config.apollo {
            None
        } else if config.keep_client_fields {
            Some(Self::KeepFields)
        } else {
            Some(Self::StripFields)
        }
    }

    pub fn apply(self, document: &mut AssembledDocument) {
        for operation in &mut document.operations {
            self.selection_set(&mut operation.make_mut().selection_set);
        }
        for fragment in document.fragments.values_mut() {
            self.selection_set(&mut fragment.make_mut().selection_set);
        }
    }

    fn selection_set(self, selection_set: &mut Vec<ast::Selection>) {
        selection_set.retain_mut(|selection| match selection {
            ast::Selection::Field(field) => {
                let field = field.make_mut();
                if is_client(&field.directives) {
                    match self {
                        Self::StripFields => return false,
                        Self::KeepFields => field
                            .directives
                            .0
                            .retain(|directive| directive.name.as_str() != "client"),
                    }
                }
                self.prune(&mut field.selection_set)
            }
            ast::Selection::InlineFragment(inline) => {
                self.prune(&mut inline.make_mut().selection_set)
            }
            ast::Selection::FragmentSpread(_) => true,
        });
    }

    /// Transform a nested selection set; `false` if stripping emptied it,
    /// since a composite selection with nothing selected is invalid.
    fn prune(self, selection_set: &mut Vec<ast::Selection>) -> bool {
        if selection_set.is_empty() {
            return true;
        }
        self.selection_set(selection_set);
        !selection_set.is_empty()
    }
}

fn is_client(directives: &ast::DirectiveList) -> bool {
    directives.get("client").is_some()
}
