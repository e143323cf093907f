use crate::{Result, ValidateError};
use apollo_compiler::ast;
use apollo_compiler::Node;
use serde::Serialize;

/// A named unit of input text: a file path or other origin plus its body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Source {
    pub name: String,
    pub body: String,
}

impl Source {
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// A [`Source`] together with its parsed executable document.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub source: Source,
    pub document: ast::Document,
}

impl ParsedSource {
    #[must_use]
    pub const fn new(source: Source, document: ast::Document) -> Self {
        Self { source, document }
    }

    /// Parse a source with apollo-compiler's parser.
    ///
    /// Parsing is not the engine's job; this is a convenience for callers that
    /// hold raw text. Any syntax error rejects the whole source.
    pub fn parse(source: Source) -> Result<Self> {
        let document = ast::Document::parse(source.body.as_str(), source.name.as_str())
            .map_err(|with_errors| ValidateError::Parse {
                name: source.name.clone(),
                message: with_errors.errors.to_string(),
            })?;
        Ok(Self { source, document })
    }

    pub fn operations(&self) -> impl Iterator<Item = &Node<ast::OperationDefinition>> {
        self.document
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                ast::Definition::OperationDefinition(operation) => Some(operation),
                _ => None,
            })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Node<ast::FragmentDefinition>> {
        self.document
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                ast::Definition::FragmentDefinition(fragment) => Some(fragment),
                _ => None,
            })
    }

    #[must_use]
    pub fn has_operations(&self) -> bool {
        self.operations().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_operations_and_fragments() {
        let parsed = ParsedSource::parse(Source::new(
            "user.graphql",
            "query A { user { ...F } } fragment F on User { id } query B { user { id } }",
        ))
        .unwrap();

        assert!(parsed.has_operations());
        assert_eq!(parsed.operations().count(), 2);
        let fragments: Vec<_> = parsed.fragments().map(|f| f.name.to_string()).collect();
        assert_eq!(fragments, vec!["F"]);
    }

    #[test]
    fn test_fragment_only_source_has_no_operations() {
        let parsed =
            ParsedSource::parse(Source::new("f.graphql", "fragment F on User { id }")).unwrap();
        assert!(!parsed.has_operations());
    }

    #[test]
    fn test_parse_error_names_source() {
        let err = ParsedSource::parse(Source::new("broken.graphql", "query {")).unwrap_err();
        let ValidateError::Parse { name, .. } = err else {
            panic!("expected a parse error, got {err:?}");
        };
        assert_eq!(name, "broken.graphql");
    }
}
