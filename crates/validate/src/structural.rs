use crate::error::{Location, ValidationError};
use apollo_compiler::ast;
use apollo_compiler::diagnostic::ToCliReport;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;

/// Run apollo-compiler's executable validation over a self-contained document.
///
/// Every diagnostic becomes a `Structural` error located in whichever source
/// file it points at, which can be a fragment pulled in from another source.
#[must_use]
pub fn validate_structure(
    schema: &Valid<Schema>,
    document: &ast::Document,
) -> Vec<ValidationError> {
    let Err(with_errors) = document.to_executable_validate(schema) else {
        return Vec::new();
    };

    with_errors
        .errors
        .iter()
        .map(|diagnostic| {
            ValidationError::structural(diagnostic.error.to_string()).with_location(
                Location::from_span(diagnostic.error.location(), &diagnostic.sources),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::limits::test_support::assemble;

    fn schema() -> Valid<Schema> {
        Schema::parse_and_validate(
            "type Query { user(id: ID!): User } type User { id: ID name: String }",
            "schema.graphql",
        )
        .unwrap()
    }

    fn errors(sources: &[&str]) -> Vec<ValidationError> {
        let (document, _graph) = assemble(sources);
        validate_structure(&schema(), &document.to_ast())
    }

    #[test]
    fn test_valid_document() {
        assert!(errors(&["query { user(id: 1) { id name } }"]).is_empty());
    }

    #[test]
    fn test_unknown_field() {
        // the `user` selection gets a second error besides the unknown field
        let errors = errors(&["query { user(id: 1) { email } }"]);
        assert!(errors.iter().all(|error| error.kind == ErrorKind::Structural));
        let unknown = errors
            .iter()
            .find(|error| error.message.contains("email"))
            .unwrap_or_else(|| panic!("no error mentions `email`: {errors:?}"));
        assert_eq!(unknown.locations[0].file.as_deref(), Some("doc0.graphql"));
    }

    #[test]
    fn test_error_in_fragment_points_at_its_file() {
        let errors = errors(&[
            "query { user(id: 1) { ...F } }",
            "fragment F on User { email }",
        ]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].locations[0].file.as_deref(), Some("doc1.graphql"));
    }

    #[test]
    fn test_undefined_fragment() {
        let errors = errors(&["query { user(id: 1) { ...Missing } }"]);
        assert!(!errors.is_empty());
        assert!(errors.iter().any(|error| error.message.contains("Missing")));
    }

    #[test]
    fn test_fragment_cycle() {
        let errors = errors(&[
            "query { user(id: 1) { ...A } }",
            "fragment A on User { ...B } fragment B on User { ...A }",
        ]);
        assert!(!errors.is_empty());
    }
}
