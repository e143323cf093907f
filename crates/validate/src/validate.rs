use crate::apollo::{apollo_schema, ClientFieldsTransform};
use crate::assemble::AssembledDocument;
use crate::deprecated::find_deprecated_usages;
use crate::error::ValidationError;
use crate::fragments::{duplicate_fragment_errors, FragmentIndex};
use crate::graph::FragmentGraph;
use crate::limits::check_limits;
use crate::source::{ParsedSource, Source};
use crate::structural::validate_structure;
use crate::Result;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use graphql_config::ValidateConfig;
use serde::Serialize;
use std::borrow::Cow;

/// Findings for one source. Never produced with both lists empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidDocument {
    pub source: Source,
    /// Structural, limit and duplicate fragment errors
    pub errors: Vec<ValidationError>,
    pub deprecated: Vec<ValidationError>,
}

impl InvalidDocument {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(ValidationError::is_fatal)
    }
}

/// The outcome of a run, shaped the way it is written out as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// `true` when no document failed
    pub status: bool,
    pub documents: Vec<InvalidDocument>,
}

impl ValidationReport {
    /// Deprecated usages are reported but do not fail the run.
    #[must_use]
    pub fn new(documents: Vec<InvalidDocument>) -> Self {
        let status = !documents.iter().any(InvalidDocument::has_errors);
        Self { status, documents }
    }

    /// Like [`ValidationReport::new`], but any deprecated usage fails the run.
    #[must_use]
    pub fn with_deprecated_as_errors(documents: Vec<InvalidDocument>) -> Self {
        let status = documents.is_empty();
        Self { status, documents }
    }

    /// Total number of errors across all documents.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.documents.iter().map(|document| document.errors.len()).sum()
    }
}

/// Validation state shared by every source of a batch.
///
/// The fragment index and graph are built once from all sources and only
/// read afterwards, so sources can be validated independently.
#[derive(Debug)]
pub struct Validator<'a> {
    schema: Cow<'a, Valid<Schema>>,
    config: &'a ValidateConfig,
    index: FragmentIndex,
    graph: FragmentGraph,
    transform: Option<ClientFieldsTransform>,
}

impl<'a> Validator<'a> {
    /// Index the fragments of `sources` and prepare the schema.
    ///
    /// Fails only if the Apollo directives cannot be added to the schema.
    pub fn new(
        schema: &'a Valid<Schema>,
        sources: &[ParsedSource],
        config: &'a ValidateConfig,
    ) -> Result<Self> {
        let index = FragmentIndex::collect(sources);
        let graph = FragmentGraph::build(&index);

        let transform = ClientFieldsTransform::from_config(config);
        let schema = if transform.is_some() {
            Cow::Owned(apollo_schema(schema)?)
        } else {
            Cow::Borrowed(schema)
        };

        Ok(Self {
            schema,
            config,
            index,
            graph,
            transform,
        })
    }

    #[must_use]
    pub const fn graph(&self) -> &FragmentGraph {
        &self.graph
    }

    /// The schema documents are checked against, with Apollo directives
    /// registered if enabled.
    #[must_use]
    pub fn schema(&self) -> &Valid<Schema> {
        &self.schema
    }

    /// Validate one source. `None` means it is valid or has no operations.
    #[must_use]
    pub fn validate_source(&self, parsed: &ParsedSource) -> Option<InvalidDocument> {
        let mut document = AssembledDocument::assemble(parsed, &self.graph)?;
        if let Some(transform) = self.transform {
            transform.apply(&mut document);
        }

        let mut errors = validate_structure(&self.schema, &document.to_ast());
        if self.config.has_limits() {
            errors.extend(check_limits(self.config, &document, &self.graph));
        }
        if self.config.strict_fragments {
            errors.extend(duplicate_fragment_errors(&self.index.duplicates(), |name| {
                document.fragments.contains_key(name)
            }));
        }

        let deprecated = if self.config.strict_deprecated {
            find_deprecated_usages(&self.schema, &document)
        } else {
            Vec::new()
        };

        tracing::debug!(
            source = %parsed.source.name,
            operations = document.operations.len(),
            fragments = document.fragments.len(),
            errors = errors.len(),
            deprecated = deprecated.len(),
            "Validated document"
        );

        if errors.is_empty() && deprecated.is_empty() {
            return None;
        }
        Some(InvalidDocument {
            source: parsed.source.clone(),
            errors,
            deprecated,
        })
    }
}

/// Validate a batch of parsed sources against a schema.
///
/// Returns one [`InvalidDocument`] per source with findings, in input order.
/// Sources without operations only contribute fragments. The only failure is
/// being unable to register the Apollo directives on the schema.
#[tracing::instrument(skip_all, fields(sources = sources.len()))]
pub fn validate(
    schema: &Valid<Schema>,
    sources: &[ParsedSource],
    config: &ValidateConfig,
) -> Result<Vec<InvalidDocument>> {
    let validator = Validator::new(schema, sources, config)?;
    let invalid: Vec<_> = sources
        .iter()
        .filter_map(|parsed| validator.validate_source(parsed))
        .collect();

    tracing::debug!(invalid = invalid.len(), "Validation finished");
    Ok(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn invalid(errors: usize, deprecated: usize) -> InvalidDocument {
        InvalidDocument {
            source: Source::new("q.graphql", "query { id }"),
            errors: vec![ValidationError::structural("broken"); errors],
            deprecated: vec![ValidationError::deprecated("old"); deprecated],
        }
    }

    #[test]
    fn test_report_status_ignores_deprecated_by_default() {
        let report = ValidationReport::new(vec![invalid(0, 2)]);
        assert!(report.status);
        assert_eq!(report.error_count(), 0);

        let report = ValidationReport::with_deprecated_as_errors(vec![invalid(0, 2)]);
        assert!(!report.status);
    }

    #[test]
    fn test_report_fails_on_errors() {
        let report = ValidationReport::new(vec![invalid(0, 1), invalid(3, 0)]);
        assert!(!report.status);
        assert_eq!(report.error_count(), 3);
        assert!(ValidationReport::new(Vec::new()).status);
    }

    #[test]
    fn test_report_json_shape() {
        let report = ValidationReport::new(vec![invalid(1, 0)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], false);
        assert_eq!(json["documents"][0]["source"]["name"], "q.graphql");
        assert_eq!(json["documents"][0]["errors"][0]["kind"], "structural");
        assert_eq!(json["documents"][0]["deprecated"], serde_json::json!([]));
    }

    #[test]
    fn test_validator_registers_apollo_directives_once() {
        let schema = Schema::parse_and_validate("type Query { id: ID }", "schema.graphql").unwrap();
        let config = ValidateConfig {
            apollo: true,
            ..ValidateConfig::default()
        };
        let validator = Validator::new(&schema, &[], &config).unwrap();
        assert!(validator.schema().directive_definitions.contains_key("client"));
        assert!(validator.graph().is_empty());

        let plain = ValidateConfig::default();
        let validator = Validator::new(&schema, &[], &plain).unwrap();
        assert!(!validator.schema().directive_definitions.contains_key("client"));
    }

    #[test]
    fn test_kind_of_limit_errors() {
        let schema = Schema::parse_and_validate(
            "type Query { user: User } type User { id: ID friend: User }",
            "schema.graphql",
        )
        .unwrap();
        let parsed = ParsedSource::parse(Source::new(
            "q.graphql",
            "query { user { friend { id } } }",
        ))
        .unwrap();
        let config = ValidateConfig {
            max_depth: Some(1),
            ..ValidateConfig::default()
        };

        let result = validate(&schema, &[parsed], &config).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].errors[0].kind,
            ErrorKind::LimitExceeded(crate::error::Limit::Depth)
        );
    }

    #[test]
    fn test_no_budgets_means_no_limit_errors() {
        let schema = Schema::parse_and_validate(
            "type Query { user: User } type User { id: ID friend: User }",
            "schema.graphql",
        )
        .unwrap();
        let deep = format!(
            "query {{ user {}{{ id }} {} }}",
            "{ friend ".repeat(30),
            "}".repeat(30)
        );
        let parsed = ParsedSource::parse(Source::new("q.graphql", deep)).unwrap();
        let config = ValidateConfig {
            max_complexity_score: None,
            ..ValidateConfig::default()
        };

        assert!(!config.has_limits());
        assert!(validate(&schema, &[parsed], &config).unwrap().is_empty());
    }
}
