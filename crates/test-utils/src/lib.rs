//! # GraphQL Test Utilities
//!
//! Shared test infrastructure for the validation engine: schema fixtures,
//! helpers that turn inline text into parsed sources, and formatting for
//! snapshot assertions.

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_raw_string_hashes)]
//!
//! ## Quick Start
//!
//! ```ignore
//! use graphql_test_utils::{fixtures::BASIC_SCHEMA, parse_sources, schema};
//!
//! let schema = schema(BASIC_SCHEMA);
//! let sources = parse_sources(&[("query.graphql", "query { user(id: 1) { id } }")]);
//! let invalid = graphql_validate::validate(&schema, &sources, &Default::default()).unwrap();
//! assert!(invalid.is_empty());
//! ```

pub mod assertions;
pub mod fixtures;

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use graphql_validate::{ParsedSource, Source};

/// Parse and validate a schema fixture, panicking on errors.
pub fn schema(sdl: &str) -> Valid<Schema> {
    match Schema::parse_and_validate(sdl, "schema.graphql") {
        Ok(schema) => schema,
        Err(with_errors) => panic!("invalid schema fixture:\n{}", with_errors.errors),
    }
}

/// Parse `(name, body)` pairs into sources, panicking on syntax errors.
pub fn parse_sources(sources: &[(&str, &str)]) -> Vec<ParsedSource> {
    sources
        .iter()
        .map(|(name, body)| match ParsedSource::parse(Source::new(*name, *body)) {
            Ok(parsed) => parsed,
            Err(error) => panic!("invalid document fixture: {error}"),
        })
        .collect()
}
