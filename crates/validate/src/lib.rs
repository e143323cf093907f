//! Static validation of executable GraphQL documents.
//!
//! A batch of sources is validated against a schema in one pass. Fragments
//! may be defined in any source; every operation-bearing source is assembled
//! into a self-contained document, checked by apollo-compiler, measured
//! against the configured resource budgets and scanned for deprecated usages.

mod apollo;
mod assemble;
mod deprecated;
mod error;
mod fragments;
mod graph;
pub mod limits;
mod source;
mod structural;
mod validate;

pub use apollo::{apollo_schema, ClientFieldsTransform};
pub use assemble::AssembledDocument;
pub use deprecated::find_deprecated_usages;
pub use error::{ErrorKind, Limit, Location, Result, ValidateError, ValidationError};
pub use fragments::{collect_spreads, duplicate_fragment_errors, FragmentIndex, IndexedFragment};
pub use graph::FragmentGraph;
pub use source::{ParsedSource, Source};
pub use structural::validate_structure;
pub use validate::{validate, InvalidDocument, ValidationReport, Validator};

pub use graphql_config::{ComplexityConfig, ValidateConfig};
