use apollo_compiler::parser::{SourceMap, SourceSpan};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidateError>;

/// Failures of the engine itself, as opposed to findings about a document.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("Failed to parse {name}: {message}")]
    Parse { name: String, message: String },

    #[error("Failed to register Apollo client directives: {0}")]
    SchemaTransform(String),
}

/// The resource budgets a document can exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Limit {
    Depth,
    Complexity,
    Aliases,
    Directives,
    Tokens,
}

impl Limit {
    /// Human-readable metric name used in messages.
    #[must_use]
    pub const fn metric(self) -> &'static str {
        match self {
            Self::Depth => "depth",
            Self::Complexity => "complexity score",
            Self::Aliases => "alias count",
            Self::Directives => "directive count",
            Self::Tokens => "token count",
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metric())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Schema-vs-document mismatch reported by apollo-compiler
    Structural,
    LimitExceeded(Limit),
    DuplicateFragmentName,
    /// Usage of a deprecated schema element. Not fatal on its own.
    DeprecatedUsage,
}

impl ErrorKind {
    /// Whether this kind of finding makes a document invalid.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::DeprecatedUsage)
    }
}

/// A 1-based position in one of the input sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Resolve a node span against the source files it was parsed from.
    ///
    /// Nodes built in memory have no span and produce no location.
    #[must_use]
    pub fn from_span(span: Option<SourceSpan>, sources: &SourceMap) -> Option<Self> {
        let span = span?;
        let range = span.line_column_range(sources)?;
        let file = sources
            .get(&span.file_id())
            .map(|file| file.path().display().to_string());
        Some(Self {
            file,
            line: range.start.line,
            column: range.start.column,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}:{}", self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// One finding about a document. This is data, never control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

impl ValidationError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            locations: Vec::new(),
        }
    }

    #[must_use]
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Structural, message)
    }

    #[must_use]
    pub fn limit_exceeded(
        limit: Limit,
        value: impl fmt::Display,
        threshold: impl fmt::Display,
    ) -> Self {
        Self::new(
            ErrorKind::LimitExceeded(limit),
            format!("Maximum {limit} exceeded: {value} (limit: {threshold})"),
        )
    }

    #[must_use]
    pub fn duplicate_fragment(name: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateFragmentName,
            format!("Name of '{name}' fragment is not unique"),
        )
    }

    #[must_use]
    pub fn deprecated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeprecatedUsage, message)
    }

    #[must_use]
    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.locations.extend(location);
        self
    }

    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(location) = self.locations.first() {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}
