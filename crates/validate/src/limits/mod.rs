//! Resource budgets measured over an assembled document.
//!
//! Every rule computes one metric per operation, with fragment spreads
//! inlined. The largest value in the document is compared against the
//! configured threshold, and a document produces at most one error per rule.

mod aliases;
mod complexity;
mod depth;
mod directives;
mod tokens;

pub use aliases::AliasCountRule;
pub use complexity::ComplexityRule;
pub use depth::DepthRule;
pub use directives::DirectiveCountRule;
pub use tokens::{count_tokens, TokenCountRule};

use crate::assemble::AssembledDocument;
use crate::error::{Limit, Location, ValidationError};
use crate::graph::FragmentGraph;
use apollo_compiler::ast;
use apollo_compiler::{Name, Node};
use graphql_config::ValidateConfig;
use indexmap::{IndexMap, IndexSet};
use std::fmt::Display;

/// A metric with a threshold.
pub trait LimitRule {
    /// Metric values, compared against the threshold with `>`.
    type Value: PartialOrd + Display + Copy;

    fn limit(&self) -> Limit;

    fn measure(
        &self,
        operation: &ast::OperationDefinition,
        fragments: &FragmentLookup<'_>,
    ) -> Self::Value;
}

/// Finds fragment definitions for spreads: the assembled document first,
/// then the batch-wide graph.
#[derive(Debug, Clone, Copy)]
pub struct FragmentLookup<'a> {
    document: &'a AssembledDocument,
    graph: &'a FragmentGraph,
}

impl<'a> FragmentLookup<'a> {
    #[must_use]
    pub const fn new(document: &'a AssembledDocument, graph: &'a FragmentGraph) -> Self {
        Self { document, graph }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Node<ast::FragmentDefinition>> {
        self.document
            .fragment(name)
            .or_else(|| self.graph.definition(name))
    }
}

/// Fragment measures for one operation, computed once per fragment.
///
/// The first spread of a fragment measures its definition and every later
/// spread reuses that value, so fragments that spread each other repeatedly
/// cost linear work. A spread of a fragment whose measure is still in
/// progress (a cycle) or that is not defined anywhere contributes nothing.
#[derive(Debug)]
pub struct Expansions<'a, T> {
    fragments: FragmentLookup<'a>,
    in_progress: IndexSet<Name>,
    measured: IndexMap<Name, T>,
}

impl<'a, T: Copy> Expansions<'a, T> {
    #[must_use]
    pub fn new(fragments: FragmentLookup<'a>) -> Self {
        Self {
            fragments,
            in_progress: IndexSet::new(),
            measured: IndexMap::new(),
        }
    }

    /// The measure of the fragment behind `spread`, running `measure` on its
    /// definition the first time it is seen.
    pub fn expand(
        &mut self,
        spread: &ast::FragmentSpread,
        measure: impl FnOnce(&mut Self, &'a Node<ast::FragmentDefinition>) -> T,
    ) -> Option<T> {
        let name = &spread.fragment_name;
        if let Some(value) = self.measured.get(name) {
            return Some(*value);
        }
        if self.in_progress.contains(name) {
            return None;
        }
        let fragment = self.fragments.get(name.as_str())?;

        self.in_progress.insert(name.clone());
        let value = measure(self, fragment);
        self.in_progress.swap_remove(name);
        self.measured.insert(name.clone(), value);
        Some(value)
    }
}

/// Measure every operation and report the worst one if it exceeds `threshold`.
#[must_use]
pub fn check_limit<R: LimitRule>(
    rule: &R,
    threshold: R::Value,
    document: &AssembledDocument,
    graph: &FragmentGraph,
) -> Option<ValidationError> {
    let fragments = FragmentLookup::new(document, graph);

    let mut worst: Option<(R::Value, &Node<ast::OperationDefinition>)> = None;
    for operation in &document.operations {
        let value = rule.measure(operation, &fragments);
        tracing::trace!(
            limit = %rule.limit(),
            operation = operation.name.as_ref().map_or("<anonymous>", |n| n.as_str()),
            %value,
            "Measured operation"
        );
        if worst.as_ref().is_none_or(|(current, _)| value > *current) {
            worst = Some((value, operation));
        }
    }

    let (value, operation) = worst?;
    (value > threshold).then(|| {
        ValidationError::limit_exceeded(rule.limit(), value, threshold)
            .with_location(Location::from_span(operation.location(), document.sources()))
    })
}

/// Run every budget the config enables, in a fixed order:
/// depth, complexity, aliases, directives, tokens.
#[must_use]
pub fn check_limits(
    config: &ValidateConfig,
    document: &AssembledDocument,
    graph: &FragmentGraph,
) -> Vec<ValidationError> {
    [
        config
            .max_depth
            .and_then(|max| check_limit(&DepthRule, max, document, graph)),
        config.max_complexity_score.and_then(|max| {
            check_limit(
                &ComplexityRule::new(config.complexity()),
                max,
                document,
                graph,
            )
        }),
        config
            .max_alias_count
            .and_then(|max| check_limit(&AliasCountRule, max, document, graph)),
        config
            .max_directive_count
            .and_then(|max| check_limit(&DirectiveCountRule, max, document, graph)),
        config
            .max_token_count
            .and_then(|max| check_limit(&TokenCountRule, max, document, graph)),
    ]
    .into_iter()
    .flatten()
    .collect()
}
