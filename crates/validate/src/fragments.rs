//! Fragment indexing and duplicate detection across the whole input batch.

use crate::error::{Location, ValidationError};
use crate::source::{ParsedSource, Source};
use apollo_compiler::ast;
use apollo_compiler::parser::SourceMap;
use apollo_compiler::{Name, Node};
use indexmap::IndexSet;
use std::collections::HashSet;

/// A fragment definition together with the source that defines it.
#[derive(Debug, Clone)]
pub struct IndexedFragment {
    pub definition: Node<ast::FragmentDefinition>,
    pub source: Source,
    /// Source files of the defining document, used to locate diagnostics
    pub source_map: SourceMap,
}

impl IndexedFragment {
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        Location::from_span(self.definition.location(), &self.source_map)
    }
}

/// Every named fragment in the batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct FragmentIndex {
    fragments: Vec<IndexedFragment>,
}

impl FragmentIndex {
    #[must_use]
    pub fn collect(sources: &[ParsedSource]) -> Self {
        let fragments = sources
            .iter()
            .flat_map(|parsed| {
                parsed.fragments().map(|definition| IndexedFragment {
                    definition: definition.clone(),
                    source: parsed.source.clone(),
                    source_map: parsed.document.sources.clone(),
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(fragments = fragments.len(), "Indexed fragment definitions");
        Self { fragments }
    }

    #[must_use]
    pub fn fragments(&self) -> &[IndexedFragment] {
        &self.fragments
    }

    /// All fragment names seen, with repetition.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.fragments.iter().map(|fragment| &fragment.definition.name)
    }

    /// Every definition whose name was already taken by an earlier one.
    ///
    /// A name defined three times yields two entries.
    #[must_use]
    pub fn duplicates(&self) -> Vec<&IndexedFragment> {
        let mut seen = HashSet::new();
        self.fragments
            .iter()
            .filter(|fragment| !seen.insert(fragment.definition.name.as_str()))
            .collect()
    }
}

/// Errors for the duplicated names a validated document actually pulls in.
#[must_use]
pub fn duplicate_fragment_errors(
    duplicates: &[&IndexedFragment],
    used: impl Fn(&str) -> bool,
) -> Vec<ValidationError> {
    duplicates
        .iter()
        .filter(|fragment| used(fragment.definition.name.as_str()))
        .map(|fragment| {
            ValidationError::duplicate_fragment(fragment.definition.name.as_str())
                .with_location(fragment.location())
        })
        .collect()
}

/// Collect the names of all fragments spread anywhere inside a selection set,
/// including nested fields and inline fragments, in first-seen order.
pub fn collect_spreads(selection_set: &[ast::Selection], spreads: &mut IndexSet<Name>) {
    for selection in selection_set {
        match selection {
            ast::Selection::Field(field) => collect_spreads(&field.selection_set, spreads),
            ast::Selection::FragmentSpread(spread) => {
                spreads.insert(spread.fragment_name.clone());
            }
            ast::Selection::InlineFragment(inline) => {
                collect_spreads(&inline.selection_set, spreads);
            }
        }
    }
}
