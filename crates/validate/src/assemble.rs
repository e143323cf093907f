use crate::fragments::collect_spreads;
use crate::graph::FragmentGraph;
use crate::source::ParsedSource;
use apollo_compiler::ast;
use apollo_compiler::parser::SourceMap;
use apollo_compiler::{Name, Node};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// The operations of one source plus every fragment they transitively need.
///
/// Built fresh for each source and dropped after it has been validated.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    pub operations: Vec<Node<ast::OperationDefinition>>,
    /// Deduplicated by name, in first-seen order
    pub fragments: IndexMap<Name, Node<ast::FragmentDefinition>>,
    sources: SourceMap,
}

impl AssembledDocument {
    /// Assemble the document for a source, or `None` if it has no operations.
    ///
    /// Spreads the graph cannot resolve are left dangling; apollo-compiler
    /// reports them during structural validation.
    #[must_use]
    pub fn assemble(parsed: &ParsedSource, graph: &FragmentGraph) -> Option<Self> {
        let operations: Vec<_> = parsed.operations().cloned().collect();
        if operations.is_empty() {
            return None;
        }

        let mut spreads = IndexSet::new();
        for operation in &operations {
            collect_spreads(&operation.selection_set, &mut spreads);
        }

        let mut fragments = IndexMap::new();
        for spread in &spreads {
            for fragment in graph.resolve(spread.as_str()) {
                fragments.entry(fragment.name.clone()).or_insert(fragment);
            }
        }

        let mut sources = parsed.document.sources.clone();
        for name in fragments.keys() {
            if let Some(fragment_sources) = graph.source_map(name.as_str()) {
                Arc::make_mut(&mut sources).extend(
                    fragment_sources
                        .iter()
                        .map(|(file_id, file)| (*file_id, Arc::clone(file))),
                );
            }
        }

        tracing::trace!(
            source = %parsed.source.name,
            operations = operations.len(),
            fragments = fragments.len(),
            "Assembled document"
        );

        Some(Self {
            operations,
            fragments,
            sources,
        })
    }

    /// Source files of the operations and of every included fragment.
    #[must_use]
    pub const fn sources(&self) -> &SourceMap {
        &self.sources
    }

    #[must_use]
    pub fn fragment(&self, name: &str) -> Option<&Node<ast::FragmentDefinition>> {
        self.fragments.get(name)
    }

    /// A standalone AST: operations first, then fragments.
    #[must_use]
    pub fn to_ast(&self) -> ast::Document {
        let mut document = ast::Document::new();
        document.sources = self.sources.clone();
        document.definitions.extend(
            self.operations
                .iter()
                .cloned()
                .map(ast::Definition::OperationDefinition),
        );
        document.definitions.extend(
            self.fragments
                .values()
                .cloned()
                .map(ast::Definition::FragmentDefinition),
        );
        document
    }
}
