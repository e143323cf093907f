use crate::fragments::{collect_spreads, FragmentIndex};
use apollo_compiler::ast;
use apollo_compiler::parser::SourceMap;
use apollo_compiler::{Name, Node};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

#[derive(Debug, Clone)]
struct FragmentNode {
    definition: Node<ast::FragmentDefinition>,
    source_map: SourceMap,
    /// Fragments spread by this one, in first-seen order
    dependencies: IndexSet<Name>,
}

/// Directed graph of fragment names where an edge `A -> B` means `A` spreads `B`.
///
/// Built once per batch and only read afterwards. Cycles are allowed: they are
/// invalid GraphQL, but reporting them is apollo-compiler's job, and the
/// resolver below terminates on them.
#[derive(Debug, Clone, Default)]
pub struct FragmentGraph {
    nodes: IndexMap<Name, FragmentNode>,
}

impl FragmentGraph {
    /// Build the graph from every indexed fragment.
    ///
    /// When a name is defined more than once the first definition wins.
    #[must_use]
    pub fn build(index: &FragmentIndex) -> Self {
        let mut nodes: IndexMap<Name, FragmentNode> = IndexMap::new();

        for fragment in index.fragments() {
            let name = fragment.definition.name.clone();
            if nodes.contains_key(&name) {
                tracing::trace!(
                    %name,
                    source = %fragment.source.name,
                    "Skipping duplicate fragment"
                );
                continue;
            }

            let mut dependencies = IndexSet::new();
            collect_spreads(&fragment.definition.selection_set, &mut dependencies);

            nodes.insert(
                name,
                FragmentNode {
                    definition: fragment.definition.clone(),
                    source_map: fragment.source_map.clone(),
                    dependencies,
                },
            );
        }

        tracing::debug!(fragments = nodes.len(), "Built fragment dependency graph");
        Self { nodes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&Node<ast::FragmentDefinition>> {
        self.nodes.get(name).map(|node| &node.definition)
    }

    #[must_use]
    pub fn source_map(&self, name: &str) -> Option<&SourceMap> {
        self.nodes.get(name).map(|node| &node.source_map)
    }

    /// Direct dependencies of a fragment.
    #[must_use]
    pub fn dependencies(&self, name: &str) -> Option<&IndexSet<Name>> {
        self.nodes.get(name).map(|node| &node.dependencies)
    }

    /// Everything needed to make `name` self-contained: the fragment itself
    /// first, then its transitive dependencies in depth-first order.
    ///
    /// Each name is expanded at most once per call, so `A -> B -> A` resolves
    /// `A` to `[A, B]`. Unknown names resolve to nothing.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Vec<Node<ast::FragmentDefinition>> {
        let mut visited = HashSet::new();
        let mut resolved = Vec::new();
        self.resolve_into(name, &mut visited, &mut resolved);
        resolved
    }

    fn resolve_into<'a>(
        &'a self,
        name: &str,
        visited: &mut HashSet<&'a str>,
        resolved: &mut Vec<Node<ast::FragmentDefinition>>,
    ) {
        let Some((key, node)) = self.nodes.get_key_value(name) else {
            return;
        };
        if !visited.insert(key.as_str()) {
            return;
        }

        resolved.push(node.definition.clone());
        for dependency in &node.dependencies {
            self.resolve_into(dependency.as_str(), visited, resolved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ParsedSource, Source};

    fn graph(sources: &[(&str, &str)]) -> FragmentGraph {
        let parsed: Vec<_> = sources
            .iter()
            .map(|(name, body)| ParsedSource::parse(Source::new(*name, *body)).unwrap())
            .collect();
        FragmentGraph::build(&FragmentIndex::collect(&parsed))
    }

    fn names(fragments: &[Node<ast::FragmentDefinition>]) -> Vec<&str> {
        fragments.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_dependencies_are_ordered() {
        let graph = graph(&[(
            "a.graphql",
            "fragment A on User { ...C friends { ...B ... on User { ...C } } }
             fragment B on User { id }
             fragment C on User { id }",
        )]);

        let deps: Vec<_> = graph.dependencies("A").unwrap().iter().map(Name::as_str).collect();
        assert_eq!(deps, vec!["C", "B"]);
        assert!(graph.dependencies("B").unwrap().is_empty());
        assert!(graph.dependencies("Missing").is_none());
    }

    #[test]
    fn test_resolve_self_first_then_transitive() {
        let graph = graph(&[
            ("a.graphql", "fragment A on User { ...B }"),
            ("b.graphql", "fragment B on User { ...C ...D }"),
            ("c.graphql", "fragment C on User { id } fragment D on User { ...C }"),
        ]);

        assert_eq!(names(&graph.resolve("A")), vec!["A", "B", "C", "D"]);
        assert_eq!(names(&graph.resolve("D")), vec!["D", "C"]);
    }

    #[test]
    fn test_resolve_terminates_on_cycle() {
        let graph = graph(&[(
            "cycle.graphql",
            "fragment A on User { ...B } fragment B on User { ...A }",
        )]);

        assert_eq!(names(&graph.resolve("A")), vec!["A", "B"]);
        assert_eq!(names(&graph.resolve("B")), vec!["B", "A"]);
    }

    #[test]
    fn test_resolve_terminates_on_self_reference() {
        let graph = graph(&[("self.graphql", "fragment A on User { friends { ...A } }")]);
        assert_eq!(names(&graph.resolve("A")), vec!["A"]);
    }

    #[test]
    fn test_resolve_unknown_is_empty() {
        let graph = graph(&[("a.graphql", "fragment A on User { ...Missing }")]);
        assert!(graph.resolve("Nope").is_empty());
        assert_eq!(names(&graph.resolve("A")), vec!["A"]);
    }

    #[test]
    fn test_first_definition_wins() {
        let graph = graph(&[
            ("a.graphql", "fragment F on User { id }"),
            ("b.graphql", "fragment F on User { name }"),
        ]);

        assert_eq!(graph.len(), 1);
        let kept = &graph.definition("F").unwrap().selection_set;
        assert!(matches!(
            kept.as_slice(),
            [ast::Selection::Field(field)] if field.name.as_str() == "id"
        ));
    }
}
