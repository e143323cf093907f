use super::{Expansions, FragmentLookup, LimitRule};
use crate::error::Limit;
use apollo_compiler::ast;

/// Maximum nesting of selection sets.
///
/// A leaf field has depth 0 and a field with a selection set adds one level,
/// so `{ user { friends { id } } }` has depth 2. Spreads and inline fragments
/// are transparent. Introspection selections count like any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthRule;

impl LimitRule for DepthRule {
    type Value = usize;

    fn limit(&self) -> Limit {
        Limit::Depth
    }

    fn measure(
        &self,
        operation: &ast::OperationDefinition,
        fragments: &FragmentLookup<'_>,
    ) -> usize {
        selection_depth(&operation.selection_set, &mut Expansions::new(*fragments))
    }
}

fn selection_depth(
    selection_set: &[ast::Selection],
    expansions: &mut Expansions<'_, usize>,
) -> usize {
    selection_set
        .iter()
        .map(|selection| match selection {
            ast::Selection::Field(field) => {
                if field.selection_set.is_empty() {
                    0
                } else {
                    1 + selection_depth(&field.selection_set, expansions)
                }
            }
            ast::Selection::InlineFragment(inline) => {
                selection_depth(&inline.selection_set, expansions)
            }
            ast::Selection::FragmentSpread(spread) => expansions
                .expand(spread, |expansions, fragment| {
                    selection_depth(&fragment.selection_set, expansions)
                })
                .unwrap_or(0),
        })
        .max()
        .unwrap_or(0)
}
