use super::{Expansions, FragmentLookup, LimitRule};
use crate::error::Limit;
use apollo_compiler::ast;

/// Number of directive applications in an operation.
///
/// Counts directives on the operation itself, on fields, on spreads and on
/// inline fragments. An inlined fragment also contributes the directives on
/// its own definition, once per expansion.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveCountRule;

impl LimitRule for DirectiveCountRule {
    type Value = usize;

    fn limit(&self) -> Limit {
        Limit::Directives
    }

    fn measure(
        &self,
        operation: &ast::OperationDefinition,
        fragments: &FragmentLookup<'_>,
    ) -> usize {
        operation.directives.len()
            + count_directives(&operation.selection_set, &mut Expansions::new(*fragments))
    }
}

fn count_directives(
    selection_set: &[ast::Selection],
    expansions: &mut Expansions<'_, usize>,
) -> usize {
    selection_set
        .iter()
        .map(|selection| match selection {
            ast::Selection::Field(field) => {
                field.directives.len() + count_directives(&field.selection_set, expansions)
            }
            ast::Selection::InlineFragment(inline) => {
                inline.directives.len() + count_directives(&inline.selection_set, expansions)
            }
            ast::Selection::FragmentSpread(spread) => {
                spread.directives.len()
                    + expansions
                        .expand(spread, |expansions, fragment| {
                            fragment.directives.len()
                                + count_directives(&fragment.selection_set, expansions)
                        })
                        .unwrap_or(0)
            }
        })
        .sum()
}
