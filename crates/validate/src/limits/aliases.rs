use super::{Expansions, FragmentLookup, LimitRule};
use crate::error::Limit;
use apollo_compiler::ast;

/// Number of aliased fields, counted once per fragment expansion.
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasCountRule;

impl LimitRule for AliasCountRule {
    type Value = usize;

    fn limit(&self) -> Limit {
        Limit::Aliases
    }

    fn measure(
        &self,
        operation: &ast::OperationDefinition,
        fragments: &FragmentLookup<'_>,
    ) -> usize {
        count_aliases(&operation.selection_set, &mut Expansions::new(*fragments))
    }
}

fn count_aliases(
    selection_set: &[ast::Selection],
    expansions: &mut Expansions<'_, usize>,
) -> usize {
    selection_set
        .iter()
        .map(|selection| match selection {
            ast::Selection::Field(field) => {
                usize::from(field.alias.is_some())
                    + count_aliases(&field.selection_set, expansions)
            }
            ast::Selection::InlineFragment(inline) => {
                count_aliases(&inline.selection_set, expansions)
            }
            ast::Selection::FragmentSpread(spread) => expansions
                .expand(spread, |expansions, fragment| {
                    count_aliases(&fragment.selection_set, expansions)
                })
                .unwrap_or(0),
        })
        .sum()
}
