use super::{Expansions, FragmentLookup, LimitRule};
use crate::error::Limit;
use apollo_compiler::ast;
use graphql_config::ComplexityConfig;

/// Weighted, depth-scaled cost of an operation.
///
/// Each field costs `object_cost` when it has a selection set and
/// `scalar_cost` otherwise, multiplied by `depth_cost_factor ^ depth` where
/// root fields sit at depth 0. Deep selections therefore cost more than the
/// same number of fields spread out wide.
///
/// A fragment is scored once at depth 0; a spread at depth `d` contributes
/// that score times `depth_cost_factor ^ d`.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityRule {
    config: ComplexityConfig,
}

impl ComplexityRule {
    #[must_use]
    pub const fn new(config: ComplexityConfig) -> Self {
        Self { config }
    }
}

impl Default for ComplexityRule {
    fn default() -> Self {
        Self::new(ComplexityConfig::default())
    }
}

impl LimitRule for ComplexityRule {
    type Value = f64;

    fn limit(&self) -> Limit {
        Limit::Complexity
    }

    fn measure(
        &self,
        operation: &ast::OperationDefinition,
        fragments: &FragmentLookup<'_>,
    ) -> f64 {
        self.selection_cost(&operation.selection_set, 0, &mut Expansions::new(*fragments))
    }
}

impl ComplexityRule {
    fn selection_cost(
        &self,
        selection_set: &[ast::Selection],
        depth: i32,
        expansions: &mut Expansions<'_, f64>,
    ) -> f64 {
        let scale = self.config.depth_cost_factor.powi(depth);
        selection_set
            .iter()
            .map(|selection| match selection {
                ast::Selection::Field(field) => {
                    let base = if field.selection_set.is_empty() {
                        self.config.scalar_cost
                    } else {
                        self.config.object_cost
                    };
                    base * scale + self.selection_cost(&field.selection_set, depth + 1, expansions)
                }
                ast::Selection::InlineFragment(inline) => {
                    self.selection_cost(&inline.selection_set, depth, expansions)
                }
                ast::Selection::FragmentSpread(spread) => expansions
                    .expand(spread, |expansions, fragment| {
                        self.selection_cost(&fragment.selection_set, 0, expansions)
                    })
                    .map_or(0.0, |cost| cost * scale),
            })
            .sum()
    }
}
