use serde::{Deserialize, Serialize};

/// Default ceiling for the complexity score of a single operation.
pub const DEFAULT_MAX_COMPLEXITY_SCORE: f64 = 1500.0;
/// Default cost of a field without a selection set.
pub const DEFAULT_SCALAR_COST: f64 = 1.0;
/// Default cost of a field with a selection set.
pub const DEFAULT_OBJECT_COST: f64 = 2.0;
/// Default growth factor applied per nesting level.
pub const DEFAULT_DEPTH_COST_FACTOR: f64 = 1.5;

/// Options for one validation run.
///
/// Keys are camelCase on disk (`maxDepth`, `strictFragments`, ...). A limit
/// that is absent is not enforced at all, which is different from a limit of
/// zero. `maxComplexityScore` is the only limit with a default; set it to
/// `null` explicitly to turn the complexity check off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidateConfig {
    /// Report fragment names that are defined more than once.
    pub strict_fragments: bool,
    /// Report usages of deprecated fields, arguments and enum values.
    pub strict_deprecated: bool,
    /// Understand Apollo Client's `@client` and `@connection` directives.
    pub apollo: bool,
    /// With `apollo`, keep `@client` fields and only drop the directive.
    pub keep_client_fields: bool,
    pub max_depth: Option<usize>,
    pub max_alias_count: Option<usize>,
    pub max_directive_count: Option<usize>,
    pub max_token_count: Option<usize>,
    pub max_complexity_score: Option<f64>,
    pub complexity_scalar_cost: f64,
    pub complexity_object_cost: f64,
    pub complexity_depth_cost_factor: f64,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            strict_fragments: true,
            strict_deprecated: true,
            apollo: false,
            keep_client_fields: false,
            max_depth: None,
            max_alias_count: None,
            max_directive_count: None,
            max_token_count: None,
            max_complexity_score: Some(DEFAULT_MAX_COMPLEXITY_SCORE),
            complexity_scalar_cost: DEFAULT_SCALAR_COST,
            complexity_object_cost: DEFAULT_OBJECT_COST,
            complexity_depth_cost_factor: DEFAULT_DEPTH_COST_FACTOR,
        }
    }
}

impl ValidateConfig {
    /// The cost parameters used by the complexity score.
    #[must_use]
    pub const fn complexity(&self) -> ComplexityConfig {
        ComplexityConfig {
            scalar_cost: self.complexity_scalar_cost,
            object_cost: self.complexity_object_cost,
            depth_cost_factor: self.complexity_depth_cost_factor,
        }
    }

    /// Whether any of the resource budgets is enforced.
    #[must_use]
    pub const fn has_limits(&self) -> bool {
        self.max_depth.is_some()
            || self.max_alias_count.is_some()
            || self.max_directive_count.is_some()
            || self.max_token_count.is_some()
            || self.max_complexity_score.is_some()
    }
}

/// Weights for the complexity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexityConfig {
    pub scalar_cost: f64,
    pub object_cost: f64,
    pub depth_cost_factor: f64,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        ValidateConfig::default().complexity()
    }
}
