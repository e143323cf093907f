use super::{FragmentLookup, LimitRule};
use crate::error::Limit;
use crate::fragments::collect_spreads;
use apollo_compiler::ast;
use apollo_parser::{Lexer, TokenKind};
use indexmap::IndexSet;

/// Number of lexical tokens in GraphQL text.
///
/// Whitespace, comments and commas are insignificant and not counted. Lexing
/// errors are skipped as well; the parser has already reported them.
#[must_use]
pub fn count_tokens(text: &str) -> usize {
    Lexer::new(text)
        .filter_map(Result::ok)
        .filter(|token| {
            !matches!(
                token.kind(),
                TokenKind::Whitespace | TokenKind::Comment | TokenKind::Comma | TokenKind::Eof
            )
        })
        .count()
}

/// Tokens in the printed operation plus every fragment it transitively
/// references, each fragment counted once.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCountRule;

impl LimitRule for TokenCountRule {
    type Value = usize;

    fn limit(&self) -> Limit {
        Limit::Tokens
    }

    fn measure(
        &self,
        operation: &ast::OperationDefinition,
        fragments: &FragmentLookup<'_>,
    ) -> usize {
        let mut total = count_tokens(&operation.to_string());

        let mut referenced = IndexSet::new();
        collect_spreads(&operation.selection_set, &mut referenced);

        // `referenced` grows while we walk it
        let mut next = 0;
        while let Some(name) = referenced.get_index(next).cloned() {
            if let Some(fragment) = fragments.get(name.as_str()) {
                total += count_tokens(&fragment.to_string());
                collect_spreads(&fragment.selection_set, &mut referenced);
            }
            next += 1;
        }

        total
    }
}
