//! Snapshot testing assertions for validation findings
//!
//! Findings are formatted consistently for readable snapshots.

use graphql_validate::{InvalidDocument, ValidationError};

/// Format findings with their messages only (without position info).
/// Useful when you only care about the messages, not positions.
pub fn format_messages(findings: &[ValidationError]) -> String {
    if findings.is_empty() {
        return String::from("(no findings)");
    }

    findings
        .iter()
        .enumerate()
        .map(|(i, finding)| format!("[{}] {}", i + 1, finding.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format findings with their first location appended.
pub fn format_findings(findings: &[ValidationError]) -> String {
    if findings.is_empty() {
        return String::from("(no findings)");
    }

    findings
        .iter()
        .enumerate()
        .map(|(i, finding)| format!("[{}] {finding}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a whole validation result, one block per invalid document.
///
/// # Example
///
/// ```ignore
/// use graphql_test_utils::assertions::format_invalid_documents;
///
/// let invalid = graphql_validate::validate(&schema, &sources, &config).unwrap();
/// insta::assert_snapshot!(format_invalid_documents(&invalid));
/// ```
pub fn format_invalid_documents(documents: &[InvalidDocument]) -> String {
    if documents.is_empty() {
        return String::from("(all documents valid)");
    }

    documents
        .iter()
        .map(|document| {
            format!(
                "{}\n  errors:\n{}\n  deprecated:\n{}",
                document.source.name,
                indent(&format_findings(&document.errors)),
                indent(&format_findings(&document.deprecated)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_validate::{Location, Source};

    #[test]
    fn test_format_messages_empty() {
        assert_eq!(format_messages(&[]), "(no findings)");
    }

    #[test]
    fn test_format_messages() {
        let findings = vec![
            ValidationError::structural("Error 1"),
            ValidationError::deprecated("Error 2"),
        ];
        assert_eq!(format_messages(&findings), "[1] Error 1\n[2] Error 2");
    }

    #[test]
    fn test_format_invalid_documents() {
        let documents = vec![InvalidDocument {
            source: Source::new("q.graphql", "query { id }"),
            errors: vec![ValidationError::structural("broken").with_location(Some(Location {
                file: Some("q.graphql".to_string()),
                line: 1,
                column: 9,
            }))],
            deprecated: Vec::new(),
        }];

        assert_eq!(
            format_invalid_documents(&documents),
            "q.graphql\n  errors:\n    [1] broken (q.graphql:1:9)\n  deprecated:\n    (no findings)"
        );
    }
}
