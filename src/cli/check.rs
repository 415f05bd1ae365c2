//! Content check command
//!
//! Loads a document strictly and prints every lint issue found in it.

use crate::application::content_store::ContentStore;
use crate::domain::repositories::ContentSource;
use crate::lint::{LintLevel, LintResult};
use std::io::Write;

/// Load and lint a document, writing a report to `out`.
///
/// Returns the lint result; a load failure is returned as an error.
pub async fn run_check<W: Write>(
    source: &dyn ContentSource,
    out: &mut W,
) -> anyhow::Result<LintResult> {
    let store = ContentStore::try_load(source).await?;
    let result = store.lint();

    writeln!(
        out,
        "{}: {} nodes, {} variables",
        store.location(),
        store.document().len(),
        store.variable_definitions().len()
    )?;

    for issue in &result.issues {
        let level = match issue.level {
            LintLevel::Error => "error",
            LintLevel::Warning => "warning",
            LintLevel::Info => "info",
        };
        match &issue.node {
            Some(node) => writeln!(out, "  {level} [{}] {node}: {}", issue.category, issue.message)?,
            None => writeln!(out, "  {level} [{}] {}", issue.category, issue.message)?,
        }
    }

    writeln!(
        out,
        "{} errors, {} warnings, {} info",
        result.error_count, result.warning_count, result.info_count
    )?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryContentSource;

    #[tokio::test]
    async fn check_reports_issues() {
        let source = InMemoryContentSource::new(
            r#"{"start":{"options":[{"label":"x","goto":"ghost"}]}}"#,
        );
        let mut out = Vec::new();

        let result = run_check(&source, &mut out).await.unwrap();

        assert!(result.has_errors());
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("memory: 1 nodes, 0 variables"));
        assert!(report.contains("error [references] start: Option 0 goes to undefined node 'ghost'"));
        assert!(report.contains("1 errors, 0 warnings, 0 info"));
    }

    #[tokio::test]
    async fn check_fails_on_unparseable_document() {
        let source = InMemoryContentSource::new("nope");
        let mut out = Vec::new();

        assert!(run_check(&source, &mut out).await.is_err());
    }
}
