//! Content store - Loads a content document and owns it for the engine's lifetime

use crate::domain::entities::{BooleanVariable, ContentConfig, ContentDocument, Node};
use crate::domain::repositories::{ContentSource, SourceError};
use crate::domain::value_objects::VariableName;
use crate::infrastructure::parsing::{ParseError, parse_document};
use crate::lint::{self, LintLevel, LintResult};
use std::collections::BTreeMap;

/// Immutable node table, config and variable definitions of one document
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStore {
    document: ContentDocument,
    location: String,
}

impl ContentStore {
    pub fn new(document: ContentDocument, location: impl Into<String>) -> Self {
        Self {
            document,
            location: location.into(),
        }
    }

    /// Load from a source, never failing.
    ///
    /// Any fetch or parse failure is replaced by a one-node document whose
    /// `"error"` node describes the failure, so there is always something
    /// to navigate.
    pub async fn load(source: &dyn ContentSource) -> Self {
        match Self::try_load(source).await {
            Ok(store) => store,
            Err(e) => {
                log::error!("failed to load content from {}: {e}", source.location());
                Self::new(
                    ContentDocument::failure(source.location(), &e.reason()),
                    source.location(),
                )
            }
        }
    }

    /// Load from a source, returning the failure instead of substituting it
    pub async fn try_load(source: &dyn ContentSource) -> Result<Self, SourceError> {
        let location = source.location().to_string();
        let content = source.fetch().await?;

        let document = parse_document(&content).map_err(|e| match e {
            ParseError::Syntax(source) => SourceError::Parse {
                location: location.clone(),
                source,
            },
            ParseError::Structure(source) => SourceError::InvalidFormat {
                location: location.clone(),
                source,
            },
        })?;

        log::info!("loaded {} nodes from {location}", document.len());
        report_issues(&lint::lint(&document));

        Ok(Self::new(document, location))
    }

    pub fn from_json(content: &str, location: impl Into<String>) -> Result<Self, ParseError> {
        Ok(Self::new(parse_document(content)?, location))
    }

    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn config(&self) -> &ContentConfig {
        self.document.config()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.document.node(id)
    }

    pub fn variable_definitions(&self) -> &BTreeMap<VariableName, BooleanVariable> {
        &self.document.config().variables
    }

    /// Check the document for dangling references and unreachable nodes
    pub fn lint(&self) -> LintResult {
        lint::lint(&self.document)
    }
}

fn report_issues(result: &LintResult) {
    for issue in &result.issues {
        let node = issue
            .node
            .as_ref()
            .map(|id| format!(" in node '{id}'"))
            .unwrap_or_default();
        match issue.level {
            LintLevel::Error | LintLevel::Warning => {
                log::warn!("[{}] {}{node}", issue.category, issue.message)
            }
            LintLevel::Info => log::debug!("[{}] {}{node}", issue.category, issue.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::{FileContentSource, InMemoryContentSource};
    use async_trait::async_trait;

    struct UnreachableSource;

    #[async_trait]
    impl ContentSource for UnreachableSource {
        fn location(&self) -> &str {
            "http://content.invalid/data.json"
        }

        async fn fetch(&self) -> Result<String, SourceError> {
            Err(SourceError::Io {
                location: self.location().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
            })
        }
    }

    #[tokio::test]
    async fn load_parses_valid_document() {
        let source = InMemoryContentSource::new(r#"{"start":{"text":"hi"}}"#);
        let store = ContentStore::load(&source).await;

        assert_eq!(store.config().start_node, "start");
        assert!(store.node("start").is_some());
        assert_eq!(store.location(), "memory");
    }

    #[tokio::test]
    async fn transport_failure_becomes_error_document() {
        let store = ContentStore::load(&UnreachableSource).await;

        assert_eq!(store.config().start_node, "error");
        assert_eq!(store.document().len(), 1);
        let node = store.node("error").unwrap();
        assert!(node.lines.iter().any(|l| l.contains("content.invalid")));
        assert!(node.lines.iter().any(|l| l == "refused"));
        assert!(store.variable_definitions().is_empty());
    }

    #[tokio::test]
    async fn parse_failure_becomes_error_document() {
        let source = InMemoryContentSource::new("{ broken");
        let store = ContentStore::load(&source).await;

        assert_eq!(store.config().start_node, "error");
        assert!(store.node("error").is_some());
    }

    #[tokio::test]
    async fn missing_file_becomes_error_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = FileContentSource::new(dir.path().join("content.json"));
        let store = ContentStore::load(&source).await;

        assert_eq!(store.config().start_node, "error");
    }

    #[tokio::test]
    async fn try_load_reports_parse_error() {
        let source = InMemoryContentSource::new("[]");

        match ContentStore::try_load(&source).await {
            Err(SourceError::InvalidFormat { location, .. }) => assert_eq!(location, "memory"),
            other => panic!("Expected InvalidFormat error, got: {other:?}"),
        }
    }
}
