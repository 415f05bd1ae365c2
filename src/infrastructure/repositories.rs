//! Infrastructure implementations of the content source trait

use crate::domain::repositories::{ContentSource, SourceError};
use async_trait::async_trait;
use std::path::PathBuf;

/// Path used when no content location is given
pub const DEFAULT_CONTENT_PATH: &str = "data/content.json";

/// File system implementation of ContentSource
pub struct FileContentSource {
    path: PathBuf,
    location: String,
}

impl FileContentSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

impl Default for FileContentSource {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_PATH)
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::not_found(self.location.clone()))
            }
            Err(e) => Err(SourceError::Io {
                location: self.location.clone(),
                source: e,
            }),
        }
    }
}

/// In-memory implementation, mostly for tests and embedded content
pub struct InMemoryContentSource {
    location: String,
    content: String,
}

impl InMemoryContentSource {
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_location("memory", content)
    }

    pub fn with_location(location: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl ContentSource for InMemoryContentSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        Ok(self.content.clone())
    }
}
