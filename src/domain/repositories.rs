//! Content source abstraction - Where a content document is fetched from

use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// A location a content document can be fetched from
///
/// This trait defines the contract for retrieving the raw document,
/// without specifying the transport (file system, memory, network, etc.)
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable location, used in diagnostics
    fn location(&self) -> &str;

    /// Fetch the raw document text
    async fn fetch(&self) -> Result<String, SourceError>;
}

/// Failures while fetching or decoding a content document
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Content not found: {location}")]
    NotFound { location: String },

    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid content in {location}: {source}")]
    InvalidFormat {
        location: String,
        #[source]
        source: DomainError,
    },
}

impl SourceError {
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::NotFound {
            location: location.into(),
        }
    }

    /// Short reason suitable for display to an end user
    pub fn reason(&self) -> String {
        match self {
            Self::NotFound { .. } => "Contenido no encontrado".to_string(),
            Self::Io { source, .. } => source.to_string(),
            Self::Parse { source, .. } => source.to_string(),
            Self::InvalidFormat { source, .. } => source.to_string(),
        }
    }
}
