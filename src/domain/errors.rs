//! Domain errors - Content and navigation rule violations

use crate::domain::value_objects::NodeId;
use thiserror::Error;

/// Errors raised while building or navigating a content graph
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Node '{id}' not found")]
    NodeNotFound { id: NodeId },

    #[error("Invalid content document: {reason}")]
    InvalidDocument { reason: String },
}

impl DomainError {
    pub fn node_not_found(id: impl Into<NodeId>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }
}
