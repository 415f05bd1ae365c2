//! Frontend contract - The two-phase clear/render protocol the engine drives

use crate::domain::resolution::ResolvedNode;
use async_trait::async_trait;

/// Display surface driven by the navigation engine.
///
/// For every navigation the engine awaits `clear` to completion before it
/// calls `render`, so a clear animation never overlaps new content.
#[async_trait]
pub trait Frontend: Send {
    /// Clear the display; returns once the clear has finished
    async fn clear(&mut self);

    /// Show a resolved node
    async fn render(&mut self, node: ResolvedNode);
}

/// Frontend that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrontend;

#[async_trait]
impl Frontend for NullFrontend {
    async fn clear(&mut self) {}

    async fn render(&mut self, _node: ResolvedNode) {}
}

/// One call received by a `RecordingFrontend`
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendCall {
    Clear,
    Render(ResolvedNode),
}

/// Frontend that records every call, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingFrontend {
    calls: Vec<FrontendCall>,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[FrontendCall] {
        &self.calls
    }

    /// Every node rendered so far
    pub fn rendered(&self) -> Vec<&ResolvedNode> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                FrontendCall::Render(node) => Some(node),
                FrontendCall::Clear => None,
            })
            .collect()
    }

    pub fn last_rendered(&self) -> Option<&ResolvedNode> {
        self.rendered().into_iter().last()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

#[async_trait]
impl Frontend for RecordingFrontend {
    async fn clear(&mut self) {
        self.calls.push(FrontendCall::Clear);
    }

    async fn render(&mut self, node: ResolvedNode) {
        self.calls.push(FrontendCall::Render(node));
    }
}
