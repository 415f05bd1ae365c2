//! Navigation state - Current node and the back-navigation stack

use crate::domain::value_objects::NodeId;

/// Traversal state owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    current: Option<NodeId>,
    history: Vec<NodeId>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&NodeId> {
        self.current.as_ref()
    }

    /// Previously visited ids, oldest first
    pub fn history(&self) -> &[NodeId] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Move forward: the current node, if any, becomes the top of history.
    /// Advancing to the node that is already current pushes nothing.
    pub fn advance(&mut self, next: NodeId) {
        if let Some(previous) = self.current.take()
            && previous != next
        {
            self.history.push(previous);
        }
        self.current = Some(next);
    }

    /// Move back: pop the previous id and make it current without re-pushing
    /// the node being left
    pub fn retreat(&mut self) -> Option<&NodeId> {
        let previous = self.history.pop()?;
        self.current = Some(previous);
        self.current.as_ref()
    }
}
