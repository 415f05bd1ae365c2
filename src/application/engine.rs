//! Navigation engine - Traverses the content graph and drives a frontend
//!
//! The engine owns the traversal state (current node, history) and the
//! variable store. Every operation takes `&mut self`, so navigations are
//! strictly sequential: a clear/render cycle always finishes before the
//! next one can begin.

use crate::application::content_store::ContentStore;
use crate::application::frontend::Frontend;
use crate::application::history::NavigationState;
use crate::domain::entities::{Choice, ContentConfig, Node};
use crate::domain::errors::DomainError;
use crate::domain::repositories::ContentSource;
use crate::domain::resolution::{ResolvedNode, resolve_node};
use crate::domain::value_objects::NodeId;
use crate::domain::variables::VariableStore;

/// State machine over node ids, rendering through `F`
pub struct NavigationEngine<F: Frontend> {
    store: ContentStore,
    variables: VariableStore,
    state: NavigationState,
    frontend: F,
}

impl<F: Frontend> NavigationEngine<F> {
    pub fn new(store: ContentStore, frontend: F) -> Self {
        let variables = VariableStore::from_definitions(store.variable_definitions());
        Self {
            store,
            variables,
            state: NavigationState::new(),
            frontend,
        }
    }

    /// Load content (fail-soft) and build an unstarted engine over it
    pub async fn load(source: &dyn ContentSource, frontend: F) -> Self {
        Self::new(ContentStore::load(source).await, frontend)
    }

    /// Enter the configured start node
    pub async fn start(&mut self) -> Result<(), DomainError> {
        let start = self.store.config().start_node.clone();
        self.navigate_to(start.as_str()).await
    }

    /// Navigate forward to `id`.
    ///
    /// An unknown id is logged and leaves the state untouched; the frontend
    /// is not called.
    pub async fn navigate_to(&mut self, id: &str) -> Result<(), DomainError> {
        let Some(node) = self.store.node(id) else {
            log::error!("node not found: '{id}'");
            return Err(DomainError::node_not_found(id));
        };

        let resolved = resolve_node(node, &self.variables);
        log::debug!(
            "navigate {} -> {id}",
            self.state.current().map_or("<unstarted>", NodeId::as_str)
        );
        self.state.advance(node.id.clone());
        self.present(resolved).await;
        Ok(())
    }

    /// Select the option at `index` in the current node.
    ///
    /// Returns `None` without side effects when there is no current node or
    /// the index is out of range. A toggle flips its variable and reloads the
    /// current node in place; a goto navigates; a display-only choice does
    /// nothing.
    pub async fn select_option(&mut self, index: usize) -> Option<Choice> {
        let choice = self.current_node()?.choices.get(index)?.clone();

        match &choice {
            Choice::Toggle { variable, .. } => {
                self.toggle_variable(variable.as_str());
                self.reload_current_node().await;
            }
            Choice::Goto { target, .. } => {
                // A dangling target is already logged by navigate_to
                let _ = self.navigate_to(target.as_str()).await;
            }
            Choice::Display { .. } => {}
        }

        Some(choice)
    }

    /// Clear and re-render the current node without touching history
    pub async fn reload_current_node(&mut self) -> bool {
        let Some(node) = self.current_node() else {
            return false;
        };

        let resolved = resolve_node(node, &self.variables);
        log::debug!("reload {}", resolved.id);
        self.present(resolved).await;
        true
    }

    /// Return to the previous node. Returns `false` when history is empty.
    pub async fn go_back(&mut self) -> bool {
        let Some(previous) = self.state.retreat().cloned() else {
            return false;
        };

        log::debug!("back -> {previous}");
        match self.store.node(previous.as_str()) {
            Some(node) => {
                let resolved = resolve_node(node, &self.variables);
                self.present(resolved).await;
            }
            None => log::error!("node not found: '{previous}'"),
        }
        true
    }

    /// Follow `origin`'s auto-advance target, but only if `origin` is still
    /// the current node.
    pub async fn auto_advance(&mut self, origin: &str) -> bool {
        if self.current_node_id().is_none_or(|current| current != origin) {
            log::debug!("auto-advance from '{origin}' skipped, node already left");
            return false;
        }

        let Some(target) = self
            .current_node()
            .and_then(|node| node.auto_advance.clone())
        else {
            return false;
        };

        self.navigate_to(target.as_str()).await.is_ok()
    }

    /// Resolve a node against the current variable state
    pub fn resolve_node(&self, node: &Node) -> ResolvedNode {
        resolve_node(node, &self.variables)
    }

    pub fn resolve_current(&self) -> Option<ResolvedNode> {
        self.current_node().map(|node| self.resolve_node(node))
    }

    /// Flip a variable. Unknown names are ignored.
    pub fn toggle_variable(&mut self, name: &str) -> Option<bool> {
        let value = self.variables.toggle(name);
        match value {
            Some(value) => log::debug!("toggle {name} -> {value}"),
            None => log::debug!("toggle of undeclared variable '{name}' ignored"),
        }
        value
    }

    /// Current value of a variable, `false` if it is not declared
    pub fn variable_state(&self, name: &str) -> bool {
        self.variables.state(name)
    }

    pub fn current_node_id(&self) -> Option<&NodeId> {
        self.state.current()
    }

    pub fn current_node(&self) -> Option<&Node> {
        self.state
            .current()
            .and_then(|id| self.store.node(id.as_str()))
    }

    pub fn is_started(&self) -> bool {
        self.state.current().is_some()
    }

    pub fn history(&self) -> &[NodeId] {
        self.state.history()
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn config(&self) -> &ContentConfig {
        self.store.config()
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    async fn present(&mut self, resolved: ResolvedNode) {
        self.frontend.clear().await;
        self.frontend.render(resolved).await;
    }
}
