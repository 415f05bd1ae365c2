//! Node resolution - Substitutes variable tokens into a node's text and choices
//!
//! Resolution is a pure function of the node and the variable store, so a
//! node is resolved fresh on every visit and never cached.

use crate::domain::entities::{Choice, Node};
use crate::domain::value_objects::NodeId;
use crate::domain::variables::VariableStore;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;
use std::time::Duration;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z0-9_\-.]+)\s*\}\}").expect("token pattern is valid")
});

/// A node ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNode {
    pub id: NodeId,
    pub lines: Vec<String>,
    pub choices: Vec<ResolvedChoice>,
    pub sound: Option<String>,
    pub auto_advance: Option<NodeId>,
    pub auto_advance_delay: Duration,
}

impl ResolvedNode {
    /// Lines joined the way they are displayed
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A choice with its effective label computed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedChoice {
    pub label: String,
    pub choice: Choice,
}

/// Replace every `{{name}}` with the named variable's current text.
///
/// Names that are not declared are left exactly as written.
pub fn resolve_tokens(input: &str, variables: &VariableStore) -> String {
    TOKEN
        .replace_all(input, |caps: &Captures| {
            let name = &caps[1];
            match variables.text(name) {
                Some(text) => text.to_string(),
                None => {
                    log::trace!("unresolved token '{}' left in place", &caps[0]);
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Names referenced by the tokens in `input`, in order of appearance
pub fn token_names(input: &str) -> Vec<&str> {
    TOKEN
        .captures_iter(input)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Label a choice shows given the current variable state.
///
/// A toggle describes the action it will perform, so it reads the variable
/// before it is flipped.
pub fn resolve_label(choice: &Choice, variables: &VariableStore) -> String {
    match choice {
        Choice::Toggle {
            label,
            variable,
            active_text,
            inactive_text,
        } => {
            let action_text = if variables.state(variable.as_str()) {
                active_text
            } else {
                inactive_text
            };
            let text = action_text
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(label.as_str());
            resolve_tokens(text, variables)
        }
        Choice::Goto { label, .. } | Choice::Display { label } => resolve_tokens(label, variables),
    }
}

pub fn resolve_node(node: &Node, variables: &VariableStore) -> ResolvedNode {
    ResolvedNode {
        id: node.id.clone(),
        lines: node
            .lines
            .iter()
            .map(|line| resolve_tokens(line, variables))
            .collect(),
        choices: node
            .choices
            .iter()
            .map(|choice| ResolvedChoice {
                label: resolve_label(choice, variables),
                choice: choice.clone(),
            })
            .collect(),
        sound: node.sound.clone(),
        auto_advance: node.auto_advance.clone(),
        auto_advance_delay: node.auto_advance_delay(),
    }
}
