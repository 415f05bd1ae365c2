//! Domain entities - The content graph as loaded from a document

use crate::domain::value_objects::{NodeId, VariableName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Label shown for a variable that is set, unless the document overrides it
pub const DEFAULT_ACTIVE_TEXT: &str = "ACTIVA";
/// Label shown for a variable that is unset, unless the document overrides it
pub const DEFAULT_INACTIVE_TEXT: &str = "INACTIVA";

const DEFAULT_TYPING_SPEED_MS: u64 = 18;
const DEFAULT_TYPING_SOUND_INTERVAL: u32 = 2;
const DEFAULT_CURSOR_CHAR: &str = "█";
const DEFAULT_PROMPT_PREFIX: &str = "> ";
const DEFAULT_AUTO_ADVANCE_DELAY_MS: u64 = 2000;

/// Root of a loaded content graph. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDocument {
    config: ContentConfig,
    nodes: BTreeMap<NodeId, Node>,
}

impl ContentDocument {
    pub fn new(config: ContentConfig, nodes: BTreeMap<NodeId, Node>) -> Self {
        Self { config, nodes }
    }

    /// One-node document that reports why the real content could not be loaded
    pub fn failure(location: &str, reason: &str) -> Self {
        let node = Node::new(NodeId::error())
            .with_lines(vec![
                "ERROR FATAL DEL SISTEMA".to_string(),
                String::new(),
                format!("No se pudo cargar: {location}"),
                reason.to_string(),
                String::new(),
                "Contacte con el administrador del sistema.".to_string(),
            ]);

        let mut nodes = BTreeMap::new();
        nodes.insert(NodeId::error(), node);

        Self {
            config: ContentConfig {
                start_node: NodeId::error(),
                ..ContentConfig::default()
            },
            nodes,
        }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Document-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct ContentConfig {
    pub start_node: NodeId,
    pub typing_speed: Option<Duration>,
    pub typing_sound_interval: Option<u32>,
    pub cursor_char: Option<String>,
    pub prompt_prefix: Option<String>,
    pub variables: BTreeMap<VariableName, BooleanVariable>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            start_node: NodeId::default_start(),
            typing_speed: None,
            typing_sound_interval: None,
            cursor_char: None,
            prompt_prefix: None,
            variables: BTreeMap::new(),
        }
    }
}

impl ContentConfig {
    /// Delay between typed characters
    pub fn typing_speed(&self) -> Duration {
        self.typing_speed
            .filter(|speed| !speed.is_zero())
            .unwrap_or(Duration::from_millis(DEFAULT_TYPING_SPEED_MS))
    }

    /// Number of typed characters between two typing sound cues
    pub fn typing_sound_interval(&self) -> u32 {
        self.typing_sound_interval
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_TYPING_SOUND_INTERVAL)
    }

    pub fn cursor_char(&self) -> &str {
        non_empty_or(self.cursor_char.as_deref(), DEFAULT_CURSOR_CHAR)
    }

    pub fn prompt_prefix(&self) -> &str {
        non_empty_or(self.prompt_prefix.as_deref(), DEFAULT_PROMPT_PREFIX)
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// A named flag whose state selects the text substituted for its tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanVariable {
    pub value: bool,
    pub active_text: String,
    pub inactive_text: String,
}

impl BooleanVariable {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            active_text: DEFAULT_ACTIVE_TEXT.to_string(),
            inactive_text: DEFAULT_INACTIVE_TEXT.to_string(),
        }
    }

    /// Build from an object definition; empty labels fall back to the defaults
    pub fn with_labels(
        value: bool,
        active_text: Option<String>,
        inactive_text: Option<String>,
    ) -> Self {
        Self {
            value,
            active_text: active_text
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_ACTIVE_TEXT.to_string()),
            inactive_text: inactive_text
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_INACTIVE_TEXT.to_string()),
        }
    }

    /// Text describing the current state
    pub fn text(&self) -> &str {
        if self.value {
            &self.active_text
        } else {
            &self.inactive_text
        }
    }
}

/// A point in the narrative graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Display lines, each a template that may contain `{{name}}` tokens
    pub lines: Vec<String>,
    pub choices: Vec<Choice>,
    pub sound: Option<String>,
    pub auto_advance: Option<NodeId>,
    pub auto_advance_delay: Option<u64>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            lines: vec![String::new()],
            choices: Vec::new(),
            sound: None,
            auto_advance: None,
            auto_advance_delay: None,
        }
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(
            self.auto_advance_delay
                .unwrap_or(DEFAULT_AUTO_ADVANCE_DELAY_MS),
        )
    }

    /// A node with no choices and no auto-advance can only be left by going back
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty() && self.auto_advance.is_none()
    }
}

/// Split a single text block into display lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// A selectable entry inside a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Choice {
    /// Navigates to another node
    Goto { label: String, target: NodeId },
    /// Flips a variable and reloads the current node in place
    Toggle {
        label: String,
        variable: VariableName,
        active_text: Option<String>,
        inactive_text: Option<String>,
    },
    /// Shown but has no effect when selected
    Display { label: String },
}

impl Choice {
    pub fn goto(label: impl Into<String>, target: impl Into<NodeId>) -> Self {
        Self::Goto {
            label: label.into(),
            target: target.into(),
        }
    }

    pub fn display(label: impl Into<String>) -> Self {
        Self::Display {
            label: label.into(),
        }
    }

    /// Static label as written in the document
    pub fn label(&self) -> &str {
        match self {
            Self::Goto { label, .. } | Self::Toggle { label, .. } | Self::Display { label } => {
                label
            }
        }
    }

    pub fn target(&self) -> Option<&NodeId> {
        match self {
            Self::Goto { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn variable(&self) -> Option<&VariableName> {
        match self {
            Self::Toggle { variable, .. } => Some(variable),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_document_starts_at_error_node() {
        let doc = ContentDocument::failure("data/content.json", "HTTP 404");

        assert_eq!(doc.config().start_node, "error");
        assert_eq!(doc.len(), 1);
        let node = doc.node("error").unwrap();
        assert!(node.lines.iter().any(|l| l.contains("data/content.json")));
        assert!(node.lines.iter().any(|l| l == "HTTP 404"));
        assert!(node.is_terminal());
    }

    #[test]
    fn config_accessors_fall_back_to_defaults() {
        let config = ContentConfig {
            prompt_prefix: Some(String::new()),
            typing_sound_interval: Some(0),
            ..ContentConfig::default()
        };

        assert_eq!(config.typing_speed(), Duration::from_millis(18));
        assert_eq!(config.typing_sound_interval(), 2);
        assert_eq!(config.cursor_char(), "█");
        assert_eq!(config.prompt_prefix(), "> ");
    }

    #[test]
    fn variable_labels_default_when_empty() {
        let var = BooleanVariable::with_labels(true, Some(String::new()), Some("off".into()));

        assert_eq!(var.active_text, DEFAULT_ACTIVE_TEXT);
        assert_eq!(var.inactive_text, "off");
        assert_eq!(var.text(), DEFAULT_ACTIVE_TEXT);
    }

    #[test]
    fn split_lines_keeps_blank_lines() {
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn auto_advance_delay_defaults_to_two_seconds() {
        let node = Node::new(NodeId::from("boot"));
        assert_eq!(node.auto_advance_delay(), Duration::from_secs(2));
    }
}
