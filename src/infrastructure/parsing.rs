//! Infrastructure for parsing content documents from JSON

use crate::domain::entities::{
    BooleanVariable, Choice, ContentConfig, ContentDocument, Node, split_lines,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{NodeId, VariableName};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// Errors produced while turning document text into a `ContentDocument`
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON syntax error: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error(transparent)]
    Structure(#[from] DomainError),
}

// Fields are read as loose JSON values and coerced in the build step, so a
// mistyped field degrades to its default instead of failing the document.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    start_node: Option<Value>,
    typing_speed: Option<Value>,
    typing_sound_interval: Option<Value>,
    cursor_char: Option<Value>,
    prompt_prefix: Option<Value>,
    variables: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: Option<Value>,
    text: Option<Value>,
    options: Option<Value>,
    sound: Option<Value>,
    auto_advance: Option<Value>,
    auto_advance_delay: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOption {
    label: Option<Value>,
    goto: Option<Value>,
    action: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAction {
    variable: Option<Value>,
    active_text: Option<Value>,
    inactive_text: Option<Value>,
}

/// Parse a content document.
///
/// A document with neither a `nodes` nor a `config` key is read as a bare
/// node mapping that starts at `"start"`.
pub fn parse_document(content: &str) -> Result<ContentDocument, ParseError> {
    let root: Value = serde_json::from_str(content)?;
    let Value::Object(mut root) = root else {
        return Err(DomainError::invalid_document("document root must be a JSON object").into());
    };

    let (config, nodes) = if !root.contains_key("nodes") && !root.contains_key("config") {
        (RawConfig::default(), root)
    } else {
        let config = match root.remove("config") {
            Some(value) => from_object(value)?,
            None => RawConfig::default(),
        };
        // A document with config but no nodes key keeps its nodes at the top level
        let nodes = match root.remove("nodes") {
            Some(Value::Object(nodes)) => nodes,
            Some(Value::Null) => Map::new(),
            Some(_) => {
                return Err(DomainError::invalid_document("'nodes' must be an object").into());
            }
            None => root,
        };
        (config, nodes)
    };

    let nodes = nodes
        .into_iter()
        .map(|(key, value)| -> Result<(NodeId, Node), ParseError> {
            let id = NodeId::from(key);
            Ok((id.clone(), build_node(id, from_object(value)?)?))
        })
        .collect::<Result<BTreeMap<_, _>, ParseError>>()?;

    Ok(ContentDocument::new(build_config(config), nodes))
}

/// Deserialize an object into `T`; anything that is not an object reads as empty
fn from_object<T: DeserializeOwned + Default>(value: Value) -> Result<T, ParseError> {
    match value {
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(T::default()),
    }
}

fn build_config(raw: RawConfig) -> ContentConfig {
    let variables = match raw.variables {
        Some(Value::Object(defs)) => defs
            .into_iter()
            .map(|(name, def)| (VariableName::from(name), build_variable(&def)))
            .collect(),
        _ => BTreeMap::new(),
    };

    ContentConfig {
        start_node: node_ref(raw.start_node).unwrap_or_else(NodeId::default_start),
        typing_speed: millis(raw.typing_speed)
            .map(|ms| Duration::from_nanos((ms * 1_000_000.0).round() as u64)),
        typing_sound_interval: millis(raw.typing_sound_interval)
            .filter(|n| *n >= 1.0)
            .map(|n| n.floor() as u32),
        cursor_char: string(raw.cursor_char),
        prompt_prefix: string(raw.prompt_prefix),
        variables,
    }
}

/// A bare boolean, or an object whose `value` is read by truthiness
fn build_variable(def: &Value) -> BooleanVariable {
    match def {
        Value::Bool(value) => BooleanVariable::new(*value),
        Value::Object(fields) => BooleanVariable::with_labels(
            fields.get("value").is_some_and(truthy),
            string(fields.get("activeText").cloned()),
            string(fields.get("inactiveText").cloned()),
        ),
        _ => BooleanVariable::new(false),
    }
}

fn build_node(id: NodeId, raw: RawNode) -> Result<Node, ParseError> {
    if let Some(Value::String(declared)) = &raw.id
        && declared != id.as_str()
    {
        log::warn!("node '{id}' declares mismatched id '{declared}', using the mapping key");
    }

    let lines = match raw.text {
        Some(Value::Array(items)) => items.into_iter().map(line_text).collect(),
        Some(Value::String(text)) => split_lines(&text),
        _ => vec![String::new()],
    };

    let choices = match raw.options {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| from_object(item).and_then(build_choice))
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    Ok(Node {
        id,
        lines,
        choices,
        sound: string(raw.sound),
        auto_advance: node_ref(raw.auto_advance),
        auto_advance_delay: millis(raw.auto_advance_delay).map(|ms| ms.round() as u64),
    })
}

/// Pick the variant from the option's shape: an action wins over a goto
fn build_choice(raw: RawOption) -> Result<Choice, ParseError> {
    let label = string(raw.label).unwrap_or_default();

    let action: RawAction = match raw.action {
        Some(value) => from_object(value)?,
        None => RawAction::default(),
    };
    if let Some(variable) = string(action.variable) {
        return Ok(Choice::Toggle {
            label,
            variable: VariableName::from(variable),
            active_text: string(action.active_text),
            inactive_text: string(action.inactive_text),
        });
    }

    Ok(match node_ref(raw.goto) {
        Some(target) => Choice::Goto { label, target },
        None => Choice::Display { label },
    })
}

fn line_text(value: Value) -> String {
    match value {
        Value::String(line) => line,
        _ => String::new(),
    }
}

/// A non-empty string, or nothing
fn string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// A node reference; numeric keys are accepted as their decimal text
fn node_ref(value: Option<Value>) -> Option<NodeId> {
    match value {
        Some(Value::Number(n)) => Some(NodeId::from(n.to_string())),
        other => string(other).map(NodeId::from),
    }
}

/// A positive, finite number of milliseconds
fn millis(value: Option<Value>) -> Option<f64> {
    value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|ms| ms.is_finite() && *ms > 0.0)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
