//! # retro-terminal
//!
//! A navigation engine for narrative "terminal" interfaces. A JSON document
//! describes a graph of text nodes with selectable options; the engine walks
//! that graph, keeps a back-navigation history, and resolves `{{variable}}`
//! tokens against boolean variables that options can toggle.
//!
//! Rendering is delegated to a [`Frontend`], which is always cleared before
//! each resolved node is rendered.
//!
//! ## Quick Start
//!
//! ```rust
//! use retro_terminal::{ContentStore, NavigationEngine, RecordingFrontend};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{
//!     "config": { "startNode": "a", "variables": { "flag": false } },
//!     "nodes": {
//!         "a": {
//!             "text": "v={{flag}}",
//!             "options": [{ "action": { "variable": "flag" }, "label": "toggle" }]
//!         }
//!     }
//! }"#;
//!
//! let store = ContentStore::from_json(json, "inline")?;
//! let mut engine = NavigationEngine::new(store, RecordingFrontend::new());
//!
//! engine.start().await?;
//! assert_eq!(engine.frontend().last_rendered().unwrap().lines, vec!["v=INACTIVA"]);
//!
//! engine.select_option(0).await;
//! assert_eq!(engine.frontend().last_rendered().unwrap().lines, vec!["v=ACTIVA"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Loading from a file
//!
//! Loading never fails: if the document cannot be read or parsed, the store
//! holds a single `"error"` node describing the failure.
//!
//! ```rust
//! use retro_terminal::{FileContentSource, NavigationEngine, NullFrontend};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = FileContentSource::new("does/not/exist.json");
//! let mut engine = NavigationEngine::load(&source, NullFrontend).await;
//!
//! engine.start().await.unwrap();
//! assert_eq!(engine.current_node_id().unwrap(), "error");
//! # }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod lint;

pub use application::content_store::ContentStore;
pub use application::engine::NavigationEngine;
pub use application::frontend::{Frontend, FrontendCall, NullFrontend, RecordingFrontend};
pub use application::history::NavigationState;
pub use domain::entities::{BooleanVariable, Choice, ContentConfig, ContentDocument, Node};
pub use domain::errors::DomainError;
pub use domain::repositories::{ContentSource, SourceError};
pub use domain::resolution::{ResolvedChoice, ResolvedNode, resolve_node, resolve_tokens};
pub use domain::value_objects::{NodeId, VariableName};
pub use domain::variables::VariableStore;
pub use infrastructure::parsing::{ParseError, parse_document};
pub use infrastructure::repositories::{FileContentSource, InMemoryContentSource};
pub use lint::{LintIssue, LintLevel, LintResult, lint};
