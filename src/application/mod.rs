//! Application layer - Loading content and navigating it
//!
//! This layer orchestrates the domain model for a frontend. It depends on
//! domain and infrastructure but knows nothing about how nodes are drawn.

pub mod content_store;
pub mod engine;
pub mod frontend;
pub mod history;

pub use content_store::*;
pub use engine::*;
pub use frontend::*;
pub use history::*;
