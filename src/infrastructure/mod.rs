//! Infrastructure layer - External dependencies and adapters
//!
//! This layer contains the JSON document parser and the concrete places a
//! document can be fetched from.

pub mod parsing;
pub mod repositories;

pub use parsing::*;
pub use repositories::*;
