//! Command-line frontends
//!
//! `play` runs a document interactively; `check` reports authoring defects.

pub mod check;
pub mod play;
pub mod terminal;
