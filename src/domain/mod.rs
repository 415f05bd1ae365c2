//! Domain layer - The content graph and the rules for reading it
//!
//! This layer holds the node model, the variable store and node resolution,
//! independent of how content is fetched or displayed.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod resolution;
pub mod value_objects;
pub mod variables;

pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use resolution::*;
pub use value_objects::*;
pub use variables::*;
