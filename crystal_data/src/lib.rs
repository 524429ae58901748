//! Shared data model for Crystal scene content.

pub mod defs;
pub mod validate;
pub mod value;

pub use defs::*;
pub use validate::{ValidationError, validate_world};
pub use value::GameValue;
