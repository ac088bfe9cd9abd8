//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod gradebook;
pub mod report;

pub use entities::*;
pub use error::{DomainError, DomainResult, EntityKind};
pub use gradebook::Gradebook;
pub use report::{format_general, format_value};
