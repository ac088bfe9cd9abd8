//! Domain-level errors (no external dependencies)

use std::fmt;

use thiserror::Error;

/// Which kind of named record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Subject,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Student => f.write_str("student"),
            EntityKind::Subject => f.write_str("subject"),
        }
    }
}

/// Domain errors represent rejected gradebook operations.
/// None of them is fatal; the caller decides how to present them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: EntityKind, name: String },

    #[error("unknown {kind}: {name}")]
    NotFound { kind: EntityKind, name: String },
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn already_exists(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            name: name.into(),
        }
    }

    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
