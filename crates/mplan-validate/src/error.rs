//! Errors raised outside rule evaluation.
//!
//! Validation findings are [`Issue`](mplan_model::Issue)s, never errors.
//! These types cover the entity store and the auto-create workflow.

use thiserror::Error;

use mplan_model::EntityKind;

/// Failures of the persisted entity store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity store unavailable: {0}")]
    Unavailable(String),
    #[error("{kind} '{name}' already exists")]
    Conflict { kind: EntityKind, name: String },
}

/// Failures of the auto-create workflow.
#[derive(Debug, Error)]
pub enum AutoCreateError {
    #[error("{kind} name is empty")]
    EmptyName { kind: EntityKind },
    #[error("range '{name}' does not exist and must be created manually")]
    RangeNotFound { name: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, AutoCreateError>;
