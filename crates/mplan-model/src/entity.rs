//! Shapes exchanged with the persisted entity store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reference::EntityKind;

/// Lifecycle status of a persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Active,
    /// Provisionally created by an import, awaiting human confirmation.
    PendingReview,
    Archived,
}

pub type EntityId = u64;

/// A row of the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub status: EntityStatus,
    pub created_by: Option<String>,
    pub original_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredEntity {
    pub fn is_archived(&self) -> bool {
        self.status == EntityStatus::Archived
    }
}

/// Insert payload for the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntity {
    pub name: String,
    pub status: EntityStatus,
    pub created_by: String,
    pub original_name: String,
    pub notes: String,
}
