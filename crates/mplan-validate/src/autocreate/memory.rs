//! In-memory entity store, for tests and dry runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use mplan_model::{
    EntityId, EntityKind, EntityStatus, NewEntity, ReferenceSnapshot, StoredEntity,
    normalize_name,
};

use super::repository::EntityRepository;
use crate::error::RepositoryError;

#[derive(Debug, Default)]
struct Rows {
    next_id: EntityId,
    entities: Vec<StoredEntity>,
}

/// A [`EntityRepository`] backed by a vector behind a mutex.
#[derive(Debug)]
pub struct InMemoryRepository {
    rows: Mutex<Rows>,
    available: AtomicBool,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Rows {
                next_id: 1,
                entities: Vec::new(),
            }),
            available: AtomicBool::new(true),
        }
    }

    /// Seed active campaigns and ranges from a reference snapshot.
    pub fn from_snapshot(snapshot: &ReferenceSnapshot) -> Self {
        let repository = Self::new();
        for kind in [EntityKind::Range, EntityKind::Campaign] {
            if let Some(names) = snapshot.entities(kind) {
                for name in names.names() {
                    repository.seed(kind, name, EntityStatus::Active);
                }
            }
        }
        repository
    }

    fn lock(&self) -> MutexGuard<'_, Rows> {
        // Rows hold plain data; a poisoned lock leaves them consistent.
        self.rows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Insert an entity directly, bypassing the availability switch.
    pub fn seed(&self, kind: EntityKind, name: &str, status: EntityStatus) -> StoredEntity {
        let mut rows = self.lock();
        let entity = StoredEntity {
            id: rows.next_id,
            kind,
            name: name.trim().to_string(),
            status,
            created_by: None,
            original_name: None,
            notes: None,
            created_at: Utc::now(),
        };
        rows.next_id += 1;
        rows.entities.push(entity.clone());
        entity
    }

    /// Simulate the store going down (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    pub fn entities(&self, kind: EntityKind) -> Vec<StoredEntity> {
        self.lock()
            .entities
            .iter()
            .filter(|entity| entity.kind == kind)
            .cloned()
            .collect()
    }

    fn ensure_available(&self) -> Result<(), RepositoryError> {
        if self.available.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(RepositoryError::Unavailable(
                "in-memory store is switched off".to_string(),
            ))
        }
    }
}

impl EntityRepository for InMemoryRepository {
    fn find_by_name_ci(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Option<StoredEntity>, RepositoryError> {
        self.ensure_available()?;
        let wanted = normalize_name(name);
        Ok(self
            .lock()
            .entities
            .iter()
            .find(|entity| {
                entity.kind == kind && !entity.is_archived() && normalize_name(&entity.name) == wanted
            })
            .cloned())
    }

    fn create(&self, kind: EntityKind, entity: NewEntity) -> Result<StoredEntity, RepositoryError> {
        self.ensure_available()?;
        let mut rows = self.lock();
        let wanted = normalize_name(&entity.name);
        if rows.entities.iter().any(|existing| {
            existing.kind == kind && !existing.is_archived() && normalize_name(&existing.name) == wanted
        }) {
            return Err(RepositoryError::Conflict {
                kind,
                name: entity.name,
            });
        }
        let stored = StoredEntity {
            id: rows.next_id,
            kind,
            name: entity.name,
            status: entity.status,
            created_by: Some(entity.created_by),
            original_name: Some(entity.original_name),
            notes: Some(entity.notes),
            created_at: Utc::now(),
        };
        rows.next_id += 1;
        rows.entities.push(stored.clone());
        debug!(%kind, id = stored.id, name = %stored.name, "entity inserted");
        Ok(stored)
    }

    fn disconnect(&self) -> Result<(), RepositoryError> {
        debug!("in-memory store disconnected");
        Ok(())
    }
}
