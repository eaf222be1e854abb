use mplan_model::{EntityKind, NewEntity, StoredEntity};

use crate::error::RepositoryError;

/// The persisted entity store, as seen by the auto-create workflow.
///
/// Implementations perform blocking I/O; callers serialize access per session.
pub trait EntityRepository: Send + Sync {
    /// Find a non-archived entity by name, trimmed and compared case-insensitively.
    fn find_by_name_ci(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Option<StoredEntity>, RepositoryError>;

    /// Insert a new entity.
    fn create(&self, kind: EntityKind, entity: NewEntity) -> Result<StoredEntity, RepositoryError>;

    /// Release held connections. Further calls may fail.
    fn disconnect(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
