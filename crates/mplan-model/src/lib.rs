pub mod conformance;
pub mod entity;
pub mod error;
pub mod fields;
pub mod lookup;
pub mod master_data;
pub mod options;
pub mod record;
pub mod reference;

pub use conformance::{Issue, RuleKind, Severity};
pub use entity::{EntityId, EntityStatus, NewEntity, StoredEntity};
pub use error::{ModelError, Result};
pub use lookup::{CaseInsensitiveMap, CaseInsensitiveSet, normalize_name};
pub use master_data::{load_master_data, snapshot_from_value};
pub use options::{ValidationMode, ValidationOptions};
pub use record::{FieldValue, Record};
pub use reference::{EntityKind, ReferenceSnapshot, RejectedPairing, Relation, SnapshotBuilder};
