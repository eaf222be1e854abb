//! Master-data and config files.

use std::fs;
use std::path::Path;

use tracing::info;

use mplan_model::{EntityKind, ReferenceSnapshot, ValidationOptions, load_master_data};

use crate::error::{IngestError, Result};

/// Load the master-data JSON document.
///
/// Malformed sections only produce warnings; the call fails when the file
/// cannot be read or is not a JSON object.
pub fn load_master_data_file(path: &Path) -> Result<ReferenceSnapshot> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::read(path, source))?;
    let snapshot = load_master_data(&contents).map_err(|source| IngestError::MasterData {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded: Vec<&str> = EntityKind::ALL
        .into_iter()
        .filter(|kind| snapshot.entities(*kind).is_some())
        .map(EntityKind::as_str)
        .collect();
    info!(path = %path.display(), ?loaded, "master data loaded");
    Ok(snapshot)
}

/// Load [`ValidationOptions`] from TOML. Missing keys take their defaults.
pub fn load_options_file(path: &Path) -> Result<ValidationOptions> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::read(path, source))?;
    toml::from_str(&contents).map_err(|source| IngestError::Config {
        path: path.to_path_buf(),
        source,
    })
}
