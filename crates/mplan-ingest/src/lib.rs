//! Loading media plan inputs: CSV plan lines, the master-data document and
//! validation options.

mod error;
mod files;
pub mod headers;
mod plan_csv;

pub use error::{IngestError, Result};
pub use files::{load_master_data_file, load_options_file};
pub use headers::{canonical_field, normalize_header};
pub use plan_csv::{ColumnMapping, PlanBatch, read_plan_csv, read_plan_from_reader};
