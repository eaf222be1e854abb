//! Reading media plan lines from CSV.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use mplan_model::{FieldValue, Record};

use crate::error::{IngestError, Result};
use crate::headers::{canonical_field, normalize_header};

/// A source column and the record field it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub source: String,
    pub field: String,
    /// Whether `field` came from the alias table.
    pub canonical: bool,
}

/// Plan lines read from one file, in file order.
#[derive(Debug, Clone, Default)]
pub struct PlanBatch {
    pub columns: Vec<ColumnMapping>,
    pub records: Vec<Record>,
}

impl PlanBatch {
    /// Source headers that matched no known field.
    pub fn unmapped_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|column| !column.canonical && !column.source.is_empty())
            .map(|column| column.source.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn map_columns(path: &Path, headers: &[String]) -> Result<Vec<ColumnMapping>> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    let mut columns = Vec::with_capacity(headers.len());
    for raw in headers {
        let source = normalize_header(raw);
        let (field, canonical) = match canonical_field(&source) {
            Some(field) => (field.to_string(), true),
            None => (source.clone(), false),
        };
        if source.is_empty() {
            debug!(path = %path.display(), "ignoring column without a header");
        } else if let Some(first) = seen.insert(field.clone(), source.clone()) {
            return Err(IngestError::DuplicateField {
                path: path.to_path_buf(),
                field,
                first,
                second: source,
            });
        }
        columns.push(ColumnMapping {
            source,
            field,
            canonical,
        });
    }
    Ok(columns)
}

/// Read plan lines from any reader. `path` is only used in errors and logs.
///
/// The first non-blank row is the header. Fully blank rows are skipped. An
/// empty cell becomes [`FieldValue::Empty`], so the field is present but
/// blank; a short row leaves the missing trailing fields blank as well.
pub fn read_plan_from_reader<R: Read>(reader: R, path: &Path) -> Result<PlanBatch> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let cells: Vec<String> = row.iter().map(normalize_cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        rows.push(cells);
    }

    let mut rows = rows.into_iter();
    let Some(headers) = rows.next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let columns = map_columns(path, &headers)?;

    let mut records = Vec::new();
    for (line, cells) in rows.enumerate() {
        if cells.len() > columns.len() {
            warn!(
                path = %path.display(),
                row = line + 1,
                extra = cells.len() - columns.len(),
                "row has more cells than headers; extra cells dropped"
            );
        }
        let mut record = Record::new();
        for (index, column) in columns.iter().enumerate() {
            if column.source.is_empty() {
                continue;
            }
            let value = match cells.get(index).map(String::as_str) {
                None | Some("") => FieldValue::Empty,
                Some(text) => FieldValue::from(text),
            };
            record.set(&column.field, value);
        }
        records.push(record);
    }

    let batch = PlanBatch { columns, records };
    let unmapped = batch.unmapped_columns();
    if !unmapped.is_empty() {
        debug!(path = %path.display(), ?unmapped, "columns kept under their source names");
    }
    info!(path = %path.display(), rows = batch.len(), "plan lines loaded");
    Ok(batch)
}

/// Read plan lines from a CSV file.
pub fn read_plan_csv(path: &Path) -> Result<PlanBatch> {
    let file = File::open(path).map_err(|source| IngestError::read(path, source))?;
    read_plan_from_reader(file, path)
}
