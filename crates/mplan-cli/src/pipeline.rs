//! Validation run: load inputs, validate, optionally create campaigns.
//!
//! Kept free of printing so it can be driven from tests.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use mplan_ingest::{load_master_data_file, load_options_file, read_plan_csv};
use mplan_model::{Issue, ReferenceSnapshot, ValidationMode, ValidationOptions};
use mplan_validate::{
    AutoCreateValidator, AutoCreatedSummary, CampaignResolution, InMemoryRepository,
    RecordValidator, RowResolution, RuleDescriptor, ValidationSummary,
};

/// Inputs of one `validate` run.
#[derive(Debug, Clone)]
pub struct ValidateRequest<'a> {
    pub rows: &'a Path,
    pub master_data: &'a Path,
    pub config: Option<&'a Path>,
    pub auto_create: bool,
    pub source: Option<&'a str>,
    pub apply: bool,
}

/// Outcome of one `validate` run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRun {
    pub source: String,
    pub mode: ValidationMode,
    pub rows: usize,
    pub unmapped_columns: Vec<String>,
    pub summary: ValidationSummary,
    pub issues: Vec<Issue>,
    /// Campaigns resolved by `--apply`, in row order.
    pub resolutions: Vec<RowResolution>,
    pub auto_created: Option<AutoCreatedSummary>,
}

impl ValidationRun {
    pub fn can_import(&self) -> bool {
        self.summary.can_import
    }
}

/// Options from the config file (or defaults), with `--auto-create` applied on top.
pub fn resolve_options(config: Option<&Path>, auto_create: bool) -> Result<ValidationOptions> {
    let options = match config {
        Some(path) => load_options_file(path).context("load validation options")?,
        None => ValidationOptions::default(),
    };
    Ok(if auto_create {
        options.with_mode(ValidationMode::AutoCreate)
    } else {
        options
    })
}

fn source_name(request: &ValidateRequest<'_>) -> String {
    request
        .source
        .map(str::to_string)
        .or_else(|| {
            request
                .rows
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "import".to_string())
}

pub fn run_validation(request: &ValidateRequest<'_>) -> Result<ValidationRun> {
    let source = source_name(request);
    let span = info_span!("validate", source = %source);
    let _guard = span.enter();

    let options = resolve_options(request.config, request.auto_create)?;
    let snapshot = load_master_data_file(request.master_data).context("load master data")?;
    let batch = read_plan_csv(request.rows).context("read plan lines")?;
    let unmapped_columns = batch
        .unmapped_columns()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mode = options.mode;
    let (issues, resolutions, auto_created) = match mode {
        ValidationMode::Strict => {
            let validator = RecordValidator::new(snapshot, options);
            (validator.validate_all(&batch.records), Vec::new(), None)
        }
        ValidationMode::AutoCreate => {
            let repository = Arc::new(InMemoryRepository::from_snapshot(&snapshot));
            let validator = AutoCreateValidator::new(snapshot, options, repository);
            let issues = validator.validate_all(&batch.records);
            let resolutions = if request.apply {
                validator
                    .realize_campaigns(&batch.records, &issues, Some(&source))
                    .context("create flagged campaigns")?
            } else {
                Vec::new()
            };
            let auto_created = validator.auto_created_summary();
            validator.disconnect().context("close entity store")?;
            (issues, resolutions, Some(auto_created))
        }
    };

    let summary = mplan_validate::summarize(&issues);
    info!(
        rows = batch.records.len(),
        issues = summary.total,
        can_import = summary.can_import,
        "validation finished"
    );
    Ok(ValidationRun {
        source,
        mode,
        rows: batch.records.len(),
        unmapped_columns,
        summary,
        issues,
        resolutions,
        auto_created,
    })
}

/// Rule listing for `options`.
pub fn list_rules(options: ValidationOptions) -> Vec<RuleDescriptor> {
    RecordValidator::new(ReferenceSnapshot::default(), options).list_rules()
}

/// Resolve `names` against a store seeded from `master_data`.
pub fn create_campaigns(
    names: &[String],
    master_data: &Path,
    source: Option<&str>,
) -> Result<(Vec<CampaignResolution>, AutoCreatedSummary)> {
    let snapshot = load_master_data_file(master_data).context("load master data")?;
    let repository = Arc::new(InMemoryRepository::from_snapshot(&snapshot));
    let validator =
        AutoCreateValidator::new(snapshot, ValidationOptions::auto_create(), repository);
    let resolutions = names
        .iter()
        .map(|name| {
            validator
                .validate_or_create_campaign(name, source)
                .with_context(|| format!("resolve campaign '{name}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    let summary = validator.auto_created_summary();
    validator.disconnect().context("close entity store")?;
    Ok((resolutions, summary))
}
