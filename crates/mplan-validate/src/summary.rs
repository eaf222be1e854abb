//! Issue aggregation and the import gate.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use mplan_model::{Issue, Severity};

/// Counts over a list of issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub suggestion: usize,
    pub by_field: BTreeMap<String, usize>,
    /// Number of distinct rows with at least one issue.
    pub unique_row_count: usize,
    pub can_import: bool,
}

pub fn summarize(issues: &[Issue]) -> ValidationSummary {
    let mut summary = ValidationSummary {
        total: issues.len(),
        ..ValidationSummary::default()
    };
    let mut rows = BTreeSet::new();
    for issue in issues {
        match issue.severity {
            Severity::Critical => summary.critical += 1,
            Severity::Warning => summary.warning += 1,
            Severity::Suggestion => summary.suggestion += 1,
        }
        *summary.by_field.entry(issue.field.clone()).or_default() += 1;
        rows.insert(issue.row_index);
    }
    summary.unique_row_count = rows.len();
    summary.can_import = summary.critical == 0;
    summary
}

/// A batch may be imported when no issue is critical.
pub fn can_import(issues: &[Issue]) -> bool {
    !issues.iter().any(Issue::is_critical)
}

/// Read issues from loosely-typed JSON.
///
/// Anything other than an array is logged and treated as no issues; entries
/// that are not issues are skipped.
pub fn issues_from_json(value: &Value) -> Vec<Issue> {
    let Value::Array(entries) = value else {
        warn!("issue list is not an array; treating it as empty");
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match Issue::deserialize(entry) {
            Ok(issue) => Some(issue),
            Err(error) => {
                warn!(entry = %entry, %error, "skipping malformed issue");
                None
            }
        })
        .collect()
}

/// [`summarize`] over loosely-typed JSON.
pub fn summarize_json(value: &Value) -> ValidationSummary {
    summarize(&issues_from_json(value))
}
