//! Issue aggregation and the import gate.

use mplan_model::{Issue, Severity};
use mplan_validate::{can_import, issues_from_json, summarize, summarize_json};
use proptest::prelude::*;
use serde_json::json;

fn issue(row_index: usize, field: &str, severity: Severity) -> Issue {
    Issue {
        row_index,
        field: field.to_string(),
        severity,
        message: format!("{field} problem"),
        current_value: String::new(),
        rule_id: String::new(),
    }
}

#[test]
fn summary_counts_by_severity_field_and_row() {
    let issues = vec![
        issue(0, "Range", Severity::Critical),
        issue(0, "Notes", Severity::Warning),
        issue(2, "Range", Severity::Suggestion),
        issue(3, "Budget", Severity::Warning),
    ];
    let summary = summarize(&issues);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.critical, 1);
    assert_eq!(summary.warning, 2);
    assert_eq!(summary.suggestion, 1);
    assert_eq!(summary.by_field.get("Range"), Some(&2));
    assert_eq!(summary.by_field.get("Budget"), Some(&1));
    assert_eq!(summary.unique_row_count, 3);
    assert!(!summary.can_import);
}

#[test]
fn empty_issue_list_can_import() {
    let summary = summarize(&[]);
    assert_eq!(summary.total, 0);
    assert!(summary.can_import);
    assert!(can_import(&[]));
}

#[test]
fn warnings_and_suggestions_do_not_block() {
    let issues = vec![
        issue(0, "Notes", Severity::Warning),
        issue(1, "Range", Severity::Suggestion),
    ];
    assert!(can_import(&issues));
}

#[test]
fn json_summary_is_lenient() {
    let value = json!([
        {"rowIndex": 0, "field": "Range", "severity": "critical", "message": "bad"},
        {"rowIndex": 1, "field": "Notes", "severity": "warning", "message": "blank", "ruleId": "notes.blank"},
        {"rowIndex": 2, "field": "Range", "severity": "fatal", "message": "unknown severity"},
        "not an issue",
    ]);
    let issues = issues_from_json(&value);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[1].rule_id, "notes.blank");

    let summary = summarize_json(&value);
    assert_eq!(summary.total, 2);
    assert!(!summary.can_import);
}

#[test]
fn non_array_json_is_no_issues() {
    assert!(issues_from_json(&json!({"issues": []})).is_empty());
    assert!(summarize_json(&json!(null)).can_import);
}

#[test]
fn summary_serializes_camel_case() {
    let summary = summarize(&[issue(4, "Year", Severity::Critical)]);
    let value = serde_json::to_value(&summary).expect("serialize summary");
    assert_eq!(value["uniqueRowCount"], 1);
    assert_eq!(value["canImport"], false);
    assert_eq!(value["byField"]["Year"], 1);
}

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Critical),
        Just(Severity::Warning),
        Just(Severity::Suggestion),
    ]
}

proptest! {
    #[test]
    fn can_import_iff_no_critical(severities in prop::collection::vec(severity(), 0..20)) {
        let issues: Vec<Issue> = severities
            .iter()
            .enumerate()
            .map(|(row, severity)| issue(row, "Budget", *severity))
            .collect();
        let summary = summarize(&issues);
        let expected = !severities.contains(&Severity::Critical);
        prop_assert_eq!(can_import(&issues), expected);
        prop_assert_eq!(summary.can_import, expected);
        prop_assert_eq!(summary.critical + summary.warning + summary.suggestion, summary.total);
    }
}
