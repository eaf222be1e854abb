//! Date ordering and ABP cycle year checks.

mod common;

use mplan_model::{Issue, Record, Severity, ValidationOptions, fields};
use mplan_validate::RecordValidator;

use common::{rule_ids, snapshot, valid_record};

fn validate_with(record: Record, options: ValidationOptions) -> Vec<Issue> {
    RecordValidator::new(snapshot(), options).validate_all(&[record])
}

fn dated(start: &str, end: &str, cycle: &str) -> Record {
    valid_record()
        .with(fields::START_DATE, start)
        .with(fields::END_DATE, end)
        .with(fields::ABP_CYCLE, cycle)
}

#[test]
fn dates_inside_the_cycle_year_pass() {
    let issues = validate_with(dated("2025-01-01", "31/12/2025", "ABP 2025"), ValidationOptions::default());
    assert!(issues.is_empty(), "{issues:#?}");
}

#[test]
fn start_in_previous_year_is_critical() {
    let issues = validate_with(dated("15/12/2024", "15/01/2025", "ABP 2025"), ValidationOptions::default());
    assert_eq!(rule_ids(&issues), vec!["start-date.abp-year"]);
    assert_eq!(issues[0].severity, Severity::Critical);
    assert_eq!(
        issues[0].message,
        "Start Date 2024-12-15 falls in 2024, but the ABP cycle targets 2025"
    );
}

#[test]
fn end_in_next_year_is_critical() {
    let issues = validate_with(dated("2025-12-01", "2026-01-10", "ABP_2024_2025"), ValidationOptions::default());
    assert_eq!(rule_ids(&issues), vec!["end-date.abp-year"]);
}

#[test]
fn both_dates_outside_the_cycle() {
    let issues = validate_with(dated("2024-03-01", "2024-03-31", "ABP 2025"), ValidationOptions::default());
    assert_eq!(rule_ids(&issues), vec!["start-date.abp-year", "end-date.abp-year"]);
}

#[test]
fn cycle_without_a_year_is_not_checked() {
    let issues = validate_with(dated("2024-03-01", "2024-03-31", "ABP"), ValidationOptions::default());
    assert!(issues.is_empty(), "{issues:#?}");
}

#[test]
fn abp_check_can_be_disabled() {
    let options = ValidationOptions::default().with_abp_year_check(false);
    let issues = validate_with(dated("2024-03-01", "2024-03-31", "ABP 2025"), options);
    assert!(issues.is_empty(), "{issues:#?}");
}

#[test]
fn end_before_start_is_a_warning() {
    let issues = validate_with(dated("31/03/2025", "01/03/2025", "ABP 2025"), ValidationOptions::default());
    assert_eq!(rule_ids(&issues), vec!["end-date.order"]);
    assert_eq!(issues[0].severity, Severity::Warning);
    assert_eq!(issues[0].message, "End Date 2025-03-01 is before Start Date 2025-03-31");
}

#[test]
fn same_day_campaign_is_ordered() {
    let issues = validate_with(dated("2025-06-01", "01.06.2025", "ABP 2025"), ValidationOptions::default());
    assert!(issues.is_empty(), "{issues:#?}");
}
