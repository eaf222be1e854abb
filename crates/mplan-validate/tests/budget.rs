//! Budget = Σ monthly budgets.

mod common;

use mplan_model::{FieldValue, Issue, Record, Severity, ValidationOptions, fields};
use mplan_validate::RecordValidator;

use common::{snapshot, with_rule};

const RULE: &str = "budget.sum-consistency";

fn validate(record: Record, options: ValidationOptions) -> Vec<Issue> {
    let batch = vec![record];
    RecordValidator::new(snapshot(), options).validate_all(&batch)
}

fn sum_issues(record: Record) -> Vec<Issue> {
    validate(record, ValidationOptions::default())
        .into_iter()
        .filter(|issue| issue.rule_id == RULE)
        .collect()
}

#[test]
fn matching_sum_passes() {
    let record = Record::new()
        .with(fields::BUDGET, "1,000.00")
        .with("Jan", 250.0)
        .with("Feb", "250")
        .with("Mar", "€ 500");
    assert!(sum_issues(record).is_empty());
}

#[test]
fn difference_below_tolerance_passes() {
    let record = Record::new()
        .with(fields::BUDGET, 100.0)
        .with("Jan", 33.33)
        .with("Feb", 33.33)
        .with("Mar", 33.335);
    assert!(sum_issues(record).is_empty());
}

#[test]
fn mismatch_is_critical_and_names_both_amounts() {
    let record = Record::new()
        .with(fields::BUDGET, 1000.0)
        .with("Jan", 300.0)
        .with("Feb", 300.0);
    let issues = sum_issues(record);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Critical);
    assert_eq!(
        issues[0].message,
        "Budget 1000.00 does not match the sum of the monthly budgets 600.00"
    );
}

#[test]
fn budget_without_monthly_distribution_fails() {
    let record = Record::new().with(fields::BUDGET, 1000.0);
    let issues = sum_issues(record);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("no monthly distribution"));
}

#[test]
fn blank_months_do_not_count_as_distribution() {
    let record = Record::new()
        .with(fields::BUDGET, 1000.0)
        .with("Jan", FieldValue::Empty)
        .with("Feb", "  ");
    let issues = sum_issues(record);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("no monthly distribution"));
}

fn zero_month_plan(budget: f64) -> Record {
    Record::new()
        .with(fields::BUDGET, budget)
        .with("Jan", 500.0)
        .with("Feb", 0.0)
        .with("Mar", 200.0)
        .with("Apr", "0")
        .with("May", 100.0)
        .with("Jun", FieldValue::Empty)
}

#[test]
fn zero_months_count_as_populated() {
    let issues = sum_issues(zero_month_plan(1000.0));
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].message,
        "Budget 1000.00 does not match the sum of the monthly budgets 800.00"
    );
    assert!(sum_issues(zero_month_plan(800.0)).is_empty());
}

#[test]
fn all_zero_months_are_still_a_distribution() {
    let record = Record::new()
        .with(fields::BUDGET, 500.0)
        .with("Jan", 0.0)
        .with("Feb", "0");
    let issues = sum_issues(record);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("does not match"));
}

#[test]
fn zero_budget_fails() {
    let record = Record::new().with(fields::BUDGET, 0.0).with("Jan", 0.0);
    let issues = validate(record, ValidationOptions::default());
    assert_eq!(with_rule(&issues, RULE).len(), 1);
    assert_eq!(with_rule(&issues, "budget.positive").len(), 1);
}

#[test]
fn blank_budget_with_months_fails() {
    let record = Record::new().with(fields::BUDGET, "").with("Jan", 100.0);
    let issues = validate(record, ValidationOptions::default());
    let sum = with_rule(&issues, RULE);
    assert_eq!(sum.len(), 1);
    assert_eq!(sum[0].message, "Budget is required when monthly budgets are provided");
    assert_eq!(with_rule(&issues, "budget.required").len(), 1);
}

#[test]
fn blank_budget_without_months_is_left_to_the_required_rule() {
    let record = Record::new().with(fields::BUDGET, FieldValue::Empty);
    let issues = validate(record, ValidationOptions::default());
    assert!(with_rule(&issues, RULE).is_empty());
    assert_eq!(with_rule(&issues, "budget.required").len(), 1);
}

#[test]
fn unparseable_budget_is_reported_once() {
    let record = Record::new().with(fields::BUDGET, "lots").with("Jan", 100.0);
    let issues = validate(record, ValidationOptions::default());
    assert!(with_rule(&issues, RULE).is_empty());
    let positive = with_rule(&issues, "budget.positive");
    assert_eq!(positive.len(), 1);
    assert_eq!(positive[0].message, "Budget 'lots' is not a number");
}

#[test]
fn quarterly_budgets_are_not_summed() {
    let record = Record::new()
        .with(fields::BUDGET, 1000.0)
        .with("Jan", 1000.0)
        .with("Q1", 1000.0);
    assert!(sum_issues(record).is_empty());
}

#[test]
fn tolerance_is_configurable() {
    let record = Record::new()
        .with(fields::BUDGET, 1000.0)
        .with("Jan", 999.0);
    let options = ValidationOptions {
        budget_tolerance: 5.0,
        ..ValidationOptions::default()
    };
    assert!(with_rule(&validate(record, options), RULE).is_empty());
}

#[test]
fn unparseable_month_is_flagged_even_when_totals_balance() {
    let record = Record::new()
        .with(fields::BUDGET, 1000.0)
        .with("Jan", 1000.0)
        .with("Feb", "abc");
    let issues = validate(record, ValidationOptions::default());
    assert!(with_rule(&issues, RULE).is_empty());
    let format = with_rule(&issues, "feb.format");
    assert_eq!(format.len(), 1);
    assert_eq!(format[0].severity, Severity::Warning);
    assert_eq!(format[0].message, "Feb 'abc' is not a number");
    assert!(with_rule(&issues, "jan.format").is_empty());
}
