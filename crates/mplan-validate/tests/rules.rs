//! Registry construction and rule listing.

use mplan_model::{RuleKind, Severity, ValidationOptions, fields};
use mplan_validate::{Check, Rule, RuleRegistry, Verdict, initialize_rules};

fn position(registry: &RuleRegistry, id: &str) -> usize {
    registry
        .rules()
        .iter()
        .position(|rule| rule.id == id)
        .unwrap_or_else(|| panic!("rule {id} missing"))
}

#[test]
fn builtin_rules_follow_evaluation_order() {
    let registry = initialize_rules(&ValidationOptions::default());
    let ordered = [
        "country.required",
        "notes.blank",
        "year.format",
        "budget.positive",
        "jan.format",
        "q4.format",
        "campaign.exists",
        "range.category-reference",
        "range.category-consistency",
        "budget.sum-consistency",
        "end-date.order",
        "start-date.abp-year",
        "business-unit.consistency",
        "campaign.placement",
        "campaign.canonical-case",
        "campaign.duplicate-line",
    ];
    let positions: Vec<usize> = ordered.iter().map(|id| position(&registry, id)).collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{positions:?}");
}

#[test]
fn every_mandatory_field_has_a_critical_required_rule() {
    let registry = initialize_rules(&ValidationOptions::default());
    for field in fields::MANDATORY {
        let rule = registry
            .get(&format!("{}.required", fields::slug(field)))
            .expect("required rule");
        assert_eq!(rule.field, field);
        assert_eq!(rule.severity, Severity::Critical);
        assert_eq!(rule.kind, RuleKind::Required);
    }
    for month in fields::MONTHLY_BUDGETS {
        let rule = registry
            .get(&format!("{}.blank", fields::slug(month)))
            .expect("blank rule");
        assert_eq!(rule.severity, Severity::Warning);
    }
}

#[test]
fn options_switch_optional_rules_off() {
    let options = ValidationOptions::default()
        .with_abp_year_check(false)
        .with_duplicate_detection(false)
        .with_case_suggestions(false);
    let registry = initialize_rules(&options);
    assert!(!registry.contains("start-date.abp-year"));
    assert!(!registry.contains("end-date.abp-year"));
    assert!(!registry.contains("campaign.duplicate-line"));
    assert!(!registry.contains("range.canonical-case"));
    assert!(registry.contains("campaign.placement"));
}

#[test]
fn rule_ids_are_unique() {
    let registry = initialize_rules(&ValidationOptions::default());
    let mut ids: Vec<&str> = registry.rules().iter().map(|rule| rule.id.as_str()).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[test]
fn replace_keeps_position_and_appends_unknown_ids() {
    let mut registry = initialize_rules(&ValidationOptions::default());
    let index = position(&registry, "budget.positive");
    let len = registry.len();
    let custom = Rule::new(
        "budget.cap",
        fields::BUDGET,
        RuleKind::Range,
        Severity::Warning,
        "Budget exceeds the cap",
        Check::custom(|_| Ok(Verdict::Pass)),
    );
    registry.replace("budget.positive", custom.clone());
    assert_eq!(registry.rules()[index].id, "budget.cap");
    assert_eq!(registry.len(), len);

    registry.replace("no.such-rule", custom.clone());
    assert_eq!(registry.len(), len + 1);
    assert!(registry.remove("budget.cap").is_some());
    assert!(registry.remove("budget.cap").is_some());
    assert!(registry.remove("budget.cap").is_none());
}

#[test]
fn descriptor_serializes_for_tooling() {
    let registry = initialize_rules(&ValidationOptions::default());
    let descriptor = registry
        .get("budget.sum-consistency")
        .expect("rule")
        .descriptor();
    insta::assert_json_snapshot!(descriptor, @r#"
    {
      "id": "budget.sum-consistency",
      "field": "Budget",
      "kind": "consistency",
      "severity": "critical",
      "message": "Budget does not match the sum of the monthly budgets",
      "check": "budget_sum"
    }
    "#);
}

#[test]
fn check_debug_names_parameters() {
    let check = Check::Exists {
        kind: mplan_model::EntityKind::Range,
        fail_closed: true,
    };
    assert_eq!(format!("{check:?}"), "Exists { kind: Range, fail_closed: true }");
    assert_eq!(format!("{:?}", Check::custom(|_| Ok(Verdict::Fail))), "custom");
}
