//! Shared fixtures for mplan-validate tests.
#![allow(dead_code)]

use mplan_model::{EntityKind, Issue, Record, ReferenceSnapshot, Severity, fields};

/// Two business units, three categories, a compatibility mapping and a
/// category map that wrongly lists Acne under Face Cleansing.
pub fn snapshot() -> ReferenceSnapshot {
    ReferenceSnapshot::builder()
        .entities(EntityKind::Country, ["France", "Germany"])
        .hierarchy("Nivea", "Lip Care", "Lip", ["Disney", "Summer Glow"])
        .hierarchy("Nivea", "Face Cleansing", "Micellar", ["Fresh Start"])
        .hierarchy("Derma", "Derma Skin", "Acne", ["Clear Skin"])
        .relate(mplan_model::Relation::RangesOfCategory, "Face Cleansing", ["Acne"])
        .compatibility("Summer Glow", "Micellar")
        .media("TV", ["Linear", "Sponsorship"])
        .media("Digital", ["Social"])
        .build()
}

/// A line that passes every built-in rule against [`snapshot`].
pub fn valid_record() -> Record {
    Record::new()
        .with(fields::COUNTRY, "France")
        .with(fields::BUSINESS_UNIT, "Nivea")
        .with(fields::CATEGORY, "Lip Care")
        .with(fields::RANGE, "Lip")
        .with(fields::CAMPAIGN, "Disney")
        .with(fields::MEDIA, "TV")
        .with(fields::MEDIA_SUBTYPE, "Linear")
        .with(fields::START_DATE, "01/03/2025")
        .with(fields::END_DATE, "31/03/2025")
        .with(fields::BUDGET, 1000.0)
        .with(fields::YEAR, "2025")
        .with(fields::ABP_CYCLE, "ABP 2025")
        .with("Mar", 600.0)
        .with("Apr", 400.0)
}

pub fn rule_ids(issues: &[Issue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.rule_id.as_str()).collect()
}

pub fn with_rule<'a>(issues: &'a [Issue], rule_id: &str) -> Vec<&'a Issue> {
    issues.iter().filter(|issue| issue.rule_id == rule_id).collect()
}

pub fn criticals(issues: &[Issue]) -> Vec<&Issue> {
    issues
        .iter()
        .filter(|issue| issue.severity == Severity::Critical)
        .collect()
}
