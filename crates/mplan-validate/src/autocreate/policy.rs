//! Rule-set rewrite for auto-create mode.
//!
//! Campaigns become open-world: an unknown campaign is a warning, pending
//! review. Ranges stay closed-world. Placement and Category–Range
//! consistency are untouched.

use mplan_model::{EntityKind, RuleKind, Severity, fields};

use crate::rules::{Check, Rule, RuleRegistry};

pub const CAMPAIGN_AUTO_CREATE_RULE: &str = "campaign.auto-create";
pub const RANGE_STRICT_RULE: &str = "range.exists-strict";

/// Rules dropped in auto-create mode.
const REMOVED_RULES: &[&str] = &["range.category-reference"];

pub fn apply(registry: &mut RuleRegistry) {
    registry.replace(
        "campaign.exists",
        Rule::new(
            CAMPAIGN_AUTO_CREATE_RULE,
            fields::CAMPAIGN,
            RuleKind::Relationship,
            Severity::Warning,
            "Campaign does not exist and will be auto-created for review",
            Check::CampaignKnown,
        ),
    );
    registry.replace(
        "range.exists",
        Rule::new(
            RANGE_STRICT_RULE,
            fields::RANGE,
            RuleKind::Relationship,
            Severity::Critical,
            "Range does not exist and must be created manually",
            Check::Exists {
                kind: EntityKind::Range,
                fail_closed: true,
            },
        ),
    );
    registry.retain(|rule| !REMOVED_RULES.contains(&rule.id.as_str()));
}
