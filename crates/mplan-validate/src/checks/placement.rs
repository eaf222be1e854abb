//! Campaign placement: is the campaign filed under the range and business
//! unit it actually belongs to?
//!
//! Three outcomes:
//! 1. the campaign is not in `campaignToRange` at all: unknown, left to the
//!    existence rule (strict) or the auto-create warning;
//! 2. its primary or a compatibility-mapped range equals the declared Range
//!    and that range's business unit owns the declared Category: correct;
//! 3. anything else: wrong placement, naming where the campaign belongs.

use serde::Serialize;

use mplan_model::{EntityKind, Record, ReferenceSnapshot, Relation, fields, normalize_name};

use crate::rules::{RuleInput, Verdict};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlacementDecision {
    Unknown,
    Correct { range: String, business_unit: String },
    Wrong { message: String },
}

impl PlacementDecision {
    pub fn is_wrong(&self) -> bool {
        matches!(self, Self::Wrong { .. })
    }
}

fn same(left: &str, right: &str) -> bool {
    normalize_name(left) == normalize_name(right)
}

fn has_primary_range(refs: &ReferenceSnapshot, campaign: &str) -> bool {
    refs.relation_map(Relation::RangeOfCampaign)
        .is_some_and(|map| map.contains_key(campaign))
}

/// Whether `campaign` is known: listed in the campaign list *and* mapped to a
/// primary range. A missing or malformed section counts as "not found".
pub fn is_known_campaign(refs: &ReferenceSnapshot, campaign: &str) -> bool {
    refs.exists(EntityKind::Campaign, campaign) && has_primary_range(refs, campaign)
}

/// Decide where a campaign sits relative to the record's declared placement.
pub fn decide_placement(refs: &ReferenceSnapshot, campaign: &str, record: &Record) -> PlacementDecision {
    let Some(primary) = refs.range_of_campaign(campaign) else {
        return PlacementDecision::Unknown;
    };
    let declared_range = record.text(fields::RANGE);
    let category = record.text(fields::CATEGORY);

    let matched_range = match declared_range.as_deref() {
        None => primary.clone(),
        Some(declared) if same(declared, &primary) => primary.clone(),
        Some(declared) => {
            let compatible = refs.compatible_ranges(campaign);
            match compatible.into_iter().find(|range| same(range, declared)) {
                Some(range) => range,
                None => {
                    let owner = refs
                        .business_unit_of_range(&primary)
                        .unwrap_or_else(|| "unknown".to_string());
                    return PlacementDecision::Wrong {
                        message: format!(
                            "Campaign '{campaign}' belongs to Range '{primary}' (Business Unit '{owner}'), not Range '{declared}'"
                        ),
                    };
                }
            }
        }
    };

    let actual_unit = refs.business_unit_of_range(&matched_range);
    let expected_unit = category
        .as_deref()
        .and_then(|category| refs.business_unit_of_category(category))
        .or_else(|| record.text(fields::BUSINESS_UNIT));

    match (actual_unit, expected_unit) {
        (Some(actual), Some(expected)) if same(&actual, &expected) => PlacementDecision::Correct {
            range: matched_range,
            business_unit: actual,
        },
        (Some(actual), Some(expected)) => PlacementDecision::Wrong {
            message: format!(
                "Campaign '{campaign}' belongs to Business Unit '{actual}' (Range '{matched_range}'), but Category '{}' belongs to Business Unit '{expected}'",
                category.as_deref().unwrap_or("")
            ),
        },
        (None, _) => PlacementDecision::Wrong {
            message: format!(
                "Campaign '{campaign}' placement cannot be confirmed: Range '{matched_range}' has no Business Unit in the reference data"
            ),
        },
        (Some(actual), None) => PlacementDecision::Wrong {
            message: format!(
                "Campaign '{campaign}' placement cannot be confirmed: the declared Category has no Business Unit (campaign belongs to '{actual}')"
            ),
        },
    }
}

pub(crate) fn campaign_placement(input: &RuleInput<'_>) -> Verdict {
    let Some(campaign) = input.text() else {
        return Verdict::Pass;
    };
    match decide_placement(input.refs, &campaign, input.record) {
        PlacementDecision::Wrong { message } => Verdict::FailWith(message),
        PlacementDecision::Unknown | PlacementDecision::Correct { .. } => Verdict::Pass,
    }
}

pub(crate) fn campaign_known(input: &RuleInput<'_>) -> Verdict {
    let Some(campaign) = input.text() else {
        return Verdict::Pass;
    };
    if is_known_campaign(input.refs, &campaign) {
        Verdict::Pass
    } else if input.refs.exists(EntityKind::Campaign, &campaign) {
        Verdict::FailWith(format!(
            "Campaign '{campaign}' is not mapped to any Range and will be auto-created for review"
        ))
    } else {
        Verdict::FailWith(format!(
            "Campaign '{campaign}' does not exist and will be auto-created for review"
        ))
    }
}
