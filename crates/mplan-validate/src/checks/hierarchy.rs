//! Cross-field checks within the Business Unit → Category → Range hierarchy.

use mplan_model::{Relation, fields, normalize_name};

use crate::rules::{RuleInput, Verdict};

/// Range must be listed under the declared Category, and the pair must not be
/// in the rejected-pairings table.
pub(crate) fn category_range(input: &RuleInput<'_>) -> Verdict {
    let (Some(range), Some(category)) = (input.text(), input.other(fields::CATEGORY)) else {
        return Verdict::Pass;
    };

    if let Some(pairing) = input.refs.rejected_pairing(&category, &range) {
        let reason = if pairing.reason.is_empty() {
            "this pairing is explicitly rejected".to_string()
        } else {
            pairing.reason.clone()
        };
        return Verdict::FailWith(format!(
            "Range '{range}' is not valid for Category '{category}': {reason}"
        ));
    }

    let Some(map) = input.refs.relation_map(Relation::RangesOfCategory) else {
        return Verdict::Pass;
    };
    if map.relates(&category, &range) {
        return Verdict::Pass;
    }
    let allowed = map.get(&category);
    if allowed.is_empty() {
        Verdict::FailWith(format!(
            "Range '{range}' cannot be placed under Category '{category}': the category has no ranges"
        ))
    } else {
        Verdict::FailWith(format!(
            "Range '{range}' does not belong to Category '{category}' (expected one of: {})",
            allowed.join(", ")
        ))
    }
}

/// Inverse lookup through `rangeToCategories`. Advisory only.
pub(crate) fn range_category_reference(input: &RuleInput<'_>) -> Verdict {
    let (Some(range), Some(category)) = (input.text(), input.other(fields::CATEGORY)) else {
        return Verdict::Pass;
    };
    let Some(map) = input.refs.relation_map(Relation::CategoriesOfRange) else {
        return Verdict::Pass;
    };
    if !map.contains_key(&range) || map.relates(&range, &category) {
        return Verdict::Pass;
    }
    Verdict::FailWith(format!(
        "Range '{range}' lists categories {} but not '{category}'",
        map.get(&range).join(", ")
    ))
}

/// A declared Business Unit must own the declared Category.
pub(crate) fn business_unit_consistency(input: &RuleInput<'_>) -> Verdict {
    let (Some(declared), Some(category)) = (input.text(), input.other(fields::CATEGORY)) else {
        return Verdict::Pass;
    };
    let Some(owner) = input.refs.business_unit_of_category(&category) else {
        return Verdict::Pass;
    };
    if normalize_name(&owner) == normalize_name(&declared) {
        return Verdict::Pass;
    }
    Verdict::FailWith(format!(
        "Business Unit '{declared}' does not own Category '{category}' (it belongs to '{owner}')"
    ))
}
