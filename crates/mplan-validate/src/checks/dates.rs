//! Date ordering and ABP cycle year checks.

use chrono::Datelike;

use mplan_model::fields;

use crate::datetime::{abp_target_year, parse_date};
use crate::rules::{RuleInput, Verdict};

pub(crate) fn date_order(input: &RuleInput<'_>) -> Verdict {
    let end = input.text().and_then(|text| parse_date(&text));
    let start = input
        .other(fields::START_DATE)
        .and_then(|text| parse_date(&text));
    match (start, end) {
        (Some(start), Some(end)) if end < start => Verdict::FailWith(format!(
            "End Date {end} is before Start Date {start}"
        )),
        _ => Verdict::Pass,
    }
}

/// The bound date's calendar year must equal the year embedded in the ABP cycle.
pub(crate) fn abp_year(input: &RuleInput<'_>) -> Verdict {
    let Some(target) = input
        .other(fields::ABP_CYCLE)
        .and_then(|cycle| abp_target_year(&cycle))
    else {
        return Verdict::Pass;
    };
    let Some(date) = input.text().and_then(|text| parse_date(&text)) else {
        return Verdict::Pass;
    };
    if date.year() == target {
        Verdict::Pass
    } else {
        Verdict::FailWith(format!(
            "{} {date} falls in {}, but the ABP cycle targets {target}",
            input.field,
            date.year()
        ))
    }
}
