//! Single-field format and range checks.

use crate::datetime::parse_date;
use crate::numeric::parse_amount;
use crate::rules::{RuleInput, Verdict};

fn four_digit_year(text: &str) -> Option<i32> {
    if text.len() == 4 && text.bytes().all(|byte| byte.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

pub(crate) fn year_format(input: &RuleInput<'_>) -> Verdict {
    let Some(text) = input.text() else {
        return Verdict::Pass;
    };
    Verdict::from_bool(four_digit_year(&text).is_some())
}

pub(crate) fn year_range(input: &RuleInput<'_>, min: i32, max: i32) -> Verdict {
    let Some(year) = input.text().and_then(|text| four_digit_year(&text)) else {
        // Not a year at all; the format rule reports it.
        return Verdict::Pass;
    };
    Verdict::from_bool((min..=max).contains(&year))
}

pub(crate) fn date_format(input: &RuleInput<'_>) -> Verdict {
    match input.text() {
        Some(text) if parse_date(&text).is_none() => {
            Verdict::FailWith(format!("{} '{text}' is not a recognised date", input.field))
        }
        _ => Verdict::Pass,
    }
}

pub(crate) fn positive_amount(input: &RuleInput<'_>) -> Verdict {
    let Some(text) = input.text() else {
        return Verdict::Pass;
    };
    match parse_amount(&text) {
        Some(amount) if amount > 0.0 => Verdict::Pass,
        Some(_) => Verdict::Fail,
        None => Verdict::FailWith(format!("{} '{text}' is not a number", input.field)),
    }
}

/// Sub-budget cells: unparseable amounts would otherwise be summed as zero.
pub(crate) fn amount_format(input: &RuleInput<'_>) -> Verdict {
    match input.text() {
        Some(text) if parse_amount(&text).is_none() => {
            Verdict::FailWith(format!("{} '{text}' is not a number", input.field))
        }
        _ => Verdict::Pass,
    }
}
