//! Budget = Σ monthly budgets.

use mplan_model::fields;

use crate::numeric::parse_amount;
use crate::rules::{RuleInput, Verdict};

/// Sum of the populated monthly budgets, or `None` when every month is blank.
/// Unparseable months count as populated with zero.
fn monthly_sum(input: &RuleInput<'_>) -> Option<f64> {
    let mut populated = false;
    let mut sum = 0.0;
    for month in fields::MONTHLY_BUDGETS {
        let Some(text) = input.other(month) else {
            continue;
        };
        populated = true;
        sum += parse_amount(&text).unwrap_or(0.0);
    }
    populated.then_some(sum)
}

pub(crate) fn sum_consistency(input: &RuleInput<'_>, tolerance: f64) -> Verdict {
    let sub_sum = monthly_sum(input);

    let Some(text) = input.text() else {
        return match sub_sum {
            Some(_) => Verdict::FailWith(
                "Budget is required when monthly budgets are provided".to_string(),
            ),
            None => Verdict::Pass,
        };
    };
    let Some(total) = parse_amount(&text) else {
        // Reported by the positive-amount rule.
        return Verdict::Pass;
    };
    if total == 0.0 {
        return Verdict::FailWith("Budget must be greater than zero".to_string());
    }
    let Some(sub_sum) = sub_sum else {
        return Verdict::FailWith(format!(
            "Budget {text} has no monthly distribution: at least one monthly budget is required"
        ));
    };
    if (total - sub_sum).abs() < tolerance {
        Verdict::Pass
    } else {
        Verdict::FailWith(format!(
            "Budget {total:.2} does not match the sum of the monthly budgets {sub_sum:.2}"
        ))
    }
}
