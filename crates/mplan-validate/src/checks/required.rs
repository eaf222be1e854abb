use crate::rules::{RuleInput, Verdict};

pub(crate) fn not_blank(input: &RuleInput<'_>) -> Verdict {
    Verdict::from_bool(!input.value.is_blank())
}
