//! Amount parsing for budget cells.

/// Parse a budget amount.
///
/// Trims, drops a leading currency symbol and thousands separators
/// (`,`, `_`, spaces). Non-finite results are rejected.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let unsigned = trimmed
        .strip_prefix(['€', '$', '£'])
        .unwrap_or(trimmed)
        .trim_start();
    let cleaned: String = unsigned
        .chars()
        .filter(|ch| !matches!(ch, ',' | '_' | ' ' | '\u{a0}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}
