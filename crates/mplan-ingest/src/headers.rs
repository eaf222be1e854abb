//! Source header normalization and the alias table.
//!
//! Plan exports name the same column many ways ("Sub Media", "media_subtype",
//! "Total Budget"). Every header is normalized, then looked up in
//! [`HEADER_ALIASES`]; headers with no alias are kept verbatim.

use mplan_model::fields;

/// Alias → canonical field. Keys are already in [`alias_key`] form.
const HEADER_ALIASES: &[(&str, &str)] = &[
    ("country", fields::COUNTRY),
    ("market", fields::COUNTRY),
    ("businessunit", fields::BUSINESS_UNIT),
    ("bu", fields::BUSINESS_UNIT),
    ("division", fields::BUSINESS_UNIT),
    ("category", fields::CATEGORY),
    ("range", fields::RANGE),
    ("brandrange", fields::RANGE),
    ("campaign", fields::CAMPAIGN),
    ("campaignname", fields::CAMPAIGN),
    ("media", fields::MEDIA),
    ("mediatype", fields::MEDIA),
    ("channel", fields::MEDIA),
    ("mediasubtype", fields::MEDIA_SUBTYPE),
    ("submedia", fields::MEDIA_SUBTYPE),
    ("subchannel", fields::MEDIA_SUBTYPE),
    ("startdate", fields::START_DATE),
    ("start", fields::START_DATE),
    ("enddate", fields::END_DATE),
    ("end", fields::END_DATE),
    ("budget", fields::BUDGET),
    ("totalbudget", fields::BUDGET),
    ("year", fields::YEAR),
    ("abpcycle", fields::ABP_CYCLE),
    ("abp", fields::ABP_CYCLE),
    ("targetreach", fields::TARGET_REACH),
    ("reach", fields::TARGET_REACH),
    ("notes", fields::NOTES),
    ("comments", fields::NOTES),
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Trim, drop a byte-order mark and collapse inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase with separators removed: `"Media Sub-Type"` → `"mediasubtype"`.
fn alias_key(header: &str) -> String {
    header
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn month_field(key: &str) -> Option<&'static str> {
    let key = key.strip_suffix("budget").unwrap_or(key);
    MONTH_NAMES
        .iter()
        .zip(fields::MONTHLY_BUDGETS)
        .find(|(name, short)| key == **name || key == short.to_lowercase())
        .map(|(_, short)| short)
}

fn quarter_field(key: &str) -> Option<&'static str> {
    let key = key.strip_suffix("budget").unwrap_or(key);
    fields::QUARTERLY_BUDGETS
        .into_iter()
        .find(|quarter| key == quarter.to_lowercase())
}

/// Canonical field for a source header, if it is a known alias.
pub fn canonical_field(header: &str) -> Option<&'static str> {
    let key = alias_key(header);
    if key.is_empty() {
        return None;
    }
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, field)| *field)
        .or_else(|| month_field(&key))
        .or_else(|| quarter_field(&key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_bom() {
        assert_eq!(normalize_header("\u{feff}  Media   Subtype "), "Media Subtype");
    }

    #[test]
    fn maps_aliases_regardless_of_separators() {
        assert_eq!(canonical_field("media_subtype"), Some(fields::MEDIA_SUBTYPE));
        assert_eq!(canonical_field("Sub-Media"), Some(fields::MEDIA_SUBTYPE));
        assert_eq!(canonical_field("TOTAL BUDGET"), Some(fields::BUDGET));
        assert_eq!(canonical_field("Business Unit"), Some(fields::BUSINESS_UNIT));
    }

    #[test]
    fn maps_months_and_quarters() {
        assert_eq!(canonical_field("January"), Some("Jan"));
        assert_eq!(canonical_field("sep budget"), Some("Sep"));
        assert_eq!(canonical_field("Q3"), Some("Q3"));
        assert_eq!(canonical_field("Q5"), None);
        assert_eq!(canonical_field("Agency"), None);
    }
}
