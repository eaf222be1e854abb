//! Canonical field names of a media plan line.
//!
//! Ingest maps source headers onto these names; rules bind to them verbatim.

pub const COUNTRY: &str = "Country";
pub const BUSINESS_UNIT: &str = "Business Unit";
pub const CATEGORY: &str = "Category";
pub const RANGE: &str = "Range";
pub const CAMPAIGN: &str = "Campaign";
pub const MEDIA: &str = "Media";
pub const MEDIA_SUBTYPE: &str = "Media Subtype";
pub const START_DATE: &str = "Start Date";
pub const END_DATE: &str = "End Date";
pub const BUDGET: &str = "Budget";
pub const YEAR: &str = "Year";
pub const ABP_CYCLE: &str = "ABP Cycle";
pub const TARGET_REACH: &str = "Target Reach";
pub const NOTES: &str = "Notes";

/// Monthly sub-budgets. These are summed against `Budget`.
pub const MONTHLY_BUDGETS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Quarterly sub-budgets. Informational only, never part of the budget sum.
pub const QUARTERLY_BUDGETS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

/// Fields that must be populated on every line.
pub const MANDATORY: [&str; 10] = [
    COUNTRY,
    CATEGORY,
    RANGE,
    CAMPAIGN,
    MEDIA,
    MEDIA_SUBTYPE,
    START_DATE,
    END_DATE,
    BUDGET,
    YEAR,
];

/// Optional fields other than the sub-budgets.
pub const OPTIONAL: [&str; 4] = [BUSINESS_UNIT, ABP_CYCLE, TARGET_REACH, NOTES];

/// Fields compared when looking for duplicate lines within a batch.
pub const LINE_IDENTITY: [&str; 5] = [COUNTRY, CAMPAIGN, MEDIA, MEDIA_SUBTYPE, START_DATE];

/// Every field the validator knows about, in rule-building order.
pub fn all_fields() -> impl Iterator<Item = &'static str> {
    MANDATORY
        .into_iter()
        .chain(OPTIONAL)
        .chain(MONTHLY_BUDGETS)
        .chain(QUARTERLY_BUDGETS)
}

/// Lowercase, hyphen-separated form used in rule identifiers.
pub fn slug(field: &str) -> String {
    field
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
