//! The built-in rule catalogue, in evaluation order.

use mplan_model::fields::{self, slug};
use mplan_model::{EntityKind, RuleKind, Severity, ValidationOptions};

use super::{Check, Rule, RuleRegistry};

/// Category/range pairs rejected regardless of what the hierarchy maps say.
///
/// The Acne range belongs to Derma; older master-data exports also listed it
/// under Nivea's Face Cleansing category.
pub const BUILTIN_REJECTED_PAIRINGS: &[(&str, &str, &str)] = &[(
    "Face Cleansing",
    "Acne",
    "the Acne range belongs to the Derma hierarchy, not Face Cleansing",
)];

/// Build the strict rule catalogue for `options`.
pub fn initialize_rules(options: &ValidationOptions) -> RuleRegistry {
    let mut registry = RuleRegistry::new();

    // 1. Required and blank checks.
    for field in fields::MANDATORY {
        registry.push(Rule::new(
            format!("{}.required", slug(field)),
            field,
            RuleKind::Required,
            Severity::Critical,
            format!("{field} is required"),
            Check::NotBlank,
        ));
    }
    for field in fields::OPTIONAL
        .into_iter()
        .chain(fields::MONTHLY_BUDGETS)
        .chain(fields::QUARTERLY_BUDGETS)
    {
        registry.push(Rule::new(
            format!("{}.blank", slug(field)),
            field,
            RuleKind::Required,
            Severity::Warning,
            format!("{field} is blank"),
            Check::NotBlank,
        ));
    }

    // 2. Formats.
    registry.push(Rule::new(
        "year.format",
        fields::YEAR,
        RuleKind::Format,
        Severity::Critical,
        "Year must be a 4-digit number",
        Check::YearFormat,
    ));
    registry.push(Rule::new(
        "year.range",
        fields::YEAR,
        RuleKind::Range,
        Severity::Critical,
        format!("Year must be between {} and {}", options.year_min, options.year_max),
        Check::YearRange {
            min: options.year_min,
            max: options.year_max,
        },
    ));
    for field in [fields::START_DATE, fields::END_DATE] {
        registry.push(Rule::new(
            format!("{}.format", slug(field)),
            field,
            RuleKind::Format,
            Severity::Critical,
            format!("{field} is not a recognised date"),
            Check::DateFormat,
        ));
    }
    registry.push(Rule::new(
        "budget.positive",
        fields::BUDGET,
        RuleKind::Range,
        Severity::Critical,
        "Budget must be a number greater than zero",
        Check::PositiveAmount,
    ));
    for field in fields::MONTHLY_BUDGETS
        .into_iter()
        .chain(fields::QUARTERLY_BUDGETS)
    {
        registry.push(Rule::new(
            format!("{}.format", slug(field)),
            field,
            RuleKind::Format,
            Severity::Warning,
            format!("{field} is not a number"),
            Check::AmountFormat,
        ));
    }

    // 3. Flat membership against the reference snapshot.
    let memberships = [
        (fields::COUNTRY, EntityKind::Country, Severity::Critical, false),
        (fields::CATEGORY, EntityKind::Category, Severity::Critical, false),
        (fields::RANGE, EntityKind::Range, Severity::Critical, true),
        (fields::CAMPAIGN, EntityKind::Campaign, Severity::Critical, true),
        (fields::MEDIA, EntityKind::MediaType, Severity::Critical, false),
        (fields::MEDIA_SUBTYPE, EntityKind::MediaSubtype, Severity::Warning, false),
    ];
    for (field, kind, severity, fail_closed) in memberships {
        registry.push(Rule::new(
            format!("{}.exists", slug(field)),
            field,
            RuleKind::Relationship,
            severity,
            format!("{field} does not exist in the reference data"),
            Check::Exists { kind, fail_closed },
        ));
    }
    registry.push(Rule::new(
        "range.category-reference",
        fields::RANGE,
        RuleKind::Relationship,
        Severity::Warning,
        "Range is not listed under the declared Category",
        Check::RangeCategoryReference,
    ));

    // 4. Category–Range consistency.
    registry.push(Rule::new(
        "range.category-consistency",
        fields::RANGE,
        RuleKind::Consistency,
        Severity::Critical,
        "Range does not belong to the declared Category",
        Check::CategoryRange,
    ));

    // 5. Budget = sum of monthly budgets.
    registry.push(Rule::new(
        "budget.sum-consistency",
        fields::BUDGET,
        RuleKind::Consistency,
        Severity::Critical,
        "Budget does not match the sum of the monthly budgets",
        Check::BudgetSum {
            tolerance: options.budget_tolerance,
        },
    ));

    // 6. Date order. Partial plans often miss one of the dates.
    registry.push(Rule::new(
        "end-date.order",
        fields::END_DATE,
        RuleKind::Consistency,
        Severity::Warning,
        "End Date is before Start Date",
        Check::DateOrder,
    ));

    // 7. ABP cycle year.
    if options.abp_year_check {
        for field in [fields::START_DATE, fields::END_DATE] {
            registry.push(Rule::new(
                format!("{}.abp-year", slug(field)),
                field,
                RuleKind::Consistency,
                Severity::Critical,
                format!("{field} is outside the ABP cycle year"),
                Check::AbpYear,
            ));
        }
    }

    // 8. Remaining hierarchy checks.
    registry.push(Rule::new(
        "business-unit.consistency",
        fields::BUSINESS_UNIT,
        RuleKind::Consistency,
        Severity::Critical,
        "Business Unit does not own the declared Category",
        Check::BusinessUnitConsistency,
    ));
    registry.push(Rule::new(
        "media-subtype.media-consistency",
        fields::MEDIA_SUBTYPE,
        RuleKind::Consistency,
        Severity::Warning,
        "Media Subtype is not available for the declared Media",
        Check::MediaSubtype,
    ));
    registry.push(Rule::new(
        "campaign.placement",
        fields::CAMPAIGN,
        RuleKind::Consistency,
        Severity::Critical,
        "Campaign is placed under the wrong Range or Business Unit",
        Check::CampaignPlacement,
    ));

    // 9. Spelling suggestions.
    if options.suggest_canonical_case {
        for (field, kind) in [
            (fields::CATEGORY, EntityKind::Category),
            (fields::RANGE, EntityKind::Range),
            (fields::CAMPAIGN, EntityKind::Campaign),
        ] {
            registry.push(Rule::new(
                format!("{}.canonical-case", slug(field)),
                field,
                RuleKind::Format,
                Severity::Suggestion,
                format!("{field} differs from the reference spelling"),
                Check::CanonicalCase { kind },
            ));
        }
    }

    // 10. Duplicate lines within the batch.
    if options.detect_duplicates {
        registry.push(Rule::new(
            "campaign.duplicate-line",
            fields::CAMPAIGN,
            RuleKind::Uniqueness,
            Severity::Warning,
            "Line duplicates another line of the batch",
            Check::DuplicateLine,
        ));
    }

    registry
}
