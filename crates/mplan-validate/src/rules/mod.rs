//! Rule descriptors and the ordered rule registry.
//!
//! A rule binds one record field to a [`Check`]. Built-in checks are enum
//! variants dispatched by [`Check::evaluate`]; callers can append their own
//! logic through [`Check::Custom`]. Predicates are synchronous and must not
//! perform I/O; anything that needs the entity store belongs to the
//! auto-create extension.

mod builtin;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use mplan_model::{EntityKind, FieldValue, Record, ReferenceSnapshot, RuleKind, Severity};

use crate::checks;
use crate::checks::uniqueness::LineIndex;

pub use builtin::{BUILTIN_REJECTED_PAIRINGS, initialize_rules};

/// Outcome of a single predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Fail with the rule's own message.
    Fail,
    /// Fail with a message specific to this value.
    FailWith(String),
}

impl Verdict {
    pub fn from_bool(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail }
    }
}

/// A predicate could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RuleFault(pub String);

pub type CheckResult = Result<Verdict, RuleFault>;

/// Everything a predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub field: &'a str,
    pub value: &'a FieldValue,
    pub record: &'a Record,
    pub row_index: usize,
    pub batch: &'a [Record],
    pub refs: &'a ReferenceSnapshot,
    pub(crate) lines: Option<&'a LineIndex>,
}

impl RuleInput<'_> {
    /// Trimmed value of the bound field, `None` when blank.
    pub fn text(&self) -> Option<String> {
        if self.value.is_blank() {
            None
        } else {
            Some(self.value.as_text())
        }
    }

    /// Trimmed value of another field of the same record.
    pub fn other(&self, field: &str) -> Option<String> {
        self.record.text(field)
    }
}

pub type Predicate = Arc<dyn Fn(&RuleInput<'_>) -> CheckResult + Send + Sync>;

/// What a rule evaluates.
#[derive(Clone)]
pub enum Check {
    NotBlank,
    YearFormat,
    YearRange { min: i32, max: i32 },
    DateFormat,
    PositiveAmount,
    /// A non-blank value must parse as an amount.
    AmountFormat,
    /// Value must name a known entity. With `fail_closed`, a missing
    /// reference section fails instead of passing.
    Exists { kind: EntityKind, fail_closed: bool },
    /// Value matches a known entity only after case folding or trimming.
    CanonicalCase { kind: EntityKind },
    CategoryRange,
    RangeCategoryReference,
    BusinessUnitConsistency,
    MediaSubtype,
    BudgetSum { tolerance: f64 },
    DateOrder,
    AbpYear,
    CampaignPlacement,
    /// Auto-create policy: unknown campaigns are flagged for provisional creation.
    CampaignKnown,
    DuplicateLine,
    Custom(Predicate),
}

impl Check {
    /// Wrap a closure as a custom check.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&RuleInput<'_>) -> CheckResult + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    pub fn evaluate(&self, input: &RuleInput<'_>) -> CheckResult {
        match self {
            Self::NotBlank => Ok(checks::required::not_blank(input)),
            Self::YearFormat => Ok(checks::format::year_format(input)),
            Self::YearRange { min, max } => Ok(checks::format::year_range(input, *min, *max)),
            Self::DateFormat => Ok(checks::format::date_format(input)),
            Self::PositiveAmount => Ok(checks::format::positive_amount(input)),
            Self::AmountFormat => Ok(checks::format::amount_format(input)),
            Self::Exists { kind, fail_closed } => {
                Ok(checks::membership::exists(input, *kind, *fail_closed))
            }
            Self::CanonicalCase { kind } => Ok(checks::membership::canonical_case(input, *kind)),
            Self::CategoryRange => Ok(checks::hierarchy::category_range(input)),
            Self::RangeCategoryReference => Ok(checks::hierarchy::range_category_reference(input)),
            Self::BusinessUnitConsistency => {
                Ok(checks::hierarchy::business_unit_consistency(input))
            }
            Self::MediaSubtype => Ok(checks::membership::media_subtype(input)),
            Self::BudgetSum { tolerance } => Ok(checks::budget::sum_consistency(input, *tolerance)),
            Self::DateOrder => Ok(checks::dates::date_order(input)),
            Self::AbpYear => Ok(checks::dates::abp_year(input)),
            Self::CampaignPlacement => Ok(checks::placement::campaign_placement(input)),
            Self::CampaignKnown => Ok(checks::placement::campaign_known(input)),
            Self::DuplicateLine => Ok(checks::uniqueness::duplicate_line(input)),
            Self::Custom(predicate) => predicate(input),
        }
    }

    /// Short name of the check, for listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotBlank => "not_blank",
            Self::YearFormat => "year_format",
            Self::YearRange { .. } => "year_range",
            Self::DateFormat => "date_format",
            Self::PositiveAmount => "positive_amount",
            Self::AmountFormat => "amount_format",
            Self::Exists { .. } => "exists",
            Self::CanonicalCase { .. } => "canonical_case",
            Self::CategoryRange => "category_range",
            Self::RangeCategoryReference => "range_category_reference",
            Self::BusinessUnitConsistency => "business_unit_consistency",
            Self::MediaSubtype => "media_subtype",
            Self::BudgetSum { .. } => "budget_sum",
            Self::DateOrder => "date_order",
            Self::AbpYear => "abp_year",
            Self::CampaignPlacement => "campaign_placement",
            Self::CampaignKnown => "campaign_known",
            Self::DuplicateLine => "duplicate_line",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YearRange { min, max } => f
                .debug_struct("YearRange")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Exists { kind, fail_closed } => f
                .debug_struct("Exists")
                .field("kind", kind)
                .field("fail_closed", fail_closed)
                .finish(),
            Self::CanonicalCase { kind } => {
                f.debug_struct("CanonicalCase").field("kind", kind).finish()
            }
            Self::BudgetSum { tolerance } => f
                .debug_struct("BudgetSum")
                .field("tolerance", tolerance)
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// A declarative validation rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable identifier, `<field-slug>.<check>`.
    pub id: String,
    pub field: String,
    pub kind: RuleKind,
    pub severity: Severity,
    pub message: String,
    pub check: Check,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        field: &str,
        kind: RuleKind,
        severity: Severity,
        message: impl Into<String>,
        check: Check,
    ) -> Self {
        Self {
            id: id.into(),
            field: field.to_string(),
            kind,
            severity,
            message: message.into(),
            check,
        }
    }

    pub fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            id: self.id.clone(),
            field: self.field.clone(),
            kind: self.kind,
            severity: self.severity,
            message: self.message.clone(),
            check: self.check.name(),
        }
    }
}

/// Serializable view of a rule, for tooling and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleDescriptor {
    pub id: String,
    pub field: String,
    pub kind: RuleKind,
    pub severity: Severity,
    pub message: String,
    pub check: &'static str,
}

/// Ordered list of rules. Evaluation follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Remove a rule by id, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Rule> {
        let position = self.rules.iter().position(|rule| rule.id == id)?;
        Some(self.rules.remove(position))
    }

    /// Put `rule` where the rule `id` was; append when `id` is unknown.
    pub fn replace(&mut self, id: &str, rule: Rule) {
        match self.rules.iter().position(|existing| existing.id == id) {
            Some(position) => self.rules[position] = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Rule) -> bool,
    {
        self.rules.retain(keep);
    }

    pub fn list_rules(&self) -> Vec<RuleDescriptor> {
        self.rules.iter().map(Rule::descriptor).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
