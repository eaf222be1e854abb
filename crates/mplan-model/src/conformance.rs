use std::fmt;

use serde::{Deserialize, Serialize};

/// How strongly an issue blocks import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the whole batch.
    Critical,
    /// Surfaced to the user, does not block.
    Warning,
    /// Cosmetic hint, does not block.
    Suggestion,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Required,
    Format,
    Relationship,
    Consistency,
    Uniqueness,
    Range,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Format => "format",
            Self::Relationship => "relationship",
            Self::Consistency => "consistency",
            Self::Uniqueness => "uniqueness",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data-quality finding for one field of one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Zero-based position of the record in its batch.
    pub row_index: usize,
    pub field: String,
    pub severity: Severity,
    pub message: String,
    /// Value of the field as seen by the rule.
    #[serde(default)]
    pub current_value: String,
    /// Identifier of the rule that raised the issue.
    #[serde(default)]
    pub rule_id: String,
}

impl Issue {
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}
