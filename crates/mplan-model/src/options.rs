//! Configuration options for a validation run.

use serde::{Deserialize, Serialize};

use crate::reference::RejectedPairing;

/// How unknown campaigns are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Unknown entities are rejected.
    #[default]
    Strict,
    /// Unknown campaigns are admitted as pending-review entities.
    AutoCreate,
}

/// Options controlling which rules are built and how they compare values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub mode: ValidationMode,

    /// Require Start/End Date years to match the year embedded in the ABP cycle.
    pub abp_year_check: bool,

    /// Maximum absolute difference between Budget and the sum of the monthly budgets.
    pub budget_tolerance: f64,

    /// Inclusive bounds for the Year field.
    pub year_min: i32,
    pub year_max: i32,

    /// Emit suggestions when a value only matches its reference entity
    /// case-insensitively.
    pub suggest_canonical_case: bool,

    /// Warn about lines repeated within one batch.
    pub detect_duplicates: bool,

    /// Category/range pairs rejected in addition to the built-in table.
    pub extra_rejected_pairings: Vec<RejectedPairing>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Strict,
            abp_year_check: true,
            budget_tolerance: 0.01,
            year_min: 2000,
            year_max: 2100,
            suggest_canonical_case: true,
            detect_duplicates: true,
            extra_rejected_pairings: Vec::new(),
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for auto-create imports.
    pub fn auto_create() -> Self {
        Self {
            mode: ValidationMode::AutoCreate,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_abp_year_check(mut self, enable: bool) -> Self {
        self.abp_year_check = enable;
        self
    }

    #[must_use]
    pub fn with_duplicate_detection(mut self, enable: bool) -> Self {
        self.detect_duplicates = enable;
        self
    }

    #[must_use]
    pub fn with_case_suggestions(mut self, enable: bool) -> Self {
        self.suggest_canonical_case = enable;
        self
    }
}
