//! Record validator: evaluates the rule registry against plan lines.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, info_span};

use mplan_model::{
    Issue, Record, ReferenceSnapshot, RejectedPairing, Severity, ValidationMode, ValidationOptions,
};

use crate::autocreate::policy;
use crate::checks::uniqueness::LineIndex;
use crate::rules::{
    BUILTIN_REJECTED_PAIRINGS, Check, Rule, RuleDescriptor, RuleFault, RuleInput, RuleRegistry, Verdict,
    initialize_rules,
};
use crate::summary::{self, ValidationSummary};

/// Validates records against a reference snapshot.
///
/// The validator holds no mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    registry: RuleRegistry,
    snapshot: Arc<ReferenceSnapshot>,
    options: ValidationOptions,
}

impl RecordValidator {
    /// Build the rule catalogue for `options` over `snapshot`.
    ///
    /// The built-in and configured rejected pairings are merged into the
    /// snapshot. In auto-create mode the campaign and range rules are
    /// rewritten by the auto-create policy.
    pub fn new(snapshot: ReferenceSnapshot, options: ValidationOptions) -> Self {
        let mut registry = initialize_rules(&options);
        if options.mode == ValidationMode::AutoCreate {
            policy::apply(&mut registry);
        }
        Self::with_registry(snapshot, options, registry)
    }

    /// Use a caller-assembled registry instead of the built-in catalogue.
    pub fn with_registry(
        snapshot: ReferenceSnapshot,
        options: ValidationOptions,
        registry: RuleRegistry,
    ) -> Self {
        let builtin = BUILTIN_REJECTED_PAIRINGS
            .iter()
            .map(|(category, range, reason)| RejectedPairing::new(category, range, reason));
        let snapshot = snapshot
            .with_rejected_pairings(builtin)
            .with_rejected_pairings(options.extra_rejected_pairings.iter().cloned());
        Self {
            registry,
            snapshot: Arc::new(snapshot),
            options,
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn snapshot(&self) -> &ReferenceSnapshot {
        &self.snapshot
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    pub fn list_rules(&self) -> Vec<RuleDescriptor> {
        self.registry.list_rules()
    }

    /// Evaluate every rule whose field is present in `record`.
    ///
    /// A rule that errors or panics yields a critical issue and evaluation
    /// moves on to the next rule.
    pub fn validate_record(&self, record: &Record, index: usize, batch: &[Record]) -> Vec<Issue> {
        let lines = self.line_index(batch);
        self.evaluate(record, index, batch, lines.as_ref())
    }

    /// Duplicate detection needs the whole batch keyed once.
    fn line_index(&self, batch: &[Record]) -> Option<LineIndex> {
        self.registry
            .rules()
            .iter()
            .any(|rule| matches!(rule.check, Check::DuplicateLine))
            .then(|| LineIndex::build(batch))
    }

    fn evaluate(
        &self,
        record: &Record,
        index: usize,
        batch: &[Record],
        lines: Option<&LineIndex>,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in self.registry.rules() {
            let Some(value) = record.get(&rule.field) else {
                continue;
            };
            let input = RuleInput {
                field: &rule.field,
                value,
                record,
                row_index: index,
                batch,
                refs: &self.snapshot,
                lines,
            };
            let outcome = match run_guarded(rule, &input) {
                Ok(verdict) => verdict,
                Err(fault) => {
                    debug!(rule = %rule.id, row = index, %fault, "rule execution failed");
                    issues.push(Issue {
                        row_index: index,
                        field: rule.field.clone(),
                        severity: Severity::Critical,
                        message: format!("Rule execution failed: {fault}"),
                        current_value: value.as_text(),
                        rule_id: rule.id.clone(),
                    });
                    continue;
                }
            };
            let message = match outcome {
                Verdict::Pass => continue,
                Verdict::Fail => rule.message.clone(),
                Verdict::FailWith(message) => message,
            };
            issues.push(Issue {
                row_index: index,
                field: rule.field.clone(),
                severity: rule.severity,
                message,
                current_value: value.as_text(),
                rule_id: rule.id.clone(),
            });
        }
        issues
    }

    /// Validate a whole batch, row by row in order.
    pub fn validate_all(&self, batch: &[Record]) -> Vec<Issue> {
        let span = info_span!("validate_batch", rows = batch.len(), rules = self.registry.len());
        let _guard = span.enter();

        let lines = self.line_index(batch);
        let issues: Vec<Issue> = batch
            .iter()
            .enumerate()
            .flat_map(|(index, record)| self.evaluate(record, index, batch, lines.as_ref()))
            .collect();

        let summary = summary::summarize(&issues);
        info!(
            critical = summary.critical,
            warning = summary.warning,
            suggestion = summary.suggestion,
            can_import = summary.can_import,
            "batch validated"
        );
        issues
    }

    pub fn summary(&self, issues: &[Issue]) -> ValidationSummary {
        summary::summarize(issues)
    }

    pub fn can_import(&self, issues: &[Issue]) -> bool {
        summary::can_import(issues)
    }
}

fn run_guarded(rule: &Rule, input: &RuleInput<'_>) -> Result<Verdict, RuleFault> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check.evaluate(input))) {
        Ok(result) => result,
        Err(payload) => Err(RuleFault(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}
