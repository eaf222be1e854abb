//! Auto-create extension.
//!
//! Wraps a [`RecordValidator`] whose rules follow the auto-create policy and
//! adds the session-scoped workflow that provisionally creates campaigns.
//! Ranges are never created here.

mod memory;
pub(crate) mod policy;
mod repository;
mod session;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use mplan_model::{
    EntityId, EntityKind, EntityStatus, Issue, NewEntity, Record, ReferenceSnapshot,
    ValidationMode, ValidationOptions, fields,
};

use crate::error::{AutoCreateError, Result};
use crate::rules::RuleDescriptor;
use crate::summary::{self, ValidationSummary};
use crate::validator::RecordValidator;

pub use memory::InMemoryRepository;
pub use policy::{CAMPAIGN_AUTO_CREATE_RULE, RANGE_STRICT_RULE};
pub use repository::EntityRepository;
pub use session::{AutoCreateSession, SessionEntry};

/// Value of `createdBy` on provisional entities.
pub const AUTO_IMPORT_USER: &str = "auto-import";

const DEFAULT_SOURCE: &str = "import";

/// Result of resolving a campaign name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignResolution {
    pub id: EntityId,
    pub name: String,
    pub created: bool,
}

/// Result of a strict range lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeLookup {
    pub id: EntityId,
    pub name: String,
    pub exists: bool,
}

/// Campaigns created during the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoCreatedSummary {
    pub campaigns: Vec<SessionEntry>,
    pub total_created: usize,
}

/// A campaign resolved for one row by [`AutoCreateValidator::realize_campaigns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowResolution {
    pub row_index: usize,
    pub campaign: CampaignResolution,
}

/// Validator in auto-create mode plus the provisional-creation workflow.
pub struct AutoCreateValidator {
    validator: RecordValidator,
    repository: Arc<dyn EntityRepository>,
    session: Mutex<AutoCreateSession>,
}

impl AutoCreateValidator {
    /// Build an auto-create validator. `options.mode` is forced to auto-create.
    pub fn new(
        snapshot: ReferenceSnapshot,
        options: ValidationOptions,
        repository: Arc<dyn EntityRepository>,
    ) -> Self {
        let options = options.with_mode(ValidationMode::AutoCreate);
        Self {
            validator: RecordValidator::new(snapshot, options),
            repository,
            session: Mutex::new(AutoCreateSession::new()),
        }
    }

    pub fn validator(&self) -> &RecordValidator {
        &self.validator
    }

    pub fn list_rules(&self) -> Vec<RuleDescriptor> {
        self.validator.list_rules()
    }

    pub fn validate_record(&self, record: &Record, index: usize, batch: &[Record]) -> Vec<Issue> {
        self.validator.validate_record(record, index, batch)
    }

    pub fn validate_all(&self, batch: &[Record]) -> Vec<Issue> {
        self.validator.validate_all(batch)
    }

    pub fn summary(&self, issues: &[Issue]) -> ValidationSummary {
        summary::summarize(issues)
    }

    pub fn can_import(&self, issues: &[Issue]) -> bool {
        summary::can_import(issues)
    }

    fn session(&self) -> MutexGuard<'_, AutoCreateSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve a campaign by name, creating a pending-review campaign when it
    /// is unknown.
    ///
    /// Idempotent within a session: repeated calls with the same name (after
    /// trimming, ignoring case) return the same id and report `created: true`
    /// at most once. The session lock is held for the whole call, so
    /// concurrent callers cannot insert twice.
    pub fn validate_or_create_campaign(
        &self,
        name: &str,
        source: Option<&str>,
    ) -> Result<CampaignResolution> {
        let kind = EntityKind::Campaign;
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(AutoCreateError::EmptyName { kind });
        }
        let mut session = self.session();

        if let Some(existing) = self.repository.find_by_name_ci(kind, normalized)? {
            debug!(id = existing.id, name = %existing.name, "campaign found in store");
            session.record(SessionEntry {
                kind,
                id: existing.id,
                name: existing.name.clone(),
                created: false,
            });
            return Ok(CampaignResolution {
                id: existing.id,
                name: existing.name,
                created: false,
            });
        }

        if let Some(cached) = session.created(kind, normalized) {
            debug!(id = cached.id, name = %cached.name, "campaign already created in this session");
            return Ok(CampaignResolution {
                id: cached.id,
                name: cached.name.clone(),
                created: false,
            });
        }

        let source = source.unwrap_or(DEFAULT_SOURCE);
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let created = self.repository.create(
            kind,
            NewEntity {
                name: normalized.to_string(),
                status: EntityStatus::PendingReview,
                created_by: AUTO_IMPORT_USER.to_string(),
                original_name: name.to_string(),
                notes: format!("Auto-created during import from {source} at {timestamp}"),
            },
        )?;
        info!(id = created.id, name = %created.name, source, "campaign auto-created for review");
        session.record(SessionEntry {
            kind,
            id: created.id,
            name: created.name.clone(),
            created: true,
        });
        Ok(CampaignResolution {
            id: created.id,
            name: created.name,
            created: true,
        })
    }

    /// Look up a range without ever creating one.
    pub fn validate_range(&self, name: &str) -> Result<RangeLookup> {
        let kind = EntityKind::Range;
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(AutoCreateError::EmptyName { kind });
        }
        match self.repository.find_by_name_ci(kind, normalized)? {
            Some(range) => {
                let mut session = self.session();
                session.record(SessionEntry {
                    kind,
                    id: range.id,
                    name: range.name.clone(),
                    created: false,
                });
                Ok(RangeLookup {
                    id: range.id,
                    name: range.name,
                    exists: true,
                })
            }
            None => Err(AutoCreateError::RangeNotFound {
                name: normalized.to_string(),
            }),
        }
    }

    /// Create the campaigns flagged by the auto-create rule.
    ///
    /// Rows with a critical issue are skipped: a wrongly placed or otherwise
    /// rejected line never leads to creation. Store failures abort and
    /// propagate.
    pub fn realize_campaigns(
        &self,
        batch: &[Record],
        issues: &[Issue],
        source: Option<&str>,
    ) -> Result<Vec<RowResolution>> {
        let span = info_span!("realize_campaigns", rows = batch.len());
        let _guard = span.enter();

        let mut resolutions = Vec::new();
        for (index, record) in batch.iter().enumerate() {
            let row_issues = issues.iter().filter(|issue| issue.row_index == index);
            let mut flagged = false;
            let mut blocked = false;
            for issue in row_issues {
                flagged |= issue.rule_id == CAMPAIGN_AUTO_CREATE_RULE;
                blocked |= issue.is_critical();
            }
            if !flagged {
                continue;
            }
            if blocked {
                warn!(row = index, "row has critical issues; campaign not created");
                continue;
            }
            let Some(name) = record.text(fields::CAMPAIGN) else {
                continue;
            };
            let campaign = self.validate_or_create_campaign(&name, source)?;
            resolutions.push(RowResolution {
                row_index: index,
                campaign,
            });
        }
        Ok(resolutions)
    }

    pub fn auto_created_summary(&self) -> AutoCreatedSummary {
        let campaigns = self.session().created_entries(EntityKind::Campaign);
        AutoCreatedSummary {
            total_created: campaigns.len(),
            campaigns,
        }
    }

    /// Every resolution recorded this session, in order.
    pub fn session_entries(&self) -> Vec<SessionEntry> {
        self.session().entries().to_vec()
    }

    pub fn reset_session(&self) {
        self.session().reset();
    }

    pub fn disconnect(&self) -> Result<()> {
        self.repository.disconnect()?;
        Ok(())
    }
}
