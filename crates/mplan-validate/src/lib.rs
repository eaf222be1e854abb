//! Certification of media plan lines against the reference hierarchy.
//!
//! - [`RecordValidator`] runs the [`RuleRegistry`] over each record and
//!   collects [`Issue`](mplan_model::Issue)s.
//! - [`AutoCreateValidator`] switches campaigns to open-world and
//!   provisionally creates unknown ones, once per import session.
//! - [`summarize`] and [`can_import`] reduce issues to the import decision.

mod autocreate;
mod checks;
pub mod datetime;
mod error;
pub mod numeric;
pub mod rules;
mod summary;
mod validator;

pub use autocreate::{
    AUTO_IMPORT_USER, AutoCreateSession, AutoCreateValidator, AutoCreatedSummary,
    CAMPAIGN_AUTO_CREATE_RULE, CampaignResolution, EntityRepository, InMemoryRepository,
    RANGE_STRICT_RULE, RangeLookup, RowResolution, SessionEntry,
};
pub use checks::placement::{PlacementDecision, decide_placement, is_known_campaign};
pub use error::{AutoCreateError, RepositoryError};
pub use rules::{
    BUILTIN_REJECTED_PAIRINGS, Check, CheckResult, Predicate, Rule, RuleDescriptor, RuleFault,
    RuleInput, RuleRegistry, Verdict, initialize_rules,
};
pub use summary::{ValidationSummary, can_import, issues_from_json, summarize, summarize_json};
pub use validator::RecordValidator;
