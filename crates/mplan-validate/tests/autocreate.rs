//! Auto-create mode: open-world campaigns, closed-world ranges.

mod common;

use std::sync::Arc;
use std::thread;

use mplan_model::{
    EntityKind, EntityStatus, Record, ReferenceSnapshot, Severity, ValidationOptions, fields,
};
use mplan_validate::{
    AUTO_IMPORT_USER, AutoCreateError, AutoCreateValidator, CAMPAIGN_AUTO_CREATE_RULE,
    InMemoryRepository, RANGE_STRICT_RULE, RepositoryError,
};

use common::{criticals, rule_ids, snapshot, valid_record, with_rule};

fn setup() -> (AutoCreateValidator, Arc<InMemoryRepository>) {
    setup_with(snapshot())
}

fn setup_with(snapshot: ReferenceSnapshot) -> (AutoCreateValidator, Arc<InMemoryRepository>) {
    let repository = Arc::new(InMemoryRepository::from_snapshot(&snapshot));
    let validator = AutoCreateValidator::new(
        snapshot,
        ValidationOptions::default(),
        repository.clone(),
    );
    (validator, repository)
}

#[test]
fn policy_rewrites_campaign_and_range_rules() {
    let (validator, _) = setup();
    let registry = validator.validator().registry();
    assert!(!registry.contains("campaign.exists"));
    assert!(!registry.contains("range.exists"));
    assert!(!registry.contains("range.category-reference"));
    assert!(registry.contains("range.category-consistency"));
    assert!(registry.contains("campaign.placement"));

    let auto = registry.get(CAMPAIGN_AUTO_CREATE_RULE).expect("auto-create rule");
    assert_eq!(auto.severity, Severity::Warning);
    let strict = registry.get(RANGE_STRICT_RULE).expect("strict range rule");
    assert_eq!(strict.severity, Severity::Critical);
}

#[test]
fn unknown_campaign_yields_exactly_one_warning() {
    let (validator, _) = setup();
    let record = valid_record().with(fields::CAMPAIGN, "Brand New");
    let issues = validator.validate_all(&[record]);
    assert_eq!(rule_ids(&issues), vec![CAMPAIGN_AUTO_CREATE_RULE]);
    assert_eq!(
        issues[0].message,
        "Campaign 'Brand New' does not exist and will be auto-created for review"
    );
    assert!(validator.can_import(&issues));
}

/// Derma owns an Acne category holding the Acne range, plus a campaign that
/// is listed but has no primary range.
fn acne_snapshot() -> ReferenceSnapshot {
    ReferenceSnapshot::builder()
        .entities(EntityKind::Country, ["France"])
        .hierarchy("Derma", "Acne", "Acne", ["Clear Skin"])
        .entities(EntityKind::Campaign, ["Listed Only"])
        .media("TV", ["Linear"])
        .build()
}

fn acne_record(campaign: &str) -> Record {
    valid_record()
        .with(fields::BUSINESS_UNIT, "Derma")
        .with(fields::CATEGORY, "Acne")
        .with(fields::RANGE, "Acne")
        .with(fields::CAMPAIGN, campaign)
}

#[test]
fn made_up_campaign_under_acne_is_a_single_warning() {
    let (validator, _) = setup_with(acne_snapshot());
    let issues = validator.validate_all(&[acne_record("Totally Made Up Campaign 12345")]);
    assert_eq!(rule_ids(&issues), vec![CAMPAIGN_AUTO_CREATE_RULE]);
    assert_eq!(issues[0].severity, Severity::Warning);
    assert!(criticals(&issues).is_empty());
    assert!(validator.can_import(&issues));
}

#[test]
fn listed_campaign_without_a_range_still_warns() {
    let (validator, _) = setup_with(acne_snapshot());
    let batch = [acne_record("Listed Only")];
    let issues = validator.validate_all(&batch);
    assert_eq!(rule_ids(&issues), vec![CAMPAIGN_AUTO_CREATE_RULE]);
    assert_eq!(
        issues[0].message,
        "Campaign 'Listed Only' is not mapped to any Range and will be auto-created for review"
    );

    let resolutions = validator
        .realize_campaigns(&batch, &issues, None)
        .expect("realize campaigns");
    assert_eq!(resolutions.len(), 1);
    assert_eq!(resolutions[0].campaign.name, "Listed Only");
    assert!(!resolutions[0].campaign.created);
}

#[test]
fn mapped_campaign_under_acne_passes() {
    let (validator, _) = setup_with(acne_snapshot());
    let issues = validator.validate_all(&[acne_record("Clear Skin")]);
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn unknown_range_stays_critical() {
    let (validator, _) = setup();
    let record = valid_record().with(fields::RANGE, "Ghost");
    let issues = validator.validate_all(&[record]);
    let strict = with_rule(&issues, RANGE_STRICT_RULE);
    assert_eq!(strict.len(), 1);
    assert_eq!(strict[0].message, "Range 'Ghost' does not exist in the reference data");
    assert!(!validator.can_import(&issues));
}

#[test]
fn misplaced_known_campaign_is_still_critical() {
    let (validator, _) = setup();
    let record = valid_record()
        .with(fields::CATEGORY, "Derma Skin")
        .with(fields::RANGE, "Acne")
        .with(fields::BUSINESS_UNIT, "Derma");
    let issues = validator.validate_all(&[record]);
    assert_eq!(with_rule(&issues, "campaign.placement").len(), 1);
    assert_eq!(criticals(&issues).len(), 1);
}

#[test]
fn first_creation_reports_created_then_reuses_the_id() {
    let (validator, repository) = setup();
    let first = validator
        .validate_or_create_campaign("  Spring Launch ", Some("plan.csv"))
        .expect("create campaign");
    assert!(first.created);
    assert_eq!(first.name, "Spring Launch");

    let second = validator
        .validate_or_create_campaign("SPRING LAUNCH", Some("plan.csv"))
        .expect("resolve campaign");
    assert!(!second.created);
    assert_eq!(second.id, first.id);

    let stored: Vec<_> = repository
        .entities(EntityKind::Campaign)
        .into_iter()
        .filter(|entity| entity.id == first.id)
        .collect();
    assert_eq!(stored.len(), 1);
    let entity = &stored[0];
    assert_eq!(entity.status, EntityStatus::PendingReview);
    assert_eq!(entity.created_by.as_deref(), Some(AUTO_IMPORT_USER));
    assert_eq!(entity.original_name.as_deref(), Some("  Spring Launch "));
    let notes = entity.notes.as_deref().unwrap_or_default();
    assert!(notes.starts_with("Auto-created during import from plan.csv at "), "{notes}");
}

#[test]
fn existing_campaign_is_never_created() {
    let (validator, repository) = setup();
    let before = repository.entities(EntityKind::Campaign).len();
    let resolution = validator
        .validate_or_create_campaign("disney", None)
        .expect("resolve campaign");
    assert!(!resolution.created);
    assert_eq!(resolution.name, "Disney");
    assert_eq!(repository.entities(EntityKind::Campaign).len(), before);
    assert_eq!(validator.auto_created_summary().total_created, 0);
}

#[test]
fn archived_campaigns_do_not_count() {
    let (validator, repository) = setup();
    let archived = repository.seed(EntityKind::Campaign, "Old Promo", EntityStatus::Archived);
    let resolution = validator
        .validate_or_create_campaign("Old Promo", None)
        .expect("create campaign");
    assert!(resolution.created);
    assert_ne!(resolution.id, archived.id);
}

#[test]
fn blank_names_are_rejected() {
    let (validator, _) = setup();
    let error = validator
        .validate_or_create_campaign("   ", None)
        .expect_err("blank name");
    assert!(matches!(error, AutoCreateError::EmptyName { kind: EntityKind::Campaign }));
}

#[test]
fn ranges_are_looked_up_but_never_created() {
    let (validator, repository) = setup();
    let found = validator.validate_range(" lip ").expect("range exists");
    assert!(found.exists);
    assert_eq!(found.name, "Lip");

    let before = repository.entities(EntityKind::Range).len();
    let error = validator.validate_range("Ghost").expect_err("unknown range");
    assert_eq!(
        error.to_string(),
        "range 'Ghost' does not exist and must be created manually"
    );
    assert_eq!(repository.entities(EntityKind::Range).len(), before);
}

#[test]
fn store_failures_propagate() {
    let (validator, repository) = setup();
    repository.set_available(false);
    let error = validator
        .validate_or_create_campaign("Spring Launch", None)
        .expect_err("store is down");
    assert!(matches!(
        error,
        AutoCreateError::Repository(RepositoryError::Unavailable(_))
    ));
    assert!(validator.auto_created_summary().campaigns.is_empty());
}

#[test]
fn summary_lists_created_campaigns_once() {
    let (validator, _) = setup();
    for name in ["Alpha", "alpha", "Beta", "Disney"] {
        validator
            .validate_or_create_campaign(name, Some("upload"))
            .expect("resolve campaign");
    }
    let summary = validator.auto_created_summary();
    assert_eq!(summary.total_created, 2);
    let names: Vec<&str> = summary.campaigns.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert_eq!(validator.session_entries().len(), 3);
}

#[test]
fn reset_clears_the_session_but_not_the_store() {
    let (validator, _) = setup();
    let created = validator
        .validate_or_create_campaign("Gamma", None)
        .expect("create campaign");
    validator.reset_session();
    assert_eq!(validator.auto_created_summary().total_created, 0);

    let again = validator
        .validate_or_create_campaign("gamma", None)
        .expect("resolve campaign");
    assert!(!again.created);
    assert_eq!(again.id, created.id);
}

#[test]
fn concurrent_callers_create_once() {
    let (validator, repository) = setup();
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| validator.validate_or_create_campaign("Race", None)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked").expect("resolve campaign"))
            .collect()
    });
    assert_eq!(results.iter().filter(|result| result.created).count(), 1);
    assert!(results.windows(2).all(|pair| pair[0].id == pair[1].id));
    let races = repository
        .entities(EntityKind::Campaign)
        .into_iter()
        .filter(|entity| entity.name == "Race")
        .count();
    assert_eq!(races, 1);
}

#[test]
fn realize_skips_rows_with_critical_issues() {
    let (validator, repository) = setup();
    let batch = vec![
        valid_record().with(fields::CAMPAIGN, "Launch A"),
        valid_record()
            .with(fields::CAMPAIGN, "Launch B")
            .with(fields::COUNTRY, "Atlantis"),
        valid_record().with(fields::CAMPAIGN, "launch a"),
        valid_record(),
    ];
    let issues = validator.validate_all(&batch);
    let resolutions = validator
        .realize_campaigns(&batch, &issues, Some("plan.csv"))
        .expect("realize campaigns");

    let rows: Vec<usize> = resolutions.iter().map(|resolution| resolution.row_index).collect();
    assert_eq!(rows, vec![0, 2]);
    assert!(resolutions[0].campaign.created);
    assert!(!resolutions[1].campaign.created);
    assert_eq!(resolutions[0].campaign.id, resolutions[1].campaign.id);

    let names: Vec<String> = repository
        .entities(EntityKind::Campaign)
        .into_iter()
        .map(|entity| entity.name)
        .collect();
    assert!(names.contains(&"Launch A".to_string()));
    assert!(!names.contains(&"Launch B".to_string()));
}

#[test]
fn disconnect_delegates_to_the_store() {
    let (validator, _) = setup();
    assert!(validator.disconnect().is_ok());
}
