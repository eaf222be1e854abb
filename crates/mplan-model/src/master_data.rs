//! Loading the master-data JSON bundle into a [`ReferenceSnapshot`].
//!
//! The bundle is loosely typed: names are either bare strings or `{"name": ..}`
//! objects, and relation values are either one name or a list. Both shapes are
//! normalized here, once, into plain strings. Malformed sections are dropped
//! with a warning and behave exactly like absent ones.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ModelError, Result};
use crate::reference::{EntityKind, ReferenceSnapshot, RejectedPairing, Relation, SnapshotBuilder};

const ENTITY_SECTIONS: &[(&str, EntityKind)] = &[
    ("countries", EntityKind::Country),
    ("businessUnits", EntityKind::BusinessUnit),
    ("categories", EntityKind::Category),
    ("ranges", EntityKind::Range),
    ("campaigns", EntityKind::Campaign),
    ("mediaTypes", EntityKind::MediaType),
    ("mediaSubtypes", EntityKind::MediaSubtype),
];

const RELATION_SECTIONS: &[(&str, Relation)] = &[
    ("categoryToRanges", Relation::RangesOfCategory),
    ("rangeToCategories", Relation::CategoriesOfRange),
    ("rangeToCampaigns", Relation::CampaignsOfRange),
    ("campaignToRange", Relation::RangeOfCampaign),
    ("rangeToBusinessUnit", Relation::BusinessUnitOfRange),
    ("categoryToBusinessUnit", Relation::BusinessUnitOfCategory),
    ("mediaToSubtypes", Relation::SubtypesOfMedia),
    ("campaignCompatibility", Relation::CompatibleRangesOfCampaign),
];

/// Relations that hold exactly one name per key.
const SINGLE_VALUED: &[Relation] = &[
    Relation::RangeOfCampaign,
    Relation::BusinessUnitOfRange,
    Relation::BusinessUnitOfCategory,
];

/// A name as it appears in the bundle.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameEntry {
    Bare(String),
    Named { name: String },
}

impl NameEntry {
    fn into_name(self) -> String {
        match self {
            Self::Bare(name) | Self::Named { name } => name,
        }
    }
}

fn parse_name(value: &Value) -> Option<String> {
    NameEntry::deserialize(value)
        .ok()
        .map(NameEntry::into_name)
        .filter(|name| !name.trim().is_empty())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a master-data JSON document.
pub fn load_master_data(json: &str) -> Result<ReferenceSnapshot> {
    let value: Value = serde_json::from_str(json)?;
    snapshot_from_value(&value)
}

/// Build a snapshot from an already-parsed master-data document.
pub fn snapshot_from_value(value: &Value) -> Result<ReferenceSnapshot> {
    let Value::Object(root) = value else {
        return Err(ModelError::MasterDataShape {
            found: json_type(value),
        });
    };

    let mut builder = ReferenceSnapshot::builder();
    for (key, kind) in ENTITY_SECTIONS {
        builder = load_entities(builder, root, key, *kind);
    }
    for (key, relation) in RELATION_SECTIONS {
        builder = load_relation(builder, root, key, *relation);
    }
    builder = load_rejected_pairings(builder, root);
    Ok(builder.build())
}

fn load_entities(
    mut builder: SnapshotBuilder,
    root: &Map<String, Value>,
    key: &str,
    kind: EntityKind,
) -> SnapshotBuilder {
    let Some(section) = root.get(key) else {
        debug!(section = key, "master data section absent");
        return builder;
    };
    let Value::Array(entries) = section else {
        warn!(
            section = key,
            found = json_type(section),
            "master data section is not an array; ignoring it"
        );
        return builder;
    };

    builder = builder.declare(kind);
    let mut names = Vec::with_capacity(entries.len());
    for entry in entries {
        match parse_name(entry) {
            Some(name) => names.push(name),
            None => warn!(section = key, entry = %entry, "dropping malformed master data entry"),
        }
    }
    builder.entities(kind, names)
}

fn load_relation(
    mut builder: SnapshotBuilder,
    root: &Map<String, Value>,
    key: &str,
    relation: Relation,
) -> SnapshotBuilder {
    let Some(section) = root.get(key) else {
        debug!(section = key, "master data relation absent");
        return builder;
    };
    let Value::Object(entries) = section else {
        warn!(
            section = key,
            found = json_type(section),
            "master data relation is not an object; ignoring it"
        );
        return builder;
    };

    builder = builder.declare_relation(relation);
    let single = SINGLE_VALUED.contains(&relation);
    for (from, related) in entries {
        let mut names: Vec<String> = match related {
            Value::Array(items) => items.iter().filter_map(parse_name).collect(),
            other => parse_name(other).into_iter().collect(),
        };
        if names.is_empty() {
            warn!(section = key, key = %from, "dropping relation entry without usable names");
            continue;
        }
        if single && names.len() > 1 {
            debug!(section = key, key = %from, "single-valued relation lists several names; keeping the first");
            names.truncate(1);
        }
        builder = builder.relate(relation, from, names);
    }
    builder
}

fn load_rejected_pairings(mut builder: SnapshotBuilder, root: &Map<String, Value>) -> SnapshotBuilder {
    let Some(section) = root.get("rejectedPairings") else {
        return builder;
    };
    let Value::Array(entries) = section else {
        warn!(found = json_type(section), "rejectedPairings is not an array; ignoring it");
        return builder;
    };
    for entry in entries {
        match RejectedPairing::deserialize(entry) {
            Ok(pairing) => builder = builder.reject_pairing(pairing),
            Err(error) => warn!(entry = %entry, %error, "dropping malformed rejected pairing"),
        }
    }
    builder
}
