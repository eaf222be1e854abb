//! Per-import bookkeeping of what the auto-create workflow found or created.

use std::collections::HashSet;

use serde::Serialize;

use mplan_model::{EntityId, EntityKind, normalize_name};

/// One resolution recorded during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEntry {
    pub kind: EntityKind,
    pub id: EntityId,
    pub name: String,
    pub created: bool,
}

/// Mutable state of one import run. Grows monotonically until reset.
#[derive(Debug, Default)]
pub struct AutoCreateSession {
    created_keys: HashSet<String>,
    seen_keys: HashSet<String>,
    entries: Vec<SessionEntry>,
}

fn session_key(kind: EntityKind, name: &str) -> String {
    format!("{kind}:{}", normalize_name(name))
}

impl AutoCreateSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for an entity created earlier in this run.
    pub fn created(&self, kind: EntityKind, name: &str) -> Option<&SessionEntry> {
        let key = session_key(kind, name);
        if !self.created_keys.contains(&key) {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.created && session_key(entry.kind, &entry.name) == key)
    }

    /// Record a resolution. Only the first resolution per name is kept.
    pub fn record(&mut self, entry: SessionEntry) {
        let key = session_key(entry.kind, &entry.name);
        if !self.seen_keys.insert(key.clone()) {
            return;
        }
        if entry.created {
            self.created_keys.insert(key);
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn created_entries(&self, kind: EntityKind) -> Vec<SessionEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind && entry.created)
            .cloned()
            .collect()
    }

    pub fn reset(&mut self) {
        self.created_keys.clear();
        self.seen_keys.clear();
        self.entries.clear();
    }
}
