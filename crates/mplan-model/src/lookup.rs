use std::collections::{BTreeSet, HashMap};

/// Normalize a name for comparison: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive, whitespace-tolerant name set that keeps the first
/// spelling it saw for each name.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    pub fn insert(&mut self, name: &str) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        self.map
            .entry(normalize_name(trimmed))
            .or_insert_with(|| trimmed.to_string());
    }

    /// Canonical spelling for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&normalize_name(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Canonical names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let sorted: BTreeSet<&str> = self.map.values().map(String::as_str).collect();
        sorted.into_iter().collect()
    }
}

/// Case-insensitive map from an entity name to one or more related names.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveMap {
    map: HashMap<String, (String, Vec<String>)>,
}

impl CaseInsensitiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `values` under `key`, skipping blank and duplicate entries.
    pub fn extend<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let (_, related) = self
            .map
            .entry(normalize_name(key))
            .or_insert_with(|| (key.to_string(), Vec::new()));
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let normalized = normalize_name(value);
            if !related.iter().any(|existing| normalize_name(existing) == normalized) {
                related.push(value.to_string());
            }
        }
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.extend(key, [value]);
    }

    pub fn get(&self, key: &str) -> &[String] {
        self.map
            .get(&normalize_name(key))
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// First related name, for maps that are single-valued by contract.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(&normalize_name(key))
    }

    /// True when `value` is related to `key`, compared case-insensitively.
    pub fn relates(&self, key: &str, value: &str) -> bool {
        let wanted = normalize_name(value);
        self.get(key)
            .iter()
            .any(|candidate| normalize_name(candidate) == wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.map
            .values()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
