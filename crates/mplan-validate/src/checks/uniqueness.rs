use std::collections::HashMap;

use mplan_model::{Record, fields, normalize_name};

use crate::rules::{RuleInput, Verdict};

fn line_key(record: &Record) -> Option<Vec<String>> {
    let key: Vec<String> = fields::LINE_IDENTITY
        .iter()
        .map(|field| record.text(field).map(|text| normalize_name(&text)).unwrap_or_default())
        .collect();
    key.iter().any(|part| !part.is_empty()).then_some(key)
}

/// Rows of a batch grouped by line identity, built once per batch.
#[derive(Debug, Default)]
pub(crate) struct LineIndex {
    rows: HashMap<Vec<String>, Vec<usize>>,
}

impl LineIndex {
    pub(crate) fn build(batch: &[Record]) -> Self {
        let mut rows: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        for (index, record) in batch.iter().enumerate() {
            if let Some(key) = line_key(record) {
                rows.entry(key).or_default().push(index);
            }
        }
        Self { rows }
    }

    /// First row other than `row` sharing `key`, in batch order.
    fn first_other(&self, key: &[String], row: usize) -> Option<usize> {
        self.rows
            .get(key)?
            .iter()
            .copied()
            .find(|&index| index != row)
    }
}

/// Another row of the batch carries the same identity fields.
pub(crate) fn duplicate_line(input: &RuleInput<'_>) -> Verdict {
    let Some(key) = line_key(input.record) else {
        return Verdict::Pass;
    };
    let duplicate = match input.lines {
        Some(lines) => lines.first_other(&key, input.row_index),
        None => LineIndex::build(input.batch).first_other(&key, input.row_index),
    };
    match duplicate {
        Some(index) => Verdict::FailWith(format!(
            "Line duplicates row {} (same Country, Campaign, Media, Media Subtype and Start Date)",
            index + 1
        )),
        None => Verdict::Pass,
    }
}
