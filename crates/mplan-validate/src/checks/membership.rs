//! Flat membership of a value in the reference snapshot.

use tracing::debug;

use mplan_model::{EntityKind, FieldValue, Relation, fields};

use crate::rules::{RuleInput, Verdict};

pub(crate) fn exists(input: &RuleInput<'_>, kind: EntityKind, fail_closed: bool) -> Verdict {
    let Some(name) = input.text() else {
        return Verdict::Pass;
    };
    match input.refs.entities(kind) {
        Some(known) => {
            if known.contains(&name) {
                Verdict::Pass
            } else {
                Verdict::FailWith(format!(
                    "{} '{name}' does not exist in the reference data",
                    input.field
                ))
            }
        }
        None if fail_closed => Verdict::FailWith(format!(
            "{} '{name}' cannot be verified: no {kind} reference list is loaded",
            input.field
        )),
        None => {
            debug!(%kind, field = input.field, "reference list absent; skipping membership check");
            Verdict::Pass
        }
    }
}

pub(crate) fn canonical_case(input: &RuleInput<'_>, kind: EntityKind) -> Verdict {
    let FieldValue::Text(raw) = input.value else {
        return Verdict::Pass;
    };
    match input.refs.canonical(kind, raw) {
        Some(canonical) if canonical != raw => Verdict::FailWith(format!(
            "{} '{raw}' should be spelled '{canonical}'",
            input.field
        )),
        _ => Verdict::Pass,
    }
}

pub(crate) fn media_subtype(input: &RuleInput<'_>) -> Verdict {
    let (Some(subtype), Some(media)) = (input.text(), input.other(fields::MEDIA)) else {
        return Verdict::Pass;
    };
    let Some(map) = input.refs.relation_map(Relation::SubtypesOfMedia) else {
        return Verdict::Pass;
    };
    if !map.contains_key(&media) || map.relates(&media, &subtype) {
        return Verdict::Pass;
    }
    Verdict::FailWith(format!(
        "Media Subtype '{subtype}' is not available for Media '{media}'"
    ))
}
