//! Read-only snapshot of the reference hierarchy
//! (Business Unit → Category → Range → Campaign, plus countries and media).
//!
//! Every section is optional. A missing section is not an error: each rule
//! decides whether "unknown" means fail or pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lookup::{CaseInsensitiveMap, CaseInsensitiveSet, normalize_name};

/// Entity kinds held by the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Country,
    BusinessUnit,
    Category,
    Range,
    Campaign,
    MediaType,
    MediaSubtype,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        Self::Country,
        Self::BusinessUnit,
        Self::Category,
        Self::Range,
        Self::Campaign,
        Self::MediaType,
        Self::MediaSubtype,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::BusinessUnit => "business_unit",
            Self::Category => "category",
            Self::Range => "range",
            Self::Campaign => "campaign",
            Self::MediaType => "media_type",
            Self::MediaSubtype => "media_subtype",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directional relations between entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    RangesOfCategory,
    CategoriesOfRange,
    CampaignsOfRange,
    RangeOfCampaign,
    BusinessUnitOfRange,
    BusinessUnitOfCategory,
    /// Derived: range of campaign, then business unit of that range.
    BusinessUnitOfCampaign,
    SubtypesOfMedia,
    CompatibleRangesOfCampaign,
    CampaignsCompatibleWithRange,
}

/// A category/range pair that must be rejected even when plain membership
/// would accept it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedPairing {
    pub category: String,
    pub range: String,
    #[serde(default)]
    pub reason: String,
}

impl RejectedPairing {
    pub fn new(category: &str, range: &str, reason: &str) -> Self {
        Self {
            category: category.to_string(),
            range: range.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn matches(&self, category: &str, range: &str) -> bool {
        normalize_name(&self.category) == normalize_name(category)
            && normalize_name(&self.range) == normalize_name(range)
    }
}

/// Immutable per-run view of the master data.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    pub(crate) countries: Option<CaseInsensitiveSet>,
    pub(crate) business_units: Option<CaseInsensitiveSet>,
    pub(crate) categories: Option<CaseInsensitiveSet>,
    pub(crate) ranges: Option<CaseInsensitiveSet>,
    pub(crate) campaigns: Option<CaseInsensitiveSet>,
    pub(crate) media_types: Option<CaseInsensitiveSet>,
    pub(crate) media_subtypes: Option<CaseInsensitiveSet>,
    pub(crate) category_to_ranges: Option<CaseInsensitiveMap>,
    pub(crate) range_to_categories: Option<CaseInsensitiveMap>,
    pub(crate) range_to_campaigns: Option<CaseInsensitiveMap>,
    pub(crate) campaign_to_range: Option<CaseInsensitiveMap>,
    pub(crate) range_to_business_unit: Option<CaseInsensitiveMap>,
    pub(crate) category_to_business_unit: Option<CaseInsensitiveMap>,
    pub(crate) media_to_subtypes: Option<CaseInsensitiveMap>,
    pub(crate) campaign_compatibility: Option<CaseInsensitiveMap>,
    pub(crate) range_compatibility: Option<CaseInsensitiveMap>,
    pub(crate) rejected_pairings: Vec<RejectedPairing>,
}

impl ReferenceSnapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Leaf set for `kind`, or `None` when the section was absent or malformed.
    pub fn entities(&self, kind: EntityKind) -> Option<&CaseInsensitiveSet> {
        match kind {
            EntityKind::Country => self.countries.as_ref(),
            EntityKind::BusinessUnit => self.business_units.as_ref(),
            EntityKind::Category => self.categories.as_ref(),
            EntityKind::Range => self.ranges.as_ref(),
            EntityKind::Campaign => self.campaigns.as_ref(),
            EntityKind::MediaType => self.media_types.as_ref(),
            EntityKind::MediaSubtype => self.media_subtypes.as_ref(),
        }
    }

    /// Whether `name` is a known entity of `kind`. Absent sections know nothing.
    pub fn exists(&self, kind: EntityKind, name: &str) -> bool {
        self.entities(kind).is_some_and(|set| set.contains(name))
    }

    /// Canonical spelling of `name` within `kind`.
    pub fn canonical(&self, kind: EntityKind, name: &str) -> Option<&str> {
        self.entities(kind).and_then(|set| set.get(name))
    }

    /// Backing map for a stored relation. Derived relations have none.
    pub fn relation_map(&self, relation: Relation) -> Option<&CaseInsensitiveMap> {
        match relation {
            Relation::RangesOfCategory => self.category_to_ranges.as_ref(),
            Relation::CategoriesOfRange => self.range_to_categories.as_ref(),
            Relation::CampaignsOfRange => self.range_to_campaigns.as_ref(),
            Relation::RangeOfCampaign => self.campaign_to_range.as_ref(),
            Relation::BusinessUnitOfRange => self.range_to_business_unit.as_ref(),
            Relation::BusinessUnitOfCategory => self.category_to_business_unit.as_ref(),
            Relation::SubtypesOfMedia => self.media_to_subtypes.as_ref(),
            Relation::CompatibleRangesOfCampaign => self.campaign_compatibility.as_ref(),
            Relation::CampaignsCompatibleWithRange => self.range_compatibility.as_ref(),
            Relation::BusinessUnitOfCampaign => None,
        }
    }

    /// Names related to `name` through `relation`; empty when unknown.
    pub fn related_of(&self, relation: Relation, name: &str) -> Vec<String> {
        if relation == Relation::BusinessUnitOfCampaign {
            return self.business_unit_of_campaign(name).into_iter().collect();
        }
        self.relation_map(relation)
            .map(|map| map.get(name).to_vec())
            .unwrap_or_default()
    }

    /// Ranges a campaign may additionally sit under besides its primary range.
    pub fn compatible_ranges(&self, campaign: &str) -> Vec<String> {
        self.related_of(Relation::CompatibleRangesOfCampaign, campaign)
    }

    pub fn range_of_campaign(&self, campaign: &str) -> Option<String> {
        self.campaign_to_range
            .as_ref()
            .and_then(|map| map.first(campaign))
            .map(str::to_string)
    }

    pub fn business_unit_of_range(&self, range: &str) -> Option<String> {
        self.range_to_business_unit
            .as_ref()
            .and_then(|map| map.first(range))
            .map(str::to_string)
    }

    pub fn business_unit_of_category(&self, category: &str) -> Option<String> {
        self.category_to_business_unit
            .as_ref()
            .and_then(|map| map.first(category))
            .map(str::to_string)
    }

    pub fn business_unit_of_campaign(&self, campaign: &str) -> Option<String> {
        self.range_of_campaign(campaign)
            .and_then(|range| self.business_unit_of_range(&range))
    }

    pub fn rejected_pairings(&self) -> &[RejectedPairing] {
        &self.rejected_pairings
    }

    /// Exception-table entry rejecting this category/range pair, if any.
    pub fn rejected_pairing(&self, category: &str, range: &str) -> Option<&RejectedPairing> {
        self.rejected_pairings
            .iter()
            .find(|pairing| pairing.matches(category, range))
    }

    /// Returns a copy with additional rejected pairings appended.
    #[must_use]
    pub fn with_rejected_pairings<I>(mut self, pairings: I) -> Self
    where
        I: IntoIterator<Item = RejectedPairing>,
    {
        self.rejected_pairings.extend(pairings);
        self
    }
}

/// Incremental constructor used by the master-data loader and by tests.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: ReferenceSnapshot,
}

fn set_slot<'a>(slot: &'a mut Option<CaseInsensitiveSet>) -> &'a mut CaseInsensitiveSet {
    slot.get_or_insert_with(CaseInsensitiveSet::default)
}

fn map_slot<'a>(slot: &'a mut Option<CaseInsensitiveMap>) -> &'a mut CaseInsensitiveMap {
    slot.get_or_insert_with(CaseInsensitiveMap::default)
}

impl SnapshotBuilder {
    fn set_mut(&mut self, kind: EntityKind) -> &mut CaseInsensitiveSet {
        let snapshot = &mut self.snapshot;
        match kind {
            EntityKind::Country => set_slot(&mut snapshot.countries),
            EntityKind::BusinessUnit => set_slot(&mut snapshot.business_units),
            EntityKind::Category => set_slot(&mut snapshot.categories),
            EntityKind::Range => set_slot(&mut snapshot.ranges),
            EntityKind::Campaign => set_slot(&mut snapshot.campaigns),
            EntityKind::MediaType => set_slot(&mut snapshot.media_types),
            EntityKind::MediaSubtype => set_slot(&mut snapshot.media_subtypes),
        }
    }

    fn map_mut(&mut self, relation: Relation) -> Option<&mut CaseInsensitiveMap> {
        let snapshot = &mut self.snapshot;
        let slot = match relation {
            Relation::RangesOfCategory => &mut snapshot.category_to_ranges,
            Relation::CategoriesOfRange => &mut snapshot.range_to_categories,
            Relation::CampaignsOfRange => &mut snapshot.range_to_campaigns,
            Relation::RangeOfCampaign => &mut snapshot.campaign_to_range,
            Relation::BusinessUnitOfRange => &mut snapshot.range_to_business_unit,
            Relation::BusinessUnitOfCategory => &mut snapshot.category_to_business_unit,
            Relation::SubtypesOfMedia => &mut snapshot.media_to_subtypes,
            Relation::CompatibleRangesOfCampaign => &mut snapshot.campaign_compatibility,
            Relation::CampaignsCompatibleWithRange => &mut snapshot.range_compatibility,
            Relation::BusinessUnitOfCampaign => return None,
        };
        Some(map_slot(slot))
    }

    /// Mark a leaf section as present, even if it stays empty.
    pub fn declare(mut self, kind: EntityKind) -> Self {
        self.set_mut(kind);
        self
    }

    /// Mark a relation map as present, even if it stays empty.
    pub fn declare_relation(mut self, relation: Relation) -> Self {
        self.map_mut(relation);
        self
    }

    pub fn entities<I, S>(mut self, kind: EntityKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = self.set_mut(kind);
        for name in names {
            set.insert(name.as_ref());
        }
        self
    }

    pub fn relate<I, S>(mut self, relation: Relation, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(map) = self.map_mut(relation) {
            map.extend(key, values);
        }
        self
    }

    /// Register a complete hierarchy branch: business unit, category, range
    /// and the campaigns whose primary range it is.
    pub fn hierarchy<I, S>(self, business_unit: &str, category: &str, range: &str, campaigns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let campaigns: Vec<String> = campaigns
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let mut builder = self
            .entities(EntityKind::BusinessUnit, [business_unit])
            .entities(EntityKind::Category, [category])
            .entities(EntityKind::Range, [range])
            .entities(EntityKind::Campaign, &campaigns)
            .relate(Relation::RangesOfCategory, category, [range])
            .relate(Relation::CategoriesOfRange, range, [category])
            .relate(Relation::BusinessUnitOfCategory, category, [business_unit])
            .relate(Relation::BusinessUnitOfRange, range, [business_unit])
            .relate(Relation::CampaignsOfRange, range, &campaigns);
        for campaign in &campaigns {
            builder = builder.relate(Relation::RangeOfCampaign, campaign, [range]);
        }
        builder
    }

    /// Allow `campaign` under `range` in addition to its primary range.
    pub fn compatibility(self, campaign: &str, range: &str) -> Self {
        self.relate(Relation::CompatibleRangesOfCampaign, campaign, [range])
    }

    pub fn media<I, S>(self, media: &str, subtypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let subtypes: Vec<String> = subtypes
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        self.entities(EntityKind::MediaType, [media])
            .entities(EntityKind::MediaSubtype, &subtypes)
            .relate(Relation::SubtypesOfMedia, media, &subtypes)
    }

    pub fn reject_pairing(mut self, pairing: RejectedPairing) -> Self {
        self.snapshot.rejected_pairings.push(pairing);
        self
    }

    /// Finish the snapshot, deriving the range → compatible campaigns inverse.
    pub fn build(mut self) -> ReferenceSnapshot {
        if let Some(forward) = self.snapshot.campaign_compatibility.clone() {
            let inverse = map_slot(&mut self.snapshot.range_compatibility);
            for (campaign, ranges) in forward.iter() {
                for range in ranges {
                    inverse.insert(range, campaign);
                }
            }
        }
        self.snapshot
    }
}
