// file: src/models/result.rs
// description: extraction result grouped by entity kind
// reference: internal data model

use crate::models::entity::{EntityKind, EntityMatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Two matches of different kinds covering intersecting spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub first: EntityKind,
    pub second: EntityKind,
    pub first_text: String,
    pub second_text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Overlap {
    pub fn between(a: &EntityMatch, b: &EntityMatch) -> Self {
        Self {
            first: a.kind,
            second: b.kind,
            first_text: a.raw_text.clone(),
            second_text: b.raw_text.clone(),
            start_offset: a.start_offset.max(b.start_offset),
            end_offset: a.end_offset.min(b.end_offset),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub entities: BTreeMap<EntityKind, Vec<EntityMatch>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlaps: Vec<Overlap>,
}

impl ExtractionResult {
    /// Creates a result with an empty sequence for every requested kind.
    pub fn new(kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        Self {
            entities: kinds.into_iter().map(|kind| (kind, Vec::new())).collect(),
            overlaps: Vec::new(),
        }
    }

    pub fn get(&self, kind: EntityKind) -> &[EntityMatch] {
        self.entities.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn raw_texts(&self, kind: EntityKind) -> Vec<&str> {
        self.get(kind).iter().map(|m| m.raw_text.as_str()).collect()
    }

    pub fn set(&mut self, kind: EntityKind, matches: Vec<EntityMatch>) {
        self.entities.insert(kind, matches);
    }

    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.entities.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &[EntityMatch])> {
        self.entities.iter().map(|(kind, m)| (*kind, m.as_slice()))
    }

    pub fn all_matches(&self) -> impl Iterator<Item = &EntityMatch> {
        self.entities.values().flatten()
    }

    pub fn total(&self) -> usize {
        self.entities.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn counts(&self) -> BTreeMap<EntityKind, usize> {
        self.entities
            .iter()
            .map(|(kind, m)| (*kind, m.len()))
            .collect()
    }
}
