//! Detection of horses and riders that appear more than once in a show.

use std::collections::BTreeMap;

use crate::dto::schedule::{ConflictReport, SharedEntry};
use crate::models::Inscription;

/// `class id -> (entity id -> occurrences)`, keeping only occurrences >= 2
pub type SharedCounts = BTreeMap<i32, BTreeMap<i32, u32>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedEntities {
    pub horses: SharedCounts,
    pub riders: SharedCounts,
}

impl SharedEntities {
    pub fn is_empty(&self) -> bool {
        self.horses.is_empty() && self.riders.is_empty()
    }
}

/// Count, per class, the horses and riders entered at least twice in that class
pub fn analyze(inscriptions: &[Inscription]) -> SharedEntities {
    SharedEntities {
        horses: count_shared(inscriptions, |inscription| inscription.horse_id),
        riders: count_shared(inscriptions, |inscription| inscription.rider_id),
    }
}

fn count_shared(inscriptions: &[Inscription], key: impl Fn(&Inscription) -> i32) -> SharedCounts {
    let mut counts: SharedCounts = BTreeMap::new();

    for inscription in inscriptions {
        *counts
            .entry(inscription.class_id)
            .or_default()
            .entry(key(inscription))
            .or_default() += 1;
    }

    counts.retain(|_, entities| {
        entities.retain(|_, count| *count >= 2);
        !entities.is_empty()
    });

    counts
}

/// Show-wide view: every horse and rider entered in more than one inscription
pub fn shared_across_show(inscriptions: &[Inscription]) -> ConflictReport {
    ConflictReport {
        shared_horses: duplicated(inscriptions, |inscription| inscription.horse_id),
        shared_riders: duplicated(inscriptions, |inscription| inscription.rider_id),
    }
}

fn duplicated(inscriptions: &[Inscription], key: impl Fn(&Inscription) -> i32) -> Vec<SharedEntry> {
    let mut by_entity: BTreeMap<i32, Vec<i32>> = BTreeMap::new();

    for inscription in inscriptions {
        by_entity
            .entry(key(inscription))
            .or_default()
            .push(inscription.id);
    }

    by_entity
        .into_iter()
        .filter(|(_, inscription_ids)| inscription_ids.len() > 1)
        .map(|(id, inscription_ids)| SharedEntry {
            id,
            inscription_ids,
        })
        .collect()
}
