use super::archetype::{Archetype, ArchetypeClassifier};
use super::stats_tracker::{StatLine, StatsTracker};
use crate::battles::BattleRecord;
use crate::cards::CardMetadataStore;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeStat {
    #[serde(rename = "type")]
    pub deck_type: Archetype,
    #[serde(flatten)]
    pub stats: StatLine,
}

/// Archetype stats for the player's decks and for the decks they faced.
///
/// Both sides record the player's own result: the opponent list reads as
/// "my record against this archetype". Sorted by games, most first.
pub fn summarize_deck_types(
    battles: &[BattleRecord],
    metadata: &CardMetadataStore,
) -> (Vec<ArchetypeStat>, Vec<ArchetypeStat>) {
    let classifier = ArchetypeClassifier::new(metadata);
    let mut mine = StatsTracker::new();
    let mut theirs = StatsTracker::new();

    for battle in battles {
        mine.record(classifier.classify(&battle.my_cards), battle.result);
        theirs.record(classifier.classify(&battle.opp_cards), battle.result);
    }

    debug!(
        battles = battles.len(),
        my_types = mine.len(),
        opp_types = theirs.len(),
        "summarized deck types"
    );

    (to_archetype_stats(mine), to_archetype_stats(theirs))
}

fn to_archetype_stats(tracker: StatsTracker<Archetype>) -> Vec<ArchetypeStat> {
    tracker
        .into_by_games()
        .into_iter()
        .map(|(deck_type, stats)| ArchetypeStat { deck_type, stats })
        .collect()
}

/// How well a battle sample covers the archetypes a meta view needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaCoverage {
    pub counts: Vec<(Archetype, usize)>,
    pub missing: Vec<Archetype>,
    pub is_balanced: bool,
}

/// Archetype counts over both sides of every battle, most common first.
pub fn deck_type_counts(
    battles: &[BattleRecord],
    metadata: &CardMetadataStore,
) -> Vec<(Archetype, usize)> {
    let classifier = ArchetypeClassifier::new(metadata);
    let mut order: Vec<Archetype> = Vec::new();
    let mut counts: HashMap<Archetype, usize> = HashMap::new();

    for battle in battles {
        for deck in [&battle.my_cards, &battle.opp_cards] {
            let label = classifier.classify(deck);
            let count = counts.entry(label).or_insert_with(|| {
                order.push(label);
                0
            });
            *count += 1;
        }
    }

    let mut ranked: Vec<(Archetype, usize)> = order
        .into_iter()
        .map(|label| (label, counts.get(&label).copied().unwrap_or(0)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

pub fn meta_coverage(battles: &[BattleRecord], metadata: &CardMetadataStore) -> MetaCoverage {
    let counts = deck_type_counts(battles, metadata);

    let missing: Vec<Archetype> = Archetype::META_REQUIRED
        .iter()
        .copied()
        .filter(|required| !counts.iter().any(|(label, n)| label == required && *n > 0))
        .collect();

    MetaCoverage {
        is_balanced: missing.is_empty(),
        counts,
        missing,
    }
}
