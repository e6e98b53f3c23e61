use super::stats_tracker::{Ranking, StatLine, StatsTracker};
use crate::battles::BattleRecord;
use serde::Serialize;
use tracing::debug;

/// Sorted card names; duplicates kept. Two decks match iff their multisets match.
pub type DeckSignature = Vec<String>;

pub fn deck_signature(cards: &[String]) -> DeckSignature {
    let mut signature = cards.to_vec();
    signature.sort();
    signature
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckStat {
    pub deck: DeckSignature,
    #[serde(flatten)]
    pub stats: StatLine,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeckPerformance {
    pub best_decks: Vec<DeckStat>,
    pub worst_decks: Vec<DeckStat>,
    pub tough_matchups: Vec<DeckStat>,
    pub easy_matchups: Vec<DeckStat>,
}

pub fn compute_deck_performance(battles: &[BattleRecord], min_games: usize) -> DeckPerformance {
    let mut mine = StatsTracker::new();
    let mut theirs = StatsTracker::new();

    for battle in battles {
        mine.record(deck_signature(&battle.my_cards), battle.result);
        theirs.record(deck_signature(&battle.opp_cards), battle.result.invert());
    }

    debug!(
        my_decks = mine.len(),
        opp_decks = theirs.len(),
        min_games,
        "aggregated deck stats"
    );

    let (best_decks, worst_decks) = to_deck_stats(mine.into_ranking(min_games));
    let (tough_matchups, easy_matchups) = to_deck_stats(theirs.into_ranking(min_games));

    DeckPerformance {
        best_decks,
        worst_decks,
        tough_matchups,
        easy_matchups,
    }
}

fn to_deck_stats(ranking: Ranking<DeckSignature>) -> (Vec<DeckStat>, Vec<DeckStat>) {
    let convert = |rows: Vec<(DeckSignature, StatLine)>| -> Vec<DeckStat> {
        rows.into_iter()
            .map(|(deck, stats)| DeckStat { deck, stats })
            .collect()
    };
    (convert(ranking.best), convert(ranking.worst))
}
