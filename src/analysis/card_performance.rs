use super::stats_tracker::{Ranking, StatLine, StatsTracker};
use crate::battles::BattleRecord;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardStat {
    pub card: String,
    #[serde(flatten)]
    pub stats: StatLine,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardPerformance {
    pub best_cards: Vec<CardStat>,
    pub worst_cards: Vec<CardStat>,
    pub tough_opp_cards: Vec<CardStat>,
    pub easy_opp_cards: Vec<CardStat>,
}

/// Per-card records. Opponent cards are scored from their own side, so a
/// battle the player won counts as a loss for every card they faced.
pub fn compute_card_performance(battles: &[BattleRecord], min_games: usize) -> CardPerformance {
    let mut mine = StatsTracker::new();
    let mut theirs = StatsTracker::new();

    for battle in battles {
        let against = battle.result.invert();
        mine.extend(battle.my_cards.iter().map(|card| (card.clone(), battle.result)));
        theirs.extend(battle.opp_cards.iter().map(|card| (card.clone(), against)));
    }

    debug!(
        my_cards = mine.len(),
        opp_cards = theirs.len(),
        min_games,
        "aggregated card stats"
    );

    let mine = to_card_stats(mine.into_ranking(min_games));
    let theirs = to_card_stats(theirs.into_ranking(min_games));

    CardPerformance {
        best_cards: mine.0,
        worst_cards: mine.1,
        tough_opp_cards: theirs.0,
        easy_opp_cards: theirs.1,
    }
}

fn to_card_stats(ranking: Ranking<String>) -> (Vec<CardStat>, Vec<CardStat>) {
    let convert = |rows: Vec<(String, StatLine)>| -> Vec<CardStat> {
        rows.into_iter()
            .map(|(card, stats)| CardStat { card, stats })
            .collect()
    };
    (convert(ranking.best), convert(ranking.worst))
}
