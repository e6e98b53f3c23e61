use super::card_performance::{compute_card_performance, CardStat};
use super::deck_performance::{compute_deck_performance, DeckStat};
use super::deck_types::{summarize_deck_types, ArchetypeStat};
use super::stats_tracker::StatBucket;
use crate::battles::BattleRecord;
use crate::cards::CardMetadataStore;
use crate::config::{DEFAULT_LOW_DATA_THRESHOLD, DEFAULT_MIN_GAMES};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub min_card_games: usize,
    pub min_deck_games: usize,
    pub low_data_threshold: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            min_card_games: DEFAULT_MIN_GAMES,
            min_deck_games: DEFAULT_MIN_GAMES,
            low_data_threshold: DEFAULT_LOW_DATA_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub games_played: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
}

pub fn compute_summary(battles: &[BattleRecord]) -> Summary {
    let mut totals = StatBucket::default();
    for battle in battles {
        totals.record(battle.result);
    }

    Summary {
        games_played: totals.games,
        wins: totals.wins,
        losses: totals.losses,
        draws: totals.draws,
        win_rate: totals.win_rate(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataHealth {
    pub games_played: usize,
    pub has_enough_data: bool,
    pub low_data_warning: Option<String>,
}

impl DataHealth {
    pub fn check(summary: &Summary, threshold: usize) -> Self {
        let has_enough_data = summary.games_played >= threshold;
        let low_data_warning = (!has_enough_data).then(|| {
            format!(
                "only {} recent ranked games; these stats may be noisy or not fully representative",
                summary.games_played
            )
        });

        DataHealth {
            games_played: summary.games_played,
            has_enough_data,
            low_data_warning,
        }
    }
}

/// Everything computed from one battle list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub summary: Summary,
    pub best_cards: Vec<CardStat>,
    pub worst_cards: Vec<CardStat>,
    pub tough_opp_cards: Vec<CardStat>,
    pub easy_opp_cards: Vec<CardStat>,
    pub best_decks: Vec<DeckStat>,
    pub worst_decks: Vec<DeckStat>,
    pub tough_matchups: Vec<DeckStat>,
    pub easy_matchups: Vec<DeckStat>,
    pub my_deck_types: Vec<ArchetypeStat>,
    pub opp_deck_types: Vec<ArchetypeStat>,
    pub data_health: DataHealth,
}

pub fn compute_user_analytics(
    battles: &[BattleRecord],
    metadata: &CardMetadataStore,
    options: AnalysisOptions,
) -> AnalyticsReport {
    let summary = compute_summary(battles);
    let cards = compute_card_performance(battles, options.min_card_games);
    let decks = compute_deck_performance(battles, options.min_deck_games);
    let (my_deck_types, opp_deck_types) = summarize_deck_types(battles, metadata);
    let data_health = DataHealth::check(&summary, options.low_data_threshold);

    info!(
        games = summary.games_played,
        win_rate = summary.win_rate,
        cards = cards.best_cards.len(),
        decks = decks.best_decks.len(),
        "computed analytics"
    );

    AnalyticsReport {
        summary,
        best_cards: cards.best_cards,
        worst_cards: cards.worst_cards,
        tough_opp_cards: cards.tough_opp_cards,
        easy_opp_cards: cards.easy_opp_cards,
        best_decks: decks.best_decks,
        worst_decks: decks.worst_decks,
        tough_matchups: decks.tough_matchups,
        easy_matchups: decks.easy_matchups,
        my_deck_types,
        opp_deck_types,
        data_health,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battles::Outcome;

    #[test]
    fn empty_battle_list_degrades_to_zeroes() {
        let summary = compute_summary(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.win_rate, 0.0);
    }

    #[test]
    fn summary_counts_each_outcome() {
        let battles = vec![
            BattleRecord::new(["Knight"], ["Giant"], Outcome::Win),
            BattleRecord::new(["Knight"], ["Giant"], Outcome::Win),
            BattleRecord::new(["Knight"], ["Giant"], Outcome::Loss),
            BattleRecord::new(["Knight"], ["Giant"], Outcome::Draw),
        ];
        let summary = compute_summary(&battles);
        assert_eq!(
            (summary.games_played, summary.wins, summary.losses, summary.draws),
            (4, 2, 1, 1)
        );
        assert_eq!(summary.win_rate, 0.5);
    }

    #[test]
    fn data_health_warns_below_threshold() {
        let small = Summary {
            games_played: 5,
            ..Summary::default()
        };
        let health = DataHealth::check(&small, 20);
        assert!(!health.has_enough_data);
        assert!(health.low_data_warning.unwrap().starts_with("only 5 recent ranked games"));

        let large = Summary {
            games_played: 20,
            ..Summary::default()
        };
        let health = DataHealth::check(&large, 20);
        assert!(health.has_enough_data);
        assert!(health.low_data_warning.is_none());
    }
}
