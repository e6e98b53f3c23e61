use std::fs;
use std::path::PathBuf;

use deck_detect::analysis::{compute_user_analytics, AnalysisOptions, AnalyticsReport, Archetype, ArchetypeStat};
use deck_detect::battles::{parse_battles, BattleRecord, Outcome};
use deck_detect::cards::CardMetadataStore;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn sample_battles() -> Vec<BattleRecord> {
    parse_battles(&read_fixture("battles_sample.json")).expect("fixture should parse")
}

fn analyze(battles: &[BattleRecord], options: AnalysisOptions) -> AnalyticsReport {
    let metadata = CardMetadataStore::builtin().expect("embedded metadata should load");
    compute_user_analytics(battles, metadata, options)
}

fn reversed<T: Clone>(rows: &[T]) -> Vec<T> {
    rows.iter().rev().cloned().collect()
}

fn find(types: &[ArchetypeStat], label: Archetype) -> &ArchetypeStat {
    types
        .iter()
        .find(|t| t.deck_type == label)
        .unwrap_or_else(|| panic!("{} should be present", label))
}

#[test]
fn sample_log_classifies_each_of_my_decks() {
    let report = analyze(&sample_battles(), AnalysisOptions::default());

    let siege = find(&report.my_deck_types, Archetype::Siege);
    assert_eq!(
        (siege.stats.games, siege.stats.wins, siege.stats.losses, siege.stats.draws),
        (1, 1, 0, 0)
    );
    assert_eq!(siege.stats.win_rate, 1.0);

    let cycle = find(&report.my_deck_types, Archetype::Cycle);
    assert_eq!((cycle.stats.games, cycle.stats.losses), (1, 1));
    assert_eq!(cycle.stats.win_rate, 0.0);

    let bait = find(&report.my_deck_types, Archetype::Bait);
    assert_eq!((bait.stats.games, bait.stats.wins, bait.stats.draws), (1, 0, 1));
    assert_eq!(bait.stats.win_rate, 0.0);

    assert_eq!(report.my_deck_types.len(), 3);
}

#[test]
fn opponent_archetypes_record_my_results() {
    let report = analyze(&sample_battles(), AnalysisOptions::default());

    assert_eq!(report.opp_deck_types.len(), 1);
    let beatdown = &report.opp_deck_types[0];
    assert_eq!(beatdown.deck_type, Archetype::Beatdown);
    assert_eq!(
        (beatdown.stats.games, beatdown.stats.wins, beatdown.stats.losses, beatdown.stats.draws),
        (3, 1, 1, 1)
    );
}

#[test]
fn summary_and_health_over_sample() {
    let report = analyze(&sample_battles(), AnalysisOptions::default());

    assert_eq!(report.summary.games_played, 3);
    assert_eq!((report.summary.wins, report.summary.losses, report.summary.draws), (1, 1, 1));
    assert!(!report.data_health.has_enough_data);
    assert!(report.data_health.low_data_warning.is_some());
}

#[test]
fn only_cards_with_three_games_are_ranked() {
    let report = analyze(&sample_battles(), AnalysisOptions::default());

    let best: Vec<&str> = report.best_cards.iter().map(|c| c.card.as_str()).collect();
    assert_eq!(best, vec!["The Log", "Ice Spirit"]);
    let worst: Vec<&str> = report.worst_cards.iter().map(|c| c.card.as_str()).collect();
    assert_eq!(worst, vec!["Ice Spirit", "The Log"]);

    let tough: Vec<&str> = report.tough_opp_cards.iter().map(|c| c.card.as_str()).collect();
    assert_eq!(tough, vec!["Mega Minion"]);
    assert_eq!(report.easy_opp_cards, report.tough_opp_cards);

    assert!(!best.contains(&"Skeletons"));
}

#[test]
fn third_appearance_surfaces_a_card() {
    let mut battles = sample_battles();
    battles.push(BattleRecord::new(["Skeletons"], ["Giant"], Outcome::Win));

    let report = analyze(&battles, AnalysisOptions::default());
    let skeletons = report
        .best_cards
        .iter()
        .find(|c| c.card == "Skeletons")
        .expect("Skeletons should now have three games");
    assert_eq!(skeletons.stats.games, 3);
    assert_eq!(skeletons.stats.wins, 2);
    assert_eq!(report.best_cards[0].card, "Skeletons");
}

#[test]
fn permuted_opponent_decks_group_as_one_matchup() {
    let options = AnalysisOptions {
        min_deck_games: 2,
        ..AnalysisOptions::default()
    };
    let report = analyze(&sample_battles(), options);

    assert!(report.best_decks.is_empty());
    assert_eq!(report.tough_matchups.len(), 1);
    let giant = &report.tough_matchups[0];
    assert_eq!(giant.stats.games, 2);
    assert_eq!(giant.stats.win_rate, 0.5);
    assert_eq!(giant.deck[0], "Fireball");
}

#[test]
fn zero_thresholds_keep_every_key() {
    let options = AnalysisOptions {
        min_card_games: 0,
        min_deck_games: 0,
        ..AnalysisOptions::default()
    };
    let report = analyze(&sample_battles(), options);

    assert_eq!(report.best_decks.len(), 3);
    assert_eq!(report.tough_matchups.len(), 2);
    assert!(report.best_cards.iter().any(|c| c.card == "X-Bow"));
}

#[test]
fn reversed_lists_hold_for_every_ranking() {
    let options = AnalysisOptions {
        min_card_games: 1,
        min_deck_games: 1,
        ..AnalysisOptions::default()
    };
    let report = analyze(&sample_battles(), options);

    assert_eq!(report.worst_cards, reversed(&report.best_cards));
    assert_eq!(report.easy_opp_cards, reversed(&report.tough_opp_cards));
    assert_eq!(report.worst_decks, reversed(&report.best_decks));
    assert_eq!(report.easy_matchups, reversed(&report.tough_matchups));

    for row in report.best_cards.iter().chain(report.tough_opp_cards.iter()) {
        assert_eq!(row.stats.games, row.stats.wins + row.stats.losses + row.stats.draws);
    }
}

#[test]
fn empty_log_produces_an_empty_report() {
    let report = analyze(&[], AnalysisOptions::default());

    assert_eq!(report.summary.games_played, 0);
    assert_eq!(report.summary.win_rate, 0.0);
    assert!(report.best_cards.is_empty());
    assert!(report.my_deck_types.is_empty());
}

#[test]
fn report_serializes_with_expected_keys() {
    let report = analyze(&sample_battles(), AnalysisOptions::default());
    let json = serde_json::to_value(&report).expect("report should serialize");

    for key in [
        "summary",
        "best_cards",
        "worst_cards",
        "tough_opp_cards",
        "easy_opp_cards",
        "best_decks",
        "worst_decks",
        "tough_matchups",
        "easy_matchups",
        "my_deck_types",
        "opp_deck_types",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["best_cards"][0]["card"], "The Log");
    assert_eq!(json["opp_deck_types"][0]["type"], "Beatdown");
}
