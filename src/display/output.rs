use crate::analysis::{AnalyticsReport, ArchetypeStat, CardStat, DeckStat, MetaCoverage, StatLine};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "#")]
    rank: String,
    card: String,
    games: String,
    record: String,
    win_rate: String,
}

#[derive(Tabled)]
struct DeckRow {
    #[tabled(rename = "#")]
    rank: String,
    deck: String,
    games: String,
    record: String,
    win_rate: String,
}

#[derive(Tabled)]
struct ArchetypeRow {
    #[tabled(rename = "type")]
    deck_type: String,
    games: String,
    record: String,
    win_rate: String,
}

#[derive(Tabled)]
struct CoverageRow {
    #[tabled(rename = "type")]
    deck_type: String,
    decks: String,
}

fn record(stats: &StatLine) -> String {
    format!("{}W / {}L / {}D", stats.wins, stats.losses, stats.draws)
}

fn win_rate(stats: &StatLine) -> String {
    let pct = format!("{:.1}%", stats.win_rate * 100.0);
    if stats.win_rate >= 0.5 {
        pct.green().to_string()
    } else {
        pct.red().to_string()
    }
}

fn header(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
}

fn print_table<T: Tabled>(rows: Vec<T>, empty_message: &str) {
    if rows.is_empty() {
        println!("{}", empty_message.yellow());
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_summary(report: &AnalyticsReport) {
    let summary = &report.summary;

    header(&format!("📊 OVERALL (Last {} Games)", summary.games_played));
    println!(
        "{} {} W / {} L / {} D ({:.1}% WR)",
        "📈 Overall:".bold(),
        summary.wins.to_string().green(),
        summary.losses.to_string().red(),
        summary.draws,
        summary.win_rate * 100.0
    );

    if let Some(warning) = &report.data_health.low_data_warning {
        println!("{} {}", "⚠️ Warning:".yellow().bold(), warning);
    }
}

pub fn display_card_table(title: &str, cards: &[CardStat], top_n: usize) {
    header(title);

    let rows: Vec<CardRow> = cards
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, c)| CardRow {
            rank: format!("#{}", idx + 1),
            card: c.card.clone(),
            games: c.stats.games.to_string(),
            record: record(&c.stats),
            win_rate: win_rate(&c.stats),
        })
        .collect();

    print_table(rows, "Not enough games for any card yet");
}

pub fn display_deck_table(title: &str, decks: &[DeckStat], top_n: usize) {
    header(title);

    let rows: Vec<DeckRow> = decks
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, d)| DeckRow {
            rank: format!("#{}", idx + 1),
            deck: d.deck.join(", "),
            games: d.stats.games.to_string(),
            record: record(&d.stats),
            win_rate: win_rate(&d.stats),
        })
        .collect();

    print_table(rows, "Not enough games with any single deck yet");
}

pub fn display_archetype_table(title: &str, types: &[ArchetypeStat]) {
    header(title);

    let rows: Vec<ArchetypeRow> = types
        .iter()
        .map(|t| ArchetypeRow {
            deck_type: t.deck_type.to_string(),
            games: t.stats.games.to_string(),
            record: record(&t.stats),
            win_rate: win_rate(&t.stats),
        })
        .collect();

    print_table(rows, "No battles to classify");
}

pub fn display_meta_coverage(coverage: &MetaCoverage) {
    header("🧭 ARCHETYPE COVERAGE");

    let rows: Vec<CoverageRow> = coverage
        .counts
        .iter()
        .map(|(label, count)| CoverageRow {
            deck_type: label.to_string(),
            decks: count.to_string(),
        })
        .collect();
    print_table(rows, "No decks seen");

    if coverage.is_balanced {
        println!("\n{}", "✓ Every meta archetype is represented".green());
    } else {
        let missing: Vec<&str> = coverage.missing.iter().map(|a| a.as_str()).collect();
        println!("\n{} {}", "Missing archetypes:".yellow().bold(), missing.join(", "));
    }
}

pub fn display_report(report: &AnalyticsReport, coverage: &MetaCoverage, top_n: usize) {
    display_summary(report);

    display_card_table("🃏 BEST CARDS", &report.best_cards, top_n);
    display_card_table("🃏 WORST CARDS", &report.worst_cards, top_n);
    display_card_table("😤 TOUGHEST OPPONENT CARDS", &report.tough_opp_cards, top_n);
    display_card_table("😌 EASIEST OPPONENT CARDS", &report.easy_opp_cards, top_n);

    display_deck_table("🏆 BEST DECKS", &report.best_decks, top_n);
    display_deck_table("💀 WORST DECKS", &report.worst_decks, top_n);
    display_deck_table("⚔️ TOUGHEST MATCHUPS", &report.tough_matchups, top_n);
    display_deck_table("🍀 EASIEST MATCHUPS", &report.easy_matchups, top_n);

    display_archetype_table("🧱 MY DECK TYPES", &report.my_deck_types);
    display_archetype_table("🛡️ OPPONENT DECK TYPES (my record against)", &report.opp_deck_types);

    display_meta_coverage(coverage);
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    eprintln!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}
