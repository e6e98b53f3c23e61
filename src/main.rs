use anyhow::{Context, Result};
use clap::Parser;
use deck_detect::analysis::{compute_user_analytics, meta_coverage, AnalysisOptions};
use deck_detect::battles::load_battles;
use deck_detect::cards::CardMetadataStore;
use deck_detect::config::{clamp_threshold, Config};
use deck_detect::display::output::{display_error, display_info, display_report, display_success};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "Deck Detect")]
#[command(about = "Classify deck archetypes and rank cards, decks and matchups from a battle log", long_about = None)]
struct Args {
    /// JSON file with normalized battles
    battles: PathBuf,

    /// Card metadata table (default: embedded table)
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Minimum games before a card is ranked (<= 0 disables the filter)
    #[arg(long, allow_negative_numbers = true)]
    min_card_games: Option<i64>,

    /// Minimum games before a deck is ranked (<= 0 disables the filter)
    #[arg(long, allow_negative_numbers = true)]
    min_deck_games: Option<i64>,

    /// Rows per table (default: 10)
    #[arg(short, long, default_value = "10")]
    top_n: usize,

    /// Print the full report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a deck_detect::analysis::AnalyticsReport,
    meta_coverage: &'a deck_detect::analysis::MetaCoverage,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deck_detect=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(path) = args.metadata {
        config.card_metadata_path = Some(path);
    }
    if let Some(min) = args.min_card_games {
        config.min_card_games = clamp_threshold(min);
    }
    if let Some(min) = args.min_deck_games {
        config.min_deck_games = clamp_threshold(min);
    }

    let owned_store;
    let metadata: &CardMetadataStore = match &config.card_metadata_path {
        Some(path) => {
            owned_store = CardMetadataStore::from_path(path)
                .with_context(|| format!("loading card metadata from {}", path.display()))?;
            &owned_store
        }
        None => CardMetadataStore::builtin().context("loading embedded card metadata")?,
    };

    display_info(&format!("Reading battles from {}", args.battles.display()));
    let battles = load_battles(&args.battles)
        .with_context(|| format!("loading battles from {}", args.battles.display()))?;
    display_success(&format!("Loaded {} battles", battles.len()));

    let options = AnalysisOptions {
        min_card_games: config.min_card_games,
        min_deck_games: config.min_deck_games,
        low_data_threshold: config.low_data_threshold,
    };
    let report = compute_user_analytics(&battles, metadata, options);
    let coverage = meta_coverage(&battles, metadata);

    if args.json {
        let output = JsonOutput {
            report: &report,
            meta_coverage: &coverage,
        };
        let json = serde_json::to_string_pretty(&output).context("serializing report")?;
        println!("{}", json);
    } else {
        display_report(&report, &coverage, args.top_n);
    }

    Ok(())
}
