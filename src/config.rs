use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MIN_GAMES: usize = 3;
pub const DEFAULT_LOW_DATA_THRESHOLD: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` means the embedded card table.
    pub card_metadata_path: Option<PathBuf>,
    pub min_card_games: usize,
    pub min_deck_games: usize,
    pub low_data_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            card_metadata_path: None,
            min_card_games: DEFAULT_MIN_GAMES,
            min_deck_games: DEFAULT_MIN_GAMES,
            low_data_threshold: DEFAULT_LOW_DATA_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let card_metadata_path = env::var("DECK_DETECT_CARD_METADATA")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let min_card_games = read_threshold("DECK_DETECT_MIN_CARD_GAMES", DEFAULT_MIN_GAMES)?;
        let min_deck_games = read_threshold("DECK_DETECT_MIN_DECK_GAMES", DEFAULT_MIN_GAMES)?;
        let low_data_threshold =
            read_threshold("DECK_DETECT_LOW_DATA_THRESHOLD", DEFAULT_LOW_DATA_THRESHOLD)?;

        Ok(Config {
            card_metadata_path,
            min_card_games,
            min_deck_games,
            low_data_threshold,
        })
    }
}

/// Non-positive thresholds disable filtering, so they collapse to 0.
pub fn clamp_threshold(raw: i64) -> usize {
    usize::try_from(raw).unwrap_or(0)
}

fn read_threshold(var: &str, default: usize) -> Result<usize, AppError> {
    match env::var(var) {
        Ok(value) => parse_threshold(var, &value),
        Err(_) => Ok(default),
    }
}

fn parse_threshold(var: &str, value: &str) -> Result<usize, AppError> {
    value
        .trim()
        .parse::<i64>()
        .map(clamp_threshold)
        .map_err(|_| AppError::ConfigError(format!("{} must be an integer, got '{}'", var, value)))
}
