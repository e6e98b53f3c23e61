use super::models::BattleRecord;
use crate::error::AppError;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn parse_battles(raw: &str) -> Result<Vec<BattleRecord>, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::JsonError(format!("Failed to parse battle list: {}", e)))
}

pub fn load_battles(path: &Path) -> Result<Vec<BattleRecord>, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let battles = parse_battles(&content)?;
    info!(path = %path.display(), battles = battles.len(), "loaded battles");
    Ok(battles)
}
