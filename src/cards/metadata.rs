use crate::error::AppError;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const BUILTIN_TABLE: &str = include_str!("../../data/card_metadata.json");

/// Static attributes of a single card. Unknown cards resolve to `CardMeta::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardMeta {
    pub elixir: Option<f64>,
    pub is_bait_piece: bool,
    pub is_bridge_spam_piece: bool,
    pub is_big_tank: bool,
}

/// One row of the metadata table as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct CardMetaEntry {
    pub name: String,
    #[serde(default)]
    pub elixir: Option<f64>,
    #[serde(default)]
    pub is_bait_piece: bool,
    #[serde(default)]
    pub is_bridge_spam_piece: bool,
    #[serde(default)]
    pub is_big_tank: bool,
}

impl CardMetaEntry {
    pub fn new(name: &str, elixir: Option<f64>) -> Self {
        CardMetaEntry {
            name: name.to_string(),
            elixir,
            is_bait_piece: false,
            is_bridge_spam_piece: false,
            is_big_tank: false,
        }
    }

    pub fn bait(mut self) -> Self {
        self.is_bait_piece = true;
        self
    }

    pub fn bridge_spam(mut self) -> Self {
        self.is_bridge_spam_piece = true;
        self
    }

    pub fn big_tank(mut self) -> Self {
        self.is_big_tank = true;
        self
    }
}

/// Read-only card lookup table, built once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct CardMetadataStore {
    by_name: HashMap<String, CardMeta>,
}

impl CardMetadataStore {
    pub fn from_entries<I>(entries: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = CardMetaEntry>,
    {
        let mut by_name = HashMap::new();

        for entry in entries {
            if entry.name.trim().is_empty() {
                return Err(AppError::InvalidMetadata(
                    "card entry with an empty name".to_string(),
                ));
            }
            if let Some(elixir) = entry.elixir {
                if !elixir.is_finite() || elixir < 0.0 {
                    return Err(AppError::InvalidMetadata(format!(
                        "{} has invalid elixir {}",
                        entry.name, elixir
                    )));
                }
            }

            let meta = CardMeta {
                elixir: entry.elixir,
                is_bait_piece: entry.is_bait_piece,
                is_bridge_spam_piece: entry.is_bridge_spam_piece,
                is_big_tank: entry.is_big_tank,
            };
            if by_name.insert(entry.name.clone(), meta).is_some() {
                warn!(card = %entry.name, "duplicate card metadata entry, keeping the last one");
            }
        }

        Ok(CardMetadataStore { by_name })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let entries: Vec<CardMetaEntry> = serde_json::from_str(raw).map_err(|e| {
            AppError::JsonError(format!("Failed to parse card metadata: {}", e))
        })?;
        Self::from_entries(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let store = Self::from_json_str(&content)?;
        info!(path = %path.display(), cards = store.len(), "loaded card metadata");
        Ok(store)
    }

    /// The table shipped with the crate, parsed on first use.
    pub fn builtin() -> Result<&'static CardMetadataStore, AppError> {
        static BUILTIN: OnceCell<CardMetadataStore> = OnceCell::new();
        BUILTIN.get_or_try_init(|| Self::from_json_str(BUILTIN_TABLE))
    }

    /// Total: unknown names yield an empty record.
    pub fn lookup(&self, name: &str) -> CardMeta {
        self.by_name.get(name).copied().unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
