use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Result of a battle from the player's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    #[default]
    Draw,
}

impl Outcome {
    /// Case-insensitive; anything that isn't a win or a loss counts as a draw.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "win" => Outcome::Win,
            "loss" => Outcome::Loss,
            _ => Outcome::Draw,
        }
    }

    /// The same battle seen from the other side of the table.
    pub fn invert(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Draw => "draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized ranked 1v1 battle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    #[serde(default, deserialize_with = "lenient_cards")]
    pub my_cards: Vec<String>,
    #[serde(default, deserialize_with = "lenient_cards")]
    pub opp_cards: Vec<String>,
    #[serde(default, deserialize_with = "lenient_outcome")]
    pub result: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_name: Option<String>,
}

impl BattleRecord {
    pub fn new<S: Into<String>>(
        my_cards: impl IntoIterator<Item = S>,
        opp_cards: impl IntoIterator<Item = S>,
        result: Outcome,
    ) -> Self {
        BattleRecord {
            my_cards: my_cards.into_iter().map(Into::into).collect(),
            opp_cards: opp_cards.into_iter().map(Into::into).collect(),
            result,
            battle_time: None,
            mode_name: None,
        }
    }
}

// Non-array values become an empty deck; non-string entries are skipped.
fn lenient_cards<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => {
            let total = items.len();
            let cards: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(card) => Some(card),
                    _ => None,
                })
                .collect();
            if cards.len() < total {
                warn!(skipped = total - cards.len(), "ignoring non-string card entries");
            }
            cards
        }
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            warn!(value = %other, "card list is not an array, treating as empty");
            Vec::new()
        }
    })
}

// Accepts any JSON value so a malformed result never fails the whole record.
fn lenient_outcome<'de, D>(deserializer: D) -> Result<Outcome, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let outcome = Outcome::parse(&s);
            if outcome == Outcome::Draw && !s.eq_ignore_ascii_case("draw") {
                warn!(result = %s, "unrecognized battle result, counting as draw");
            }
            outcome
        }
        None | Some(Value::Null) => {
            warn!("battle result is null, counting as draw");
            Outcome::Draw
        }
        Some(other) => {
            warn!(result = %other, "battle result is not a string, counting as draw");
            Outcome::Draw
        }
    })
}
