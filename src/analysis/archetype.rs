use crate::cards::CardMetadataStore;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use tracing::trace;

/// Nominal deck size. The average elixir is always divided by this.
pub const DECK_SIZE: f64 = 8.0;

const DEFAULT_AVG_ELIXIR: f64 = 3.0;
const DEFAULT_FOUR_CARD_CYCLE: f64 = 12.0;

const XBOW: &str = "X-Bow";
const MORTAR: &str = "Mortar";
const GOBLIN_BARREL: &str = "Goblin Barrel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Siege,
    Bait,
    Cycle,
    BridgeSpam,
    Beatdown,
    Hybrid,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::Siege,
        Archetype::Bait,
        Archetype::Cycle,
        Archetype::BridgeSpam,
        Archetype::Beatdown,
        Archetype::Hybrid,
    ];

    /// Archetypes a meta sample should contain. `Hybrid` is only ever a fallback.
    pub const META_REQUIRED: [Archetype; 5] = [
        Archetype::Siege,
        Archetype::Bait,
        Archetype::Cycle,
        Archetype::BridgeSpam,
        Archetype::Beatdown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Siege => "Siege",
            Archetype::Bait => "Bait",
            Archetype::Cycle => "Cycle",
            Archetype::BridgeSpam => "Bridge Spam",
            Archetype::Beatdown => "Beatdown",
            Archetype::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Archetype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Aggregate deck features the rules are evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckFeatures {
    pub avg_elixir: f64,
    pub four_card_cycle_cost: f64,
    pub has_xbow: bool,
    pub has_mortar: bool,
    pub bait_pieces: usize,
    pub has_bait_core: bool,
    pub bridge_spam_count: usize,
    pub big_tank_count: usize,
}

impl DeckFeatures {
    pub fn from_deck(deck: &[String], metadata: &CardMetadataStore) -> Self {
        let metas: Vec<_> = deck.iter().map(|card| metadata.lookup(card)).collect();
        let names: HashSet<&str> = deck.iter().map(String::as_str).collect();

        let mut known_elixirs: Vec<f64> = metas.iter().filter_map(|m| m.elixir).collect();

        let (avg_elixir, four_card_cycle_cost) = if known_elixirs.is_empty() {
            (DEFAULT_AVG_ELIXIR, DEFAULT_FOUR_CARD_CYCLE)
        } else {
            let total: f64 = known_elixirs.iter().sum();
            known_elixirs.sort_by(f64::total_cmp);
            let cheapest_four: f64 = known_elixirs.iter().take(4).sum();
            (total / DECK_SIZE, cheapest_four)
        };

        let bait_pieces = metas.iter().filter(|m| m.is_bait_piece).count();
        // Barrel itself counts toward bait_pieces when the table flags it.
        let has_bait_core = names.contains(GOBLIN_BARREL) && bait_pieces >= 1;

        DeckFeatures {
            avg_elixir,
            four_card_cycle_cost,
            has_xbow: names.contains(XBOW),
            has_mortar: names.contains(MORTAR),
            bait_pieces,
            has_bait_core,
            bridge_spam_count: metas.iter().filter(|m| m.is_bridge_spam_piece).count(),
            big_tank_count: metas.iter().filter(|m| m.is_big_tank).count(),
        }
    }
}

type Rule = (fn(&DeckFeatures) -> bool, Archetype);

/// Evaluated top to bottom; the first match wins.
const RULES: [Rule; 6] = [
    (has_xbow, Archetype::Siege),
    (has_mortar, Archetype::Siege),
    (has_bait_core, Archetype::Bait),
    (is_cheap_cycle, Archetype::Cycle),
    (has_bridge_spam_pair, Archetype::BridgeSpam),
    (is_heavy_tank_deck, Archetype::Beatdown),
];

fn has_xbow(f: &DeckFeatures) -> bool {
    f.has_xbow
}

fn has_mortar(f: &DeckFeatures) -> bool {
    f.has_mortar
}

fn has_bait_core(f: &DeckFeatures) -> bool {
    f.has_bait_core && f.bait_pieces >= 1
}

fn is_cheap_cycle(f: &DeckFeatures) -> bool {
    f.four_card_cycle_cost <= 9.0
}

fn has_bridge_spam_pair(f: &DeckFeatures) -> bool {
    f.bridge_spam_count >= 2
}

fn is_heavy_tank_deck(f: &DeckFeatures) -> bool {
    f.big_tank_count >= 1 && f.avg_elixir >= 3.5
}

/// Labels decks against an injected metadata table.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeClassifier<'a> {
    metadata: &'a CardMetadataStore,
}

impl<'a> ArchetypeClassifier<'a> {
    pub fn new(metadata: &'a CardMetadataStore) -> Self {
        ArchetypeClassifier { metadata }
    }

    pub fn features(&self, deck: &[String]) -> DeckFeatures {
        DeckFeatures::from_deck(deck, self.metadata)
    }

    pub fn classify(&self, deck: &[String]) -> Archetype {
        if deck.is_empty() {
            return Archetype::Hybrid;
        }

        let features = self.features(deck);
        let label = classify_features(&features);
        trace!(?features, %label, "classified deck");
        label
    }
}

pub fn classify_features(features: &DeckFeatures) -> Archetype {
    RULES
        .iter()
        .find(|(matches, _)| matches(features))
        .map(|&(_, label)| label)
        .unwrap_or(Archetype::Hybrid)
}
