pub mod archetype;
pub mod card_performance;
pub mod deck_performance;
pub mod deck_types;
pub mod report;
pub mod stats_tracker;

pub use archetype::{Archetype, ArchetypeClassifier, DeckFeatures};
pub use card_performance::{compute_card_performance, CardPerformance, CardStat};
pub use deck_performance::{compute_deck_performance, deck_signature, DeckPerformance, DeckStat};
pub use deck_types::{deck_type_counts, meta_coverage, summarize_deck_types, ArchetypeStat, MetaCoverage};
pub use report::{compute_summary, compute_user_analytics, AnalysisOptions, AnalyticsReport, DataHealth, Summary};
pub use stats_tracker::{Ranking, StatBucket, StatLine, StatsTracker};
