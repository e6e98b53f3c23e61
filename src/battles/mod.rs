pub mod loader;
pub mod models;

pub use loader::{load_battles, parse_battles};
pub use models::{BattleRecord, Outcome};
