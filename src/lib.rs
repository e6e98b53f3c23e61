pub mod analysis;
pub mod battles;
pub mod cards;
pub mod config;
pub mod display;
pub mod error;
