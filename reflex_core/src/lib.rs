pub mod config;
pub mod error;
pub mod gameplay;
pub mod input;
pub mod stats;
pub mod store;
pub mod time;

pub use reflex_schema::{Attempt, Difficulty, GameRecord, Milliseconds, Rank};
