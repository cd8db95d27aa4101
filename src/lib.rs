// Library interface for trivia-board
// This allows integration tests to access internal modules

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod sampler;
pub mod tui;

// Re-export commonly used items for easier testing
pub use board::{Board, Category, Clue, Showing};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use fetcher::{Fetcher, category_from_detail, ids_from_summaries};
pub use sampler::{sample, sample_with};
