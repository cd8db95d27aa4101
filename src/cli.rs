use crate::config::{CATEGORY_POOL_SIZE, DEFAULT_API_URL, GameConfig, NUM_CATEGORIES, NUM_CLUES_PER_CAT};
use clap::Parser;

/// Trivia Board CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of categories on the board
    #[arg(short = 'c', long = "categories", default_value_t = NUM_CATEGORIES)]
    pub categories: usize,

    /// Number of clues per category
    #[arg(short = 'n', long = "clues", default_value_t = NUM_CLUES_PER_CAT)]
    pub clues: usize,

    /// How many candidate categories to request before sampling
    #[arg(long = "pool-size", default_value_t = CATEGORY_POOL_SIZE)]
    pub pool_size: usize,

    /// Base URL of the trivia API
    #[arg(long = "api-url", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            num_categories: self.categories,
            clues_per_category: self.clues,
            category_pool_size: self.pool_size,
            api_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::parse_from(["trivia-board"]);
        assert_eq!(cli.game_config(), GameConfig::default());
    }

    #[test]
    fn test_parse_cli_custom_dimensions() {
        let cli = Cli::parse_from(["trivia-board", "--categories", "4", "--clues", "3"]);
        let config = cli.game_config();
        assert_eq!(config.num_categories, 4);
        assert_eq!(config.clues_per_category, 3);
        assert_eq!(config.category_pool_size, CATEGORY_POOL_SIZE);
    }

    #[test]
    fn test_parse_cli_custom_api() {
        let cli = Cli::parse_from([
            "trivia-board",
            "--api-url",
            "http://localhost:8080/api",
            "--pool-size",
            "50",
        ]);
        let config = cli.game_config();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.category_pool_size, 50);
    }
}
