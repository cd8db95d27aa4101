pub const NUM_CATEGORIES: usize = 6;
pub const NUM_CLUES_PER_CAT: usize = 5;
pub const CATEGORY_POOL_SIZE: usize = 100;
pub const DEFAULT_API_URL: &str = "https://rithm-jeopardy.herokuapp.com/api";

/// Board dimensions and API settings for one game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub num_categories: usize,
    pub clues_per_category: usize,
    /// How many candidate categories to request before sampling.
    pub category_pool_size: usize,
    pub api_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_categories: NUM_CATEGORIES,
            clues_per_category: NUM_CLUES_PER_CAT,
            category_pool_size: CATEGORY_POOL_SIZE,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
