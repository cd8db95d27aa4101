use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("requested {requested} items from a pool of {available}")]
    InvalidArgument { requested: usize, available: usize },
    #[error("API request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("clue ({category}, {clue}) is outside the current board")]
    IndexOutOfRange { category: usize, clue: usize },
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
