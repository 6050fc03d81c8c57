use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("Game session not found")]
    NotFound,

    #[error("Invalid answer: {0}")]
    InvalidState(String),

    #[error("Invalid game settings: {0}")]
    InvalidSettings(String),

    #[error("Game session has no questions left")]
    Exhausted,

    #[error("The catalog has no songs to play with")]
    EmptyCatalog,
}
