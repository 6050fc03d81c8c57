mod choices;
mod error;
mod models;
mod scoring;
mod service;
mod session_store;

pub use choices::{select_choices, Choices};
pub use error::GameError;
pub use models::{
    AnswerRequest, AnswerResponse, GameOption, GameQuestion, GameResponse, GameSession,
    GameSettings, GameSummary, TIMEOUT_OPTION_INDEX,
};
pub use service::{GameRules, GameService};
pub use session_store::SessionStore;
