use crate::catalog::SongId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Option index a client sends when the question timer ran out.
pub const TIMEOUT_OPTION_INDEX: i64 = -1;

pub const DEFAULT_NUM_SONGS: usize = 5;
pub const DEFAULT_NUM_CHOICES: usize = 6;
pub const DEFAULT_TIME_LIMIT_SEC: u32 = 15;

fn default_num_songs() -> usize {
    DEFAULT_NUM_SONGS
}

fn default_num_choices() -> usize {
    DEFAULT_NUM_CHOICES
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameSettings {
    #[serde(default = "default_num_songs")]
    pub num_songs: usize,
    #[serde(default = "default_num_choices")]
    pub num_choices: usize,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub playlist_id: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            num_songs: DEFAULT_NUM_SONGS,
            num_choices: DEFAULT_NUM_CHOICES,
            genres: None,
            playlist_id: None,
            start_year: None,
            end_year: None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameOption {
    pub song_id: SongId,
    pub name: String,
    pub is_correct: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameQuestion {
    pub song_id: SongId,
    /// Empty when no preview could be found.
    pub preview_url: String,
    pub blurred_cover_url: String,
    pub clear_cover_url: String,
    pub correct_option_index: usize,
    pub options: Vec<GameOption>,
    /// Seconds
    pub time_limit: u32,
    pub song_color: String,
    pub artists: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameSession {
    pub session_id: String,
    pub questions: Vec<GameQuestion>,
    pub current_question: usize,
    pub score: u32,
    pub total_questions: usize,
    /// Unix timestamp in seconds, 0 until the game is started.
    pub started_at: f64,
}

impl GameSession {
    pub fn new(questions: Vec<GameQuestion>) -> GameSession {
        GameSession {
            session_id: Uuid::new_v4().to_string(),
            total_questions: questions.len(),
            questions,
            current_question: 0,
            score: 0,
            started_at: 0.0,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at > 0.0
    }

    pub fn is_complete(&self) -> bool {
        self.current_question >= self.total_questions
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameResponse {
    pub session_id: String,
    pub current_question: usize,
    pub total_questions: usize,
    pub question: GameQuestion,
    pub score: u32,
    pub time_remaining: Option<u32>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AnswerRequest {
    pub session_id: String,
    pub question_index: i64,
    pub selected_option_index: i64,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AnswerResponse {
    pub correct: bool,
    pub correct_option_index: usize,
    pub score: u32,
    pub next_question_index: Option<usize>,
    pub game_complete: bool,
    pub points_earned: u32,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameSummary {
    pub session_id: String,
    pub score: u32,
    pub total_questions: usize,
    /// Percentage, computed from the score and not from the number of
    /// correct answers.
    pub accuracy: f64,
}
