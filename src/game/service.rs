use super::choices::select_choices;
use super::error::GameError;
use super::models::{
    AnswerResponse, GameOption, GameQuestion, GameResponse, GameSession, GameSettings,
    GameSummary, DEFAULT_TIME_LIMIT_SEC, TIMEOUT_OPTION_INDEX,
};
use super::scoring;
use super::session_store::SessionStore;
use crate::catalog::{CatalogIndex, Song, SongFilter};
use crate::playlist::PlaylistRegistry;
use crate::preview::PreviewLookup;
use crate::server::metrics;
use futures::future::join_all;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Limits applied to every game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    pub time_limit_sec: u32,
    pub max_questions: usize,
    pub max_choices: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules {
            time_limit_sec: DEFAULT_TIME_LIMIT_SEC,
            max_questions: 50,
            max_choices: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AnswerOutcome {
    Correct,
    Incorrect,
    TimedOut,
}

impl AnswerOutcome {
    fn label(&self) -> &'static str {
        match self {
            AnswerOutcome::Correct => "correct",
            AnswerOutcome::Incorrect => "incorrect",
            AnswerOutcome::TimedOut => "timeout",
        }
    }
}

/// Current Unix time in seconds, with sub-second precision.
pub(crate) fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

pub struct GameService {
    catalog: Arc<CatalogIndex>,
    playlists: Arc<PlaylistRegistry>,
    preview: Arc<dyn PreviewLookup>,
    sessions: SessionStore,
    rules: GameRules,
}

impl GameService {
    pub fn new(
        catalog: Arc<CatalogIndex>,
        playlists: Arc<PlaylistRegistry>,
        preview: Arc<dyn PreviewLookup>,
        rules: GameRules,
    ) -> GameService {
        GameService {
            catalog,
            playlists,
            preview,
            sessions: SessionStore::new(),
            rules,
        }
    }

    pub fn catalog(&self) -> &Arc<CatalogIndex> {
        &self.catalog
    }

    pub fn playlists(&self) -> &Arc<PlaylistRegistry> {
        &self.playlists
    }

    pub fn preview(&self) -> &Arc<dyn PreviewLookup> {
        &self.preview
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    fn validate(&self, settings: &GameSettings) -> Result<(), GameError> {
        if settings.num_songs == 0 || settings.num_songs > self.rules.max_questions {
            return Err(GameError::InvalidSettings(format!(
                "num_songs must be between 1 and {}",
                self.rules.max_questions
            )));
        }
        if settings.num_choices == 0 || settings.num_choices > self.rules.max_choices {
            return Err(GameError::InvalidSettings(format!(
                "num_choices must be between 1 and {}",
                self.rules.max_choices
            )));
        }
        Ok(())
    }

    /// The filter a game is played with: the explicit settings, overridden
    /// by the playlist when one is requested and known.
    fn resolve_filter(&self, settings: &GameSettings) -> SongFilter {
        let explicit = SongFilter {
            genres: settings.genres.clone(),
            start_year: settings.start_year,
            end_year: settings.end_year,
        };
        let Some(playlist_id) = settings.playlist_id.as_deref() else {
            return explicit;
        };
        match self.playlists.get(playlist_id) {
            Some(playlist) => playlist.apply_to(&explicit),
            None => {
                warn!("Playlist not found: {}", playlist_id);
                explicit
            }
        }
    }

    fn build_question<R: Rng + ?Sized>(
        &self,
        song: &Song,
        num_choices: usize,
        filter: &SongFilter,
        rng: &mut R,
    ) -> GameQuestion {
        let choices = select_choices(&self.catalog, song, num_choices, filter, rng);
        let options = choices
            .songs
            .iter()
            .enumerate()
            .map(|(index, choice)| GameOption {
                song_id: choice.song_id,
                name: choice.name.clone(),
                is_correct: index == choices.correct_index,
            })
            .collect();

        GameQuestion {
            song_id: song.song_id,
            preview_url: String::new(),
            blurred_cover_url: song.blurred_cover().unwrap_or_default().to_string(),
            clear_cover_url: song.clear_cover().unwrap_or_default().to_string(),
            correct_option_index: choices.correct_index,
            options,
            time_limit: self.rules.time_limit_sec,
            song_color: song.theme_color().to_string(),
            artists: song.artists.clone(),
        }
    }

    /// Picks the songs of a new game and builds a question for each of
    /// them. Preview URLs are left empty.
    pub fn generate_questions<R: Rng + ?Sized>(
        &self,
        settings: &GameSettings,
        rng: &mut R,
    ) -> Result<Vec<(&Song, GameQuestion)>, GameError> {
        self.validate(settings)?;
        if self.catalog.is_empty() {
            return Err(GameError::EmptyCatalog);
        }

        let filter = self.resolve_filter(settings);
        let mut songs = self.catalog.random(settings.num_songs, &filter, rng);
        if songs.is_empty() {
            info!("No songs match {:?}, picking from the whole catalog", filter);
            songs = self
                .catalog
                .random(settings.num_songs, &SongFilter::default(), rng);
        }

        Ok(songs
            .into_iter()
            .map(|song| {
                let question = self.build_question(song, settings.num_choices, &filter, rng);
                (song, question)
            })
            .collect())
    }

    /// Creates and stores a new, not yet started, game session.
    pub async fn create_session(&self, settings: &GameSettings) -> Result<GameSession, GameError> {
        let drafts = self.generate_questions(settings, &mut rand::rng())?;

        let previews = join_all(
            drafts
                .iter()
                .map(|(song, _)| self.preview.preview_url(song)),
        )
        .await;

        let questions = drafts
            .into_iter()
            .zip(previews)
            .map(|((_, mut question), preview)| {
                question.preview_url = preview.unwrap_or_default();
                question
            })
            .collect();

        let session = GameSession::new(questions);
        self.sessions.insert(session.clone());
        metrics::record_game_created();
        metrics::set_active_sessions(self.sessions.len());
        info!(
            "Created game {} with {} questions",
            session.session_id, session.total_questions
        );
        Ok(session)
    }

    /// Starts the clock of a session. Starting it again restarts the clock.
    pub fn start_at(&self, session_id: &str, now: f64) -> Result<GameSession, GameError> {
        self.sessions
            .with_session(session_id, |session| {
                session.started_at = now;
                session.clone()
            })
            .ok_or(GameError::NotFound)
    }

    pub fn start(&self, session_id: &str) -> Result<GameSession, GameError> {
        self.start_at(session_id, now_secs())
    }

    pub fn current_state_at(&self, session_id: &str, now: f64) -> Result<GameResponse, GameError> {
        self.sessions
            .with_session(session_id, |session| {
                let question = session
                    .questions
                    .get(session.current_question)
                    .ok_or(GameError::Exhausted)?;
                let time_remaining = scoring::time_remaining(
                    session.started_at,
                    session.current_question,
                    question.time_limit,
                    now,
                );
                Ok(GameResponse {
                    session_id: session.session_id.clone(),
                    current_question: session.current_question,
                    total_questions: session.total_questions,
                    question: question.clone(),
                    score: session.score,
                    time_remaining,
                })
            })
            .ok_or(GameError::NotFound)?
    }

    pub fn current_state(&self, session_id: &str) -> Result<GameResponse, GameError> {
        self.current_state_at(session_id, now_secs())
    }

    /// Answers the current question of a session and moves on to the next
    /// one. Answers to any other question, or with an out of range option,
    /// leave the session untouched.
    pub fn answer_at(
        &self,
        session_id: &str,
        question_index: i64,
        selected_option_index: i64,
        now: f64,
    ) -> Result<AnswerResponse, GameError> {
        let (response, outcome) = self
            .sessions
            .with_session(session_id, |session| {
                let index = usize::try_from(question_index)
                    .ok()
                    .filter(|index| *index < session.questions.len())
                    .ok_or_else(|| {
                        GameError::InvalidState(format!(
                            "question index {} out of range",
                            question_index
                        ))
                    })?;
                if index != session.current_question {
                    return Err(GameError::InvalidState(format!(
                        "question {} is not the current question",
                        question_index
                    )));
                }
                let question = &session.questions[index];

                let outcome = if selected_option_index == TIMEOUT_OPTION_INDEX {
                    AnswerOutcome::TimedOut
                } else {
                    let selected = usize::try_from(selected_option_index)
                        .ok()
                        .filter(|selected| *selected < question.options.len())
                        .ok_or_else(|| {
                            GameError::InvalidState(format!(
                                "option index {} out of range",
                                selected_option_index
                            ))
                        })?;
                    if selected == question.correct_option_index {
                        AnswerOutcome::Correct
                    } else {
                        AnswerOutcome::Incorrect
                    }
                };

                let correct = outcome == AnswerOutcome::Correct;
                let time_remaining =
                    scoring::time_remaining(session.started_at, index, question.time_limit, now)
                        .unwrap_or(0);
                let points = scoring::points_for(correct, time_remaining, question.time_limit);
                let correct_option_index = question.correct_option_index;

                session.score += points;
                session.current_question += 1;
                let game_complete = session.is_complete();

                let response = AnswerResponse {
                    correct,
                    correct_option_index,
                    score: session.score,
                    next_question_index: (!game_complete).then_some(session.current_question),
                    game_complete,
                    points_earned: points,
                };
                Ok((response, outcome))
            })
            .ok_or(GameError::NotFound)??;

        metrics::record_answer(outcome.label());
        debug!(
            "Session {} question {} answered: {}",
            session_id,
            question_index,
            outcome.label()
        );
        Ok(response)
    }

    pub fn answer(
        &self,
        session_id: &str,
        question_index: i64,
        selected_option_index: i64,
    ) -> Result<AnswerResponse, GameError> {
        self.answer_at(session_id, question_index, selected_option_index, now_secs())
    }

    pub fn summary(&self, session_id: &str) -> Result<GameSummary, GameError> {
        self.sessions
            .with_session(session_id, |session| GameSummary {
                session_id: session.session_id.clone(),
                score: session.score,
                total_questions: session.total_questions,
                accuracy: scoring::accuracy(session.score, session.total_questions),
            })
            .ok_or(GameError::NotFound)
    }

    /// Drops started sessions older than `max_age_sec`, returning how many
    /// were dropped.
    pub fn sweep_at(&self, now: f64, max_age_sec: u64) -> usize {
        let removed = self.sessions.remove_expired(now, max_age_sec as f64);
        if removed > 0 {
            info!("Swept {} stale game sessions", removed);
            metrics::record_swept_sessions(removed);
        }
        metrics::set_active_sessions(self.sessions.len());
        removed
    }

    pub fn sweep(&self, max_age_sec: u64) -> usize {
        self.sweep_at(now_secs(), max_age_sec)
    }
}
