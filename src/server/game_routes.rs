use super::api_error::ApiError;
use super::state::{GuardedGameService, ServerState};
use crate::game::{
    AnswerRequest, AnswerResponse, GameResponse, GameSession, GameSettings, GameSummary,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

async fn create_game(
    State(game_service): State<GuardedGameService>,
    Json(settings): Json<GameSettings>,
) -> Result<Json<GameSession>, ApiError> {
    Ok(Json(game_service.create_session(&settings).await?))
}

async fn start_game(
    State(state): State<ServerState>,
    Path(session_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let game_service = state.game_service.clone();
    game_service.start(&session_id)?;

    let sweeping_service = game_service.clone();
    let max_age_sec = state.config.session_max_age_sec;
    tokio::spawn(async move {
        let swept = sweeping_service.sweep(max_age_sec);
        debug!("Post start sweep removed {} sessions", swept);
    });

    Ok(Json(game_service.current_state(&session_id)?))
}

async fn get_game_state(
    State(game_service): State<GuardedGameService>,
    Path(session_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    Ok(Json(game_service.current_state(&session_id)?))
}

async fn answer_question(
    State(game_service): State<GuardedGameService>,
    Json(answer): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let response = game_service.answer(
        &answer.session_id,
        answer.question_index,
        answer.selected_option_index,
    )?;
    Ok(Json(response))
}

async fn get_game_summary(
    State(game_service): State<GuardedGameService>,
    Path(session_id): Path<String>,
) -> Result<Json<GameSummary>, ApiError> {
    Ok(Json(game_service.summary(&session_id)?))
}

pub fn make_game_routes(state: ServerState) -> Router {
    Router::new()
        .route("/create", post(create_game))
        .route("/start/{session_id}", post(start_game))
        .route("/state/{session_id}", get(get_game_state))
        .route("/answer", post(answer_question))
        .route("/summary/{session_id}", get(get_game_summary))
        .with_state(state)
}
