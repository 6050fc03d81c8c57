use anyhow::{Context, Result};
use std::time::Duration;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use super::catalog_routes::{make_playlist_routes, make_song_routes, make_stats_routes};
use super::game_routes::make_game_routes;
use super::metrics::metrics_handler;
use super::preview_routes::make_preview_routes;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub message: String,
    pub version: String,
    pub uptime: String,
    pub songs: usize,
    pub active_sessions: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        message: "Music Guesser API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: format_uptime(state.start_time.elapsed()),
        songs: state.game_service.catalog().count(),
        active_sessions: state.game_service.active_sessions(),
    };
    Json(stats)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "detail": "The requested resource was not found",
            "path": uri.to_string(),
        })),
    )
}

pub fn make_app(config: ServerConfig, game_service: GuardedGameService) -> Router {
    let state = ServerState::new(config.clone(), game_service);

    let home_routes: Router = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .with_state(state.clone());

    let mut app: Router = home_routes
        .nest("/api/game", make_game_routes(state.clone()))
        .nest("/api/preview", make_preview_routes(state.clone()))
        .nest("/api/stats", make_stats_routes(state.clone()))
        .merge(make_song_routes(state.clone()))
        .merge(make_playlist_routes(state.clone()));

    if let Some(static_dir_path) = config.static_dir_path {
        app = app.nest_service("/static", ServeDir::new(static_dir_path));
    }

    app.fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn_with_state(state, log_requests))
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(config: ServerConfig, game_service: GuardedGameService) -> Result<()> {
    let metrics_listener = tokio::net::TcpListener::bind((config.host.as_str(), config.metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", config.metrics_port))?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            tracing::error!("Metrics server stopped: {}", err);
        }
    });

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    let app = make_app(config, game_service);
    Ok(axum::serve(listener, app).await?)
}
