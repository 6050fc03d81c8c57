use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all server metrics
const PREFIX: &str = "music_guesser";

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Game Metrics
    pub static ref GAMES_CREATED_TOTAL: IntCounter = IntCounter::new(
        format!("{PREFIX}_games_created_total"),
        "Total number of game sessions created"
    ).expect("Failed to create games_created_total metric");

    pub static ref ANSWERS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(format!("{PREFIX}_answers_total"), "Accepted answers by outcome"),
        &["outcome"]
    ).expect("Failed to create answers_total metric");

    pub static ref ACTIVE_SESSIONS: Gauge = Gauge::new(
        format!("{PREFIX}_active_sessions"),
        "Number of game sessions held in memory"
    ).expect("Failed to create active_sessions metric");

    pub static ref SWEPT_SESSIONS_TOTAL: IntCounter = IntCounter::new(
        format!("{PREFIX}_swept_sessions_total"),
        "Total number of stale sessions removed"
    ).expect("Failed to create swept_sessions_total metric");

    // Catalog Metrics
    pub static ref CATALOG_SONGS_TOTAL: Gauge = Gauge::new(
        format!("{PREFIX}_catalog_songs_total"),
        "Total songs in catalog"
    ).expect("Failed to create catalog_songs_total metric");

    // Preview Metrics
    pub static ref PREVIEW_LOOKUPS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(format!("{PREFIX}_preview_lookups_total"), "Preview URL lookups by outcome"),
        &["outcome"]
    ).expect("Failed to create preview_lookups_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(GAMES_CREATED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(ANSWERS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(ACTIVE_SESSIONS.clone()));
    let _ = REGISTRY.register(Box::new(SWEPT_SESSIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_SONGS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PREVIEW_LOOKUPS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

pub fn init_catalog_metrics(num_songs: usize) {
    CATALOG_SONGS_TOTAL.set(num_songs as f64);
    tracing::info!("Catalog metrics initialized: {} songs", num_songs);
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

pub fn record_game_created() {
    GAMES_CREATED_TOTAL.inc();
}

/// Record an accepted answer, `outcome` is one of correct/incorrect/timeout
pub fn record_answer(outcome: &str) {
    ANSWERS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn set_active_sessions(count: usize) {
    ACTIVE_SESSIONS.set(count as f64);
}

pub fn record_swept_sessions(count: usize) {
    SWEPT_SESSIONS_TOTAL.inc_by(count as u64);
}

/// Record a preview lookup, `outcome` is one of found/unavailable/error
pub fn record_preview_lookup(outcome: &str) {
    PREVIEW_LOOKUPS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Routes served without path parameters, reported as-is.
const STATIC_ROUTES: &[&str] = &[
    "/",
    "/health",
    "/api/game/create",
    "/api/game/answer",
    "/api/songs",
    "/api/songs/count",
    "/api/songs/genres",
    "/api/songs/random",
    "/api/playlists",
    "/api/stats/years",
    "/api/stats/decade-counts",
    "/api/stats/genre-distribution",
];

/// Label shared by every path that matches no known route.
pub const UNMATCHED_ENDPOINT: &str = "/unmatched";

/// Collapses path parameters so that metric labels stay bounded.
pub fn categorize_endpoint(path: &str) -> String {
    if STATIC_ROUTES.contains(&path) {
        return path.to_string();
    }

    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        ["", "api", "game", action @ ("start" | "state" | "summary"), id] if !id.is_empty() => {
            format!("/api/game/{}/{{session_id}}", action)
        }
        ["", "api", "preview", kind @ ("audio" | "cover"), id] if id.parse::<i64>().is_ok() => {
            format!("/api/preview/{}/{{song_id}}", kind)
        }
        ["", "api", "playlists", id] if !id.is_empty() => {
            "/api/playlists/{playlist_id}".to_string()
        }
        ["", "api", "songs", id] if id.parse::<i64>().is_ok() => {
            "/api/songs/{song_id}".to_string()
        }
        ["", "static", ..] => "/static".to_string(),
        _ => UNMATCHED_ENDPOINT.to_string(),
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = vec![];

    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
