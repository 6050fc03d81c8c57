//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per music-guesser endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Response {
        let mut request = self.client.post(format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.expect("POST request failed")
    }

    // ========================================================================
    // Server Endpoints
    // ========================================================================

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    /// GET /health
    pub async fn get_health(&self) -> Response {
        self.get("/health").await
    }

    // ========================================================================
    // Game Endpoints
    // ========================================================================

    /// POST /api/game/create
    pub async fn create_game(&self, settings: Value) -> Response {
        self.post("/api/game/create", Some(settings)).await
    }

    /// POST /api/game/start/{session_id}
    pub async fn start_game(&self, session_id: &str) -> Response {
        self.post(&format!("/api/game/start/{}", session_id), None)
            .await
    }

    /// GET /api/game/state/{session_id}
    pub async fn get_game_state(&self, session_id: &str) -> Response {
        self.get(&format!("/api/game/state/{}", session_id)).await
    }

    /// POST /api/game/answer
    pub async fn answer(
        &self,
        session_id: &str,
        question_index: i64,
        selected_option_index: i64,
    ) -> Response {
        self.post(
            "/api/game/answer",
            Some(json!({
                "session_id": session_id,
                "question_index": question_index,
                "selected_option_index": selected_option_index,
            })),
        )
        .await
    }

    /// GET /api/game/summary/{session_id}
    pub async fn get_game_summary(&self, session_id: &str) -> Response {
        self.get(&format!("/api/game/summary/{}", session_id)).await
    }

    /// Creates and starts a game, returning the created session.
    pub async fn create_started_game(&self, settings: Value) -> Value {
        let response = self.create_game(settings).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let session: Value = response.json().await.expect("Invalid session body");

        let session_id = session["session_id"].as_str().expect("Missing session id");
        let response = self.start_game(session_id).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        session
    }

    // ========================================================================
    // Catalog Endpoints
    // ========================================================================

    /// GET /api/songs?limit=..&offset=..
    pub async fn get_songs(&self, limit: usize, offset: usize) -> Response {
        self.get(&format!("/api/songs?limit={}&offset={}", limit, offset))
            .await
    }

    /// GET /api/songs/count
    pub async fn get_songs_count(&self) -> Response {
        self.get("/api/songs/count").await
    }

    /// GET /api/songs/genres
    pub async fn get_genres(&self) -> Response {
        self.get("/api/songs/genres").await
    }

    /// GET /api/songs/random?count=..
    pub async fn get_random_songs(&self, count: usize) -> Response {
        self.get(&format!("/api/songs/random?count={}", count)).await
    }

    /// GET /api/songs/{song_id}
    pub async fn get_song(&self, song_id: i64) -> Response {
        self.get(&format!("/api/songs/{}", song_id)).await
    }

    /// GET /api/playlists
    pub async fn get_playlists(&self) -> Response {
        self.get("/api/playlists").await
    }

    /// GET /api/playlists/{playlist_id}
    pub async fn get_playlist(&self, playlist_id: &str) -> Response {
        self.get(&format!("/api/playlists/{}", playlist_id)).await
    }

    /// GET /api/stats/{stat}
    pub async fn get_stats(&self, stat: &str) -> Response {
        self.get(&format!("/api/stats/{}", stat)).await
    }

    // ========================================================================
    // Preview Endpoints
    // ========================================================================

    /// GET /api/preview/audio/{song_id}
    pub async fn get_audio_preview(&self, song_id: i64) -> Response {
        self.get(&format!("/api/preview/audio/{}", song_id)).await
    }

    /// GET /api/preview/cover/{song_id}
    pub async fn get_cover(&self, song_id: i64, blur_level: Option<u32>) -> Response {
        match blur_level {
            Some(level) => {
                self.get(&format!("/api/preview/cover/{}?blur_level={}", song_id, level))
                    .await
            }
            None => self.get(&format!("/api/preview/cover/{}", song_id)).await,
        }
    }
}
