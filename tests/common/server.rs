//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own catalog and sessions.

use super::constants::*;
use super::fixtures::create_test_songs;
use async_trait::async_trait;
use music_guesser_server::catalog::{load_catalog, Song};
use music_guesser_server::game::{GameRules, GameService};
use music_guesser_server::playlist::PlaylistRegistry;
use music_guesser_server::preview::PreviewLookup;
use music_guesser_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Fake preview provider, knows a preview for every song with a Deezer id
struct FakePreviewLookup;

#[async_trait]
impl PreviewLookup for FakePreviewLookup {
    async fn preview_url(&self, song: &Song) -> Option<String> {
        song.preview_id()
            .map(|id| format!("{}{}.mp3", PREVIEW_URL_PREFIX, id))
    }
}

/// Test server instance with an isolated catalog
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Game service for direct session access in tests
    pub game_service: Arc<GameService>,

    // Private fields - keep resources alive until drop
    _temp_songs_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// This function:
    /// 1. Writes a temporary songs catalog
    /// 2. Loads it the way the binary does
    /// 3. Binds to a random port (127.0.0.1:0)
    /// 4. Spawns the server in a background task
    /// 5. Waits for the server to be ready
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be written, the port cannot be bound or
    /// the server doesn't become ready within timeout.
    pub async fn spawn() -> Self {
        let (temp_songs_dir, songs_path) =
            create_test_songs().expect("Failed to create test songs");

        let catalog = Arc::new(load_catalog(&songs_path, TEST_GENRE_THRESHOLD));
        assert_eq!(catalog.count(), CATALOG_SONGS_COUNT);

        let game_service = Arc::new(GameService::new(
            catalog,
            Arc::new(PlaylistRegistry::default()),
            Arc::new(FakePreviewLookup),
            GameRules {
                time_limit_sec: QUESTION_TIME_LIMIT_SEC,
                ..GameRules::default()
            },
        ));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..ServerConfig::default()
        };
        let app = make_app(config, game_service.clone());

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            game_service,
            _temp_songs_dir: temp_songs_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
