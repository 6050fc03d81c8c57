use super::PreviewLookup;
use crate::catalog::Song;
use crate::server::metrics;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_DEEZER_BASE_URL: &str = "https://api.deezer.com";

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Preview request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Preview service answered with status {0}")]
    Status(StatusCode),

    #[error("Preview service returned no preview")]
    MissingPreview,
}

#[derive(Debug, Deserialize)]
struct DeezerTrack {
    #[serde(default)]
    preview: Option<String>,
}

/// HTTP client for the Deezer track API.
pub struct DeezerPreviewClient {
    client: reqwest::Client,
    base_url: String,
}

impl DeezerPreviewClient {
    /// # Arguments
    /// * `base_url` - Base URL of the track API (e.g., "https://api.deezer.com")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub async fn fetch_preview(&self, deezer_id: i64) -> Result<String, PreviewError> {
        let url = format!("{}/track/{}", self.base_url, deezer_id);
        let response = self.client.get(&url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(PreviewError::Status(response.status()));
        }

        let track: DeezerTrack = response.json().await?;
        track
            .preview
            .filter(|preview| !preview.is_empty())
            .ok_or(PreviewError::MissingPreview)
    }
}

#[async_trait]
impl PreviewLookup for DeezerPreviewClient {
    async fn preview_url(&self, song: &Song) -> Option<String> {
        let Some(deezer_id) = song.preview_id() else {
            debug!("Song {} has no preview id", song.song_id);
            metrics::record_preview_lookup("unavailable");
            return None;
        };

        match self.fetch_preview(deezer_id).await {
            Ok(url) => {
                metrics::record_preview_lookup("found");
                Some(url)
            }
            Err(PreviewError::MissingPreview) => {
                debug!("No preview for song {} ({})", song.song_id, deezer_id);
                metrics::record_preview_lookup("unavailable");
                None
            }
            Err(err) => {
                warn!(
                    "Error fetching preview for song {} ({}): {}",
                    song.song_id, deezer_id, err
                );
                metrics::record_preview_lookup("error");
                None
            }
        }
    }
}
