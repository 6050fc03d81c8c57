use super::api_error::ApiError;
use super::state::{GuardedCatalog, GuardedPreviewLookup, ServerState};
use crate::catalog::SongId;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
struct AudioPreview {
    preview_url: String,
}

fn default_blur_level() -> u32 {
    10
}

#[derive(Deserialize, Debug)]
struct CoverQuery {
    #[serde(default = "default_blur_level")]
    blur_level: u32,
}

/// Blurring happens client side, both URLs point to the original cover.
#[derive(Serialize, Debug)]
struct CoverPreview {
    blurred_url: Option<String>,
    original_url: Option<String>,
    blur_level: u32,
}

async fn get_audio_preview(
    State(catalog): State<GuardedCatalog>,
    State(preview): State<GuardedPreviewLookup>,
    Path(song_id): Path<SongId>,
) -> Result<Json<AudioPreview>, ApiError> {
    let song = catalog
        .by_id(song_id)
        .ok_or_else(|| ApiError::not_found("Song not found"))?;
    let preview_url = preview
        .preview_url(song)
        .await
        .ok_or_else(|| ApiError::not_found("Preview not available for this song"))?;
    Ok(Json(AudioPreview { preview_url }))
}

async fn get_cover(
    State(catalog): State<GuardedCatalog>,
    Path(song_id): Path<SongId>,
    Query(query): Query<CoverQuery>,
) -> Result<Json<CoverPreview>, ApiError> {
    let song = catalog
        .by_id(song_id)
        .ok_or_else(|| ApiError::not_found("Song not found"))?;
    let cover = song.any_cover().map(str::to_string);
    Ok(Json(CoverPreview {
        blurred_url: cover.clone(),
        original_url: cover,
        blur_level: query.blur_level,
    }))
}

pub fn make_preview_routes(state: ServerState) -> Router {
    Router::new()
        .route("/audio/{song_id}", get(get_audio_preview))
        .route("/cover/{song_id}", get(get_cover))
        .with_state(state)
}
