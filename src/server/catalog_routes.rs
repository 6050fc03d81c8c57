use super::api_error::ApiError;
use super::state::{GuardedCatalog, GuardedPlaylists, ServerState};
use crate::catalog::{Song, SongFilter, SongId};
use crate::playlist::Playlist;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const MAX_RANDOM_SONGS: usize = 50;

fn default_limit() -> usize {
    10
}

#[derive(Deserialize, Debug)]
struct PageQuery {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

#[derive(Deserialize, Debug)]
struct RandomQuery {
    #[serde(default = "default_limit")]
    count: usize,
}

#[derive(Serialize, Debug)]
struct YearsStats {
    min_year: Option<i32>,
    max_year: Option<i32>,
    years: Vec<i32>,
}

async fn list_songs(
    State(catalog): State<GuardedCatalog>,
    Query(page): Query<PageQuery>,
) -> Json<Vec<Song>> {
    Json(catalog.page(page.offset, page.limit).to_vec())
}

async fn count_songs(State(catalog): State<GuardedCatalog>) -> Json<usize> {
    Json(catalog.count())
}

async fn get_available_genres(State(catalog): State<GuardedCatalog>) -> Json<Vec<String>> {
    Json(catalog.available_genres().to_vec())
}

async fn get_random_songs(
    State(catalog): State<GuardedCatalog>,
    Query(query): Query<RandomQuery>,
) -> Json<Vec<Song>> {
    let count = query.count.min(MAX_RANDOM_SONGS);
    let songs = catalog.random(count, &SongFilter::default(), &mut rand::rng());
    Json(songs.into_iter().cloned().collect())
}

async fn get_song(
    State(catalog): State<GuardedCatalog>,
    Path(song_id): Path<SongId>,
) -> Result<Json<Song>, ApiError> {
    catalog
        .by_id(song_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Song not found"))
}

async fn get_playlists(State(playlists): State<GuardedPlaylists>) -> Json<Vec<Playlist>> {
    Json(playlists.all().to_vec())
}

async fn get_playlist(
    State(playlists): State<GuardedPlaylists>,
    Path(playlist_id): Path<String>,
) -> Result<Json<Playlist>, ApiError> {
    playlists
        .get(&playlist_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Playlist not found"))
}

async fn get_years(State(catalog): State<GuardedCatalog>) -> Json<YearsStats> {
    let years: Vec<i32> = catalog.years_present().into_iter().collect();
    Json(YearsStats {
        min_year: years.first().copied(),
        max_year: years.last().copied(),
        years,
    })
}

/// Keeps the order of `counts` in the JSON object.
fn ordered_counts(counts: Vec<(String, usize)>) -> Json<Map<String, Value>> {
    Json(
        counts
            .into_iter()
            .map(|(key, count)| (key, Value::from(count)))
            .collect(),
    )
}

async fn get_decade_counts(State(catalog): State<GuardedCatalog>) -> Json<Map<String, Value>> {
    ordered_counts(catalog.decade_counts())
}

async fn get_genre_distribution(
    State(catalog): State<GuardedCatalog>,
) -> Json<Map<String, Value>> {
    ordered_counts(catalog.genre_distribution())
}

pub fn make_song_routes(state: ServerState) -> Router {
    Router::new()
        .route("/api/songs", get(list_songs))
        .route("/api/songs/count", get(count_songs))
        .route("/api/songs/genres", get(get_available_genres))
        .route("/api/songs/random", get(get_random_songs))
        .route("/api/songs/{song_id}", get(get_song))
        .with_state(state)
}

pub fn make_playlist_routes(state: ServerState) -> Router {
    Router::new()
        .route("/api/playlists", get(get_playlists))
        .route("/api/playlists/{playlist_id}", get(get_playlist))
        .with_state(state)
}

pub fn make_stats_routes(state: ServerState) -> Router {
    Router::new()
        .route("/years", get(get_years))
        .route("/decade-counts", get(get_decade_counts))
        .route("/genre-distribution", get(get_genre_distribution))
        .with_state(state)
}
