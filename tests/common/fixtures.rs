//! Test catalog generation
//!
//! Writes a small songs document to a temporary directory.

use super::constants::*;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn song(id: i64, name: &str, genre: &str, year: i32, with_media: bool) -> Value {
    let mut song = json!({
        "SongId": id,
        "Name": name,
        "Artists": format!("Artist {}", id),
        "Color": "#112233",
        "DarkColor": "#000000",
        "ReleaseDate": format!("{}-06-01", year),
        "AlbumGenres": [genre],
    });
    if with_media {
        song["DeezerID"] = json!(DEEZER_ID_OFFSET + id);
        song["CoverMedium"] = json!(format!("https://covers.test/{}/medium.jpg", id));
        song["CoverBig"] = json!(format!("https://covers.test/{}/big.jpg", id));
    }
    song
}

/// Six Pop songs (2011-2016), four Rock songs (1975-1999) and two Jazz songs
/// (1960s), the last one without preview nor cover.
pub fn create_test_songs() -> anyhow::Result<(TempDir, PathBuf)> {
    let mut songs = vec![];
    for id in 1..=6 {
        songs.push(song(id, &format!("Pop Hit {}", id), "Pop", 2010 + id as i32, true));
    }
    for (id, year) in [(7, 1975), (8, 1985), (9, 1995), (10, 1999)] {
        songs.push(song(id, &format!("Rock Anthem {}", id), "Rock", year, true));
    }
    songs.push(song(11, "Jazz Standard 11", "Jazz", 1960, true));
    songs.push(song(12, "Jazz Standard 12", "Jazz", 1965, false));

    let document = json!({
        "Songs": songs,
        "Artists": [
            {"ArtistId": 1, "Name": "Artist 1"},
            {"ArtistId": 7, "Name": "Artist 7"},
        ],
    });

    let temp_dir = TempDir::new()?;
    let songs_path = temp_dir.path().join("songs.json");
    std::fs::write(&songs_path, serde_json::to_string_pretty(&document)?)?;
    Ok((temp_dir, songs_path))
}
