use serde::{Deserialize, Serialize};

pub type SongId = i64;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Contributor {
    pub id: i64,
    pub name: String,
    pub role: String,
}

/// A song as found in the catalog document.
///
/// Field names follow the document's PascalCase keys. Everything past the
/// theme colors is optional and carried through to API consumers as is.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Song {
    pub song_id: SongId,
    pub name: String,
    #[serde(default)]
    pub artists: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub dark_color: String,
    #[serde(default)]
    pub song_meta_id: Option<serde_json::Value>,
    #[serde(default)]
    pub spotify_id: Option<String>,
    #[serde(default, rename = "DeezerID")]
    pub deezer_id: Option<i64>,
    #[serde(default, rename = "DeezerURL")]
    pub deezer_url: Option<String>,
    #[serde(default)]
    pub cover_small: Option<String>,
    #[serde(default)]
    pub cover_medium: Option<String>,
    #[serde(default)]
    pub cover_big: Option<String>,
    #[serde(default, rename = "CoverXL")]
    pub cover_xl: Option<String>,
    #[serde(default, rename = "ISRC")]
    pub isrc: Option<String>,
    #[serde(default, rename = "BPM")]
    pub bpm: Option<f64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub contributors: Option<Vec<Contributor>>,
    #[serde(default)]
    pub album_genres: Option<Vec<String>>,
}

const YEAR_TAG_PREFIX: &str = "year:";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Song {
    /// Genres used for indexing: album genres when present, tags otherwise.
    pub fn genres(&self) -> &[String] {
        match (&self.album_genres, &self.tags) {
            (Some(genres), _) if !genres.is_empty() => genres,
            (_, Some(tags)) => tags,
            _ => &[],
        }
    }

    /// Release year, read from the leading digits of the release date or,
    /// failing that, from the first parseable `year:YYYY` tag.
    pub fn release_year(&self) -> Option<i32> {
        let from_date = self
            .release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|prefix| prefix.parse::<i32>().ok());
        if from_date.is_some() {
            return from_date;
        }

        self.tags.as_ref().and_then(|tags| {
            tags.iter()
                .filter_map(|tag| tag.strip_prefix(YEAR_TAG_PREFIX))
                .find_map(|year| year.trim().parse::<i32>().ok())
        })
    }

    /// Dark color when set, regular color otherwise.
    pub fn theme_color(&self) -> &str {
        if self.dark_color.is_empty() {
            &self.color
        } else {
            &self.dark_color
        }
    }

    pub fn blurred_cover(&self) -> Option<&str> {
        non_empty(&self.cover_medium)
    }

    pub fn clear_cover(&self) -> Option<&str> {
        non_empty(&self.cover_big)
            .or_else(|| non_empty(&self.cover_xl))
            .or_else(|| non_empty(&self.cover_medium))
    }

    /// Any cover at all, preferring the medium size.
    pub fn any_cover(&self) -> Option<&str> {
        non_empty(&self.cover_medium)
            .or_else(|| non_empty(&self.cover_big))
            .or_else(|| non_empty(&self.cover_xl))
            .or_else(|| non_empty(&self.cover_small))
    }

    /// The external preview id, if it is usable.
    pub fn preview_id(&self) -> Option<i64> {
        self.deezer_id.filter(|id| *id != 0)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Artist {
    pub artist_id: i64,
    pub name: String,
    #[serde(default)]
    pub has_public_songs: Option<bool>,
    #[serde(default)]
    pub song_id: Option<SongId>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub dark_color: Option<String>,
    #[serde(default, rename = "DeezerID")]
    pub deezer_id: Option<i64>,
    #[serde(default, rename = "DeezerURL")]
    pub deezer_url: Option<String>,
    #[serde(default)]
    pub picture_small: Option<String>,
    #[serde(default)]
    pub picture_medium: Option<String>,
    #[serde(default)]
    pub picture_big: Option<String>,
    #[serde(default, rename = "PictureXL")]
    pub picture_xl: Option<String>,
    #[serde(default)]
    pub nb_albums: Option<i64>,
    #[serde(default)]
    pub nb_fans: Option<i64>,
    #[serde(default)]
    pub radio: Option<bool>,
    #[serde(default)]
    pub top_genres: Option<Vec<String>>,
    #[serde(default)]
    pub rank: Option<serde_json::Value>,
}

/// Top level shape of the catalog document.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct SongsData {
    #[serde(rename = "Songs")]
    pub songs: Vec<Song>,
    #[serde(rename = "Artists", default)]
    pub artists: Option<Vec<Artist>>,
}
