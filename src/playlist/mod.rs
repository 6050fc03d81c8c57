use crate::catalog::SongFilter;
use serde::{Deserialize, Serialize};

/// A named genre/year preset a game can be created from.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl Playlist {
    fn preset(
        id: &str,
        name: &str,
        description: &str,
        genres: Option<&[&str]>,
        start_year: Option<i32>,
        end_year: Option<i32>,
    ) -> Playlist {
        Playlist {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            genres: genres.map(|genres| genres.iter().map(|g| g.to_string()).collect()),
            start_year,
            end_year,
            cover_image: None,
        }
    }

    /// Overrides each criterion of `filter` the playlist defines, leaving
    /// the others as they are. An empty genre list does not override.
    pub fn apply_to(&self, filter: &SongFilter) -> SongFilter {
        let genres = self
            .genres
            .clone()
            .filter(|genres| !genres.is_empty())
            .or_else(|| filter.genres.clone());
        SongFilter {
            genres,
            start_year: self.start_year.or(filter.start_year),
            end_year: self.end_year.or(filter.end_year),
        }
    }
}

pub struct PlaylistRegistry {
    playlists: Vec<Playlist>,
}

impl PlaylistRegistry {
    pub fn new(playlists: Vec<Playlist>) -> PlaylistRegistry {
        PlaylistRegistry { playlists }
    }

    pub fn all(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }
}

impl Default for PlaylistRegistry {
    fn default() -> Self {
        PlaylistRegistry::new(vec![
            Playlist::preset(
                "pop-2010s",
                "Best Pop 2010s",
                "The most popular pop hits from the 2010s decade",
                Some(&["Pop"]),
                Some(2010),
                Some(2019),
            ),
            Playlist::preset(
                "old-school-rap",
                "Old School Rap",
                "Classic rap hits from the 80s and 90s",
                Some(&["Rap/Hip Hop"]),
                Some(1980),
                Some(1999),
            ),
            Playlist::preset(
                "latest-hits",
                "Latest Hits",
                "The newest songs from the past year",
                None,
                Some(2023),
                None,
            ),
            Playlist::preset(
                "rock-classics",
                "Rock Classics",
                "Timeless rock anthems from the 70s to 90s",
                Some(&["Rock"]),
                Some(1970),
                Some(1999),
            ),
            Playlist::preset(
                "2000s-nostalgia",
                "2000s Nostalgia",
                "Hits that defined the 2000s",
                None,
                Some(2000),
                Some(2009),
            ),
        ])
    }
}
