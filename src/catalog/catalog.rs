use super::{Song, SongId, SongsData};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Minimum number of songs a genre needs to be offered as a game filter.
pub const DEFAULT_AVAILABLE_GENRE_THRESHOLD: usize = 30;

/// Non fatal issues found while building the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    DuplicateSongId(SongId),
    DuplicateArtistId(i64),
}

/// Genre and year criteria for narrowing down the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongFilter {
    pub genres: Option<Vec<String>>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl SongFilter {
    fn genres(&self) -> Option<&[String]> {
        self.genres.as_deref().filter(|g| !g.is_empty())
    }

    fn has_year_bounds(&self) -> bool {
        self.start_year.is_some() || self.end_year.is_some()
    }

    fn accepts_year(&self, year: i32) -> bool {
        self.start_year.map_or(true, |start| year >= start)
            && self.end_year.map_or(true, |end| year <= end)
    }
}

#[derive(Debug, Default)]
pub struct CatalogIndex {
    songs: Vec<Song>,
    ids: HashMap<SongId, usize>,
    genres: HashMap<String, Vec<usize>>,
    available_genres: Vec<String>,
    artists_count: usize,
}

pub struct CatalogBuildResult {
    pub catalog: CatalogIndex,
    pub problems: Vec<Problem>,
}

impl CatalogIndex {
    pub fn empty() -> CatalogIndex {
        CatalogIndex::default()
    }

    /// Indexes the songs of a parsed catalog document.
    ///
    /// Songs repeating an already seen id are dropped and reported.
    pub fn build(data: SongsData, available_genre_threshold: usize) -> CatalogBuildResult {
        let mut problems = vec![];
        let mut songs: Vec<Song> = Vec::with_capacity(data.songs.len());
        let mut ids = HashMap::with_capacity(data.songs.len());

        for song in data.songs {
            if ids.contains_key(&song.song_id) {
                problems.push(Problem::DuplicateSongId(song.song_id));
                continue;
            }
            ids.insert(song.song_id, songs.len());
            songs.push(song);
        }

        let mut artist_ids = HashSet::new();
        for artist in data.artists.iter().flatten() {
            if !artist_ids.insert(artist.artist_id) {
                problems.push(Problem::DuplicateArtistId(artist.artist_id));
            }
        }

        let mut genres: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, song) in songs.iter().enumerate() {
            let mut song_genres: Vec<&String> = song.genres().iter().collect();
            song_genres.sort();
            song_genres.dedup();
            for genre in song_genres {
                genres.entry(genre.clone()).or_default().push(position);
            }
        }

        let mut available_genres: Vec<String> = genres
            .iter()
            .filter(|(_, songs)| songs.len() >= available_genre_threshold)
            .map(|(genre, _)| genre.clone())
            .collect();
        available_genres.sort();

        CatalogBuildResult {
            catalog: CatalogIndex {
                songs,
                ids,
                genres,
                available_genres,
                artists_count: artist_ids.len(),
            },
            problems,
        }
    }

    pub fn count(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn artists_count(&self) -> usize {
        self.artists_count
    }

    pub fn genres_count(&self) -> usize {
        self.genres.len()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn page(&self, offset: usize, limit: usize) -> &[Song] {
        let start = offset.min(self.songs.len());
        let end = start.saturating_add(limit).min(self.songs.len());
        &self.songs[start..end]
    }

    pub fn by_id(&self, id: SongId) -> Option<&Song> {
        self.ids.get(&id).map(|position| &self.songs[*position])
    }

    pub fn year_of(song: &Song) -> Option<i32> {
        song.release_year()
    }

    /// Songs matching any of the filter genres and falling within its year
    /// bounds, in catalog order. Songs with no known year never pass a year
    /// bound.
    pub fn filter(&self, filter: &SongFilter) -> Vec<&Song> {
        let by_genre: Option<HashSet<usize>> = filter.genres().map(|genres| {
            genres
                .iter()
                .filter_map(|genre| self.genres.get(genre))
                .flatten()
                .copied()
                .collect()
        });

        self.songs
            .iter()
            .enumerate()
            .filter(|(position, _)| {
                by_genre
                    .as_ref()
                    .map_or(true, |positions| positions.contains(position))
            })
            .filter(|(_, song)| {
                if !filter.has_year_bounds() {
                    return true;
                }
                Self::year_of(song).is_some_and(|year| filter.accepts_year(year))
            })
            .map(|(_, song)| song)
            .collect()
    }

    /// Up to `count` distinct songs picked at random among the filtered ones,
    /// in random order.
    pub fn random<R: Rng + ?Sized>(
        &self,
        count: usize,
        filter: &SongFilter,
        rng: &mut R,
    ) -> Vec<&Song> {
        let mut filtered = self.filter(filter);
        if count >= filtered.len() {
            filtered.shuffle(rng);
            return filtered;
        }
        filtered.choose_multiple(rng, count).copied().collect()
    }

    pub fn available_genres(&self) -> &[String] {
        &self.available_genres
    }

    pub fn years_present(&self) -> BTreeSet<i32> {
        self.songs.iter().filter_map(Self::year_of).collect()
    }

    /// Song count per decade ("1990s"), oldest decade first.
    pub fn decade_counts(&self) -> Vec<(String, usize)> {
        let mut decades: BTreeMap<i32, usize> = BTreeMap::new();
        for year in self.songs.iter().filter_map(Self::year_of) {
            *decades.entry(year.div_euclid(10) * 10).or_default() += 1;
        }
        decades
            .into_iter()
            .map(|(decade, count)| (format!("{}s", decade), count))
            .collect()
    }

    /// Song count per genre, biggest genre first.
    pub fn genre_distribution(&self) -> Vec<(String, usize)> {
        let mut distribution: Vec<(String, usize)> = self
            .genres
            .iter()
            .map(|(genre, songs)| (genre.clone(), songs.len()))
            .collect();
        distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        distribution
    }
}
