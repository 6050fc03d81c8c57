use super::{CatalogIndex, SongsData};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Could not read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn parse_catalog(path: &Path, content: &str) -> Result<SongsData, CatalogLoadError> {
    serde_json::from_str(content).map_err(|source| CatalogLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<SongsData, CatalogLoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(path, &content)
}

/// Reads and indexes the catalog at `path`.
///
/// A catalog that cannot be read or parsed results in an empty index, the
/// server keeps running without songs.
pub fn load_catalog<P: AsRef<Path>>(path: P, available_genre_threshold: usize) -> CatalogIndex {
    let path = path.as_ref();
    info!("Loading catalog from {}...", path.display());

    let data = match read_catalog(path) {
        Ok(data) => data,
        Err(err) => {
            error!("{}", err);
            error!("Starting with an empty catalog.");
            return CatalogIndex::empty();
        }
    };

    let result = CatalogIndex::build(data, available_genre_threshold);
    let problems = result.problems;
    let catalog = result.catalog;

    if problems.is_empty() {
        info!("Catalog checked, no issues found.");
    } else {
        info!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            info!("- {:?}", problem);
        }
        info!(
            "Catalog was built, but check the {} non-fatal issues above.",
            problems.len()
        );
    }

    info!(
        "Catalog has:\n{} songs\n{} artists\n{} genres ({} available)",
        catalog.count(),
        catalog.artists_count(),
        catalog.genres_count(),
        catalog.available_genres().len()
    );
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_AVAILABLE_GENRE_THRESHOLD;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_catalog(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_songs_and_artists() {
        let file = write_catalog(
            r##"{
                "Songs": [
                    {"SongId": 1, "Name": "One", "Artists": "A", "Color": "#000", "DarkColor": "#111", "AlbumGenres": ["Pop"]},
                    {"SongId": 2, "Name": "Two", "Artists": "B", "Color": "#000", "DarkColor": "#111", "Tags": ["Rock"]}
                ],
                "Artists": [{"ArtistId": 10, "Name": "A"}]
            }"##,
        );

        let catalog = load_catalog(file.path(), DEFAULT_AVAILABLE_GENRE_THRESHOLD);

        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.artists_count(), 1);
        assert_eq!(catalog.genres_count(), 2);
    }

    #[test]
    fn missing_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(matches!(
            read_catalog(&path),
            Err(CatalogLoadError::Io { .. })
        ));
        assert!(load_catalog(&path, DEFAULT_AVAILABLE_GENRE_THRESHOLD).is_empty());
    }

    #[test]
    fn malformed_file_yields_empty_catalog() {
        let file = write_catalog("{\"Songs\": [");

        assert!(matches!(
            read_catalog(file.path()),
            Err(CatalogLoadError::Parse { .. })
        ));
        let catalog = load_catalog(file.path(), DEFAULT_AVAILABLE_GENRE_THRESHOLD);
        assert!(catalog.is_empty());
        assert_eq!(catalog.genres_count(), 0);
    }
}
