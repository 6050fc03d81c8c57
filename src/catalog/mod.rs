mod catalog;
mod load;
mod song;

pub use catalog::{
    CatalogBuildResult, CatalogIndex, Problem as LoadCatalogProblem, SongFilter,
    DEFAULT_AVAILABLE_GENRE_THRESHOLD,
};
pub use load::{load_catalog, parse_catalog, read_catalog, CatalogLoadError};
pub use song::{Artist, Contributor, Song, SongId, SongsData};
