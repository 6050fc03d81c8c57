//! Music Guesser Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod config;
pub mod game;
pub mod playlist;
pub mod preview;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, CatalogIndex, Song, SongsData};
pub use game::{GameRules, GameService};
pub use playlist::PlaylistRegistry;
pub use preview::{DeezerPreviewClient, NoOpPreviewLookup, PreviewLookup};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
