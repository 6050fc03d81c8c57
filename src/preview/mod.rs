//! Best-effort lookup of playable audio previews.

mod deezer;

pub use deezer::{DeezerPreviewClient, PreviewError, DEFAULT_DEEZER_BASE_URL};

use crate::catalog::Song;
use async_trait::async_trait;

#[async_trait]
pub trait PreviewLookup: Send + Sync {
    /// The preview URL of `song`, or None when it cannot be obtained.
    async fn preview_url(&self, song: &Song) -> Option<String>;
}

/// Lookup that never finds a preview, used when previews are disabled.
pub struct NoOpPreviewLookup;

#[async_trait]
impl PreviewLookup for NoOpPreviewLookup {
    async fn preview_url(&self, _song: &Song) -> Option<String> {
        None
    }
}
