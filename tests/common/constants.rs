//! Shared constants for end-to-end tests
//!
//! When the test catalog changes, update only this file.

// ============================================================================
// Test Catalog
// ============================================================================

/// Number of songs written to the test catalog
pub const CATALOG_SONGS_COUNT: usize = 12;

/// Songs a genre needs to be offered for filtering
pub const TEST_GENRE_THRESHOLD: usize = 3;

/// "Pop Hit 1", a Pop song from 2011 with a preview
pub const POP_SONG_ID: i64 = 1;

/// "Rock Anthem 7", a Rock song from 1975 with a preview
pub const ROCK_SONG_ID: i64 = 7;

/// "Jazz Standard 12", a Jazz song without preview nor cover
pub const NO_PREVIEW_SONG_ID: i64 = 12;

/// Deezer ids are song ids shifted by this offset
pub const DEEZER_ID_OFFSET: i64 = 1000;

/// Song id not present in the catalog
pub const MISSING_SONG_ID: i64 = 9999;

/// Host of the fake preview URLs
pub const PREVIEW_URL_PREFIX: &str = "https://previews.test/";

/// Time limit of every question (seconds)
pub const QUESTION_TIME_LIMIT_SEC: u32 = 15;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
