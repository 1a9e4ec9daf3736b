//! Seams between the HTTP layer and the external collaborators.
//!
//! The web handlers only talk to these traits, so the Spotify and Genius
//! clients can be swapped for fakes in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::NowPlaying;

/// Source of the account's current playback state.
#[async_trait]
pub trait PlaybackSource: Send + Sync {
    /// Whether the source holds credentials to query playback.
    fn is_authorized(&self) -> bool;

    /// Current playback, or `None` when nothing is loaded on any device.
    async fn current_playback(&self) -> Result<Option<NowPlaying>>;

    /// Get the name of this source (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Plain (untimed) lyrics lookup.
#[async_trait]
pub trait LyricsSearch: Send + Sync {
    /// Full lyrics text for a track, or `None` when nothing matched.
    async fn search_lyrics(&self, title: &str, artist: &str) -> Result<Option<String>>;

    /// Get the name of this search backend (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Lyrics search that never finds anything; used when no Genius token is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLyricsSearch;

#[async_trait]
impl LyricsSearch for NoLyricsSearch {
    async fn search_lyrics(&self, _title: &str, _artist: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "NoLyricsSearch"
    }
}
