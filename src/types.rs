//! Shared types passed between the playback client, the lyrics store and the
//! HTTP layer.

use serde::Serialize;
use std::fmt;

use crate::constants::lyrics::FILE_EXTENSION;

/// Identifies a track for lyrics lookup: its title and primary artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey {
    /// Track title as reported by the streaming provider.
    pub title: String,
    /// Primary artist name.
    pub artist: String,
}

impl TrackKey {
    /// Create a new key.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self { title: title.into(), artist: artist.into() }
    }

    /// File name of the timed-lyrics file for this track,
    /// e.g. `Song - Artist.lrc`. Path separators become `_` so the name
    /// always stays inside the lyrics directory.
    pub fn file_name(&self) -> String {
        let name = format!("{} - {}.{FILE_EXTENSION}", self.title, self.artist);
        name.replace(['/', '\\'], "_")
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

/// What the streaming account is currently playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    /// Track title.
    pub title: String,
    /// Primary artist name.
    pub artist: String,
    /// Album name.
    pub album: String,
    /// Largest album cover URL, if any.
    pub album_art: Option<String>,
    /// Playback position in milliseconds, clamped to be non-negative.
    pub progress_ms: u64,
    /// Whether playback is running (as opposed to paused).
    pub is_playing: bool,
}

impl NowPlaying {
    /// Key used to locate this track's lyrics.
    pub fn track_key(&self) -> TrackKey {
        TrackKey::new(self.title.clone(), self.artist.clone())
    }
}
