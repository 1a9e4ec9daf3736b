//! Locates and loads timed-lyrics files for a track.
//!
//! A missing or unreadable file is not an error: it produces an empty
//! timeline so the resolver reports "no lyric".

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;

use super::parser::parse_timeline_with_report;
use super::resolver::{resolve_with_policy, PlaybackQuery, ResolvedContext, ScanPolicy};
use super::timeline::Timeline;
use crate::error::{Error, Result};
use crate::types::TrackKey;

/// How a load request was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file exists for the track.
    Missing,
    /// The file exists but could not be read.
    Unreadable,
    /// The file was read and parsed.
    Parsed {
        /// Lines that became lyric entries.
        entries: usize,
        /// Lines that were skipped.
        skipped: usize,
    },
    /// The cached timeline was still current.
    Cached {
        /// Lines in the cached timeline.
        entries: usize,
    },
}

#[derive(Debug)]
struct CachedTimeline {
    modified: SystemTime,
    timeline: Arc<Timeline>,
}

/// Directory of `<title> - <artist>.lrc` files with an optional
/// modification-time checked cache.
#[derive(Debug)]
pub struct LyricsStore {
    dir: PathBuf,
    cache_enabled: bool,
    cache: RwLock<HashMap<TrackKey, CachedTimeline>>,
}

impl LyricsStore {
    /// Create a store backed by `dir`.
    pub fn new(dir: impl Into<PathBuf>, cache_enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            cache_enabled,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Directory the store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the lyrics file for `key`.
    pub fn path_for(&self, key: &TrackKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Timeline for `key`; empty when there is no usable file.
    pub fn load(&self, key: &TrackKey) -> Arc<Timeline> {
        self.load_with_report(key).0
    }

    /// Timeline for `key` together with how it was obtained.
    pub fn load_with_report(&self, key: &TrackKey) -> (Arc<Timeline>, LoadOutcome) {
        let path = self.path_for(key);

        let modified = match fs_err::metadata(&path) {
            Ok(meta) => meta.modified().ok(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Lyrics file not found: {}", path.display());
                self.cache.write().remove(key);
                return (Arc::new(Timeline::empty()), LoadOutcome::Missing);
            }
            Err(e) => {
                tracing::warn!("Cannot stat lyrics file: {e}");
                return (Arc::new(Timeline::empty()), LoadOutcome::Unreadable);
            }
        };

        if let Some(hit) = self.cached(key, modified) {
            let entries = hit.len();
            return (hit, LoadOutcome::Cached { entries });
        }

        let source = match read_source(&path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Cannot read lyrics file: {e}");
                self.cache.write().remove(key);
                return (Arc::new(Timeline::empty()), LoadOutcome::Unreadable);
            }
        };

        let (timeline, report) = parse_timeline_with_report(&source);
        if report.skipped_count() > 0 {
            tracing::debug!(
                "Skipped {} of {} lines in {}",
                report.skipped_count(),
                report.skipped_count() + timeline.len(),
                path.display()
            );
        }

        let outcome = LoadOutcome::Parsed {
            entries: timeline.len(),
            skipped: report.skipped_count(),
        };
        let timeline = Arc::new(timeline);

        if self.cache_enabled {
            if let Some(modified) = modified {
                self.cache.write().insert(
                    key.clone(),
                    CachedTimeline { modified, timeline: Arc::clone(&timeline) },
                );
            }
        }

        (timeline, outcome)
    }

    /// Load the timeline for `key` and resolve `query` against it.
    pub fn resolve_for(&self, key: &TrackKey, query: PlaybackQuery, policy: ScanPolicy) -> ResolvedContext {
        let timeline = self.load(key);
        resolve_with_policy(&timeline, query, policy)
    }

    /// Number of cached timelines.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    fn cached(&self, key: &TrackKey, modified: Option<SystemTime>) -> Option<Arc<Timeline>> {
        if !self.cache_enabled {
            return None;
        }
        let modified = modified?;
        let cache = self.cache.read();
        cache
            .get(key)
            .filter(|entry| entry.modified == modified)
            .map(|entry| Arc::clone(&entry.timeline))
    }
}

/// Read a lyrics file as UTF-8. Invalid byte sequences become U+FFFD so a
/// single badly encoded line only affects that line.
fn read_source(path: &Path) -> Result<String> {
    let bytes = fs_err::read(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn missing_directory_yields_empty_timeline() {
        let store = LyricsStore::new("/tmp/nonexistent_lyrics_dir_lyricsync_test", true);
        let (timeline, outcome) = store.load_with_report(&TrackKey::new("Song", "Artist"));
        assert!(timeline.is_empty());
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(store.cached_len(), 0);
    }

    #[test]
    fn path_for_joins_dir_and_file_name() {
        let store = LyricsStore::new("lyrics", false);
        assert_eq!(
            store.path_for(&TrackKey::new("Song", "Artist")),
            PathBuf::from("lyrics/Song - Artist.lrc")
        );
    }

    #[test]
    fn read_source_replaces_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.lrc");
        std::fs::write(&path, b"[ar:Beyonc\xE9]\n[00:01.00]A\n").unwrap();
        let source = read_source(&path).unwrap();
        assert_eq!(source, "[ar:Beyonc\u{FFFD}]\n[00:01.00]A\n");
    }

    #[test]
    fn read_source_reports_path() {
        let err = read_source(Path::new("/tmp/nonexistent_lyricsync_file.lrc")).unwrap_err();
        match err {
            Error::Io { path: Some(p), .. } => {
                assert!(p.ends_with("nonexistent_lyricsync_file.lrc"));
            }
            other => panic!("Expected Io error with path, got {other:?}"),
        }
    }
}
