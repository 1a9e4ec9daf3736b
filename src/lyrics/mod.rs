//! Timed-lyrics engine.
//!
//! Parses `.lrc` text into a [`Timeline`] and resolves a playback position to
//! the active line plus context lines.

/// Line-by-line `.lrc` parsing
pub mod parser;
/// Playback position to active line resolution
pub mod resolver;
/// Lyrics file lookup and caching
pub mod store;
/// Parsed lyric lines
pub mod timeline;

pub use parser::{parse_line, parse_timeline, parse_timeline_with_report, ParseReport, SkipReason, SkippedLine};
pub use resolver::{active_index, resolve, resolve_with_policy, PlaybackQuery, ResolvedContext, ScanPolicy};
pub use store::{LoadOutcome, LyricsStore};
pub use timeline::{LyricLine, Timeline};
