//! Parsed timed-lyrics data.

use serde::Serialize;

/// A single lyric line and the playback offset at which it becomes active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricLine {
    /// Playback time in seconds at which this line becomes active.
    pub offset_seconds: f64,
    /// Lyric text; empty for instrumental gap markers.
    pub text: String,
}

impl LyricLine {
    /// Create a new line.
    pub fn new(offset_seconds: f64, text: impl Into<String>) -> Self {
        Self { offset_seconds, text: text.into() }
    }
}

/// Lyric lines in source-file order.
///
/// The order is whatever the file had; nothing is re-sorted. A timeline is
/// immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    lines: Vec<LyricLine>,
}

impl Timeline {
    /// Build a timeline from lines already in playback order.
    #[must_use]
    pub fn new(lines: Vec<LyricLine>) -> Self {
        Self { lines }
    }

    /// An empty timeline, used when no lyrics file exists.
    #[must_use]
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// All lines in order.
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Line at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the timeline has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether offsets never decrease from one line to the next.
    pub fn is_monotonic(&self) -> bool {
        self.lines
            .windows(2)
            .all(|pair| pair[0].offset_seconds <= pair[1].offset_seconds)
    }
}

impl FromIterator<LyricLine> for Timeline {
    fn from_iter<I: IntoIterator<Item = LyricLine>>(iter: I) -> Self {
        Self { lines: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn monotonic_allows_ties() {
        let timeline: Timeline = [
            LyricLine::new(1.0, "a"),
            LyricLine::new(1.0, "b"),
            LyricLine::new(2.5, "c"),
        ]
        .into_iter()
        .collect();
        assert!(timeline.is_monotonic());
        assert_eq!(timeline.len(), 3);
    }

    #[test]
    fn out_of_order_is_not_monotonic() {
        let timeline = Timeline::new(vec![LyricLine::new(5.0, "late"), LyricLine::new(1.0, "early")]);
        assert!(!timeline.is_monotonic());
    }

    #[test]
    fn empty_timeline() {
        let timeline = Timeline::empty();
        assert!(timeline.is_empty());
        assert!(timeline.is_monotonic());
        assert!(timeline.get(0).is_none());
    }
}
