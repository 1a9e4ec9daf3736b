//! Maps a playback position onto a timeline.
//!
//! Resolution is a pure function of the timeline and the query: every poll
//! re-scans from the start, nothing is remembered between calls.

use std::str::FromStr;

use serde::Serialize;

use super::timeline::Timeline;

/// Milliseconds elapsed in the current track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackQuery {
    /// Playback position in milliseconds.
    pub position_ms: u64,
}

impl PlaybackQuery {
    /// Create a query for the given position.
    #[must_use]
    pub const fn new(position_ms: u64) -> Self {
        Self { position_ms }
    }

    /// Build a query from a signed position reported upstream, clamping
    /// negative values to zero.
    #[must_use]
    pub fn from_signed(position_ms: i64) -> Self {
        Self { position_ms: u64::try_from(position_ms).unwrap_or(0) }
    }

    /// Position in seconds.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn position_seconds(self) -> f64 {
        self.position_ms as f64 / 1000.0
    }
}

/// The active line plus its neighbours. Absent lines are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedContext {
    /// Two lines before the active one.
    pub previous2: String,
    /// The line right before the active one.
    pub previous1: String,
    /// The active line.
    pub current: String,
    /// The line right after the active one.
    pub next: String,
}

impl ResolvedContext {
    /// Whether no line is active.
    pub fn is_empty(&self) -> bool {
        self.previous2.is_empty()
            && self.previous1.is_empty()
            && self.current.is_empty()
            && self.next.is_empty()
    }
}

/// How the timeline is scanned for the active line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPolicy {
    /// Stop at the first line that starts after the position. On a timeline
    /// that is not chronological, lines past that point are never reached.
    #[default]
    StopAtFirstFuture,
    /// Visit every line and keep the last one that has started.
    FullScan,
}

impl FromStr for ScanPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stop-at-first-future" | "stop" => Ok(Self::StopAtFirstFuture),
            "full-scan" | "full" => Ok(Self::FullScan),
            _ => Err(()),
        }
    }
}

/// Resolve the active line using [`ScanPolicy::StopAtFirstFuture`].
pub fn resolve(timeline: &Timeline, query: PlaybackQuery) -> ResolvedContext {
    resolve_with_policy(timeline, query, ScanPolicy::StopAtFirstFuture)
}

/// Resolve the active line and its context under `policy`.
pub fn resolve_with_policy(
    timeline: &Timeline,
    query: PlaybackQuery,
    policy: ScanPolicy,
) -> ResolvedContext {
    let Some(i) = active_index(timeline, query, policy) else {
        return ResolvedContext::default();
    };

    let text_at = |idx: Option<usize>| {
        idx.and_then(|idx| timeline.get(idx))
            .map(|line| line.text.clone())
            .unwrap_or_default()
    };

    ResolvedContext {
        previous2: text_at(i.checked_sub(2)),
        previous1: text_at(i.checked_sub(1)),
        current: text_at(Some(i)),
        next: text_at(Some(i + 1)),
    }
}

/// Index of the active line, or `None` when the position precedes every
/// reachable line.
pub fn active_index(timeline: &Timeline, query: PlaybackQuery, policy: ScanPolicy) -> Option<usize> {
    let position = query.position_seconds();
    let mut found = None;

    for (idx, line) in timeline.lines().iter().enumerate() {
        if line.offset_seconds <= position {
            found = Some(idx);
        } else if policy == ScanPolicy::StopAtFirstFuture {
            break;
        }
    }

    found
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lyrics::timeline::LyricLine;

    fn abc() -> Timeline {
        Timeline::new(vec![
            LyricLine::new(1.0, "Line A"),
            LyricLine::new(5.5, "Line B"),
            LyricLine::new(10.0, "Line C"),
        ])
    }

    fn ctx(p2: &str, p1: &str, cur: &str, next: &str) -> ResolvedContext {
        ResolvedContext {
            previous2: p2.into(),
            previous1: p1.into(),
            current: cur.into(),
            next: next.into(),
        }
    }

    #[test]
    fn middle_line_has_one_previous_and_next() {
        let resolved = resolve(&abc(), PlaybackQuery::new(6000));
        assert_eq!(resolved, ctx("", "Line A", "Line B", "Line C"));
    }

    #[test]
    fn before_first_line_is_empty() {
        let resolved = resolve(&abc(), PlaybackQuery::new(500));
        assert!(resolved.is_empty());
    }

    #[test]
    fn past_the_end_keeps_last_line() {
        let resolved = resolve(&abc(), PlaybackQuery::new(999_999));
        assert_eq!(resolved, ctx("Line A", "Line B", "Line C", ""));
    }

    #[test]
    fn exact_offset_is_active() {
        let resolved = resolve(&abc(), PlaybackQuery::new(5500));
        assert_eq!(resolved.current, "Line B");
        let resolved = resolve(&abc(), PlaybackQuery::new(5499));
        assert_eq!(resolved.current, "Line A");
    }

    #[test]
    fn first_line_has_no_previous() {
        let resolved = resolve(&abc(), PlaybackQuery::new(1000));
        assert_eq!(resolved, ctx("", "", "Line A", "Line B"));
    }

    #[test]
    fn empty_timeline_resolves_to_nothing() {
        assert!(resolve(&Timeline::empty(), PlaybackQuery::new(12_345)).is_empty());
    }

    #[test]
    fn ties_resolve_to_last_in_file_order() {
        let timeline = Timeline::new(vec![
            LyricLine::new(1.0, "first"),
            LyricLine::new(1.0, "second"),
            LyricLine::new(3.0, "third"),
        ]);
        let resolved = resolve(&timeline, PlaybackQuery::new(1000));
        assert_eq!(resolved, ctx("", "first", "second", "third"));
    }

    #[test]
    fn stop_policy_never_reaches_lines_after_a_future_one() {
        let timeline = Timeline::new(vec![
            LyricLine::new(1.0, "a"),
            LyricLine::new(20.0, "jump"),
            LyricLine::new(2.0, "b"),
        ]);
        let query = PlaybackQuery::new(5000);

        assert_eq!(active_index(&timeline, query, ScanPolicy::StopAtFirstFuture), Some(0));
        assert_eq!(active_index(&timeline, query, ScanPolicy::FullScan), Some(2));

        let full = resolve_with_policy(&timeline, query, ScanPolicy::FullScan);
        assert_eq!(full, ctx("a", "jump", "b", ""));
    }

    #[test]
    fn policies_agree_on_monotonic_timelines() {
        let timeline = abc();
        for ms in [0, 999, 1000, 5600, 10_000, 50_000] {
            let query = PlaybackQuery::new(ms);
            assert_eq!(
                resolve_with_policy(&timeline, query, ScanPolicy::StopAtFirstFuture),
                resolve_with_policy(&timeline, query, ScanPolicy::FullScan),
            );
        }
    }

    #[test]
    fn negative_upstream_position_clamps_to_zero() {
        assert_eq!(PlaybackQuery::from_signed(-250), PlaybackQuery::new(0));
        assert_eq!(PlaybackQuery::from_signed(1500).position_ms, 1500);
    }

    #[test]
    fn scan_policy_parses_from_config_strings() {
        assert_eq!("full-scan".parse::<ScanPolicy>(), Ok(ScanPolicy::FullScan));
        assert_eq!("Stop-At-First-Future".parse::<ScanPolicy>(), Ok(ScanPolicy::StopAtFirstFuture));
        assert_eq!("sideways".parse::<ScanPolicy>(), Err(()));
    }

    #[test]
    fn context_serializes_with_four_keys() {
        let json = serde_json::to_value(ctx("a", "b", "c", "d")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"previous2": "a", "previous1": "b", "current": "c", "next": "d"})
        );
    }
}
