//! Timed-lyrics (`.lrc`) parser.
//!
//! Recognizes lines of the form `[MM:SS.ss]text`. Anything else is skipped
//! and recorded in a [`ParseReport`]; parsing never fails as a whole.

use std::fmt;

use super::timeline::{LyricLine, Timeline};

/// Why a source line did not become a lyric entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The line does not start with `[` or has no `]`.
    NoTimestamp,
    /// The bracketed text is not shaped like `MM:SS.ss`.
    MalformedTimestamp,
    /// The timestamp has the right shape but a component did not parse.
    InvalidNumber,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoTimestamp => "no leading timestamp",
            Self::MalformedTimestamp => "malformed timestamp",
            Self::InvalidNumber => "invalid timestamp number",
        };
        f.write_str(text)
    }
}

/// A skipped source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Record of what the parser left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Skipped lines in source order.
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Number of skipped lines.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of skipped lines with the given reason.
    pub fn count(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}

/// Parse timed-lyrics text into a timeline, discarding the skip report.
pub fn parse_timeline(source: &str) -> Timeline {
    parse_timeline_with_report(source).0
}

/// Parse timed-lyrics text into a timeline and a report of skipped lines.
///
/// Lines keep their file order.
pub fn parse_timeline_with_report(source: &str) -> (Timeline, ParseReport) {
    let mut lines = Vec::new();
    let mut report = ParseReport::default();

    for (idx, raw) in source.lines().enumerate() {
        match parse_line(raw) {
            Ok(line) => lines.push(line),
            Err(reason) => {
                tracing::debug!(line = idx + 1, %reason, "Skipping lyrics line");
                report.skipped.push(SkippedLine { line_number: idx + 1, reason });
            }
        }
    }

    tracing::debug!(
        entries = lines.len(),
        skipped = report.skipped_count(),
        "Parsed timed lyrics"
    );
    (Timeline::new(lines), report)
}

/// Parse one source line.
///
/// Surrounding whitespace is ignored. The timestamp is the text between the
/// leading `[` and the first `]`; the lyric is whatever follows, trimmed.
pub fn parse_line(raw: &str) -> Result<LyricLine, SkipReason> {
    let line = raw.trim();
    let Some(rest) = line.strip_prefix('[') else {
        return Err(SkipReason::NoTimestamp);
    };
    let Some((stamp, text)) = rest.split_once(']') else {
        return Err(SkipReason::NoTimestamp);
    };

    if !has_timestamp_shape(stamp) {
        return Err(SkipReason::MalformedTimestamp);
    }

    let offset_seconds = parse_offset(stamp).ok_or(SkipReason::InvalidNumber)?;
    Ok(LyricLine::new(offset_seconds, text.trim()))
}

/// Digits only apart from exactly one `:` and at least one `.`.
fn has_timestamp_shape(stamp: &str) -> bool {
    let mut digits = 0usize;
    let mut colons = 0usize;
    let mut dots = 0usize;
    for c in stamp.chars() {
        match c {
            '0'..='9' => digits += 1,
            ':' => colons += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && colons == 1 && dots > 0
}

/// `minutes * 60 + seconds`, or `None` when either side does not parse.
///
/// Minutes must be a whole number of any length.
fn parse_offset(stamp: &str) -> Option<f64> {
    let (minutes, seconds) = stamp.split_once(':')?;
    if minutes.is_empty() || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let minutes: f64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    Some(minutes.mul_add(60.0, seconds))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn parses_basic_line() {
        let line = parse_line("[00:05.50]Line B").unwrap();
        assert_eq!(line.offset_seconds, 5.5);
        assert_eq!(line.text, "Line B");
    }

    #[test]
    fn minutes_contribute_sixty_seconds_each() {
        let line = parse_line("[02:03.25] chorus ").unwrap();
        assert_eq!(line.offset_seconds, 123.25);
        assert_eq!(line.text, "chorus");
    }

    #[test]
    fn long_minutes_are_accepted() {
        let line = parse_line("[120:00.00]end").unwrap();
        assert_eq!(line.offset_seconds, 7200.0);
    }

    #[test]
    fn minutes_beyond_32_bits_are_accepted() {
        let line = parse_line("[4294967296:00.00]x").unwrap();
        assert_eq!(line.offset_seconds, 4_294_967_296.0 * 60.0);
        assert_eq!(line.text, "x");
    }

    #[test]
    fn empty_text_is_an_instrumental_marker() {
        let line = parse_line("[00:30.00]").unwrap();
        assert_eq!(line.text, "");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let line = parse_line("   [00:01.00]   A  \r").unwrap();
        assert_eq!(line.offset_seconds, 1.0);
        assert_eq!(line.text, "A");
    }

    #[test]
    fn only_first_bracket_is_the_timestamp() {
        let line = parse_line("[00:01.00][00:02.00]A").unwrap();
        assert_eq!(line.offset_seconds, 1.0);
        assert_eq!(line.text, "[00:02.00]A");
    }

    #[test]
    fn fractional_seconds_edges() {
        assert_eq!(parse_line("[00:.5]x").unwrap().offset_seconds, 0.5);
        assert_eq!(parse_line("[00:5.]x").unwrap().offset_seconds, 5.0);
    }

    #[test]
    fn missing_brackets_are_no_timestamp() {
        assert_eq!(parse_line("garbage line"), Err(SkipReason::NoTimestamp));
        assert_eq!(parse_line("[00:01.00 unterminated"), Err(SkipReason::NoTimestamp));
        assert_eq!(parse_line("text [00:01.00]"), Err(SkipReason::NoTimestamp));
        assert_eq!(parse_line(""), Err(SkipReason::NoTimestamp));
    }

    #[test]
    fn malformed_timestamps_are_rejected() {
        assert_eq!(parse_line("[bad]B"), Err(SkipReason::MalformedTimestamp));
        assert_eq!(parse_line("[00:01]no decimal"), Err(SkipReason::MalformedTimestamp));
        assert_eq!(parse_line("[00:00:01.00]two colons"), Err(SkipReason::MalformedTimestamp));
        assert_eq!(parse_line("[ar:Some Artist]"), Err(SkipReason::MalformedTimestamp));
        assert_eq!(parse_line("[-1:01.00]neg"), Err(SkipReason::MalformedTimestamp));
        assert_eq!(parse_line("[:.]x"), Err(SkipReason::MalformedTimestamp));
    }

    #[test]
    fn shaped_but_unparseable_is_invalid_number() {
        assert_eq!(parse_line("[:01.00]no minutes"), Err(SkipReason::InvalidNumber));
        assert_eq!(parse_line("[00:01.0.0]two dots"), Err(SkipReason::InvalidNumber));
        assert_eq!(parse_line("[00:.]x"), Err(SkipReason::InvalidNumber));
        assert_eq!(parse_line("[1.5:00.00]fractional minutes"), Err(SkipReason::InvalidNumber));
    }

    #[test]
    fn malformed_lines_are_skipped_and_reported() {
        let source = "[00:01.00]A\ngarbage line\n[bad]B\n[00:02.00]C\n";
        let (timeline, report) = parse_timeline_with_report(source);

        assert_eq!(
            timeline.lines(),
            &[LyricLine::new(1.0, "A"), LyricLine::new(2.0, "C")]
        );
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(
            report.skipped,
            vec![
                SkippedLine { line_number: 2, reason: SkipReason::NoTimestamp },
                SkippedLine { line_number: 3, reason: SkipReason::MalformedTimestamp },
            ]
        );
    }

    #[test]
    fn file_order_is_preserved() {
        let timeline = parse_timeline("[00:10.00]late\n[00:01.00]early\n");
        let texts: Vec<_> = timeline.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["late", "early"]);
        assert!(!timeline.is_monotonic());
    }

    #[test]
    fn report_counts_by_reason() {
        let (_, report) = parse_timeline_with_report("\n[x]\n[:1.0]\nplain\n");
        assert_eq!(report.count(SkipReason::NoTimestamp), 2);
        assert_eq!(report.count(SkipReason::MalformedTimestamp), 1);
        assert_eq!(report.count(SkipReason::InvalidNumber), 1);
    }
}
