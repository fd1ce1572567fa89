//! Line classification by shape.

use std::sync::LazyLock;

use regex::Regex;

/// A session starts with a `month/day` fragment, e.g. `6/5 - Bike - +120`.
static SESSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+/\d+").unwrap());

/// A year marker starts with four digits, e.g. `2009` or `2009 total - +1002(672)`.
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})").unwrap());

/// What a raw log line looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    SessionEntry,
    YearMarker,
    Other,
}

/// Classifies one raw line.
///
/// The session shape is tested first, so `2009/10 - ...` is a session and
/// not a year marker.
pub fn classify(line: &str) -> LineKind {
    if SESSION_RE.is_match(line) {
        LineKind::SessionEntry
    } else if YEAR_RE.is_match(line) {
        LineKind::YearMarker
    } else {
        LineKind::Other
    }
}

/// Extracts the year from a line classified as [`LineKind::YearMarker`].
pub fn year_of(line: &str) -> Option<i32> {
    let caps = YEAR_RE.captures(line)?;
    caps[1].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_lines() {
        assert_eq!(classify("6/5 - Kennell's - +205(60)\n"), LineKind::SessionEntry);
        assert_eq!(classify("12/31 - Bike MITT - -100 - 9"), LineKind::SessionEntry);
    }

    #[test]
    fn year_lines() {
        assert_eq!(classify("2009\n"), LineKind::YearMarker);
        assert_eq!(classify("2009 total - +1002(672)"), LineKind::YearMarker);
    }

    #[test]
    fn session_shape_wins_over_year_shape() {
        assert_eq!(classify("2009/10 - Commerce - 50"), LineKind::SessionEntry);
    }

    #[test]
    fn other_lines() {
        assert_eq!(classify("\n"), LineKind::Other);
        assert_eq!(classify(""), LineKind::Other);
        assert_eq!(classify("Notes from the road"), LineKind::Other);
        assert_eq!(classify("209"), LineKind::Other);
        // Leading whitespace breaks the anchor.
        assert_eq!(classify("  6/5 - Bike - 10"), LineKind::Other);
    }

    #[test]
    fn year_of_reads_leading_digits() {
        assert_eq!(year_of("2009\n"), Some(2009));
        assert_eq!(year_of("2011 total - +40"), Some(2011));
        assert_eq!(year_of("Other"), None);
    }
}
