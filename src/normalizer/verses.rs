//! Reading normalized chapter text back as verses.
//!
//! Normalized text holds one verse per line in the form `N text`. These
//! helpers parse that form for lookups and for spotting verse boundaries the
//! transforms could not repair.

use std::sync::LazyLock;

use regex::Regex;

/// A line that starts with a verse number followed by whitespace and text.
#[allow(clippy::expect_used)]
static RE_VERSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\s+(.+)$").expect("valid regex: RE_VERSE_LINE")
});

/// A single verse parsed from normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseLine {
    /// Verse number.
    pub number: u32,
    /// Verse text without the number.
    pub text: String,
}

/// Verse numbering overview for a chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerseSummary {
    /// Number of verse lines found.
    pub count: usize,
    /// Lowest verse number seen.
    pub first: Option<u32>,
    /// Highest verse number seen.
    pub last: Option<u32>,
    /// Numbers between `first` and `last` with no verse line.
    pub missing: Vec<u32>,
}

impl VerseSummary {
    /// Compact form for the status bar, e.g. `25 verses` or
    /// `24 verses, missing 7`.
    pub fn describe(&self) -> String {
        if self.count == 0 {
            return "no verses".to_string();
        }
        let noun = if self.count == 1 { "verse" } else { "verses" };
        if self.missing.is_empty() {
            return format!("{} {noun}", self.count);
        }
        let shown: Vec<String> = self.missing.iter().take(5).map(u32::to_string).collect();
        let more = if self.missing.len() > 5 { ", …" } else { "" };
        format!("{} {noun}, missing {}{more}", self.count, shown.join(", "))
    }
}

/// Parse every verse line in the text, in order.
pub fn verse_lines(content: &str) -> Vec<VerseLine> {
    content
        .split('\n')
        .filter_map(|line| {
            let caps = RE_VERSE_LINE.captures(line)?;
            let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
            let text = caps.get(2)?.as_str().trim().to_string();
            Some(VerseLine { number, text })
        })
        .collect()
}

/// Look up a verse by number, returned as `N text`.
pub fn verse_text(content: &str, number: u32) -> Option<String> {
    if content.is_empty() {
        return None;
    }
    verse_lines(content)
        .into_iter()
        .find(|v| v.number == number)
        .map(|v| format!("{} {}", v.number, v.text))
}

/// Summarize verse numbering in the text.
pub fn summarize(content: &str) -> VerseSummary {
    let lines = verse_lines(content);
    let first = lines.iter().map(|v| v.number).min();
    let last = lines.iter().map(|v| v.number).max();

    let missing = match (first, last) {
        (Some(lo), Some(hi)) => (lo..=hi)
            .filter(|n| !lines.iter().any(|v| v.number == *n))
            .collect(),
        _ => Vec::new(),
    };

    VerseSummary {
        count: lines.len(),
        first,
        last,
        missing,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    const CHAPTER: &str = "1 Paul, a bondservant of Jesus Christ,\n2 which He promised before\n\n4 and declared to be the Son of God";

    #[test]
    fn test_verse_lines() {
        let verses = verse_lines(CHAPTER);
        assert_eq!(verses.len(), 3);
        assert_eq!(verses[0].number, 1);
        assert_eq!(verses[2].text, "and declared to be the Son of God");
    }

    #[test]
    fn test_verse_lines_requires_space_after_number() {
        assert!(verse_lines("3Then God said").is_empty());
        assert_eq!(verse_lines("3\tThen God said")[0].text, "Then God said");
    }

    #[test]
    fn test_verse_text() {
        assert_eq!(
            verse_text(CHAPTER, 2).as_deref(),
            Some("2 which He promised before")
        );
        assert_eq!(verse_text(CHAPTER, 3), None);
        assert_eq!(verse_text("", 1), None);
    }

    #[test]
    fn test_summarize_reports_gaps() {
        let summary = summarize(CHAPTER);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.first, Some(1));
        assert_eq!(summary.last, Some(4));
        assert_eq!(summary.missing, vec![3]);
        assert_eq!(summary.describe(), "3 verses, missing 3");
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize("just prose");
        assert_eq!(summary, VerseSummary::default());
        assert_eq!(summary.describe(), "no verses");
    }
}
