//! Chapter text normalization.
//!
//! Text copied out of a paginated source arrives hard-wrapped, with verse
//! numbers glued to the preceding sentence or to the first word of their
//! verse. The transforms here repair that into one verse per line:
//!
//! - [`fix_line_breaks`] joins wrapped continuation lines, keeping verse
//!   starts and paragraph breaks.
//! - [`normalize_verses`] moves verse numbers that follow sentence-ending
//!   punctuation onto their own line and separates the number from the
//!   verse text.
//!
//! Both are pure functions over the whole chapter. They are meant to run in
//! that order on freshly pasted text (see [`prepare`]) but either can be
//! applied on its own, any number of times.
//!
//! Verse detection is a heuristic: a numeral in running prose
//! ("in the year 70 the temple fell") looks exactly like a verse marker and
//! is treated as one.

pub mod verses;

use std::sync::LazyLock;

use regex::Regex;

/// Punctuation that ends a sentence and therefore a wrapped line.
const SENTENCE_END: [char; 4] = ['.', '?', '!', ':'];

/// Sentence-ending punctuation, optional whitespace, then a verse number.
#[allow(clippy::expect_used)]
static RE_VERSE_AFTER_PUNCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([.?!:])\s*(\d+)").expect("valid regex: RE_VERSE_AFTER_PUNCT")
});

/// Verse number immediately followed by a letter.
#[allow(clippy::expect_used)]
static RE_NUMBER_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)([a-zA-Z])").expect("valid regex: RE_NUMBER_LETTER")
});

/// First non-whitespace character is a decimal digit.
#[allow(clippy::expect_used)]
static RE_LEADING_DIGIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d").expect("valid regex: RE_LEADING_DIGIT")
});

/// Join lines that were broken by copying from a paginated source.
///
/// Keeps new verses (lines starting with a digit) and paragraph breaks
/// (blank lines) as line boundaries. A line is joined onto the one before
/// it, separated by a single space, unless the previous line ends a sentence
/// with `.`, `?`, `!` or `:`.
///
/// Leading blank lines, and runs of blank lines after the first, produce no
/// output. No trailing newline is added.
pub fn fix_line_breaks(content: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut buffer: Option<String> = None;

    for line in content.split('\n') {
        if is_blank(line) {
            if let Some(pending) = buffer.take() {
                out.push(pending);
                out.push(String::new());
            }
            continue;
        }

        buffer = Some(match buffer.take() {
            None => line.to_string(),
            Some(mut pending) if should_join(&pending, line) => {
                pending.push(' ');
                pending.push_str(line);
                pending
            }
            Some(pending) => {
                out.push(pending);
                line.to_string()
            }
        });
    }

    if let Some(pending) = buffer {
        out.push(pending);
    }

    tracing::debug!(
        "fix_line_breaks: {} input lines -> {} output lines",
        content.split('\n').count(),
        out.len()
    );
    out.join("\n")
}

/// Decide whether `next` continues the line being assembled in `prev`.
fn should_join(prev: &str, next: &str) -> bool {
    if is_blank(next) {
        return false;
    }
    if prev.trim_end().ends_with(&SENTENCE_END[..]) {
        return false;
    }
    !starts_with_digit(next)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn starts_with_digit(line: &str) -> bool {
    RE_LEADING_DIGIT.is_match(line)
}

/// Put every verse on its own line with a space after the verse number.
///
/// - After `.`, `?`, `!` or `:`, any whitespace before a run of digits is
///   replaced by a newline, so the number starts the next line.
/// - A run of digits directly followed by an ASCII letter gets a single
///   space inserted (`1The` becomes `1 The`).
///
/// Both rules apply to the text as a whole, so they also match across
/// existing line breaks.
pub fn normalize_verses(content: &str) -> String {
    let split = RE_VERSE_AFTER_PUNCT.replace_all(content, "${1}\n${2}");
    let spaced = RE_NUMBER_LETTER.replace_all(&split, "${1} ${2}");
    tracing::debug!(
        "normalize_verses: {} lines -> {} lines",
        content.lines().count(),
        spaced.lines().count()
    );
    spaced.into_owned()
}

/// Remove every occurrence of each character in `chars`.
///
/// No other character is touched. An empty `chars` returns the text
/// unchanged.
pub fn strip_chars(content: &str, chars: &str) -> String {
    if chars.is_empty() {
        return content.to_string();
    }
    content.chars().filter(|c| !chars.contains(*c)).collect()
}

/// Recommended treatment for freshly pasted chapter text: repair line
/// breaks, then normalize verse boundaries.
pub fn prepare(content: &str) -> String {
    normalize_verses(&fix_line_breaks(content))
}

/// A single text transform that the editor or the batch tool can apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Join wrapped lines ([`fix_line_breaks`]).
    FixLineBreaks,
    /// One verse per line, space after the number ([`normalize_verses`]).
    NormalizeVerses,
    /// Delete every occurrence of the given characters ([`strip_chars`]).
    StripChars(String),
}

impl Transform {
    /// Apply the transform to a chapter's text.
    pub fn apply(&self, content: &str) -> String {
        match self {
            Self::FixLineBreaks => fix_line_breaks(content),
            Self::NormalizeVerses => normalize_verses(content),
            Self::StripChars(chars) => strip_chars(content, chars),
        }
    }

    /// Short name for logs and command output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FixLineBreaks => "fix line breaks",
            Self::NormalizeVerses => "normalize verses",
            Self::StripChars(_) => "strip symbols",
        }
    }

    /// Message shown once the transform has been applied in the editor.
    pub fn done_message(&self) -> String {
        match self {
            Self::FixLineBreaks => "Line breaks fixed. Use Save to persist.".to_string(),
            Self::NormalizeVerses => {
                "Verses normalized (one per line, space after number). Use Save to persist."
                    .to_string()
            }
            Self::StripChars(chars) => {
                format!("Removed symbols: {chars}. Use Save to persist.")
            }
        }
    }
}

/// Apply transforms in order.
pub fn apply_all(content: &str, transforms: &[Transform]) -> String {
    transforms
        .iter()
        .fold(content.to_string(), |text, t| t.apply(&text))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_fix_joins_wrapped_lines() {
        assert_eq!(
            fix_line_breaks("For God so\nloved the world\n2That he gave"),
            "For God so loved the world\n2That he gave"
        );
    }

    #[test]
    fn test_fix_keeps_paragraph_break() {
        assert_eq!(
            fix_line_breaks("Line one\ncontinued.\n\n2Verse two"),
            "Line one continued.\n\n2Verse two"
        );
    }

    #[test]
    fn test_fix_stops_at_sentence_end() {
        for end in [".", "?", "!", ":"] {
            let input = format!("He said{end}\nand then");
            assert_eq!(fix_line_breaks(&input), input);
        }
        // Trailing whitespace after the punctuation still ends the sentence
        assert_eq!(fix_line_breaks("Amen.   \nGrace"), "Amen.   \nGrace");
    }

    #[test]
    fn test_fix_leading_digit_after_whitespace() {
        assert_eq!(
            fix_line_breaks("and the earth\n   3 Then God said"),
            "and the earth\n   3 Then God said"
        );
    }

    #[test]
    fn test_fix_leading_blank_lines_dropped() {
        assert_eq!(fix_line_breaks("\n\n  \nFirst line\nsecond"), "First line second");
    }

    #[test]
    fn test_fix_consecutive_blank_lines_collapse() {
        assert_eq!(fix_line_breaks("One.\n\n\n\nTwo"), "One.\n\nTwo");
    }

    #[test]
    fn test_fix_trailing_blank_line_kept() {
        // The buffer is flushed with its blank line; nothing follows it
        assert_eq!(fix_line_breaks("One.\n"), "One.\n");
    }

    #[test]
    fn test_fix_empty_input() {
        assert_eq!(fix_line_breaks(""), "");
        assert_eq!(fix_line_breaks("\n \n"), "");
    }

    #[test]
    fn test_fix_new_buffer_ignores_own_punctuation() {
        // After a flush the next line always starts a buffer, even a lone "."
        assert_eq!(fix_line_breaks("Amen.\n.\nand"), "Amen.\n.\nand");
        assert_eq!(fix_line_breaks("Amen.\n\nwhich\nwas"), "Amen.\n\nwhich was");
    }

    #[test]
    fn test_normalize_splits_after_punctuation() {
        assert_eq!(
            normalize_verses("In the beginning.2The Word"),
            "In the beginning.\n2 The Word"
        );
        assert_eq!(
            normalize_verses("love, joy, peace.10Against such"),
            "love, joy, peace.\n10 Against such"
        );
    }

    #[test]
    fn test_normalize_drops_whitespace_between_punct_and_number() {
        assert_eq!(normalize_verses("sin?  \t 4 And"), "sin?\n4 And");
        assert_eq!(normalize_verses("said:\n\n5 Behold"), "said:\n5 Behold");
    }

    #[test]
    fn test_normalize_leading_number_only_spaced() {
        assert_eq!(normalize_verses("1The book"), "1 The book");
        assert_eq!(normalize_verses("12 Already spaced"), "12 Already spaced");
    }

    #[test]
    fn test_normalize_numeral_in_prose_is_split() {
        // Accepted limitation of the heuristic
        assert_eq!(normalize_verses("about 3000souls"), "about 3000 souls");
    }

    #[test]
    fn test_normalize_idempotent_on_normalized_text() {
        let once = normalize_verses("Jesus wept.36Then the Jews said,37And some");
        assert_eq!(normalize_verses(&once), once);
    }

    #[test]
    fn test_strip_chars() {
        assert_eq!(strip_chars("Hello—world", "—"), "Helloworld");
        assert_eq!(strip_chars("a*b†c*", "*†"), "abc");
        assert_eq!(strip_chars("unchanged", ""), "unchanged");
    }

    #[test]
    fn test_prepare_pasted_text() {
        let pasted = "1In the beginning was the Word, and the Word\nwas with God.2He was in\nthe beginning with God.";
        assert_eq!(
            prepare(pasted),
            "1 In the beginning was the Word, and the Word was with God.\n2 He was in the beginning with God."
        );
    }

    #[test]
    fn test_apply_all_runs_in_order() {
        let steps = [
            Transform::StripChars("*".to_string()),
            Transform::FixLineBreaks,
            Transform::NormalizeVerses,
        ];
        assert_eq!(apply_all("Grace*\nto you.*2Peace", &steps), "Grace to you.\n2 Peace");
        assert_eq!(apply_all("same", &[]), "same");
    }

    #[test]
    fn test_transform_messages() {
        assert_eq!(
            Transform::FixLineBreaks.done_message(),
            "Line breaks fixed. Use Save to persist."
        );
        assert_eq!(Transform::StripChars("†".into()).name(), "strip symbols");
    }
}
