//! New Testament chapter catalogue and chapter reference parsing.

use std::collections::HashMap;
use std::fmt;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use lazy_static::lazy_static;

/// New Testament books in canonical order with their chapter counts.
pub const NEW_TESTAMENT_BOOKS: &[(&str, u32)] = &[
    ("Matthew", 28),
    ("Mark", 16),
    ("Luke", 24),
    ("John", 21),
    ("Acts", 28),
    ("Romans", 16),
    ("1 Corinthians", 16),
    ("2 Corinthians", 13),
    ("Galatians", 6),
    ("Ephesians", 6),
    ("Philippians", 4),
    ("Colossians", 4),
    ("1 Thessalonians", 5),
    ("2 Thessalonians", 3),
    ("1 Timothy", 6),
    ("2 Timothy", 4),
    ("Titus", 3),
    ("Philemon", 1),
    ("Hebrews", 13),
    ("James", 5),
    ("1 Peter", 5),
    ("2 Peter", 3),
    ("1 John", 5),
    ("2 John", 1),
    ("3 John", 1),
    ("Jude", 1),
    ("Revelation", 22),
];

lazy_static! {
    /// Book name normalization map
    static ref BOOK_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("matt", "Matthew");
        m.insert("mt", "Matthew");
        m.insert("matthew", "Matthew");
        m.insert("mk", "Mark");
        m.insert("mark", "Mark");
        m.insert("lk", "Luke");
        m.insert("luke", "Luke");
        m.insert("jn", "John");
        m.insert("john", "John");
        m.insert("acts", "Acts");
        m.insert("rom", "Romans");
        m.insert("romans", "Romans");
        m.insert("1 cor", "1 Corinthians");
        m.insert("1 corinthians", "1 Corinthians");
        m.insert("1cor", "1 Corinthians");
        m.insert("2 cor", "2 Corinthians");
        m.insert("2 corinthians", "2 Corinthians");
        m.insert("2cor", "2 Corinthians");
        m.insert("gal", "Galatians");
        m.insert("galatians", "Galatians");
        m.insert("eph", "Ephesians");
        m.insert("ephesians", "Ephesians");
        m.insert("phil", "Philippians");
        m.insert("philippians", "Philippians");
        m.insert("col", "Colossians");
        m.insert("colossians", "Colossians");
        m.insert("1 thess", "1 Thessalonians");
        m.insert("1 thessalonians", "1 Thessalonians");
        m.insert("1thess", "1 Thessalonians");
        m.insert("2 thess", "2 Thessalonians");
        m.insert("2 thessalonians", "2 Thessalonians");
        m.insert("2thess", "2 Thessalonians");
        m.insert("1 tim", "1 Timothy");
        m.insert("1 timothy", "1 Timothy");
        m.insert("1tim", "1 Timothy");
        m.insert("2 tim", "2 Timothy");
        m.insert("2 timothy", "2 Timothy");
        m.insert("2tim", "2 Timothy");
        m.insert("titus", "Titus");
        m.insert("philem", "Philemon");
        m.insert("philemon", "Philemon");
        m.insert("heb", "Hebrews");
        m.insert("hebrews", "Hebrews");
        m.insert("james", "James");
        m.insert("jas", "James");
        m.insert("1 pet", "1 Peter");
        m.insert("1 peter", "1 Peter");
        m.insert("1pet", "1 Peter");
        m.insert("2 pet", "2 Peter");
        m.insert("2 peter", "2 Peter");
        m.insert("2pet", "2 Peter");
        m.insert("1 john", "1 John");
        m.insert("1 jn", "1 John");
        m.insert("1john", "1 John");
        m.insert("2 john", "2 John");
        m.insert("2 jn", "2 John");
        m.insert("2john", "2 John");
        m.insert("3 john", "3 John");
        m.insert("3 jn", "3 John");
        m.insert("3john", "3 John");
        m.insert("jude", "Jude");
        m.insert("rev", "Revelation");
        m.insert("revelation", "Revelation");
        m.insert("revelations", "Revelation");
        m
    };
}

/// A single chapter of a book, e.g. `1 Corinthians 3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChapterRef {
    /// Book name exactly as displayed.
    pub book: String,
    /// Chapter number, starting at 1.
    pub chapter: u32,
}

impl ChapterRef {
    /// Create a reference to a chapter.
    pub fn new(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
        }
    }

    /// Display form: `Matthew 1`, `1 Corinthians 3`.
    pub fn display(&self) -> String {
        format!("{} {}", self.book, self.chapter)
    }

    /// Store key: `Matthew_1`, `1 Corinthians_3`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.book, self.chapter)
    }

    /// Parse a display name, splitting at the last space.
    pub fn from_display(display: &str) -> Option<Self> {
        split_last(display, ' ')
    }

    /// Parse a store key, splitting at the last underscore.
    pub fn from_key(key: &str) -> Option<Self> {
        split_last(key, '_')
    }

    /// Whether the book and chapter exist in the New Testament catalogue.
    pub fn is_known(&self) -> bool {
        NEW_TESTAMENT_BOOKS
            .iter()
            .any(|(book, chapters)| *book == self.book && (1..=*chapters).contains(&self.chapter))
    }
}

impl fmt::Display for ChapterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)
    }
}

fn split_last(text: &str, sep: char) -> Option<ChapterRef> {
    let (book, number) = text.rsplit_once(sep)?;
    let chapter = number.trim().parse::<u32>().ok().filter(|n| *n >= 1)?;
    (!book.is_empty()).then(|| ChapterRef::new(book, chapter))
}

/// Convert a display name to its store key.
///
/// `Matthew 1` becomes `Matthew_1`; a name without a space is returned as is.
pub fn display_to_key(display: &str) -> String {
    display
        .rsplit_once(' ')
        .map_or_else(|| display.to_string(), |(book, num)| format!("{book}_{num}"))
}

/// Every New Testament chapter in canonical order.
pub fn chapter_list() -> Vec<ChapterRef> {
    NEW_TESTAMENT_BOOKS
        .iter()
        .flat_map(|(book, chapters)| (1..=*chapters).map(move |n| ChapterRef::new(*book, n)))
        .collect()
}

/// Normalize book name to canonical form
fn normalize_book_name(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    let trimmed = lower.split_whitespace().collect::<Vec<_>>().join(" ");

    // Direct lookup
    if let Some(&canonical) = BOOK_ALIASES.get(trimmed.as_str()) {
        return Some(canonical);
    }

    // Try without spaces for numbered books
    let no_space = trimmed.replace(' ', "");
    if let Some(&canonical) = BOOK_ALIASES.get(no_space.as_str()) {
        return Some(canonical);
    }

    None
}

/// Parse a typed chapter query like `1 cor 13`, `rev 22` or `John 3`.
///
/// A bare book name resolves to chapter 1. Returns `None` for unknown books
/// or chapters past the end of the book.
pub fn parse_chapter_query(query: &str) -> Option<ChapterRef> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let (book_part, chapter) = match query.rsplit_once(char::is_whitespace) {
        Some((book, num)) if num.chars().all(|c| c.is_ascii_digit()) => {
            (book, num.parse::<u32>().ok()?)
        }
        _ => (query, 1),
    };

    let book = normalize_book_name(book_part)?;
    let reference = ChapterRef::new(book, chapter);
    reference.is_known().then_some(reference)
}

/// Fuzzy search chapter display names, returning indices best match first.
pub fn search_chapters(query: &str, chapters: &[ChapterRef]) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize)> = chapters
        .iter()
        .enumerate()
        .filter_map(|(i, c)| matcher.fuzzy_match(&c.display(), query).map(|s| (s, i)))
        .collect();
    // Stable on ties so canonical order wins
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, i)| i).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_chapter_list_size() {
        let chapters = chapter_list();
        assert_eq!(chapters.len(), 260);
        assert_eq!(chapters[0].display(), "Matthew 1");
        assert_eq!(chapters[259].display(), "Revelation 22");
    }

    #[test]
    fn test_display_to_key() {
        assert_eq!(display_to_key("Matthew 1"), "Matthew_1");
        assert_eq!(display_to_key("1 Corinthians 3"), "1 Corinthians_3");
        assert_eq!(display_to_key("Jude"), "Jude");
    }

    #[test]
    fn test_from_key() {
        let r = ChapterRef::from_key("1 Corinthians_3").unwrap();
        assert_eq!(r.book, "1 Corinthians");
        assert_eq!(r.chapter, 3);
        assert!(ChapterRef::from_key("Matthew").is_none());
        assert!(ChapterRef::from_key("Matthew_0").is_none());
        assert!(ChapterRef::from_key("Matthew_x").is_none());
    }

    #[test]
    fn test_from_display_round_trips_key() {
        let r = ChapterRef::from_display("2 Peter 3").unwrap();
        assert_eq!(r.key(), "2 Peter_3");
        assert_eq!(r.to_string(), "2 Peter 3");
    }

    #[test]
    fn test_parse_chapter_query() {
        assert_eq!(parse_chapter_query("1 cor 13"), Some(ChapterRef::new("1 Corinthians", 13)));
        assert_eq!(parse_chapter_query("rev 22"), Some(ChapterRef::new("Revelation", 22)));
        assert_eq!(parse_chapter_query("  JN   3 "), Some(ChapterRef::new("John", 3)));
        assert_eq!(parse_chapter_query("1john 2"), Some(ChapterRef::new("1 John", 2)));
        assert_eq!(parse_chapter_query("Philemon"), Some(ChapterRef::new("Philemon", 1)));
    }

    #[test]
    fn test_parse_chapter_query_rejects_unknown() {
        assert!(parse_chapter_query("jude 2").is_none());
        assert!(parse_chapter_query("genesis 1").is_none());
        assert!(parse_chapter_query("").is_none());
    }

    #[test]
    fn test_search_chapters() {
        let chapters = chapter_list();
        let hits = search_chapters("galatians 5", &chapters);
        assert_eq!(chapters[hits[0]].display(), "Galatians 5");
        assert!(search_chapters("   ", &chapters).is_empty());
    }
}
