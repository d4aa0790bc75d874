//! Integration tests for the chapter text transforms.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use chapterfix::normalizer::verses::{summarize, verse_text};
use chapterfix::normalizer::{fix_line_breaks, normalize_verses, prepare, strip_chars};

const PASTED: &str = "\n1Now in the fifteenth year of the reign of Tiberius\nCaesar, Pontius Pilate being governor of Judea.2while Annas and\nCaiaphas were high priests, the word of God came to John.\n\n3And he went into all the region around the Jordan,\npreaching a baptism of repentance.";

#[test]
fn test_normalize_is_noop_on_normalized_text() {
    let normalized = prepare(PASTED);
    assert_eq!(normalize_verses(&normalized), normalized);
}

#[test]
fn test_prepare_pasted_chapter() {
    assert_eq!(
        prepare(PASTED),
        "1 Now in the fifteenth year of the reign of Tiberius Caesar, Pontius Pilate being governor of Judea.\n\
         2 while Annas and Caiaphas were high priests, the word of God came to John.\n\
         3 And he went into all the region around the Jordan, preaching a baptism of repentance."
    );
}

#[test]
fn test_fix_keeps_every_blank_line_after_content() {
    let input = "One.\n\nTwo.\n\nThree";
    assert_eq!(fix_line_breaks(input), input);
}

#[test]
fn test_fix_never_joins_digit_lines() {
    let input = "and it was so\n7 Then God made\n  8 And God called";
    let fixed = fix_line_breaks(input);
    assert_eq!(fixed.lines().count(), 3);
    assert!(fixed.lines().nth(1).unwrap().starts_with('7'));
}

#[test]
fn test_fix_is_stable_on_its_output() {
    let once = fix_line_breaks(PASTED);
    assert_eq!(fix_line_breaks(&once), once);
}

#[test]
fn test_strip_only_removes_listed_chars() {
    assert_eq!(strip_chars("Hello—world", "—"), "Helloworld");
    assert_eq!(strip_chars("1 Grace† to you*", "†*"), "1 Grace to you");
}

#[test]
fn test_prepared_chapter_reads_back_as_verses() {
    let normalized = prepare(PASTED);
    let summary = summarize(&normalized);
    assert_eq!(summary.count, 3);
    assert!(summary.missing.is_empty());
    assert_eq!(
        verse_text(&normalized, 2).as_deref(),
        Some("2 while Annas and Caiaphas were high priests, the word of God came to John.")
    );
}
