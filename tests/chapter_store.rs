//! Integration tests for the JSON chapter store.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use chapterfix::bible::ChapterRef;
use chapterfix::error::Error;
use chapterfix::store::ChapterStore;
use tempfile::TempDir;

#[test]
fn test_absent_store_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = ChapterStore::open(dir.path().join("missing.json")).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.get("Matthew_1"), "");
}

#[test]
fn test_round_trip_preserves_other_keys_and_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nkjv-chapters.json");
    std::fs::write(
        &path,
        r#"{"Revelation_22": "21 The grace", "Matthew_1": "", "notes": {"editor": "kept"}, "Acts_2": "1 When"}"#,
    )
    .unwrap();

    let mut store = ChapterStore::open(&path).unwrap();
    store.set_chapter(&ChapterRef::new("Matthew", 1), "1 The book\n2 Abraham");
    store.save().unwrap();

    let reopened = ChapterStore::open(&path).unwrap();
    assert_eq!(
        reopened.keys().collect::<Vec<_>>(),
        vec!["Revelation_22", "Matthew_1", "notes", "Acts_2"]
    );
    assert_eq!(reopened.get("Matthew_1"), "1 The book\n2 Abraham");
    assert_eq!(reopened.get("Acts_2"), "1 When");
    // Non-string values survive but read as empty
    assert_eq!(reopened.get("notes"), "");

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains(r#""editor": "kept""#));
}

#[test]
fn test_saved_json_is_pretty_and_keeps_unicode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chapters.json");
    let mut store = ChapterStore::empty(&path);
    store.set("John_1", "1 In the beginning—");
    store.save().unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "{\n  \"John_1\": \"1 In the beginning—\"\n}");
}

#[test]
fn test_save_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("book").join("nkjv-chapters.json");
    let mut store = ChapterStore::empty(&path);
    store.set("Jude_1", "1 Jude");
    store.save().unwrap();
    assert!(path.exists());
}

#[test]
fn test_save_into_uncreatable_directory_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let store = ChapterStore::empty(blocker.join("sub").join("chapters.json"));
    match store.save() {
        Err(Error::Save { path, .. }) => assert!(path.ends_with("chapters.json")),
        other => panic!("expected Error::Save, got {other:?}"),
    }
}

#[test]
fn test_invalid_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(ChapterStore::open(&path), Err(Error::Parse { .. })));

    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(ChapterStore::open(&path), Err(Error::Parse { .. })));
}

#[test]
fn test_save_replaces_file_without_leaving_temp() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chapters.json");
    std::fs::write(&path, r#"{"Jude_1": "old text that is longer than the new one"}"#).unwrap();

    let mut store = ChapterStore::open(&path).unwrap();
    store.set("Jude_1", "1 Jude");
    store.save().unwrap();

    let reopened = ChapterStore::open(&path).unwrap();
    assert_eq!(reopened.get("Jude_1"), "1 Jude");
    assert!(!dir.path().join("chapters.json.tmp").exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
