use super::*;
use crate::config::LibrarySettings;
use crate::library::EntryKind;
use std::fs;
use tempfile::{TempDir, tempdir};

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("albums")).unwrap();
    fs::write(dir.path().join("albums").join("inner.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("one.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("two.ogg"), b"not real").unwrap();
    dir
}

#[test]
fn new_lists_entries_sorted() {
    let dir = fixture();
    let app = App::new(dir.path().to_path_buf(), &LibrarySettings::default());

    let names: Vec<&str> = app.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["albums", "one.mp3", "two.ogg"]);
    assert_eq!(app.selected, 0);
}

#[test]
fn selection_wraps_both_ways() {
    let dir = fixture();
    let mut app = App::new(dir.path().to_path_buf(), &LibrarySettings::default());

    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    app.next();
    app.next();
    assert_eq!(app.selected, 0);

    app.last();
    assert_eq!(app.selected, 2);
    app.first();
    assert_eq!(app.selected, 0);
}

#[test]
fn enter_selected_descends_into_folders_only() {
    let dir = fixture();
    let settings = LibrarySettings::default();
    let mut app = App::new(dir.path().to_path_buf(), &settings);

    // First entry is the "albums" folder.
    assert!(app.enter_selected(&settings));
    assert_eq!(app.dir, dir.path().join("albums"));
    assert_eq!(app.entries.len(), 1);
    assert_eq!(app.entries[0].kind, EntryKind::Track);

    // A track entry does not change the directory.
    assert!(!app.enter_selected(&settings));
    assert_eq!(app.dir, dir.path().join("albums"));
}

#[test]
fn go_parent_reselects_the_folder_we_left() {
    let dir = fixture();
    let settings = LibrarySettings::default();
    let mut app = App::new(dir.path().to_path_buf(), &settings);

    assert!(app.enter_selected(&settings));
    app.next();

    assert!(app.go_parent(&settings));
    assert_eq!(app.dir, dir.path());
    assert_eq!(app.selected_entry().unwrap().name, "albums");
}

#[test]
fn navigation_on_empty_listing_is_a_no_op() {
    let dir = tempdir().unwrap();
    let settings = LibrarySettings::default();
    let mut app = App::new(dir.path().to_path_buf(), &settings);

    assert!(!app.has_entries());
    app.next();
    app.prev();
    app.last();
    assert_eq!(app.selected, 0);
    assert!(app.selected_entry().is_none());
    assert!(!app.enter_selected(&settings));
}
