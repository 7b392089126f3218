use std::fs;
use std::path::Path;

use crate::config::LibrarySettings;

use super::model::{Entry, EntryKind};
use super::scan::{is_audio_file, is_hidden};

/// List the sub-folders and audio files directly inside `dir`.
///
/// One lexicographic listing, folders and files interleaved by name.
/// Unreadable directories yield an empty listing.
pub fn list_entries(dir: &Path, settings: &LibrarySettings) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();

    let Ok(read) = fs::read_dir(dir) else {
        return entries;
    };

    for entry in read.filter_map(Result::ok) {
        let path = entry.path();
        if !settings.include_hidden && is_hidden(&path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        if path.is_dir() {
            entries.push(Entry {
                path,
                name,
                kind: EntryKind::Folder,
            });
        } else if is_audio_file(&path, settings) {
            entries.push(Entry {
                path,
                name,
                kind: EntryKind::Track,
            });
        }
    }

    entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    entries
}
