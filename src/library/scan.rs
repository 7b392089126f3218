use std::path::Path;
use std::time::Duration;

use lofty::{AudioFile, ItemKey, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Playlist, Track};

pub(crate) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| e == ext)
        })
        .unwrap_or(false)
}

pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}

fn read_track(path: &Path) -> Track {
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = default_title;
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration: Option<Duration> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                let v = v.trim();
                if !v.is_empty() {
                    album = Some(v.to_string());
                }
            }
        }
    }

    let display = make_display(&title, artist.as_deref());

    Track {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        duration,
        display,
    }
}

/// Build a playlist from the audio files directly inside `dir`.
///
/// The listing is one level deep and sorted by file name, so re-selecting
/// the same folder yields the same order.
pub fn tracks_in_folder(dir: &Path, settings: &LibrarySettings) -> Playlist {
    let mut tracks: Vec<Track> = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            tracks.push(read_track(path));
        }
    }

    tracks.sort_by(|a, b| file_name_key(&a.path).cmp(&file_name_key(&b.path)));
    Playlist::new(tracks)
}

fn file_name_key(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn make_display_prefers_artist_dash_title() {
        assert_eq!(make_display("Song", Some("Artist")), "Artist - Song");
        assert_eq!(make_display("Song", Some("  Artist  ")), "Artist - Song");
        assert_eq!(make_display("Song", None), "Song");
        assert_eq!(make_display("Song", Some("")), "Song");
        assert_eq!(make_display("Song", Some("   ")), "Song");
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn tracks_in_folder_filters_and_sorts_by_file_name() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let settings = LibrarySettings::default();
        let playlist = tracks_in_folder(dir.path(), &settings);
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.get(0).unwrap().title, "A");
        assert_eq!(playlist.get(1).unwrap().title, "b");
    }

    #[test]
    fn tracks_in_folder_does_not_descend_into_subfolders() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let playlist = tracks_in_folder(dir.path(), &LibrarySettings::default());
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.get(0).unwrap().title, "root");
    }

    #[test]
    fn tracks_in_folder_respects_include_hidden() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings::default();
        let playlist = tracks_in_folder(dir.path(), &settings);
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.get(0).unwrap().title, "visible");

        let settings = LibrarySettings {
            include_hidden: true,
            ..LibrarySettings::default()
        };
        let playlist = tracks_in_folder(dir.path(), &settings);
        assert_eq!(playlist.len(), 2);
    }

    #[test]
    fn playlist_position_of_finds_tracks_by_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("two.mp3"), b"not real").unwrap();

        let playlist = tracks_in_folder(dir.path(), &LibrarySettings::default());
        assert_eq!(playlist.position_of(&dir.path().join("two.mp3")), Some(1));
        assert_eq!(playlist.position_of(Path::new("/nowhere.mp3")), None);
    }
}
