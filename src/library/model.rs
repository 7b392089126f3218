use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}

/// An ordered list of tracks built from one folder selection.
///
/// Immutable once built: selecting another folder replaces the whole
/// playlist (and resets the navigation history with it).
#[derive(Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Position of the track with the given path, if it is in the playlist.
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }
}

/// What a browser row points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    Track,
}

/// One row in the folder browser.
#[derive(Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}
