//! Browser model: the directory listing the user navigates.
//!
//! Selecting a folder makes it the playlist; selecting a track plays it
//! within its folder's playlist. Playback itself lives in the player.

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;
use crate::library::{self, Entry, EntryKind};

pub struct App {
    /// Directory currently listed in the browser.
    pub dir: PathBuf,
    pub entries: Vec<Entry>,
    pub selected: usize,
    /// Folder the current playlist was built from, for display.
    pub playlist_dir: Option<PathBuf>,
}

impl App {
    pub fn new(dir: PathBuf, settings: &LibrarySettings) -> Self {
        let entries = library::list_entries(&dir, settings);
        Self {
            dir,
            entries,
            selected: 0,
            playlist_dir: None,
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.entries.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Descend into the selected folder. Returns whether the directory changed.
    pub fn enter_selected(&mut self, settings: &LibrarySettings) -> bool {
        let Some(entry) = self.selected_entry() else {
            return false;
        };
        if entry.kind != EntryKind::Folder {
            return false;
        }
        let dir = entry.path.clone();
        self.change_dir(dir, settings);
        true
    }

    /// Go up to the parent folder, landing on the folder we just left.
    /// Returns whether the directory changed.
    pub fn go_parent(&mut self, settings: &LibrarySettings) -> bool {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return false;
        };
        let came_from = self.dir.clone();
        self.change_dir(parent, settings);
        if let Some(pos) = self.entries.iter().position(|e| e.path == came_from) {
            self.selected = pos;
        }
        true
    }

    pub fn set_playlist_dir(&mut self, dir: PathBuf) {
        self.playlist_dir = Some(dir);
    }

    fn change_dir(&mut self, dir: PathBuf, settings: &LibrarySettings) {
        self.entries = library::list_entries(&dir, settings);
        self.dir = dir;
        self.selected = 0;
    }
}
