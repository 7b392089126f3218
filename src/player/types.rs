//! Shared player types and handles.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::library::Playlist;

/// The playback state of the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Direction for track-to-track navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Commands accepted by the controller thread.
pub enum PlayerCmd {
    /// Replace the playlist; optionally start playing at the given index.
    SetPlaylist {
        playlist: Playlist,
        autostart: Option<usize>,
    },
    /// Start playback when stopped, otherwise toggle pause/resume.
    PlayPause,
    /// Stop playback immediately.
    Stop,
    /// Move to the next or previous track.
    Advance(Direction),
    /// Toggle random track selection.
    ToggleRandom,
    /// The monitor observed the current track finish on its own.
    TrackFinished { epoch: u64 },
    /// Shut the controller thread down.
    Quit,
}

/// Runtime playback information shared with the UI and the monitor.
///
/// Written only by the controller thread; everyone else reads snapshots.
#[derive(Clone, Debug)]
pub struct SessionInfo {
    pub state: PlaybackState,
    /// Currently selected track index. Retained after a stop so the track
    /// can be replayed.
    pub index: Option<usize>,
    /// Display name of the current track.
    pub title: Option<String>,
    /// Total duration of the current track, when known.
    pub duration: Option<Duration>,
    /// When the current play segment started; `None` while paused/stopped.
    pub started_at: Option<Instant>,
    /// Elapsed time accumulated before the current segment (across pauses).
    pub accumulated: Duration,
    pub random_mode: bool,
    pub history_len: usize,
    pub playlist_len: usize,
    /// Bumped on every track start. Lets the controller drop finish
    /// notifications that a monitor observed against an older track.
    pub epoch: u64,
    /// Last backend failure, for the UI to show.
    pub last_error: Option<String>,
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self {
            state: PlaybackState::Stopped,
            index: None,
            title: None,
            duration: None,
            started_at: None,
            accumulated: Duration::ZERO,
            random_mode: false,
            history_len: 0,
            playlist_len: 0,
            epoch: 0,
            last_error: None,
        }
    }
}

/// Progress readout published by the monitor for the UI.
#[derive(Clone, Debug, Default)]
pub struct ProgressInfo {
    /// Completed fraction of the current track, clamped to 0..=100.
    pub percent: u16,
    pub elapsed: Duration,
    /// Remaining time as `MM:SS`; empty while nothing is playing.
    pub eta: String,
}

pub type SessionHandle = Arc<Mutex<SessionInfo>>;
pub type ProgressHandle = Arc<Mutex<ProgressInfo>>;
