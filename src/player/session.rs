//! The playback state machine.
//!
//! Owns the playlist, the navigation history and the transport state.
//! Everything here runs on the controller thread; other threads observe
//! through the shared [`SessionInfo`] handle or request transitions over
//! the command channel.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;

use crate::library::Playlist;

use super::backend::AudioBackend;
use super::history::History;
use super::monitor::Monitor;
use super::select::{select_next, select_previous};
use super::types::{Direction, PlaybackState, ProgressHandle, ProgressInfo, SessionHandle};

pub(super) struct PlaybackSession {
    backend: Arc<dyn AudioBackend>,
    playlist: Playlist,
    history: History,
    state: PlaybackState,
    current: Option<usize>,
    duration: Option<Duration>,
    started_at: Option<Instant>,
    accumulated: Duration,
    random_mode: bool,
    epoch: u64,
    last_error: Option<String>,
    rng: StdRng,
    info: SessionHandle,
    progress: ProgressHandle,
    monitor: Monitor,
}

impl PlaybackSession {
    pub(super) fn new(
        backend: Arc<dyn AudioBackend>,
        random_mode: bool,
        rng: StdRng,
        info: SessionHandle,
        progress: ProgressHandle,
        monitor: Monitor,
    ) -> Self {
        Self {
            backend,
            playlist: Playlist::default(),
            history: History::new(),
            state: PlaybackState::Stopped,
            current: None,
            duration: None,
            started_at: None,
            accumulated: Duration::ZERO,
            random_mode,
            epoch: 0,
            last_error: None,
            rng,
            info,
            progress,
            monitor,
        }
    }

    /// Replace the playlist. A new selection invalidates the running
    /// session outright: playback stops and the history starts over.
    pub(super) fn set_playlist(&mut self, playlist: Playlist, autostart: Option<usize>) {
        tracing::info!(tracks = playlist.len(), "playlist replaced");
        self.backend.stop();
        self.playlist = playlist;
        self.history.reset();
        self.state = PlaybackState::Stopped;
        self.current = if self.playlist.is_empty() { None } else { Some(0) };
        self.duration = None;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.epoch += 1;
        self.reset_progress();
        self.publish();

        if let Some(index) = autostart {
            self.play(index);
        }
    }

    /// Start playing the track at `index` from the beginning.
    ///
    /// Records the visit, makes exactly one backend play call, and makes
    /// sure the progress monitor is running. Out-of-range indices and empty
    /// playlists are silent no-ops; backend failures land in `last_error`
    /// and leave the machine stopped.
    pub(super) fn play(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index).cloned() else {
            return;
        };

        self.history.record(index);
        self.current = Some(index);
        self.epoch += 1;

        match self.backend.load(&track) {
            Ok(()) => {
                let duration = self.backend.duration(&track).or(track.duration);
                self.backend.play();
                self.state = PlaybackState::Playing;
                self.duration = duration;
                self.started_at = Some(Instant::now());
                self.accumulated = Duration::ZERO;
                self.last_error = None;
                tracing::info!(
                    index,
                    title = %track.title,
                    artist = track.artist.as_deref().unwrap_or("-"),
                    album = track.album.as_deref().unwrap_or("-"),
                    "playing"
                );
                self.reset_progress();
                self.publish();
                self.monitor.ensure_running();
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "backend failed to start track");
                self.backend.stop();
                self.state = PlaybackState::Stopped;
                self.duration = None;
                self.started_at = None;
                self.accumulated = Duration::ZERO;
                self.last_error = Some(err.to_string());
                self.reset_progress();
                self.publish();
            }
        }
    }

    /// Start playback when stopped, otherwise toggle pause/resume.
    pub(super) fn play_pause(&mut self) {
        match self.state {
            PlaybackState::Stopped => {
                let start = self.current.unwrap_or(0);
                self.play(start);
            }
            PlaybackState::Playing | PlaybackState::Paused => self.pause_or_resume(),
        }
    }

    /// Toggle between pause and resume. No-op while stopped.
    pub(super) fn pause_or_resume(&mut self) {
        match self.state {
            PlaybackState::Stopped => {}
            PlaybackState::Playing => {
                self.backend.pause();
                if let Some(started) = self.started_at.take() {
                    self.accumulated += started.elapsed();
                }
                self.state = PlaybackState::Paused;
                self.publish();
            }
            PlaybackState::Paused => {
                self.backend.unpause();
                self.started_at = Some(Instant::now());
                self.state = PlaybackState::Playing;
                self.publish();
                // The monitor exits while paused; bring it back.
                self.monitor.ensure_running();
            }
        }
    }

    /// Stop playback. Idempotent; the current index is retained so the
    /// track can be replayed, but the progress readout is blanked.
    pub(super) fn stop(&mut self) {
        self.backend.stop();
        self.state = PlaybackState::Stopped;
        self.duration = None;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.reset_progress();
        self.publish();
    }

    /// Move to the next or previous track per the navigation policy.
    pub(super) fn advance(&mut self, direction: Direction) {
        if self.playlist.is_empty() {
            return;
        }

        match direction {
            Direction::Next => {
                let Some(current) = self.current else {
                    self.play(0);
                    return;
                };
                if self.history.is_empty() {
                    // Nothing played yet; "next" starts at the selection.
                    self.play(current);
                    return;
                }
                match select_next(
                    &self.history,
                    self.playlist.len(),
                    current,
                    self.random_mode,
                    &mut self.rng,
                ) {
                    Some(next) => self.play(next),
                    None => {
                        tracing::info!("every track played, stopping");
                        self.stop();
                    }
                }
            }
            Direction::Previous => {
                let Some(current) = self.current else {
                    return;
                };
                if let Some(previous) = select_previous(&self.history, current) {
                    self.play(previous);
                }
            }
        }
    }

    pub(super) fn toggle_random(&mut self) {
        self.random_mode = !self.random_mode;
        tracing::debug!(random = self.random_mode, "random mode toggled");
        self.publish();
    }

    /// Handle a finish notification from the monitor. Stale epochs are
    /// dropped so an old observation can never skip a freshly started track.
    pub(super) fn track_finished(&mut self, epoch: u64) {
        if epoch != self.epoch || self.state != PlaybackState::Playing {
            tracing::debug!(epoch, current_epoch = self.epoch, "stale finish ignored");
            return;
        }
        tracing::debug!("track finished naturally");
        self.advance(Direction::Next);
    }

    /// Push the current state into the shared handle for UI and monitor.
    pub(super) fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.state = self.state;
            info.index = self.current;
            info.title = self
                .current
                .and_then(|i| self.playlist.get(i))
                .map(|t| t.display.clone());
            info.duration = self.duration;
            info.started_at = self.started_at;
            info.accumulated = self.accumulated;
            info.random_mode = self.random_mode;
            info.history_len = self.history.len();
            info.playlist_len = self.playlist.len();
            info.epoch = self.epoch;
            info.last_error = self.last_error.clone();
        }
    }

    fn reset_progress(&self) {
        if let Ok(mut progress) = self.progress.lock() {
            *progress = ProgressInfo::default();
        }
    }
}
