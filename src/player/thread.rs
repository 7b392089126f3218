use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::PlaybackSettings;

use super::backend::AudioBackend;
use super::monitor::Monitor;
use super::session::PlaybackSession;
use super::types::{PlayerCmd, ProgressHandle, SessionHandle};

/// Spawn the controller thread: the single owner of playback state.
///
/// `tx` is a clone of the command sender so the monitor can request
/// transitions back into this loop.
pub(super) fn spawn_player_thread(
    backend: Arc<dyn AudioBackend>,
    rx: Receiver<PlayerCmd>,
    tx: Sender<PlayerCmd>,
    info: SessionHandle,
    progress: ProgressHandle,
    settings: PlaybackSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let monitor = Monitor::new(
            backend.clone(),
            info.clone(),
            progress.clone(),
            tx,
            Duration::from_millis(settings.poll_interval_ms),
        );
        let mut session = PlaybackSession::new(
            backend,
            settings.random,
            StdRng::from_os_rng(),
            info,
            progress,
            monitor,
        );
        session.publish();

        while let Ok(cmd) = rx.recv() {
            match cmd {
                PlayerCmd::SetPlaylist {
                    playlist,
                    autostart,
                } => session.set_playlist(playlist, autostart),
                PlayerCmd::PlayPause => session.play_pause(),
                PlayerCmd::Stop => session.stop(),
                PlayerCmd::Advance(direction) => session.advance(direction),
                PlayerCmd::ToggleRandom => session.toggle_random(),
                PlayerCmd::TrackFinished { epoch } => session.track_finished(epoch),
                PlayerCmd::Quit => {
                    tracing::debug!("controller quitting");
                    session.stop();
                    break;
                }
            }
        }
    })
}
