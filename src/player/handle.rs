use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::PlaybackSettings;

use super::backend::AudioBackend;
use super::thread::spawn_player_thread;
use super::types::{PlayerCmd, ProgressHandle, ProgressInfo, SessionHandle, SessionInfo};

/// Handle the UI holds onto: a command channel into the controller thread
/// plus the shared read-only info handles.
pub struct Player {
    tx: Sender<PlayerCmd>,
    session: SessionHandle,
    progress: ProgressHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn new(backend: Arc<dyn AudioBackend>, settings: PlaybackSettings) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let session: SessionHandle = Arc::new(Mutex::new(SessionInfo::default()));
        let progress: ProgressHandle = Arc::new(Mutex::new(ProgressInfo::default()));

        let join = spawn_player_thread(
            backend,
            rx,
            tx.clone(),
            session.clone(),
            progress.clone(),
            settings,
        );

        Self {
            tx,
            session,
            progress,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), mpsc::SendError<PlayerCmd>> {
        self.tx.send(cmd)
    }

    pub fn session_handle(&self) -> SessionHandle {
        self.session.clone()
    }

    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    /// Stop playback and join the controller thread.
    pub fn quit(&self) {
        let _ = self.send(PlayerCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}
