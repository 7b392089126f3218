//! Background progress monitor.
//!
//! A single polling thread samples elapsed time against the current track's
//! duration, publishes a percent + ETA readout for the UI, and tells the
//! controller when a track finished on its own. It never mutates session
//! state directly.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::backend::AudioBackend;
use super::types::{PlaybackState, PlayerCmd, ProgressHandle, SessionHandle, SessionInfo};

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub(super) struct Monitor {
    /// Instance guard: at most one worker thread alive at a time.
    active: Arc<Mutex<bool>>,
    backend: Arc<dyn AudioBackend>,
    session: SessionHandle,
    progress: ProgressHandle,
    tx: Sender<PlayerCmd>,
    poll_interval: Duration,
}

impl Monitor {
    pub(super) fn new(
        backend: Arc<dyn AudioBackend>,
        session: SessionHandle,
        progress: ProgressHandle,
        tx: Sender<PlayerCmd>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            active: Arc::new(Mutex::new(false)),
            backend,
            session,
            progress,
            tx,
            poll_interval,
        }
    }

    /// Start the polling thread unless one is already alive.
    pub(super) fn ensure_running(&self) {
        let mut active = self.active.lock().unwrap();
        if *active {
            return;
        }
        *active = true;
        tracing::debug!("starting progress monitor");

        let worker = MonitorWorker {
            active: self.active.clone(),
            backend: self.backend.clone(),
            session: self.session.clone(),
            progress: self.progress.clone(),
            tx: self.tx.clone(),
            poll_interval: self.poll_interval,
        };
        thread::spawn(move || worker.run());
    }
}

struct MonitorWorker {
    active: Arc<Mutex<bool>>,
    backend: Arc<dyn AudioBackend>,
    session: SessionHandle,
    progress: ProgressHandle,
    tx: Sender<PlayerCmd>,
    poll_interval: Duration,
}

impl MonitorWorker {
    fn run(self) {
        // One finish notification per epoch; the controller keeps playing
        // after an advance and this loop keeps watching the new track.
        let mut finished_epoch: Option<u64> = None;

        loop {
            thread::sleep(self.poll_interval);

            let snapshot: SessionInfo = match self.session.lock() {
                Ok(info) => info.clone(),
                Err(_) => break,
            };

            match snapshot.state {
                PlaybackState::Playing => {
                    if self.backend.is_busy() {
                        self.publish_progress(&snapshot);
                    } else if finished_epoch != Some(snapshot.epoch) {
                        finished_epoch = Some(snapshot.epoch);
                        let finished = PlayerCmd::TrackFinished {
                            epoch: snapshot.epoch,
                        };
                        if self.tx.send(finished).is_err() {
                            break;
                        }
                    }
                }
                PlaybackState::Paused | PlaybackState::Stopped => {
                    // Exit, but re-check under the instance guard: a resume
                    // may have raced us here, and it will have seen this
                    // worker as alive and not started another.
                    let mut active = self.active.lock().unwrap();
                    let still_playing = self
                        .session
                        .lock()
                        .map(|info| info.state == PlaybackState::Playing)
                        .unwrap_or(false);
                    if still_playing {
                        continue;
                    }
                    *active = false;
                    break;
                }
            }
        }
        tracing::debug!("progress monitor stopped");
    }

    fn publish_progress(&self, info: &SessionInfo) {
        let Some(duration) = info.duration else {
            return;
        };
        if duration.is_zero() {
            return;
        }

        let elapsed = info.accumulated
            + info
                .started_at
                .map_or(Duration::ZERO, |started| started.elapsed());
        let remaining = duration.saturating_sub(elapsed);
        let percent =
            ((elapsed.as_secs_f64() / duration.as_secs_f64()) * 100.0).clamp(0.0, 100.0) as u16;

        if let Ok(mut progress) = self.progress.lock() {
            progress.percent = percent;
            progress.elapsed = elapsed;
            progress.eta = format_mmss(remaining);
        }
    }
}
