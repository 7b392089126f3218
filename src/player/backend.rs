//! Audio output backend: the capabilities the engine drives, plus the
//! `rodio` implementation used by the real application.
//!
//! The backend is injected into the engine at construction so tests can
//! substitute a deterministic fake.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use lofty::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;

use crate::library::Track;

/// Errors reported by an audio backend. The only failure the engine
/// surfaces to the user.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("audio output is not available")]
    OutputUnavailable,
}

/// Capabilities the playback engine needs from an audio device.
pub trait AudioBackend: Send + Sync {
    /// Prepare `track` for playback, replacing whatever was loaded before.
    fn load(&self, track: &Track) -> Result<(), BackendError>;
    fn play(&self);
    fn pause(&self);
    fn unpause(&self);
    fn stop(&self);
    /// Whether a loaded track still has audio left to play.
    fn is_busy(&self) -> bool;
    /// Total duration of `track`, when the backend can tell.
    fn duration(&self, track: &Track) -> Option<Duration>;
}

enum SinkCmd {
    Load {
        path: PathBuf,
        done: Sender<Result<(), BackendError>>,
    },
}

/// `rodio`-based backend.
///
/// The output stream is not `Send`, so a dedicated thread owns it and builds
/// sinks on request; transport controls act on the shared sink handle.
pub struct RodioBackend {
    tx: Sender<SinkCmd>,
    sink: Arc<Mutex<Option<Sink>>>,
}

impl RodioBackend {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<SinkCmd>();
        let sink: Arc<Mutex<Option<Sink>>> = Arc::new(Mutex::new(None));

        let slot = sink.clone();
        thread::spawn(move || {
            let stream =
                OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
            // rodio logs to stderr when OutputStream is dropped. That's useful in
            // debugging, but noisy for a TUI app.
            let mut stream = stream;
            stream.log_on_drop(false);

            while let Ok(SinkCmd::Load { path, done }) = rx.recv() {
                let result = create_sink(&stream, &path).map(|new_sink| {
                    let mut slot = slot.lock().unwrap();
                    if let Some(old) = slot.take() {
                        old.stop();
                    }
                    *slot = Some(new_sink);
                });
                let _ = done.send(result);
            }

            if let Some(s) = slot.lock().unwrap().take() {
                s.stop();
            }
        });

        Self { tx, sink }
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a paused `Sink` for the file at `path`.
fn create_sink(stream: &OutputStream, path: &Path) -> Result<Sink, BackendError> {
    let file = File::open(path).map_err(|e| BackendError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| BackendError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

impl AudioBackend for RodioBackend {
    fn load(&self, track: &Track) -> Result<(), BackendError> {
        let (done_tx, done_rx) = mpsc::channel();
        self.tx
            .send(SinkCmd::Load {
                path: track.path.clone(),
                done: done_tx,
            })
            .map_err(|_| BackendError::OutputUnavailable)?;
        done_rx.recv().map_err(|_| BackendError::OutputUnavailable)?
    }

    fn play(&self) {
        if let Ok(slot) = self.sink.lock() {
            if let Some(s) = slot.as_ref() {
                s.play();
            }
        }
    }

    fn pause(&self) {
        if let Ok(slot) = self.sink.lock() {
            if let Some(s) = slot.as_ref() {
                s.pause();
            }
        }
    }

    fn unpause(&self) {
        if let Ok(slot) = self.sink.lock() {
            if let Some(s) = slot.as_ref() {
                s.play();
            }
        }
    }

    fn stop(&self) {
        if let Ok(mut slot) = self.sink.lock() {
            if let Some(s) = slot.take() {
                s.stop();
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.sink
            .lock()
            .map(|slot| slot.as_ref().map(|s| !s.empty()).unwrap_or(false))
            .unwrap_or(false)
    }

    fn duration(&self, track: &Track) -> Option<Duration> {
        lofty::read_from_path(&track.path)
            .ok()
            .map(|tagged| tagged.properties().duration())
            .or(track.duration)
    }
}
