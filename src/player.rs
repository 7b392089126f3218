//! Playback engine: state machine, navigation history and progress monitor.
//!
//! The UI talks to a [`Player`] handle which forwards commands to a
//! controller thread. The controller owns all playback state; the progress
//! monitor only reads it and requests transitions back through the command
//! channel.

mod backend;
mod handle;
mod history;
mod monitor;
mod select;
mod session;
mod thread;
mod types;

pub use backend::{AudioBackend, BackendError, RodioBackend};
pub use handle::Player;
pub use history::History;
pub use monitor::format_mmss;
pub use select::{select_next, select_previous};
pub use types::*;
