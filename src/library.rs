//! Track listing and folder browsing.
//!
//! Playlists are built in one shot from a single folder; the browser lists
//! one directory level at a time.

mod browse;
mod model;
mod scan;

pub use browse::*;
pub use model::*;
pub use scan::*;
