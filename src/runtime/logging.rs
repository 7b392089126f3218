use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Initialize the `tracing` subscriber writing to the configured file.
///
/// The terminal belongs to the TUI, so logging stays off unless a file is
/// configured.
pub fn init(settings: &LogSettings) {
    let Some(path) = &settings.file else {
        return;
    };

    let file = match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("rondo: cannot open log file {path}: {e}");
            return;
        }
    };

    let filter =
        EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}
