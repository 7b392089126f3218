use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::player::{Player, RodioBackend};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.log);

    let root = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config::resolve_root_folder(&settings.library));
    tracing::info!(root = %root.display(), "starting");

    let mut app = App::new(root, &settings.library);
    let audio = Arc::new(RodioBackend::new());
    let player = Player::new(audio, settings.playback.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &player);

    player.quit();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
