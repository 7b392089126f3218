use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::library::{self, EntryKind};
use crate::player::{Direction, Player, PlayerCmd, ProgressInfo, SessionInfo};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
}

/// Main terminal event loop: draws the UI from the shared player handles
/// and translates key presses into browser moves and player commands.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
) -> Result<(), Box<dyn std::error::Error>> {
    let session_handle = player.session_handle();
    let progress_handle = player.progress_handle();
    let mut state = EventLoopState { pending_gg: false };

    loop {
        let session: SessionInfo = session_handle
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        let progress: ProgressInfo = progress_handle
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default();

        terminal.draw(|f| ui::draw(f, app, &session, &progress, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, &session, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Handle one key press. Returns `true` when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    session: &SessionInfo,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.last();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            select_entry(settings, app, player);
        }
        KeyCode::Char('h') | KeyCode::Backspace => {
            state.pending_gg = false;
            app.go_parent(&settings.library);
        }
        KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = player.send(PlayerCmd::PlayPause);
        }
        KeyCode::Char('s') => {
            state.pending_gg = false;
            let _ = player.send(PlayerCmd::Stop);
        }
        KeyCode::Char('n') | KeyCode::Char('l') => {
            state.pending_gg = false;
            if session.playlist_len > 0 {
                let _ = player.send(PlayerCmd::Advance(Direction::Next));
            }
        }
        KeyCode::Char('p') => {
            state.pending_gg = false;
            // Previous stays disabled until the history is two deep.
            if session.history_len > 1 {
                let _ = player.send(PlayerCmd::Advance(Direction::Previous));
            }
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            if session.playlist_len > 0 {
                let _ = player.send(PlayerCmd::ToggleRandom);
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

/// Act on the selected browser entry: a folder becomes the playlist and is
/// stepped into; a track starts playback within its folder's playlist.
fn select_entry(settings: &config::Settings, app: &mut App, player: &Player) {
    let Some(entry) = app.selected_entry().cloned() else {
        return;
    };

    match entry.kind {
        EntryKind::Folder => {
            let playlist = library::tracks_in_folder(&entry.path, &settings.library);
            app.set_playlist_dir(entry.path.clone());
            app.enter_selected(&settings.library);
            let _ = player.send(PlayerCmd::SetPlaylist {
                playlist,
                autostart: None,
            });
        }
        EntryKind::Track => {
            let playlist = library::tracks_in_folder(&app.dir, &settings.library);
            let autostart = playlist.position_of(&entry.path);
            app.set_playlist_dir(app.dir.clone());
            let _ = player.send(PlayerCmd::SetPlaylist {
                playlist,
                autostart,
            });
        }
    }
}
