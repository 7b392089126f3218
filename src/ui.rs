//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::{TimeField, UiSettings};
use crate::library::EntryKind;
use crate::player::{PlaybackState, ProgressInfo, SessionInfo, format_mmss};

/// Build the "now playing" status text from the session snapshot.
fn status_text(session: &SessionInfo) -> String {
    match session.state {
        PlaybackState::Playing => {
            format!("Playing: {}", session.title.as_deref().unwrap_or("?"))
        }
        PlaybackState::Paused => {
            format!("Paused: {}", session.title.as_deref().unwrap_or("?"))
        }
        PlaybackState::Stopped => match &session.last_error {
            Some(err) => format!("Playback failed: {}", err),
            None => "No song playing".to_string(),
        },
    }
}

/// Build the time readout next to the progress bar per `UiSettings`.
fn time_text(session: &SessionInfo, progress: &ProgressInfo, ui: &UiSettings) -> Option<String> {
    if ui.time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(progress.elapsed)),
            TimeField::Total => {
                if let Some(t) = session.duration {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if !progress.eta.is_empty() {
                    parts.push(format!("-{}", progress.eta));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.time_separator))
    }
}

fn controls_line(session: &SessionInfo) -> Line<'static> {
    let has_playlist = session.playlist_len > 0;
    // Previous only makes sense once the history is two deep.
    let prev_enabled = session.history_len > 1;

    fn push(spans: &mut Vec<Span<'static>>, text: &str, enabled: bool) {
        if !spans.is_empty() {
            spans.push(Span::raw(" | "));
        }
        if enabled {
            spans.push(Span::raw(text.to_string()));
        } else {
            spans.push(Span::styled(
                text.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let mut spans: Vec<Span<'static>> = Vec::new();
    push(&mut spans, "[j/k] move", true);
    push(&mut spans, "[gg/G] top/bottom", true);
    push(&mut spans, "[enter] open/play", true);
    push(&mut spans, "[h/bksp] parent", true);
    push(&mut spans, "[space] play/pause", has_playlist);
    push(&mut spans, "[s] stop", has_playlist);
    push(&mut spans, "[p] prev", prev_enabled);
    push(&mut spans, "[n] next", has_playlist);
    push(&mut spans, "[r] random", has_playlist);
    push(&mut spans, "[q] quit", true);
    Line::from(spans)
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    session: &SessionInfo,
    progress: &ProgressInfo,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rondo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Folder browser
    {
        let items: Vec<ListItem> = app
            .entries
            .iter()
            .map(|e| match e.kind {
                EntryKind::Folder => ListItem::new(format!("{}/", e.name))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                EntryKind::Track => ListItem::new(e.name.clone()),
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", app.dir.display())),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if app.has_entries() {
            state.select(Some(app.selected));
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    // Now playing: status, progress bar + ETA, session details
    {
        let block = Block::default().borders(Borders::ALL).title(" now playing ");
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(status_text(session)), rows[0]);

        let gauge_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(7)])
            .split(rows[1]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(progress.percent.min(100));
        frame.render_widget(gauge, gauge_row[0]);

        let eta = Paragraph::new(progress.eta.as_str()).alignment(Alignment::Right);
        frame.render_widget(eta, gauge_row[1]);

        let mut parts: Vec<String> = Vec::new();
        if let Some(time) = time_text(session, progress, ui_settings) {
            parts.push(time);
        }
        parts.push(if session.random_mode {
            "Random: ON".to_string()
        } else {
            "Random: OFF".to_string()
        });
        if let Some(dir) = &app.playlist_dir {
            parts.push(format!(
                "Playlist: {} ({} tracks)",
                dir.display(),
                session.playlist_len
            ));
        }
        frame.render_widget(Paragraph::new(parts.join(" • ")), rows[2]);
    }

    // Controls footer with enablement dimming
    let footer = Paragraph::new(controls_line(session))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
