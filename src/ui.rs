//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode, PlaybackState};
use crate::config::UiSettings;
use crate::playlist::PlaylistState;

const CONTROLS: &[(&str, &str)] = &[
    ("p", "play"),
    ("s", "pause"),
    ("h/l", "prev/next"),
    ("j/k", "up/down"),
    ("enter", "select"),
    ("a", "add files"),
    ("c", "clear"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `MM:SS`.
fn format_mmss(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the one-line status text.
fn status_text(app: &App, state: &PlaylistState) -> String {
    let mut parts: Vec<String> = Vec::new();

    let playback = match app.playback {
        PlaybackState::Unavailable => "No audio output",
        PlaybackState::Paused => "Paused",
        PlaybackState::Playing => "Playing",
        PlaybackState::Ended => "Ended",
    };
    parts.push(playback.to_string());

    match state.current_track() {
        Some(track) => parts.push(format!(
            "Track {}/{}: {} [{}]",
            state.current_index() + 1,
            state.len(),
            track.name,
            format_mmss(state.current_time())
        )),
        None => parts.push("No tracks loaded".to_string()),
    }

    if let Some(notice) = &app.notice {
        parts.push(notice.clone());
    }

    parts.join(" • ")
}

/// Numbered playlist row; the current track is emphasized.
fn track_line(position: usize, name: &str, current: bool) -> Line<'_> {
    let number = Span::raw(format!("{}. ", position + 1));
    if current {
        Line::from(vec![
            number,
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ♪"),
        ])
    } else {
        Line::from(vec![number, Span::raw(name)])
    }
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, state: &PlaylistState, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reel ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, state))
        .block(padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Playlist
    {
        let tracks = state.tracks();
        let current = state.current_index();

        // Only build items for the visible window, keeping the cursor centered when possible.
        let total = tracks.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let cursor = app.cursor.min(total.saturating_sub(1));
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let mut start = cursor.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height)
        };

        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let i = start + offset;
                ListItem::new(track_line(i, &track.name, i == current))
            })
            .collect();

        let title = format!(" {} ", ui_settings.playlist_title);
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        if total > 0 {
            list_state.select(Some(cursor - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut list_state);
    }

    let footer = match app.input_mode {
        InputMode::Normal => Paragraph::new(controls_text()).block(padded(" controls ")),
        InputMode::AddFiles => Paragraph::new(format!("{}_", app.input))
            .block(padded(" add files: paths separated by spaces, enter to load, esc to cancel ")),
    };
    frame.render_widget(footer.wrap(Wrap { trim: true }), chunks[3]);
}
