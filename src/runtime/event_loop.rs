use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, error, info};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode, PlaybackState};
use crate::audio::{AudioPlayer, MediaEvent, MediaHandle};
use crate::config;
use crate::library::collect_files;
use crate::playlist::Transport;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Source url last assigned to the media handle.
    loaded_source: Option<String>,
}

fn media_handle(media: &mut Option<AudioPlayer>) -> Option<&mut dyn MediaHandle> {
    media.as_mut().map(|m| m as &mut dyn MediaHandle)
}

/// Main terminal event loop: handles input, media events and drawing.
/// Returns `Ok(())` when the user quits; storage failures end the loop with
/// an error.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    transport: &mut Transport,
    media: &mut Option<AudioPlayer>,
    media_events: &Receiver<MediaEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // The media source follows the current track, whatever changed it.
        sync_media_source(transport, media_handle(media), state);
        drain_media_events(media_events, app, transport, state)?;

        app.playback = PlaybackState::observe(media.as_ref().map(|m| m as &dyn MediaHandle));

        terminal.draw(|f| ui::draw(f, app, transport.state(), &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Events that arrived while polling happened before this key.
                drain_media_events(media_events, app, transport, state)?;
                if handle_key_event(key, settings, app, transport, media_handle(media))? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn sync_media_source(
    transport: &Transport,
    media: Option<&mut dyn MediaHandle>,
    state: &mut EventLoopState,
) {
    let wanted = transport.state().current_track().map(|t| t.url.clone());
    if wanted == state.loaded_source {
        return;
    }
    if let Some(media) = media {
        media.set_source(wanted.as_deref());
    }
    state.loaded_source = wanted;
}

fn drain_media_events(
    media_events: &Receiver<MediaEvent>,
    app: &mut App,
    transport: &mut Transport,
    state: &EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Ok(ev) = media_events.try_recv() {
        handle_media_event(ev, app, transport, state)?;
    }
    Ok(())
}

fn handle_media_event(
    ev: MediaEvent,
    app: &mut App,
    transport: &mut Transport,
    state: &EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    match ev {
        MediaEvent::Ended { source } | MediaEvent::TimeUpdate { source, .. }
            if source != state.loaded_source =>
        {
            debug!("dropping media event for {source:?}, no longer loaded");
        }
        MediaEvent::Ended { .. } => {
            transport.on_track_ended()?;
            app.follow(transport.state().current_index());
        }
        MediaEvent::TimeUpdate { seconds, .. } => {
            transport.on_time_update(seconds)?;
        }
        MediaEvent::StartFailed(e) => {
            error!("error playing audio: {e}");
            app.set_notice(format!("Error playing audio: {e}"));
        }
    }
    Ok(())
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    transport: &mut Transport,
    media: Option<&mut dyn MediaHandle>,
) -> Result<bool, Box<dyn std::error::Error>> {
    if app.input_mode == InputMode::AddFiles {
        match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.pop_input_char(),
            KeyCode::Enter => {
                let paths = app.take_input_paths();
                let files = collect_files(&paths, &settings.library);
                if files.is_empty() {
                    app.set_notice("No audio files found");
                } else {
                    let count = files.len();
                    transport.add_files(files)?;
                    app.follow(transport.state().current_index());
                    app.set_notice(format!("Added {count} tracks"));
                }
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_input_char(c);
                }
            }
            _ => {}
        }

        return Ok(false);
    }

    let len = transport.state().len();
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('p') => {
            if let Err(e) = transport.play(media) {
                error!("cannot play: {e}");
                app.set_notice(format!("Cannot play: {e}"));
            } else {
                app.notice = None;
            }
        }
        KeyCode::Char('s') | KeyCode::Char(' ') => transport.pause(media),
        KeyCode::Char('l') | KeyCode::Right => {
            transport.next()?;
            app.follow(transport.state().current_index());
        }
        KeyCode::Char('h') | KeyCode::Left => {
            transport.previous()?;
            app.follow(transport.state().current_index());
        }
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(len),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(len),
        KeyCode::Enter => {
            transport.select(app.cursor)?;
        }
        KeyCode::Char('a') => app.enter_add_mode(),
        KeyCode::Char('c') => {
            transport.clear()?;
            app.follow(0);
            info!("playlist cleared");
            app.set_notice("Playlist cleared");
        }
        _ => {}
    }

    Ok(false)
}

#[cfg(test)]
mod tests;
