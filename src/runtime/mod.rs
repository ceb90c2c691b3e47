use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioPlayer, MediaEvent};
use crate::library::{SourceHandle, SourceRegistry};
use crate::logging;
use crate::playlist::{PlaylistState, Transport};

mod event_loop;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = startup::load_settings();

    match logging::init(&settings.log) {
        Ok(Some(path)) => info!("logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("reel: failed to set up logging: {e}"),
    }

    let storage = startup::open_storage(&settings.storage);
    let sources: SourceHandle = Arc::new(Mutex::new(SourceRegistry::new()));
    let mut transport = Transport::new(PlaylistState::load(storage), sources.clone());

    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    startup::add_initial_files(&mut transport, &paths, &settings.library)?;

    let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
    let mut media = match AudioPlayer::new(sources, &settings.playback, event_tx) {
        Ok(player) => Some(player),
        Err(e) => {
            error!("audio output unavailable: {e}");
            None
        }
    };

    let mut app = App::new();
    app.follow(transport.state().current_index());
    if media.is_none() {
        app.set_notice("Audio output unavailable");
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut transport,
            &mut media,
            &event_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(player) = media.take() {
        player.shutdown();
    }
    if let Err(e) = &run_result {
        error!("exiting after error: {e}");
    }

    run_result
}
