use super::*;
use crate::library::{LocalFile, SourceHandle, SourceRegistry};
use crate::playlist::PlaylistState;
use crate::storage::{MemoryStorage, shared};
use crossterm::event::KeyModifiers;
use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetSource(Option<String>),
    Play,
    Pause,
}

struct RecordingMedia {
    calls: Vec<Call>,
    paused: bool,
}

impl MediaHandle for RecordingMedia {
    fn set_source(&mut self, url: Option<&str>) {
        self.paused = true;
        self.calls.push(Call::SetSource(url.map(str::to_string)));
    }

    fn play(&mut self) {
        self.paused = false;
        self.calls.push(Call::Play);
    }

    fn pause(&mut self) {
        self.paused = true;
        self.calls.push(Call::Pause);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_ended(&self) -> bool {
        false
    }
}

/// The url the test registry issues for the `n`th added file.
fn issued(n: usize) -> Option<String> {
    Some(format!("local://test/{n}"))
}

struct Harness {
    settings: config::Settings,
    app: App,
    transport: Transport,
    media: RecordingMedia,
    state: EventLoopState,
    tx: Sender<MediaEvent>,
    rx: Receiver<MediaEvent>,
}

impl Harness {
    fn new(names: &[&str]) -> Self {
        let sources: SourceHandle = Arc::new(Mutex::new(SourceRegistry::with_session("test")));
        let mut transport = Transport::new(
            PlaylistState::load(shared(MemoryStorage::default())),
            sources,
        );
        if !names.is_empty() {
            let files = names
                .iter()
                .map(|n| LocalFile::from_path(&Path::new("/music").join(n)))
                .collect();
            transport.add_files(files).unwrap();
        }

        let (tx, rx) = mpsc::channel();
        let mut h = Self {
            settings: config::Settings::default(),
            app: App::new(),
            transport,
            media: RecordingMedia {
                calls: Vec::new(),
                paused: true,
            },
            state: EventLoopState::default(),
            tx,
            rx,
        };
        h.sync();
        h.media.calls.clear();
        h
    }

    fn url(&self, index: usize) -> Option<String> {
        self.transport
            .state()
            .tracks()
            .get(index)
            .map(|t| t.url.clone())
    }

    fn index(&self) -> usize {
        self.transport.state().current_index()
    }

    fn sync(&mut self) {
        sync_media_source(&self.transport, Some(&mut self.media), &mut self.state);
    }

    fn drain(&mut self) {
        drain_media_events(&self.rx, &mut self.app, &mut self.transport, &self.state).unwrap();
    }

    fn press(&mut self, code: KeyCode) -> bool {
        handle_key_event(
            KeyEvent::new(code, KeyModifiers::NONE),
            &self.settings,
            &mut self.app,
            &mut self.transport,
            Some(&mut self.media),
        )
        .unwrap()
    }

    /// What `run` does once a key arrives, up to the start of the next draw.
    fn key_pass(&mut self, code: KeyCode) {
        self.drain();
        self.press(code);
        self.sync();
        self.drain();
    }

    fn ended(&self, source: Option<String>) {
        self.tx.send(MediaEvent::Ended { source }).unwrap();
    }

    fn time_update(&self, source: Option<String>, seconds: f64) {
        self.tx
            .send(MediaEvent::TimeUpdate { source, seconds })
            .unwrap();
    }
}

#[test]
fn source_follows_the_current_track_without_playing() {
    let mut h = Harness::new(&["a.mp3", "b.mp3", "c.mp3"]);
    assert_eq!(h.state.loaded_source, h.url(0));

    h.key_pass(KeyCode::Char('l'));
    h.app.cursor = 2;
    h.key_pass(KeyCode::Enter);
    h.ended(h.url(2));
    h.drain();
    h.sync();
    h.key_pass(KeyCode::Char('c'));

    assert_eq!(
        h.media.calls,
        vec![
            Call::SetSource(issued(1)),
            Call::SetSource(issued(2)),
            Call::SetSource(issued(0)),
            Call::SetSource(None),
        ]
    );
    assert!(h.media.paused);
}

#[test]
fn unchanged_track_does_not_reload_the_source() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    h.sync();
    h.key_pass(KeyCode::Char('j'));
    assert!(h.media.calls.is_empty());
}

#[test]
fn media_events_for_the_loaded_source_drive_the_transport() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);

    h.time_update(h.url(0), 7.5);
    h.drain();
    assert_eq!(h.transport.state().current_time(), 7.5);

    h.ended(h.url(0));
    h.drain();
    assert_eq!(h.index(), 1);
    assert_eq!(h.app.cursor, 1);
}

#[test]
fn start_failure_only_sets_a_notice() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    h.tx
        .send(MediaEvent::StartFailed(crate::error::SourceError::NoSource))
        .unwrap();
    h.drain();

    assert_eq!(h.index(), 0);
    assert_eq!(h.transport.state().len(), 2);
    assert!(h.app.notice.as_deref().unwrap().contains("Error playing audio"));
}

#[test]
fn events_from_a_previous_source_are_dropped() {
    let mut h = Harness::new(&["a.mp3", "b.mp3", "c.mp3"]);
    h.key_pass(KeyCode::Char('l'));

    h.time_update(h.url(0), 99.0);
    h.ended(h.url(0));
    h.drain();

    assert_eq!(h.index(), 1);
    assert_eq!(h.transport.state().current_time(), 0.0);
}

#[test]
fn clear_is_not_undone_by_a_queued_time_update() {
    let mut h = Harness::new(&["a.mp3"]);
    h.time_update(h.url(0), 42.0);
    h.key_pass(KeyCode::Char('c'));
    assert_eq!(h.transport.state().current_time(), 0.0);

    // Same, with the update arriving just after the key was handled.
    let mut h = Harness::new(&["a.mp3"]);
    let url = h.url(0);
    h.press(KeyCode::Char('c'));
    h.time_update(url, 42.0);
    h.sync();
    h.drain();
    assert_eq!(h.transport.state().current_time(), 0.0);
    assert_eq!(h.transport.state().len(), 0);
}

#[test]
fn select_is_not_moved_by_a_queued_ended() {
    let mut h = Harness::new(&["a.mp3", "b.mp3", "c.mp3"]);
    h.ended(h.url(0));
    h.app.cursor = 1;
    h.key_pass(KeyCode::Enter);
    assert_eq!(h.index(), 1);

    // Arriving after the select, the event names a source no longer loaded.
    let mut h = Harness::new(&["a.mp3", "b.mp3", "c.mp3"]);
    h.app.cursor = 1;
    h.press(KeyCode::Enter);
    h.ended(h.url(0));
    h.sync();
    h.drain();
    assert_eq!(h.index(), 1);
}

#[test]
fn add_files_after_a_queued_ended_starts_at_the_first_track() {
    let dir = tempfile::tempdir().unwrap();
    let extra = dir.path().join("d.mp3");
    std::fs::write(&extra, b"not real").unwrap();

    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    h.ended(h.url(0));
    h.press(KeyCode::Char('a'));
    for c in extra.to_str().unwrap().chars() {
        h.press(KeyCode::Char(c));
    }
    h.key_pass(KeyCode::Enter);

    assert_eq!(h.transport.state().len(), 3);
    assert_eq!(h.index(), 0);
    assert_eq!(h.app.input_mode, InputMode::Normal);
    assert_eq!(h.app.notice.as_deref(), Some("Added 1 tracks"));
}

#[test]
fn add_prompt_reports_when_nothing_was_found() {
    let mut h = Harness::new(&[]);
    h.press(KeyCode::Char('a'));
    h.press(KeyCode::Char('x'));
    h.press(KeyCode::Enter);

    assert!(h.transport.state().is_empty());
    assert_eq!(h.app.notice.as_deref(), Some("No audio files found"));
}

#[test]
fn play_on_an_empty_playlist_sets_a_notice_and_leaves_media_alone() {
    let mut h = Harness::new(&[]);
    h.key_pass(KeyCode::Char('p'));

    assert!(h.media.calls.is_empty());
    assert_eq!(h.app.notice.as_deref(), Some("Cannot play: playlist is empty"));
}

#[test]
fn play_without_audio_output_sets_a_notice() {
    let mut h = Harness::new(&["a.mp3"]);
    let quit = handle_key_event(
        KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE),
        &h.settings,
        &mut h.app,
        &mut h.transport,
        None,
    )
    .unwrap();

    assert!(!quit);
    assert_eq!(
        h.app.notice.as_deref(),
        Some("Cannot play: audio output is not available")
    );
}

#[test]
fn play_loads_the_current_track_and_clears_the_notice() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    h.app.set_notice("stale");
    h.key_pass(KeyCode::Char('p'));

    assert_eq!(h.media.calls, vec![Call::SetSource(h.url(0)), Call::Play]);
    assert!(h.app.notice.is_none());

    h.key_pass(KeyCode::Char('s'));
    assert_eq!(h.media.calls.last(), Some(&Call::Pause));
}

#[test]
fn q_quits() {
    let mut h = Harness::new(&[]);
    assert!(h.press(KeyCode::Char('q')));
    assert!(!h.press(KeyCode::Char('z')));
}
