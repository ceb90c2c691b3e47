use std::sync::PoisonError;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::debug;
use rodio::{OutputStreamBuilder, Sink};

use crate::error::SourceError;
use crate::library::SourceHandle;

use super::sink::{create_sink, resolve_source};
use super::types::{AudioCmd, MediaEvent, PlaybackHandle, PlaybackInfo};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The loaded source and its sink, owned by the audio thread.
#[derive(Default)]
struct Deck {
    source: Option<String>,
    sink: Option<Sink>,
    started_at: Option<Instant>,
    accumulated: Duration,
    last_time_update: Option<Instant>,
}

impl Deck {
    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    /// Drop the sink and rewind. The source stays loaded.
    fn rewind(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.last_time_update = None;
    }
}

fn publish(playback_info: &PlaybackHandle, f: impl FnOnce(&mut PlaybackInfo)) {
    if let Ok(mut info) = playback_info.lock() {
        f(&mut info);
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    ready: SyncSender<Result<(), SourceError>>,
    playback_info: PlaybackHandle,
    sources: SourceHandle,
    events: Sender<MediaEvent>,
    time_update_interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(SourceError::NoOutputDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would land on the TUI.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut deck = Deck::default();

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(AudioCmd::Load(url)) => {
                    deck.rewind();
                    deck.source = url;
                    publish(&playback_info, |info| {
                        info.paused = true;
                        info.ended = false;
                    });
                }

                Ok(AudioCmd::Play) => {
                    if deck.sink.is_none() {
                        let sink = {
                            let registry = sources.lock().unwrap_or_else(PoisonError::into_inner);
                            resolve_source(&registry, deck.source.as_deref())
                        }
                        .and_then(|path| create_sink(&stream, &path));

                        match sink {
                            Ok(sink) => deck.sink = Some(sink),
                            Err(e) => {
                                publish(&playback_info, |info| info.paused = true);
                                let _ = events.send(MediaEvent::StartFailed(e));
                                continue;
                            }
                        }
                    }

                    if let Some(ref s) = deck.sink {
                        s.play();
                    }
                    if deck.started_at.is_none() {
                        deck.started_at = Some(Instant::now());
                    }
                    publish(&playback_info, |info| {
                        info.paused = false;
                        info.ended = false;
                    });
                }

                Ok(AudioCmd::Pause) => {
                    if let Some(ref s) = deck.sink {
                        s.pause();
                    }
                    if let Some(st) = deck.started_at.take() {
                        deck.accumulated += st.elapsed();
                    }
                    publish(&playback_info, |info| info.paused = true);
                }

                Ok(AudioCmd::Quit) | Err(RecvTimeoutError::Disconnected) => {
                    deck.rewind();
                    debug!("audio thread shutting down");
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {}
            }

            if !deck.is_playing() {
                continue;
            }

            let drained = deck.sink.as_ref().is_some_and(|s| s.empty());
            if drained {
                // The next play request starts the source over.
                deck.rewind();
                publish(&playback_info, |info| {
                    info.paused = true;
                    info.ended = true;
                });
                let _ = events.send(MediaEvent::Ended {
                    source: deck.source.clone(),
                });
            } else if deck
                .last_time_update
                .is_none_or(|t| t.elapsed() >= time_update_interval)
            {
                deck.last_time_update = Some(Instant::now());
                let _ = events.send(MediaEvent::TimeUpdate {
                    source: deck.source.clone(),
                    seconds: deck.elapsed().as_secs_f64(),
                });
            }
        }
    })
}
