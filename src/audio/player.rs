use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::warn;

use crate::config::PlaybackSettings;
use crate::error::SourceError;
use crate::library::SourceHandle;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaEvent, MediaHandle, PlaybackHandle, PlaybackInfo};

/// Media handle backed by the default audio output device.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the audio thread. Fails when no output device can be opened.
    pub fn new(
        sources: SourceHandle,
        settings: &PlaybackSettings,
        events: Sender<MediaEvent>,
    ) -> Result<Self, SourceError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(
            rx,
            ready_tx,
            playback_info.clone(),
            sources,
            events,
            Duration::from_millis(settings.time_update_interval_ms.max(1)),
        );

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = audio_handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = audio_handle.join();
                return Err(SourceError::NoOutputDevice(
                    "audio thread exited during startup".to_string(),
                ));
            }
        }

        Ok(Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        })
    }

    /// Stop playback and wait for the audio thread to exit.
    pub fn shutdown(&self) {
        self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!("audio thread is gone, dropping {:?}", e.0);
        }
    }

    fn update_info(&self, f: impl FnOnce(&mut PlaybackInfo)) {
        if let Ok(mut info) = self.playback.lock() {
            f(&mut info);
        }
    }
}

// State flags are flipped here before the command is queued so queries right
// after a request see its effect; the audio thread corrects them on failure.
impl MediaHandle for AudioPlayer {
    fn set_source(&mut self, url: Option<&str>) {
        self.update_info(|info| {
            info.paused = true;
            info.ended = false;
        });
        self.send(AudioCmd::Load(url.map(str::to_string)));
    }

    fn play(&mut self) {
        self.update_info(|info| {
            info.paused = false;
            info.ended = false;
        });
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.update_info(|info| info.paused = true);
        self.send(AudioCmd::Pause);
    }

    fn is_paused(&self) -> bool {
        self.playback.lock().map(|info| info.paused).unwrap_or(true)
    }

    fn is_ended(&self) -> bool {
        self.playback.lock().map(|info| info.ended).unwrap_or(false)
    }
}
