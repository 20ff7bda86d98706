use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AudioSettings;

use super::handle::MediaHandle;
use super::thread::spawn_media_thread;
use super::types::{MediaCmd, MediaEvent, MediaInfo, MediaInfoHandle};

/// `MediaHandle` backed by a rodio output stream on a dedicated thread.
///
/// Dropping it unloads the source, fades out, and joins the thread.
pub struct RodioMedia {
    tx: Sender<MediaCmd>,
    events: Option<Receiver<MediaEvent>>,
    info: MediaInfoHandle,
    fade_out: Duration,
    join: Option<JoinHandle<()>>,
}

impl RodioMedia {
    pub fn new(audio_settings: &AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<MediaCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
        let info: MediaInfoHandle = Arc::new(Mutex::new(MediaInfo::default()));

        let join = spawn_media_thread(
            rx,
            event_tx,
            info.clone(),
            Duration::from_millis(audio_settings.tick_ms.max(1)),
        );

        Self {
            tx,
            events: Some(event_rx),
            info,
            fade_out: Duration::from_millis(audio_settings.quit_fade_out_ms),
            join: Some(join),
        }
    }

    fn send(&self, cmd: MediaCmd) {
        // A dead audio thread already logged why; the UI keeps going silent.
        let _ = self.tx.send(cmd);
    }

    fn with_info<T>(&self, f: impl FnOnce(&MediaInfo) -> T) -> Option<T> {
        self.info.lock().ok().map(|info| f(&info))
    }
}

impl MediaHandle for RodioMedia {
    fn set_source(&mut self, src: &Path) {
        if let Ok(mut info) = self.info.lock() {
            info.position = Duration::ZERO;
            info.duration = None;
        }
        self.send(MediaCmd::SetSource(src.to_path_buf()));
    }

    fn play(&mut self) {
        self.send(MediaCmd::Play);
    }

    fn pause(&mut self) {
        self.send(MediaCmd::Pause);
    }

    fn set_position(&mut self, seconds: f64) {
        let seconds = if seconds < 0.0 { 0.0 } else { seconds };
        let pos = match Duration::try_from_secs_f64(seconds) {
            Ok(pos) => pos,
            Err(e) => {
                warn!(seconds, error = %e, "seek target out of range");
                return;
            }
        };
        if let Ok(mut info) = self.info.lock() {
            info.position = pos;
        }
        self.send(MediaCmd::Seek(pos));
    }

    fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if let Ok(mut info) = self.info.lock() {
            info.volume = volume;
        }
        self.send(MediaCmd::SetVolume(volume));
    }

    fn position(&self) -> f64 {
        self.with_info(|i| i.position.as_secs_f64()).unwrap_or(0.0)
    }

    fn duration(&self) -> f64 {
        self.with_info(|i| i.duration.map_or(f64::NAN, |d| d.as_secs_f64()))
            .unwrap_or(f64::NAN)
    }

    fn volume(&self) -> f32 {
        self.with_info(|i| i.volume).unwrap_or(1.0)
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        match &self.events {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        }
    }

    fn release(&mut self) {
        if self.events.take().is_some() {
            debug!("releasing media handle");
            if let Ok(mut info) = self.info.lock() {
                let volume = info.volume;
                *info = MediaInfo {
                    volume,
                    ..MediaInfo::default()
                };
            }
            self.send(MediaCmd::Unload {
                fade_out_ms: self.fade_out.as_millis() as u64,
            });
        }
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        self.release();
        self.send(MediaCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
