use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::MediaError;

use super::clock::PlayClock;
use super::sink::{create_sink_at, probe_duration};
use super::types::{MediaCmd, MediaEvent, MediaInfoHandle};

/// Everything the audio thread owns besides the output stream.
struct Worker {
    info: MediaInfoHandle,
    events: Sender<MediaEvent>,
    source: Option<PathBuf>,
    sink: Option<Sink>,
    clock: PlayClock,
    duration: Option<Duration>,
    volume: f32,
}

impl Worker {
    fn new(info: MediaInfoHandle, events: Sender<MediaEvent>) -> Self {
        Self {
            info,
            events,
            source: None,
            sink: None,
            clock: PlayClock::default(),
            duration: None,
            volume: 1.0,
        }
    }

    fn emit(&self, ev: MediaEvent) {
        // The receiver is gone once the handle is released; nothing to tell.
        let _ = self.events.send(ev);
    }

    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.position = self.clock.elapsed();
            info.duration = self.duration;
            info.volume = self.volume;
        }
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// (Re)build the sink for the current source at `start_at`. Failures are
    /// logged and leave no sink behind.
    fn load(&mut self, stream: Option<&OutputStream>, start_at: Duration) {
        self.stop_sink();
        let (Some(stream), Some(path)) = (stream, self.source.as_deref()) else {
            return;
        };
        match create_sink_at(stream, path, start_at) {
            Ok((sink, total)) => {
                sink.set_volume(self.volume);
                if self.clock.is_running() {
                    sink.play();
                }
                self.sink = Some(sink);
                if self.duration.is_none() {
                    self.duration = total.or_else(|| probe_duration(path));
                }
            }
            Err(e) => warn!(error = %e, "media load failed"),
        }
    }

    fn set_source(&mut self, stream: Option<&OutputStream>, src: Option<PathBuf>) {
        let old_duration = self.duration;
        self.clock.reset();
        self.duration = None;
        self.source = src;
        if let Some(p) = &self.source {
            debug!(src = %p.display(), "loading source");
            self.load(stream, Duration::ZERO);
        } else {
            self.stop_sink();
        }
        self.publish();
        self.emit(MediaEvent::TimeUpdate);
        if self.duration != old_duration {
            self.emit(MediaEvent::DurationChange);
        }
    }

    /// The source played to its end: the sink drained, or the clock reached
    /// the known duration.
    fn at_end(&self) -> bool {
        let drained = self.sink.as_ref().is_some_and(Sink::empty);
        let past_end = self.duration.is_some_and(|d| self.clock.elapsed() >= d);
        drained || past_end
    }

    fn play(&mut self, stream: Option<&OutputStream>) {
        if self.source.is_none() {
            return;
        }
        let at_end = self.at_end();
        self.clock.resume();
        if at_end {
            // Start over, like a media element does.
            self.clock.set(Duration::ZERO);
            self.load(stream, Duration::ZERO);
        } else if let Some(s) = self.sink.as_ref() {
            s.play();
        } else {
            // Nothing loaded yet (no device or a failed decode): retry at the
            // current position.
            self.load(stream, self.clock.elapsed());
        }
        self.publish();
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.clock.pause();
        self.publish();
    }

    fn seek(&mut self, stream: Option<&OutputStream>, pos: Duration) {
        if self.source.is_none() {
            return;
        }
        let pos = self.duration.map_or(pos, |d| pos.min(d));
        self.clock.set(pos);
        self.load(stream, pos);
        self.publish();
        self.emit(MediaEvent::TimeUpdate);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
        self.publish();
        self.emit(MediaEvent::VolumeChange);
    }

    /// Periodic position report; also notices the end of the source.
    fn tick(&mut self) {
        if !self.clock.is_running() {
            return;
        }
        if self.at_end() {
            self.clock.pause();
            if let Some(d) = self.duration {
                self.clock.set(d);
            }
        }
        self.publish();
        self.emit(MediaEvent::TimeUpdate);
    }

    fn fade_out(&self, fade_out_ms: u64) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if fade_out_ms == 0 || !self.clock.is_running() {
            return;
        }
        let steps: u64 = 20;
        let step_ms = (fade_out_ms / steps).max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            sink.set_volume(self.volume * (1.0 - t));
            thread::sleep(Duration::from_millis(step_ms));
        }
    }
}

pub(super) fn spawn_media_thread(
    rx: Receiver<MediaCmd>,
    events: Sender<MediaEvent>,
    info: MediaInfoHandle,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream().map_err(MediaError::from) {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped; noisy for a TUI.
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                warn!(error = %e, "playback is silent");
                None
            }
        };
        let stream = stream.as_ref();

        let mut worker = Worker::new(info, events);

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    MediaCmd::SetSource(src) => worker.set_source(stream, Some(src)),
                    MediaCmd::Unload { fade_out_ms } => {
                        worker.fade_out(fade_out_ms);
                        worker.set_source(stream, None);
                    }
                    MediaCmd::Play => worker.play(stream),
                    MediaCmd::Pause => worker.pause(),
                    MediaCmd::Seek(pos) => worker.seek(stream, pos),
                    MediaCmd::SetVolume(v) => worker.set_volume(v),
                    MediaCmd::Quit => {
                        worker.stop_sink();
                        worker.clock.pause();
                        worker.publish();
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => worker.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("media thread exiting");
    })
}
