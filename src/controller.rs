//! Playback state machine and stream handoff.

use std::path::Path;

use crate::command::PlayerCommand;
use crate::device::AudioOutput;
use crate::event::{EventCallback, PlayerEvent};
use crate::format::AudioFormat;
use crate::pipeline::{ConversionStream, DeviceCallback, MixParameters, PlaybackSlot};
use crate::source::{load_wav, SourceBuffer};
use crate::PlayerError;

/// Where the player is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// No source is active; the callback renders silence.
    #[default]
    Stopped,
    /// A source may be active and the device is delivering callbacks.
    Playing,
    /// A source is loaded but the device is suspended.
    ///
    /// Only reachable with a source loaded.
    Paused,
}

/// Owns the loaded source and drives the output device.
///
/// All commands run on the caller's thread. Expensive work (building and
/// filling a [`ConversionStream`]) happens before the shared slot is locked,
/// and the lock is then held only to swap the finished stream in. Whatever
/// gets swapped out is dropped here, on the command thread.
///
/// The controller is generic over the [`AudioOutput`] so the state machine
/// can be exercised with a [`NullOutput`](crate::NullOutput) and a
/// hand-driven [`DeviceCallback`].
pub struct PlaybackController<D: AudioOutput> {
    device: D,
    slot: PlaybackSlot,
    source: Option<SourceBuffer>,
    state: PlaybackState,
    event_callback: Option<EventCallback>,
}

impl<D: AudioOutput> PlaybackController<D> {
    /// Creates a stopped controller around an opened device and its slot.
    ///
    /// `slot` must be the one the device's callback reads from.
    pub fn new(device: D, slot: PlaybackSlot) -> Self {
        Self {
            device,
            slot,
            source: None,
            state: PlaybackState::Stopped,
            event_callback: None,
        }
    }

    /// Sets the callback that receives [`PlayerEvent`]s.
    #[must_use]
    pub fn with_event_callback(mut self, callback: EventCallback) -> Self {
        self.event_callback = Some(callback);
        self
    }

    /// Returns a callback reading from this controller's slot.
    ///
    /// Useful for driving a [`NullOutput`](crate::NullOutput) by hand.
    pub fn callback(&self) -> DeviceCallback {
        DeviceCallback::new(self.slot.clone())
    }

    /// The output device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The device's fixed output format.
    pub fn output_format(&self) -> AudioFormat {
        self.device.format()
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The loaded source, if any.
    pub fn source(&self) -> Option<&SourceBuffer> {
        self.source.as_ref()
    }

    /// Current volume in [0.0, 1.0].
    pub fn volume(&self) -> f32 {
        self.slot.mix().volume
    }

    /// Current balance in [0.0, 1.0].
    pub fn balance(&self) -> f32 {
        self.slot.mix().balance
    }

    /// Converted bytes the callback has not yet consumed.
    pub fn queued_bytes(&self) -> usize {
        self.slot.queued_bytes()
    }

    /// Converts `source` and makes it the active stream.
    ///
    /// On success the previous stream and source are released. From
    /// `Stopped` the player moves to `Paused`; otherwise the state is kept,
    /// so a track dropped in while playing starts immediately.
    ///
    /// # Errors
    ///
    /// Any conversion failure. The previous stream and source stay in place,
    /// and a [`PlayerEvent::LoadFailed`] is emitted.
    pub fn load_source(&mut self, source: SourceBuffer) -> Result<(), PlayerError> {
        let stream = match self.prepare(&source) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(format = %source.format(), error = %e, "failed to load source");
                self.emit(PlayerEvent::load_failed(&e));
                return Err(e);
            }
        };
        let converted_bytes = stream.available();

        let retired = self.slot.swap_stream(Some(stream));
        drop(retired);

        tracing::info!(
            format = %source.format(),
            source_bytes = source.len(),
            converted_bytes,
            "loaded new source"
        );
        self.emit(PlayerEvent::SourceLoaded {
            format: source.format(),
            source_bytes: source.len(),
            converted_bytes,
        });
        self.source = Some(source);

        if self.state == PlaybackState::Stopped {
            self.transition(PlaybackState::Paused);
        }
        Ok(())
    }

    /// Wraps decoded bytes in a [`SourceBuffer`] and loads them.
    ///
    /// # Errors
    ///
    /// See [`load_source`](Self::load_source).
    pub fn load_bytes(
        &mut self,
        bytes: impl Into<std::sync::Arc<[u8]>>,
        format: AudioFormat,
    ) -> Result<(), PlayerError> {
        self.load_source(SourceBuffer::new(bytes, format))
    }

    /// Decodes a WAV file and loads it.
    ///
    /// # Errors
    ///
    /// Decode or conversion failures; either way a
    /// [`PlayerEvent::LoadFailed`] is emitted and playback is untouched.
    pub fn load_track(&mut self, path: impl AsRef<Path>) -> Result<(), PlayerError> {
        let source = load_wav(path).map_err(|e| self.report_load_error(e))?;
        self.load_source(source)
    }

    /// Reports a failure from an external loader through the event channel.
    ///
    /// Returns the error for further propagation.
    pub fn report_load_error(&self, error: PlayerError) -> PlayerError {
        tracing::warn!(error = %error, "failed to load source");
        self.emit(PlayerEvent::load_failed(&error));
        error
    }

    /// Re-queues the whole current source from the beginning.
    ///
    /// The source buffer and device are kept. No-op if nothing is loaded.
    ///
    /// # Errors
    ///
    /// Conversion failures while refilling. The current stream keeps playing
    /// and a [`PlayerEvent::LoadFailed`] is emitted.
    pub fn restart(&mut self) -> Result<(), PlayerError> {
        let Some(source) = self.source.as_ref() else {
            return Ok(());
        };

        let stream = self.prepare(source).map_err(|e| {
            tracing::warn!(error = %e, "failed to restart source");
            self.emit(PlayerEvent::load_failed(&e));
            e
        })?;
        let retired = self.slot.swap_stream(Some(stream));
        drop(retired);

        tracing::debug!("restarted source");
        self.emit(PlayerEvent::Restarted);
        Ok(())
    }

    /// Resumes callback delivery. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `DeviceControl` if the backend refuses to resume.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        if self.state == PlaybackState::Playing {
            return Ok(());
        }
        self.device.resume()?;
        self.transition(PlaybackState::Playing);
        Ok(())
    }

    /// Suspends callback delivery, keeping the active stream. Idempotent.
    ///
    /// Does nothing unless playing. With no source loaded the player goes
    /// back to `Stopped`, since there is nothing to resume.
    ///
    /// # Errors
    ///
    /// Returns `DeviceControl` if the backend refuses to pause.
    pub fn pause(&mut self) -> Result<(), PlayerError> {
        if self.state != PlaybackState::Playing {
            return Ok(());
        }
        self.device.suspend()?;
        let next = if self.source.is_some() {
            PlaybackState::Paused
        } else {
            PlaybackState::Stopped
        };
        self.transition(next);
        Ok(())
    }

    /// Plays if paused or stopped, pauses if playing.
    ///
    /// # Errors
    ///
    /// See [`play`](Self::play) and [`pause`](Self::pause).
    pub fn toggle_pause(&mut self) -> Result<(), PlayerError> {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    /// Drops the active stream and source; the callback renders silence.
    ///
    /// # Errors
    ///
    /// Returns `DeviceControl` if the device cannot be suspended afterwards.
    /// The stream and source are released regardless.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        let retired = self.slot.swap_stream(None);
        drop(retired);
        self.source = None;

        let suspended = self.device.suspend();
        self.transition(PlaybackState::Stopped);
        suspended
    }

    /// Sets the volume, clamped to [0.0, 1.0].
    pub fn set_volume(&mut self, volume: f32) {
        self.slot.set_volume(volume);
    }

    /// Sets the balance, clamped to [0.0, 1.0]; 0.5 is centred.
    pub fn set_balance(&mut self, balance: f32) {
        self.slot.set_balance(balance);
    }

    /// Sets volume and balance as one update.
    pub fn set_mix(&mut self, mix: MixParameters) {
        self.slot.set_mix(mix);
    }

    /// Runs one tagged command.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns.
    pub fn dispatch(&mut self, command: PlayerCommand) -> Result<(), PlayerError> {
        tracing::debug!(%command, "dispatching command");
        match command {
            PlayerCommand::Play => self.play(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::TogglePause => self.toggle_pause(),
            PlayerCommand::Stop => self.stop(),
            PlayerCommand::Restart => self.restart(),
            PlayerCommand::LoadTrack(path) => self.load_track(path),
            PlayerCommand::SetVolume(volume) => {
                self.set_volume(volume);
                Ok(())
            }
            PlayerCommand::SetBalance(balance) => {
                self.set_balance(balance);
                Ok(())
            }
        }
    }

    /// Builds and fills a stream for `source` without touching the slot.
    fn prepare(&self, source: &SourceBuffer) -> Result<ConversionStream, PlayerError> {
        let mut stream = ConversionStream::new(source.format(), self.device.format())?;
        stream.put(source.bytes())?;
        stream.flush()?;
        Ok(stream)
    }

    fn transition(&mut self, next: PlaybackState) {
        let previous = self.state;
        if previous == next {
            return;
        }
        self.state = next;
        tracing::info!(?previous, current = ?next, "playback state changed");
        self.emit(PlayerEvent::StateChanged {
            previous,
            current: next,
        });
    }

    fn emit(&self, event: PlayerEvent) {
        if let Some(callback) = &self.event_callback {
            callback(event);
        }
    }
}
