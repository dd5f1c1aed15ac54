//! The owned player context and its builder.

use std::path::Path;

use crate::controller::{PlaybackController, PlaybackState};
use crate::device::{AudioOutput, OutputDevice};
use crate::pipeline::{MixParameters, PlaybackSlot};
use crate::source::SourceBuffer;
use crate::{event_callback, EventCallback, PlayerCommand, PlayerConfig, PlayerError, PlayerEvent};

/// A running audio player.
///
/// Owns the output device and the playback controller. Created once at
/// startup with [`Player::builder()`]; dropping it closes the device.
///
/// All methods run on the calling thread; only the device callback runs
/// elsewhere.
pub struct Player {
    controller: PlaybackController<OutputDevice>,
    config: PlayerConfig,
}

impl Player {
    /// Creates a new builder.
    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::new()
    }

    /// Opens the output device described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DeviceInitError` if the device cannot be opened. This is the
    /// only fatal error the player has.
    pub fn new(config: PlayerConfig) -> Result<Self, PlayerError> {
        PlayerBuilder::new().config(config).build()
    }

    /// The configuration the device was opened with.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Name of the opened output device.
    pub fn device_name(&self) -> &str {
        self.controller.device().name()
    }

    /// Runs one tagged command. See [`PlayerCommand`].
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns. Load failures are also
    /// reported as [`PlayerEvent::LoadFailed`].
    pub fn dispatch(&mut self, command: PlayerCommand) -> Result<(), PlayerError> {
        self.controller.dispatch(command)
    }

    /// Converts `source` and makes it the current track.
    ///
    /// # Errors
    ///
    /// Conversion failures; current playback is untouched.
    pub fn load_source(&mut self, source: SourceBuffer) -> Result<(), PlayerError> {
        self.controller.load_source(source)
    }

    /// Decodes a WAV file and makes it the current track.
    ///
    /// # Errors
    ///
    /// Decode or conversion failures; current playback is untouched.
    pub fn load_track(&mut self, path: impl AsRef<Path>) -> Result<(), PlayerError> {
        self.controller.load_track(path)
    }

    /// Rewinds the current track.
    ///
    /// # Errors
    ///
    /// Conversion failures while refilling.
    pub fn restart(&mut self) -> Result<(), PlayerError> {
        self.controller.restart()
    }

    /// Resumes playback.
    ///
    /// # Errors
    ///
    /// Returns `DeviceControl` if the backend refuses.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        self.controller.play()
    }

    /// Pauses playback.
    ///
    /// # Errors
    ///
    /// Returns `DeviceControl` if the backend refuses.
    pub fn pause(&mut self) -> Result<(), PlayerError> {
        self.controller.pause()
    }

    /// Pauses if playing, otherwise plays.
    ///
    /// # Errors
    ///
    /// Returns `DeviceControl` if the backend refuses.
    pub fn toggle_pause(&mut self) -> Result<(), PlayerError> {
        self.controller.toggle_pause()
    }

    /// Unloads the current track.
    ///
    /// # Errors
    ///
    /// Returns `DeviceControl` if the device cannot be suspended.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        self.controller.stop()
    }

    /// Sets the volume, clamped to [0.0, 1.0].
    pub fn set_volume(&mut self, volume: f32) {
        self.controller.set_volume(volume);
    }

    /// Sets the balance, clamped to [0.0, 1.0].
    pub fn set_balance(&mut self, balance: f32) {
        self.controller.set_balance(balance);
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    /// Current volume.
    pub fn volume(&self) -> f32 {
        self.controller.volume()
    }

    /// Current balance.
    pub fn balance(&self) -> f32 {
        self.controller.balance()
    }

    /// The current track, if any.
    pub fn source(&self) -> Option<&SourceBuffer> {
        self.controller.source()
    }

    /// Converted bytes not yet played.
    pub fn queued_bytes(&self) -> usize {
        self.controller.queued_bytes()
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("device", &self.device_name())
            .field("state", &self.state())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and opening a [`Player`].
///
/// # Example
///
/// ```no_run
/// use stream_player::{Player, PlayerCommand, PlayerConfig};
///
/// let mut player = Player::builder()
///     .config(PlayerConfig::default())
///     .volume(0.8)
///     .on_event(|e| tracing::info!(?e, "player event"))
///     .build()?;
///
/// player.dispatch(PlayerCommand::LoadTrack("music.wav".into()))?;
/// player.play()?;
/// # Ok::<(), stream_player::PlayerError>(())
/// ```
#[must_use]
pub struct PlayerBuilder {
    config: PlayerConfig,
    mix: MixParameters,
    event_callback: Option<EventCallback>,
}

impl Default for PlayerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: PlayerConfig::default(),
            mix: MixParameters::default(),
            event_callback: None,
        }
    }

    /// Sets the device configuration.
    pub fn config(mut self, config: PlayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Selects an output device by name instead of the system default.
    pub fn device(mut self, name: impl Into<String>) -> Self {
        self.config.device_name = Some(name.into());
        self
    }

    /// Sets the initial volume (clamped).
    pub fn volume(mut self, volume: f32) -> Self {
        self.mix = MixParameters::new(volume, self.mix.balance);
        self
    }

    /// Sets the initial balance (clamped).
    pub fn balance(mut self, balance: f32) -> Self {
        self.mix = MixParameters::new(self.mix.volume, balance);
        self
    }

    /// Registers a callback for [`PlayerEvent`]s.
    ///
    /// The callback also receives device errors, which are raised on the
    /// audio backend's thread; keep it short.
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(PlayerEvent) + Send + Sync + 'static,
    {
        self.event_callback = Some(event_callback(callback));
        self
    }

    /// Registers an already-shared event callback.
    pub fn event_callback(mut self, callback: EventCallback) -> Self {
        self.event_callback = Some(callback);
        self
    }

    /// Opens the output device and returns a stopped player.
    ///
    /// # Errors
    ///
    /// Returns `DeviceInitError` if the device cannot be opened.
    pub fn build(self) -> Result<Player, PlayerError> {
        let slot = PlaybackSlot::new();
        slot.set_mix(self.mix);

        let device = OutputDevice::open(&self.config, &slot, self.event_callback.clone())
            .map_err(|e| {
                tracing::error!(error = %e, "failed to open output device");
                e
            })?;

        let mut controller = PlaybackController::new(device, slot);
        if let Some(callback) = self.event_callback {
            controller = controller.with_event_callback(callback);
        }

        Ok(Player {
            controller,
            config: self.config,
        })
    }
}
