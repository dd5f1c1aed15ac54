//! CPAL output device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, SampleRate, Stream, StreamConfig as CpalStreamConfig};

use super::AudioOutput;
use crate::event::{EventCallback, PlayerEvent};
use crate::format::AudioFormat;
use crate::pipeline::{DeviceCallback, PlaybackSlot};
use crate::{PlayerConfig, PlayerError};

/// The opened hardware output channel.
///
/// Owns the CPAL stream, whose data callback drains a [`PlaybackSlot`]
/// through a [`DeviceCallback`]. The stream is created suspended; dropping
/// the device closes it.
#[must_use]
pub struct OutputDevice {
    /// The underlying CPAL stream. Dropping this stops output.
    stream: Stream,
    name: String,
    format: AudioFormat,
    running: bool,
}

impl OutputDevice {
    /// Opens the configured output device and wires its callback to `slot`.
    ///
    /// # Errors
    ///
    /// Returns `DeviceInitError` if the configuration is invalid, no matching
    /// device exists, or the stream cannot be built.
    pub fn open(
        config: &PlayerConfig,
        slot: &PlaybackSlot,
        events: Option<EventCallback>,
    ) -> Result<Self, PlayerError> {
        config.validate()?;

        let device = match &config.device_name {
            Some(name) => find_device(name)?,
            None => cpal::default_host()
                .default_output_device()
                .ok_or_else(|| PlayerError::device_init("no default output device configured"))?,
        };
        let name = device.name().unwrap_or_else(|_| "unknown".to_string());
        let format = config.output_format;

        let fixed = CpalStreamConfig {
            channels: format.channels,
            sample_rate: SampleRate(format.sample_rate),
            buffer_size: BufferSize::Fixed(config.buffer_frames),
        };

        let stream = match build_stream(&device, &fixed, slot, events.clone()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(
                    device = %name,
                    buffer_frames = config.buffer_frames,
                    error = %e,
                    "fixed buffer size rejected, falling back to device default"
                );
                let fallback = CpalStreamConfig {
                    buffer_size: BufferSize::Default,
                    ..fixed
                };
                build_stream(&device, &fallback, slot, events).map_err(PlayerError::device_init)?
            }
        };

        // Some backends start streams immediately; playback begins suspended
        let running = match stream.pause() {
            Ok(()) => false,
            Err(e) => {
                tracing::warn!(device = %name, error = %e, "could not suspend new output stream");
                true
            }
        };

        tracing::info!(device = %name, format = %format, "opened audio output device");

        Ok(Self {
            stream,
            name,
            format,
            running,
        })
    }
}

impl AudioOutput for OutputDevice {
    fn resume(&mut self) -> Result<(), PlayerError> {
        if !self.running {
            self.stream.play().map_err(PlayerError::device_control)?;
            self.running = true;
        }
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), PlayerError> {
        if self.running {
            self.stream.pause().map_err(PlayerError::device_control)?;
            self.running = false;
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn format(&self) -> AudioFormat {
        self.format
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn find_device(name: &str) -> Result<Device, PlayerError> {
    let host = cpal::default_host();
    let devices = host.output_devices().map_err(PlayerError::device_init)?;

    for device in devices {
        if let Ok(device_name) = device.name() {
            if device_name == name {
                return Ok(device);
            }
        }
    }

    Err(PlayerError::device_init(format_args!(
        "output device not found: {name}"
    )))
}

fn build_stream(
    device: &Device,
    config: &CpalStreamConfig,
    slot: &PlaybackSlot,
    events: Option<EventCallback>,
) -> Result<Stream, cpal::BuildStreamError> {
    let mut callback = DeviceCallback::new(slot.clone());

    device.build_output_stream(
        config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            callback.render(data);
        },
        move |err| {
            tracing::error!("Audio output stream error: {}", err);
            if let Some(events) = &events {
                events(PlayerEvent::DeviceError {
                    message: err.to_string(),
                });
            }
        },
        None,
    )
}
