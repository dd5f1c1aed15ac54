//! Configuration types for the player.

use crate::format::{AudioFormat, SampleEncoding};
use crate::PlayerError;

/// Configuration fixed when the output device is opened.
///
/// Use [`PlayerConfig::default()`] for sensible defaults, or customize as needed.
///
/// # Example
///
/// ```
/// use stream_player::PlayerConfig;
///
/// let config = PlayerConfig {
///     buffer_frames: 1024,
///     ..Default::default()
/// };
/// assert_eq!(config.output_format.sample_rate, 48_000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Format every source is converted to before playback.
    ///
    /// The mixer works on interleaved stereo floats, so this must be a
    /// 2-channel [`SampleEncoding::F32`] format; the rate is free.
    /// Default: 48kHz stereo f32
    pub output_format: AudioFormat,

    /// Requested device buffer size in frames.
    ///
    /// Smaller values reduce latency but increase the risk of underruns.
    /// If the device rejects the size, its own default is used instead.
    /// Default: 4096
    pub buffer_frames: u32,

    /// Name of the output device to open, or `None` for the system default.
    pub device_name: Option<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            output_format: AudioFormat::STEREO_F32_48K,
            buffer_frames: 4096,
            device_name: None,
        }
    }
}

impl PlayerConfig {
    /// Checks that the configuration can drive the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `DeviceInitError` if the output format is not stereo f32 or
    /// the buffer size is zero.
    pub fn validate(&self) -> Result<(), PlayerError> {
        let format = self.output_format;
        if format.channels != 2 || format.encoding != SampleEncoding::F32 {
            return Err(PlayerError::device_init(format_args!(
                "output format must be stereo f32, got {format}"
            )));
        }
        if format.sample_rate == 0 {
            return Err(PlayerError::device_init("output sample rate must be positive"));
        }
        if self.buffer_frames == 0 {
            return Err(PlayerError::device_init("buffer size must be at least one frame"));
        }
        Ok(())
    }
}
