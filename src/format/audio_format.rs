//! Audio format descriptors.

use std::fmt;

use crate::PlayerError;

/// Numeric encoding of individual samples.
///
/// Multi-byte encodings are little-endian, matching WAV data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleEncoding {
    /// Unsigned 8-bit, centred on 128.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 24-bit integer packed into 3 bytes.
    I24,
    /// Signed 32-bit integer.
    I32,
    /// 32-bit IEEE float, nominal range [-1.0, 1.0].
    F32,
}

impl SampleEncoding {
    /// Size of one sample in bytes.
    #[must_use]
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 => 2,
            Self::I24 => 3,
            Self::I32 | Self::F32 => 4,
        }
    }

    /// Bit depth of one sample.
    #[must_use]
    pub const fn bits(self) -> u16 {
        (self.bytes_per_sample() * 8) as u16
    }

    /// Returns `true` for floating-point encodings.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32)
    }

    /// Maps a WAV `fmt ` chunk's bit depth to an encoding.
    ///
    /// Returns `None` for depths the converter has no codec for.
    #[must_use]
    pub const fn from_wav(bits_per_sample: u16, is_float: bool) -> Option<Self> {
        match (bits_per_sample, is_float) {
            (8, false) => Some(Self::U8),
            (16, false) => Some(Self::I16),
            (24, false) => Some(Self::I24),
            (32, false) => Some(Self::I32),
            (32, true) => Some(Self::F32),
            _ => None,
        }
    }
}

impl fmt::Display for SampleEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::F32 => 'f',
            Self::U8 => 'u',
            Self::I16 | Self::I24 | Self::I32 => 's',
        };
        write!(f, "{kind}{}", self.bits())
    }
}

/// Sample rate, channel layout and encoding of a block of PCM audio.
///
/// Two formats are compatible only if every field matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    /// Frames per second.
    pub sample_rate: u32,
    /// Interleaved channels per frame (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Encoding of each sample.
    pub encoding: SampleEncoding,
}

impl AudioFormat {
    /// 48 kHz stereo 32-bit float, the default device output format.
    pub const STEREO_F32_48K: Self = Self::new(48_000, 2, SampleEncoding::F32);

    /// Creates a new format descriptor.
    #[must_use]
    pub const fn new(sample_rate: u32, channels: u16, encoding: SampleEncoding) -> Self {
        Self {
            sample_rate,
            channels,
            encoding,
        }
    }

    /// Size of one interleaved frame in bytes.
    #[must_use]
    pub const fn frame_size(&self) -> usize {
        self.channels as usize * self.encoding.bytes_per_sample()
    }

    /// Number of bytes in one second of audio.
    #[must_use]
    pub const fn bytes_per_second(&self) -> usize {
        self.frame_size() * self.sample_rate as usize
    }

    /// Rounds `bytes` down to a whole number of frames.
    #[must_use]
    pub const fn floor_to_frame(&self, bytes: usize) -> usize {
        let frame = self.frame_size();
        if frame == 0 {
            0
        } else {
            bytes - bytes % frame
        }
    }

    /// Checks that the converter can handle this format.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if the rate or channel count is zero.
    pub fn validate(&self) -> Result<(), PlayerError> {
        if self.sample_rate == 0 {
            return Err(PlayerError::unsupported(format_args!(
                "{self} (sample rate must be positive)"
            )));
        }
        if self.channels == 0 {
            return Err(PlayerError::unsupported(format_args!(
                "{self} (channel count must be positive)"
            )));
        }
        Ok(())
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::STEREO_F32_48K
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Hz/{}ch/{}",
            self.sample_rate, self.channels, self.encoding
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size() {
        assert_eq!(AudioFormat::STEREO_F32_48K.frame_size(), 8);
        assert_eq!(AudioFormat::new(22050, 1, SampleEncoding::I16).frame_size(), 2);
        assert_eq!(AudioFormat::new(44100, 2, SampleEncoding::I24).frame_size(), 6);
    }

    #[test]
    fn test_floor_to_frame() {
        let format = AudioFormat::STEREO_F32_48K;
        assert_eq!(format.floor_to_frame(7), 0);
        assert_eq!(format.floor_to_frame(8), 8);
        assert_eq!(format.floor_to_frame(32_769), 32_768);
    }

    #[test]
    fn test_from_wav() {
        assert_eq!(SampleEncoding::from_wav(16, false), Some(SampleEncoding::I16));
        assert_eq!(SampleEncoding::from_wav(32, true), Some(SampleEncoding::F32));
        assert_eq!(SampleEncoding::from_wav(12, false), None);
        assert_eq!(SampleEncoding::from_wav(64, true), None);
    }

    #[test]
    fn test_validate_rejects_zero_fields() {
        assert!(AudioFormat::new(0, 2, SampleEncoding::I16).validate().is_err());
        assert!(AudioFormat::new(44100, 0, SampleEncoding::I16).validate().is_err());
        assert!(AudioFormat::STEREO_F32_48K.validate().is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(AudioFormat::STEREO_F32_48K.to_string(), "48000Hz/2ch/f32");
        assert_eq!(
            AudioFormat::new(8000, 1, SampleEncoding::U8).to_string(),
            "8000Hz/1ch/u8"
        );
    }
}
