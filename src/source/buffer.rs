//! Decoded source audio.

use std::sync::Arc;
use std::time::Duration;

use crate::format::AudioFormat;

/// The raw decoded bytes of one track, in the track's native format.
///
/// `SourceBuffer` is the unit handed to
/// [`PlaybackController::load_source()`](crate::PlaybackController::load_source).
/// Bytes are immutable and stored in an `Arc<[u8]>`, so cloning is cheap and
/// restarting a track re-reads the same allocation.
///
/// # Example
///
/// ```
/// use stream_player::{AudioFormat, SampleEncoding, SourceBuffer};
/// use std::time::Duration;
///
/// let format = AudioFormat::new(8000, 1, SampleEncoding::I16);
/// let source = SourceBuffer::new(vec![0u8; 16000], format);
/// assert_eq!(source.duration(), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    bytes: Arc<[u8]>,
    format: AudioFormat,
}

impl SourceBuffer {
    /// Wraps decoded bytes in their native format.
    pub fn new(bytes: impl Into<Arc<[u8]>>, format: AudioFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    /// The decoded sample bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The native format of the bytes.
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the source has no audio.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of complete frames.
    pub fn frame_count(&self) -> usize {
        match self.format.frame_size() {
            0 => 0,
            frame => self.bytes.len() / frame,
        }
    }

    /// Playing time at the native sample rate.
    pub fn duration(&self) -> Duration {
        if self.format.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frame_count() as f64 / f64::from(self.format.sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SampleEncoding;

    #[test]
    fn test_duration_stereo_48khz() {
        let source = SourceBuffer::new(vec![0u8; 38_400], AudioFormat::STEREO_F32_48K);
        // 38400 bytes / 8 bytes per frame = 4800 frames / 48000 Hz = 100ms
        assert_eq!(source.duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_frame_count_ignores_partial_frame() {
        let format = AudioFormat::new(44_100, 2, SampleEncoding::I16);
        let source = SourceBuffer::new(vec![0u8; 10], format);
        assert_eq!(source.frame_count(), 2);
    }

    #[test]
    fn test_zero_rate_has_no_duration() {
        let format = AudioFormat::new(0, 1, SampleEncoding::U8);
        let source = SourceBuffer::new(vec![0u8; 10], format);
        assert_eq!(source.duration(), Duration::ZERO);
    }

    #[test]
    fn test_clone_shares_bytes() {
        let source = SourceBuffer::new(vec![1u8, 2, 3, 4], AudioFormat::STEREO_F32_48K);
        let clone = source.clone();
        assert!(std::ptr::eq(source.bytes(), clone.bytes()));
    }
}
