//! Mock audio source for testing without files or hardware.

use std::time::Duration;

use crate::format::{self, AudioFormat};
use crate::source::SourceBuffer;

/// Generates synthetic audio and packs it into a [`SourceBuffer`].
///
/// This allows exercising the full pipeline with known signals, in any
/// native format the converter supports.
///
/// # Example
///
/// ```
/// use stream_player::source::MockSource;
/// use stream_player::{AudioFormat, SampleEncoding};
///
/// let mut mock = MockSource::new(AudioFormat::new(22_050, 1, SampleEncoding::I16));
///
/// // 100ms of silence, then 100ms of a 440Hz sine wave
/// mock.generate_silence(100);
/// mock.generate_sine(440.0, 100);
///
/// let source = mock.into_source();
/// assert_eq!(source.len(), 2 * 2205 * 2);
/// ```
pub struct MockSource {
    format: AudioFormat,
    samples: Vec<f32>,
}

impl MockSource {
    /// Creates a new mock source producing audio in `format`.
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            samples: Vec::new(),
        }
    }

    /// Creates a mock source already in the default device format (48kHz stereo f32).
    pub fn device_native() -> Self {
        Self::new(AudioFormat::STEREO_F32_48K)
    }

    /// Returns the format of the generated audio.
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Generates silence for the given duration in milliseconds.
    pub fn generate_silence(&mut self, duration_ms: u64) {
        let num_samples = self.samples_for_duration(duration_ms);
        self.samples.resize(self.samples.len() + num_samples, 0.0);
    }

    /// Generates a full-scale sine wave at `frequency` Hz on every channel.
    pub fn generate_sine(&mut self, frequency: f64, duration_ms: u64) {
        let channels = usize::from(self.format.channels);
        let num_frames = self.samples_for_duration(duration_ms) / channels.max(1);
        let sample_rate = f64::from(self.format.sample_rate);

        for i in 0..num_frames {
            let t = i as f64 / sample_rate;
            let value = (2.0 * std::f64::consts::PI * frequency * t).sin() as f32;
            self.samples.extend(std::iter::repeat(value).take(channels));
        }
    }

    /// Generates deterministic white noise with the given peak amplitude.
    pub fn generate_noise(&mut self, duration_ms: u64, amplitude: f32) {
        let num_samples = self.samples_for_duration(duration_ms);

        // Simple LCG for deterministic "random" noise
        let mut seed: u32 = 12345;
        for _ in 0..num_samples {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let random = f32::from((seed >> 16) as u16) / 32768.0 - 1.0;
            self.samples.push(random * amplitude);
        }
    }

    /// Adds raw interleaved samples in the nominal [-1.0, 1.0] range.
    pub fn add_samples(&mut self, samples: &[f32]) {
        self.samples.extend_from_slice(samples);
    }

    /// Returns the accumulated samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Returns the duration of accumulated samples.
    pub fn duration(&self) -> Duration {
        let channels = usize::from(self.format.channels.max(1));
        let frames = self.samples.len() / channels;
        Duration::from_secs_f64(frames as f64 / f64::from(self.format.sample_rate.max(1)))
    }

    /// Encodes the accumulated samples into a source buffer.
    pub fn into_source(self) -> SourceBuffer {
        let mut bytes =
            Vec::with_capacity(self.samples.len() * self.format.encoding.bytes_per_sample());
        format::encode_samples(&self.samples, self.format.encoding, &mut bytes);
        SourceBuffer::new(bytes, self.format)
    }

    fn samples_for_duration(&self, duration_ms: u64) -> usize {
        let frames = (u64::from(self.format.sample_rate) * duration_ms / 1000) as usize;
        frames * usize::from(self.format.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SampleEncoding;

    #[test]
    fn test_mock_source_silence() {
        let mut mock = MockSource::new(AudioFormat::new(16_000, 1, SampleEncoding::I16));
        mock.generate_silence(100);

        let source = mock.into_source();
        assert_eq!(source.len(), 3200); // 1600 samples * 2 bytes
        assert!(source.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_mock_source_sine() {
        let mut mock = MockSource::device_native();
        mock.generate_sine(440.0, 100);

        assert_eq!(mock.samples().len(), 9600);
        assert!(mock.samples().iter().any(|&s| s > 0.5));
        assert!(mock.samples().iter().any(|&s| s < -0.5));
        // Both channels carry the same signal
        assert!(mock.samples().chunks_exact(2).all(|f| f[0] == f[1]));
    }

    #[test]
    fn test_mock_source_noise_in_range() {
        let mut mock = MockSource::device_native();
        mock.generate_noise(10, 0.5);
        assert!(mock.samples().iter().all(|s| s.abs() <= 0.5));
        assert!(mock.samples().iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_mock_source_duration() {
        let mut mock = MockSource::device_native();
        mock.generate_silence(500);
        assert_eq!(mock.duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_into_source_u8_silence_is_midpoint() {
        let mut mock = MockSource::new(AudioFormat::new(8000, 1, SampleEncoding::U8));
        mock.generate_silence(1);
        let source = mock.into_source();
        assert_eq!(source.bytes(), &[128u8; 8][..]);
    }
}
