//! Sample encoding and channel conversion.
//!
//! Everything is routed through `f32` in the nominal range [-1.0, 1.0]:
//! decode the native encoding, remix channels, resample, then encode to
//! the output encoding.

use super::SampleEncoding;

/// Converts f32 samples to i16.
///
/// Input should be in the range [-1.0, 1.0].
/// Values outside this range are clamped.
///
/// Uses × 32767 (not 32768) for symmetric scaling. This means -1.0 maps
/// to -32767 rather than -32768, losing 1 LSB at the negative extreme.
#[inline]
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample * 32767.0).clamp(-32768.0, 32767.0) as i16
}

/// Converts i16 samples to f32.
///
/// Output will be in the range [-1.0, 1.0].
#[inline]
pub fn i16_to_f32(sample: i16) -> f32 {
    f32::from(sample) / 32768.0
}

const I24_SCALE: f32 = 8_388_608.0;
const I32_SCALE: f64 = 2_147_483_648.0;

/// Decodes one sample from exactly `encoding.bytes_per_sample()` bytes.
#[inline]
fn decode_one(bytes: &[u8], encoding: SampleEncoding) -> f32 {
    match encoding {
        SampleEncoding::U8 => (f32::from(bytes[0]) - 128.0) / 128.0,
        SampleEncoding::I16 => i16_to_f32(i16::from_le_bytes([bytes[0], bytes[1]])),
        SampleEncoding::I24 => {
            // Place the 3 bytes in the high end and shift back to sign-extend
            let raw = i32::from_le_bytes([0, bytes[0], bytes[1], bytes[2]]) >> 8;
            raw as f32 / I24_SCALE
        }
        SampleEncoding::I32 => {
            let raw = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            (f64::from(raw) / I32_SCALE) as f32
        }
        SampleEncoding::F32 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    }
}

/// Encodes one sample, appending `encoding.bytes_per_sample()` bytes.
#[inline]
fn encode_one(sample: f32, encoding: SampleEncoding, out: &mut Vec<u8>) {
    match encoding {
        SampleEncoding::U8 => {
            let value = (sample * 127.0 + 128.0).clamp(0.0, 255.0) as u8;
            out.push(value);
        }
        SampleEncoding::I16 => out.extend_from_slice(&f32_to_i16(sample).to_le_bytes()),
        SampleEncoding::I24 => {
            let value = (sample * (I24_SCALE - 1.0)).clamp(-I24_SCALE, I24_SCALE - 1.0) as i32;
            out.extend_from_slice(&value.to_le_bytes()[..3]);
        }
        SampleEncoding::I32 => {
            let value =
                (f64::from(sample) * (I32_SCALE - 1.0)).clamp(-I32_SCALE, I32_SCALE - 1.0) as i32;
            out.extend_from_slice(&value.to_le_bytes());
        }
        SampleEncoding::F32 => out.extend_from_slice(&sample.to_le_bytes()),
    }
}

/// Decodes raw little-endian bytes into f32 samples.
///
/// Trailing bytes that do not form a whole sample are ignored; callers
/// validate frame alignment beforehand.
pub fn decode_samples(bytes: &[u8], encoding: SampleEncoding) -> Vec<f32> {
    let mut samples = Vec::with_capacity(bytes.len() / encoding.bytes_per_sample());
    decode_samples_into(bytes, encoding, &mut samples);
    samples
}

/// Decodes raw little-endian bytes, appending the samples to `out`.
///
/// Does not allocate if `out` has room for
/// `bytes.len() / encoding.bytes_per_sample()` more samples.
pub fn decode_samples_into(bytes: &[u8], encoding: SampleEncoding, out: &mut Vec<f32>) {
    out.extend(
        bytes
            .chunks_exact(encoding.bytes_per_sample())
            .map(|raw| decode_one(raw, encoding)),
    );
}

/// Encodes f32 samples into `out` using the given encoding.
///
/// `out` should already have room reserved for
/// `samples.len() * encoding.bytes_per_sample()` bytes.
pub fn encode_samples(samples: &[f32], encoding: SampleEncoding, out: &mut Vec<u8>) {
    for &sample in samples {
        encode_one(sample, encoding, out);
    }
}

/// Converts interleaved audio between channel counts.
///
/// - Equal counts pass through unchanged.
/// - Mono input is duplicated into every output channel.
/// - Mono output averages all input channels.
/// - Otherwise output channel `c` takes input channel `c % from`, so extra
///   input channels are dropped and missing ones repeat the layout.
pub fn remix_channels(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    if from == to || from == 0 || to == 0 {
        return samples.to_vec();
    }
    let frames = samples.len() / usize::from(from);
    let mut output = Vec::with_capacity(frames * usize::from(to));
    remix_channels_into(samples, from, to, &mut output);
    output
}

/// Converts interleaved audio between channel counts, appending to `out`.
///
/// Same rules as [`remix_channels`]. Does not allocate if `out` has room
/// for `frames * to` more samples.
pub fn remix_channels_into(samples: &[f32], from: u16, to: u16, out: &mut Vec<f32>) {
    let from = usize::from(from);
    let to = usize::from(to);
    if from == to || from == 0 || to == 0 {
        out.extend_from_slice(samples);
        return;
    }

    for frame in samples.chunks_exact(from) {
        if to == 1 {
            let sum: f32 = frame.iter().sum();
            out.push(sum / from as f32);
        } else {
            out.extend((0..to).map(|c| frame[c % from]));
        }
    }
}

/// Converts stereo samples to mono by averaging channels.
pub fn stereo_to_mono(stereo: &[f32]) -> Vec<f32> {
    remix_channels(stereo, 2, 1)
}

/// Converts mono samples to stereo by duplicating each sample.
pub fn mono_to_stereo(mono: &[f32]) -> Vec<f32> {
    remix_channels(mono, 1, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(sample: f32, encoding: SampleEncoding) -> f32 {
        let mut bytes = Vec::new();
        encode_samples(&[sample], encoding, &mut bytes);
        assert_eq!(bytes.len(), encoding.bytes_per_sample());
        decode_samples(&bytes, encoding)[0]
    }

    #[test]
    fn test_f32_to_i16_full_range() {
        assert_eq!(f32_to_i16(1.0), 32767);
        assert_eq!(f32_to_i16(-1.0), -32767);
        assert_eq!(f32_to_i16(0.0), 0);
    }

    #[test]
    fn test_f32_to_i16_clamping() {
        assert_eq!(f32_to_i16(2.0), 32767);
        assert_eq!(f32_to_i16(-2.0), -32768);
    }

    #[test]
    fn test_i16_to_f32_full_range() {
        let min = i16_to_f32(-32768);
        assert!((min - (-1.0)).abs() < 0.001);
        assert_eq!(i16_to_f32(0), 0.0);
    }

    #[test]
    fn test_u8_is_offset_binary() {
        assert_eq!(decode_samples(&[128], SampleEncoding::U8), vec![0.0]);
        assert_eq!(decode_samples(&[0], SampleEncoding::U8), vec![-1.0]);
    }

    #[test]
    fn test_i24_sign_extension() {
        // -1 as 24-bit little-endian
        let decoded = decode_samples(&[0xFF, 0xFF, 0xFF], SampleEncoding::I24);
        assert!(decoded[0] < 0.0);
        assert!(decoded[0] > -0.001);

        // Most negative 24-bit value
        let decoded = decode_samples(&[0x00, 0x00, 0x80], SampleEncoding::I24);
        assert!((decoded[0] + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_encodings_preserve_half_scale() {
        for encoding in [
            SampleEncoding::U8,
            SampleEncoding::I16,
            SampleEncoding::I24,
            SampleEncoding::I32,
            SampleEncoding::F32,
        ] {
            let back = roundtrip(0.5, encoding);
            assert!((back - 0.5).abs() < 0.01, "{encoding}: {back}");
            let back = roundtrip(-0.5, encoding);
            assert!((back + 0.5).abs() < 0.01, "{encoding}: {back}");
        }
    }

    #[test]
    fn test_decode_ignores_trailing_partial_sample() {
        let decoded = decode_samples(&[0, 0, 1], SampleEncoding::I16);
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn test_stereo_to_mono() {
        let mono = stereo_to_mono(&[0.2, 0.4, -0.5, 0.5]);
        assert!((mono[0] - 0.3).abs() < 1e-6);
        assert_eq!(mono[1], 0.0);
    }

    #[test]
    fn test_mono_to_stereo() {
        assert_eq!(mono_to_stereo(&[0.1, 0.2]), vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn test_remix_drops_extra_channels() {
        // 4ch -> stereo keeps the front pair
        let quad = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(remix_channels(&quad, 4, 2), vec![1.0, 2.0, 5.0, 6.0]);
    }

    #[test]
    fn test_remix_same_count_passthrough() {
        let stereo = [0.1, 0.2, 0.3];
        assert_eq!(remix_channels(&stereo, 2, 2), stereo.to_vec());
    }
}
