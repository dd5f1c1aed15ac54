//! WAV file loading.
//!
//! Turns an uncompressed RIFF/WAVE file into a [`SourceBuffer`] in the file's
//! own format. No conversion happens here; that is the conversion stream's job.

use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::format::{AudioFormat, SampleEncoding};
use crate::source::SourceBuffer;
use crate::PlayerError;

/// Loads a WAV file from disk.
///
/// # Errors
///
/// - `DecodeError` if the file cannot be opened or is not valid WAV.
/// - `UnsupportedFormat` if the bit depth has no matching [`SampleEncoding`].
pub fn load_wav(path: impl AsRef<Path>) -> Result<SourceBuffer, PlayerError> {
    let path = path.as_ref();
    let reader = WavReader::open(path)
        .map_err(|e| PlayerError::decode(format_args!("{}: {e}", path.display())))?;
    let source = read_wav(reader)?;

    tracing::info!(
        path = %path.display(),
        format = %source.format(),
        bytes = source.len(),
        "decoded WAV file"
    );
    Ok(source)
}

/// Loads WAV data already in memory (for example, read out of an archive).
///
/// # Errors
///
/// Same as [`load_wav`].
pub fn load_wav_bytes(data: &[u8]) -> Result<SourceBuffer, PlayerError> {
    let reader = WavReader::new(data).map_err(PlayerError::decode)?;
    read_wav(reader)
}

fn read_wav<R: Read>(reader: WavReader<R>) -> Result<SourceBuffer, PlayerError> {
    let spec = reader.spec();
    let encoding = SampleEncoding::from_wav(
        spec.bits_per_sample,
        spec.sample_format == SampleFormat::Float,
    )
    .ok_or_else(|| {
        PlayerError::unsupported(format_args!(
            "{}-bit {:?} WAV",
            spec.bits_per_sample, spec.sample_format
        ))
    })?;
    let format = AudioFormat::new(spec.sample_rate, spec.channels, encoding);

    let byte_len = reader.len() as usize * encoding.bytes_per_sample();
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(byte_len)
        .map_err(|e| PlayerError::out_of_memory(byte_len, e))?;

    // hound hands back widened values; pack them into the native encoding
    match encoding {
        SampleEncoding::F32 => {
            for sample in reader.into_samples::<f32>() {
                bytes.extend_from_slice(&sample.map_err(PlayerError::decode)?.to_le_bytes());
            }
        }
        SampleEncoding::U8 => {
            for sample in reader.into_samples::<i8>() {
                let signed = sample.map_err(PlayerError::decode)?;
                bytes.push((i16::from(signed) + 128) as u8);
            }
        }
        SampleEncoding::I16 | SampleEncoding::I24 | SampleEncoding::I32 => {
            let width = encoding.bytes_per_sample();
            for sample in reader.into_samples::<i32>() {
                let value = sample.map_err(PlayerError::decode)?;
                bytes.extend_from_slice(&value.to_le_bytes()[..width]);
            }
        }
    }

    Ok(SourceBuffer::new(bytes, format))
}
