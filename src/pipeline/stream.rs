//! Conversion stream: native-format bytes in, device-format frames out.

use std::mem;

use ringbuf::traits::{Consumer, Observer, Producer};
use ringbuf::HeapRb;

use crate::format::{self, AudioFormat};
use crate::PlayerError;

/// Buffers raw source audio and hands it back converted to the output format.
///
/// Input is queued with [`put`](Self::put) and only becomes retrievable after
/// [`flush`](Self::flush), which performs all decoding, channel remixing and
/// resampling in one pass. Retrieval with [`get_into`](Self::get_into) is a
/// plain copy out of a pre-sized ring buffer, so it is safe to call from the
/// real-time callback: it never allocates and never returns a partial frame.
///
/// # Example
///
/// ```
/// use stream_player::{AudioFormat, ConversionStream, SampleEncoding};
///
/// let input = AudioFormat::new(22_050, 1, SampleEncoding::I16);
/// let mut stream = ConversionStream::new(input, AudioFormat::STEREO_F32_48K)?;
///
/// stream.put(&[0u8; 4410])?; // 100ms of mono 16-bit silence
/// stream.flush()?;
///
/// assert_eq!(stream.available(), 4800 * 8);
/// let block = stream.get(4096);
/// assert_eq!(block.len(), 4096);
/// # Ok::<(), stream_player::PlayerError>(())
/// ```
pub struct ConversionStream {
    input_format: AudioFormat,
    output_format: AudioFormat,
    /// Input bytes queued since the last flush.
    pending: Vec<u8>,
    /// Converted output bytes, always a whole number of output frames.
    converted: HeapRb<u8>,
}

impl ConversionStream {
    /// Creates an empty stream converting `input_format` to `output_format`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if either format cannot be converted.
    pub fn new(input_format: AudioFormat, output_format: AudioFormat) -> Result<Self, PlayerError> {
        input_format.validate()?;
        output_format.validate()?;

        Ok(Self {
            input_format,
            output_format,
            pending: Vec::new(),
            converted: HeapRb::new(output_format.frame_size()),
        })
    }

    /// Format of bytes passed to [`put`](Self::put).
    pub fn input_format(&self) -> AudioFormat {
        self.input_format
    }

    /// Format of bytes returned by [`get`](Self::get).
    pub fn output_format(&self) -> AudioFormat {
        self.output_format
    }

    /// Queues raw input-format bytes for conversion.
    ///
    /// Nothing becomes retrievable until [`flush`](Self::flush) is called.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if the queue cannot grow; the stream is left as it was.
    pub fn put(&mut self, bytes: &[u8]) -> Result<(), PlayerError> {
        self.pending
            .try_reserve(bytes.len())
            .map_err(|e| PlayerError::out_of_memory(bytes.len(), e))?;
        self.pending.extend_from_slice(bytes);
        Ok(())
    }

    /// Number of queued input bytes not yet converted.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Converts every pending byte so it becomes retrievable.
    ///
    /// # Errors
    ///
    /// - `ConversionError` if the pending data is not a whole number of input
    ///   frames. The rejected batch is discarded; earlier output is kept.
    /// - `OutOfMemory` if any conversion buffer or the grown output storage
    ///   cannot be allocated. The batch is discarded; earlier output is kept.
    pub fn flush(&mut self) -> Result<(), PlayerError> {
        let batch = mem::take(&mut self.pending);
        if batch.is_empty() {
            return Ok(());
        }

        let frame_size = self.input_format.frame_size();
        if batch.len() % frame_size != 0 {
            return Err(PlayerError::conversion(format!(
                "{} bytes is not a whole number of {}-byte frames ({})",
                batch.len(),
                frame_size,
                self.input_format
            )));
        }

        let output = if self.input_format == self.output_format {
            batch
        } else {
            self.convert(&batch)?
        };

        tracing::debug!(
            input = %self.input_format,
            output = %self.output_format,
            converted_bytes = output.len(),
            "conversion stream flushed"
        );

        self.store(output)
    }

    fn convert(&self, batch: &[u8]) -> Result<Vec<u8>, PlayerError> {
        let input = self.input_format;
        let output = self.output_format;
        let out_channels = usize::from(output.channels);
        let frames = batch.len() / input.frame_size();

        let mut samples = try_buffer(frames.saturating_mul(usize::from(input.channels)))?;
        format::decode_samples_into(batch, input.encoding, &mut samples);

        if input.channels != output.channels {
            let mut remixed = try_buffer(frames.saturating_mul(out_channels))?;
            format::remix_channels_into(&samples, input.channels, output.channels, &mut remixed);
            samples = remixed;
        }

        if input.sample_rate != output.sample_rate {
            let out_frames = format::output_frames(frames, input.sample_rate, output.sample_rate);
            let mut resampled = try_buffer(out_frames.saturating_mul(out_channels))?;
            format::resample_into(
                &samples,
                output.channels,
                input.sample_rate,
                output.sample_rate,
                &mut resampled,
            );
            samples = resampled;
        }

        let byte_len = samples
            .len()
            .saturating_mul(output.encoding.bytes_per_sample());
        let mut encoded = try_buffer(byte_len)?;
        format::encode_samples(&samples, output.encoding, &mut encoded);
        Ok(encoded)
    }

    /// Appends converted bytes, growing the ring if it cannot hold them.
    fn store(&mut self, output: Vec<u8>) -> Result<(), PlayerError> {
        if self.converted.vacant_len() >= output.len() {
            self.converted.push_slice(&output);
            return Ok(());
        }

        let occupied = self.converted.occupied_len();
        if occupied == 0 {
            self.converted = HeapRb::from(output);
            return Ok(());
        }

        let mut carried = try_buffer(occupied.saturating_add(output.len()))?;
        carried.resize(occupied, 0);
        self.converted.pop_slice(&mut carried);
        carried.extend_from_slice(&output);
        drop(output);
        self.converted = HeapRb::from(carried);
        Ok(())
    }

    /// Moves up to `out.len()` converted bytes into `out`.
    ///
    /// The count is rounded down to whole output frames. Returns the number of
    /// bytes written; the rest of `out` is left untouched. Never allocates.
    pub fn get_into(&mut self, out: &mut [u8]) -> usize {
        let len = self
            .output_format
            .floor_to_frame(out.len().min(self.converted.occupied_len()));
        if len == 0 {
            return 0;
        }
        self.converted.pop_slice(&mut out[..len])
    }

    /// Removes and returns up to `max_bytes` converted bytes.
    ///
    /// Returns an empty vector (not an error) when nothing is converted yet.
    /// The length is always a multiple of the output frame size.
    pub fn get(&mut self, max_bytes: usize) -> Vec<u8> {
        let len = self
            .output_format
            .floor_to_frame(max_bytes.min(self.converted.occupied_len()));
        let mut out = vec![0u8; len];
        let written = self.get_into(&mut out);
        out.truncate(written);
        out
    }

    /// Discards all pending and converted data.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.converted.clear();
    }

    /// Number of converted bytes ready for [`get`](Self::get).
    pub fn available(&self) -> usize {
        self.converted.occupied_len()
    }

    /// Returns `true` if nothing is left to retrieve.
    pub fn is_drained(&self) -> bool {
        self.converted.is_empty()
    }
}

impl std::fmt::Debug for ConversionStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionStream")
            .field("input_format", &self.input_format)
            .field("output_format", &self.output_format)
            .field("pending", &self.pending.len())
            .field("available", &self.available())
            .finish()
    }
}

/// Allocates an empty buffer with room for `len` items, or reports `OutOfMemory`.
fn try_buffer<T>(len: usize) -> Result<Vec<T>, PlayerError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| PlayerError::out_of_memory(len.saturating_mul(mem::size_of::<T>()), e))?;
    Ok(buffer)
}
