//! The real-time render entry point.

use super::mix::{mix, MixParameters};
use super::PlaybackSlot;

const SAMPLE_BYTES: usize = std::mem::size_of::<f32>();
/// One stereo f32 frame.
const FRAME_BYTES: usize = 2 * SAMPLE_BYTES;

/// Fills device buffers from the active stream.
///
/// Runs on the audio backend's real-time thread. Each call locks the shared
/// slot, copies converted bytes straight into the device buffer, mixes only
/// the bytes that were actually retrieved, and zero-fills whatever is left.
/// It never allocates, never does I/O and has no error path: anything that
/// cannot be rendered comes out as silence.
///
/// # Example
///
/// ```
/// use stream_player::{DeviceCallback, PlaybackSlot};
///
/// let mut callback = DeviceCallback::new(PlaybackSlot::new());
/// let mut out = [1.0f32; 512];
/// callback.render(&mut out);
/// assert!(out.iter().all(|&s| s == 0.0)); // nothing loaded yet
/// ```
pub struct DeviceCallback {
    slot: PlaybackSlot,
}

impl DeviceCallback {
    /// Creates a callback reading from `slot`.
    pub fn new(slot: PlaybackSlot) -> Self {
        Self { slot }
    }

    /// Renders device-format bytes (little-endian stereo f32) into `out`.
    ///
    /// Exactly `out.len()` bytes are written. Returns how many of them came
    /// from the stream; the remainder is zero padding.
    pub fn render_bytes(&mut self, out: &mut [u8]) -> usize {
        let (filled, params) = self.pull(out);

        let (audio, padding) = out.split_at_mut(filled);
        for raw in audio.chunks_exact_mut(FRAME_BYTES) {
            let mut frame = [
                f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
                f32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]),
            ];
            mix(&mut frame, params.volume, params.balance);
            raw[..SAMPLE_BYTES].copy_from_slice(&frame[0].to_le_bytes());
            raw[SAMPLE_BYTES..].copy_from_slice(&frame[1].to_le_bytes());
        }
        padding.fill(0);

        filled
    }

    /// Renders into a typed f32 device buffer, as handed over by cpal.
    ///
    /// Returns the number of samples that came from the stream.
    pub fn render(&mut self, out: &mut [f32]) -> usize {
        let (filled_bytes, params) = self.pull(bytemuck::cast_slice_mut(out));
        let filled = filled_bytes / SAMPLE_BYTES;

        let (audio, padding) = out.split_at_mut(filled);
        // Stored bytes are little-endian; a no-op on LE targets
        for sample in audio.iter_mut() {
            *sample = f32::from_le_bytes(sample.to_ne_bytes());
        }
        mix(audio, params.volume, params.balance);
        padding.fill(0.0);

        filled
    }

    /// Copies converted bytes out of the active stream under the slot lock.
    fn pull(&mut self, out: &mut [u8]) -> (usize, MixParameters) {
        let mut state = self.slot.lock();
        let params = state.mix;
        let filled = match state.stream.as_mut() {
            Some(stream) => stream.get_into(out),
            None => 0,
        };
        (filled, params)
    }
}
