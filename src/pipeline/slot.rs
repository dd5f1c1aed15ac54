//! State shared between the command thread and the audio callback.

use std::mem;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::mix::{clamp_balance, clamp_volume, MixParameters};
use super::ConversionStream;

/// The audio-relevant subset of player state.
pub(crate) struct SlotState {
    /// Stream the callback drains, if any.
    pub stream: Option<ConversionStream>,
    pub mix: MixParameters,
}

/// Handle to the active-stream slot and mix parameters.
///
/// Cloning is cheap; the controller keeps one handle and the device callback
/// another. Every command-side method holds the lock only for a
/// `mem::replace` or a scalar store, so the callback can be blocked for no
/// longer than that. Streams swapped out are returned to the caller and
/// dropped on the command thread, never inside the lock.
#[derive(Clone)]
pub struct PlaybackSlot {
    inner: Arc<Mutex<SlotState>>,
}

impl PlaybackSlot {
    /// Creates an empty slot with default mix parameters.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotState {
                stream: None,
                mix: MixParameters::default(),
            })),
        }
    }

    /// Makes `stream` the active stream and returns the one it replaces.
    pub(crate) fn swap_stream(&self, stream: Option<ConversionStream>) -> Option<ConversionStream> {
        let mut state = self.inner.lock();
        mem::replace(&mut state.stream, stream)
    }

    /// Sets the volume, clamped to [0.0, 1.0].
    pub fn set_volume(&self, volume: f32) {
        let volume = clamp_volume(volume);
        self.inner.lock().mix.volume = volume;
    }

    /// Sets the balance, clamped to [0.0, 1.0].
    pub fn set_balance(&self, balance: f32) {
        let balance = clamp_balance(balance);
        self.inner.lock().mix.balance = balance;
    }

    /// Sets volume and balance together so the callback never sees half an update.
    pub fn set_mix(&self, mix: MixParameters) {
        let mix = MixParameters::new(mix.volume, mix.balance);
        self.inner.lock().mix = mix;
    }

    /// Snapshot of the current mix parameters.
    pub fn mix(&self) -> MixParameters {
        self.inner.lock().mix
    }

    /// Returns `true` if a stream is active.
    pub fn has_stream(&self) -> bool {
        self.inner.lock().stream.is_some()
    }

    /// Converted bytes left in the active stream (0 when none).
    pub fn queued_bytes(&self) -> usize {
        self.inner
            .lock()
            .stream
            .as_ref()
            .map_or(0, ConversionStream::available)
    }

    /// Locks the slot for one render pass of the device callback.
    pub(crate) fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.inner.lock()
    }
}

impl Default for PlaybackSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlaybackSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("PlaybackSlot")
            .field("stream", &state.stream)
            .field("mix", &state.mix)
            .finish()
    }
}
