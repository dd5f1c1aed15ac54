//! Audio pipeline components.
//!
//! The pipeline connects a loaded source to the output device:
//!
//! ```text
//! SourceBuffer → ConversionStream ─swap→ PlaybackSlot → DeviceCallback → cpal buffer
//!                 (command thread)                        (audio thread)
//! ```
//!
//! - **ConversionStream**: converts a whole source up front, hands out frames
//! - **PlaybackSlot**: the one lock both threads share; guards only a swap
//! - **DeviceCallback**: copies, mixes and zero-pads inside the cpal callback
//! - **mix**: volume and balance, applied per block
//!
//! All heavy work happens before a stream is swapped into the slot, so the
//! audio thread never waits on decoding or resampling.

mod callback;
mod mix;
mod slot;
mod stream;

pub use callback::DeviceCallback;
pub use mix::{mix, MixParameters};
pub use slot::PlaybackSlot;
pub use stream::ConversionStream;
