//! Source audio: decoded tracks and the loaders that produce them.
//!
//! The player itself never parses files. A [`SourceBuffer`] is just bytes
//! plus their [`AudioFormat`](crate::AudioFormat); this module provides a WAV
//! loader and a synthetic [`MockSource`] as two ways of getting one.

mod buffer;
mod mock;
mod wav;

pub use buffer::SourceBuffer;
pub use mock::MockSource;
pub use wav::{load_wav, load_wav_bytes};
