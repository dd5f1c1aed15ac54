//! Audio format descriptors and conversion utilities.
//!
//! This module provides:
//! - [`AudioFormat`] and [`SampleEncoding`] descriptors
//! - Sample encoding conversion (any supported encoding ↔ f32)
//! - Channel conversion (mono ↔ stereo and arbitrary layouts)
//! - Sample rate conversion (linear-interpolation resampling)

mod audio_format;
mod convert;
mod resample;

pub use audio_format::{AudioFormat, SampleEncoding};
pub use convert::{
    decode_samples, decode_samples_into, encode_samples, f32_to_i16, i16_to_f32,
    mono_to_stereo, remix_channels, remix_channels_into, stereo_to_mono,
};
pub use resample::{output_frames, resample, resample_into};
