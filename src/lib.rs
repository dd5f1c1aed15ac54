//! # stream-player
//!
//! **Note:** This crate is under active development. The API may change before 1.0.
//!
//! Glitch-free playback of decoded audio through one output device.
//!
//! `stream-player` takes decoded tracks in whatever format they come in,
//! converts them once to the device's fixed format, and streams them out via
//! CPAL with volume and stereo balance applied per block. Switching tracks
//! never stalls the audio thread: the new track is converted up front and
//! swapped in under a lock that guards nothing but the swap.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stream_player::{Player, PlayerCommand};
//!
//! let mut player = Player::builder()
//!     .volume(0.8)
//!     .on_event(|e| tracing::warn!(?e, "player event"))
//!     .build()?;
//!
//! player.dispatch("load song.wav".parse().unwrap())?;
//! player.dispatch(PlayerCommand::Play)?;
//!
//! // Later: rewind, pan right, stop
//! player.restart()?;
//! player.set_balance(0.75);
//! player.stop()?;
//! # Ok::<(), stream_player::PlayerError>(())
//! ```
//!
//! ## Architecture
//!
//! The crate maintains a strict thread boundary:
//!
//! - **Command thread**: decodes, converts, and swaps whole streams; owns the
//!   [`Player`] and everything that can fail
//! - **Playback slot**: the single lock shared with the audio thread, held
//!   only for a pointer swap or a scalar store
//! - **CPAL thread**: copies converted frames, mixes, zero-pads; never
//!   allocates or frees
//!
//! For tests and headless use, [`PlaybackController`] runs over any
//! [`AudioOutput`], such as [`NullOutput`], with a [`DeviceCallback`] driven
//! by hand.

#![warn(missing_docs)]
// Audio code requires intentional numeric casts between sample formats
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_lossless
)]
// unwrap/expect allowed in tests only
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
// These doc lints are too strict for internal implementation details
#![allow(clippy::missing_panics_doc, clippy::missing_errors_doc)]

mod command;
mod config;
mod controller;
pub mod device;
mod error;
mod event;
pub mod format;
mod pipeline;
mod player;
pub mod source;

pub use command::{ParseCommandError, PlayerCommand};
pub use config::PlayerConfig;
pub use controller::{PlaybackController, PlaybackState};
pub use device::{
    default_output_device_name, list_output_devices, AudioOutput, NullOutput, OutputDevice,
};
pub use error::{ErrorKind, PlayerError};
pub use event::{event_callback, EventCallback, PlayerEvent};
pub use format::{AudioFormat, SampleEncoding};
pub use pipeline::{mix, ConversionStream, DeviceCallback, MixParameters, PlaybackSlot};
pub use player::{Player, PlayerBuilder};
pub use source::{load_wav, load_wav_bytes, MockSource, SourceBuffer};
