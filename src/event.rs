//! Notifications for the user-facing layer.
//!
//! Events are how the player talks back to whatever front-end drives it.
//! None of them originate on the real-time thread's hot path, and none of
//! them are fatal: the player keeps running after every event.

use std::sync::Arc;

use crate::controller::PlaybackState;
use crate::error::{ErrorKind, PlayerError};
use crate::format::AudioFormat;

/// Runtime events emitted by the player.
///
/// # Example
///
/// ```
/// use stream_player::PlayerEvent;
///
/// fn handle_event(event: PlayerEvent) {
///     match event {
///         PlayerEvent::SourceLoaded { format, .. } => {
///             eprintln!("Now playing {format}");
///         }
///         PlayerEvent::LoadFailed { kind, message } => {
///             eprintln!("Couldn't load track ({kind}): {message}");
///         }
///         PlayerEvent::StateChanged { previous, current } => {
///             eprintln!("{previous:?} -> {current:?}");
///         }
///         PlayerEvent::Restarted => eprintln!("Rewound"),
///         PlayerEvent::DeviceError { message } => eprintln!("Device: {message}"),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// A new source was converted and is now the active stream.
    SourceLoaded {
        /// The source's native format.
        format: AudioFormat,
        /// Size of the decoded source in bytes.
        source_bytes: usize,
        /// Size of the converted, device-format audio in bytes.
        converted_bytes: usize,
    },

    /// Loading a source failed. Previous playback is unaffected.
    LoadFailed {
        /// Category of the failure.
        kind: ErrorKind,
        /// Human-readable message suitable for a dialog box.
        message: String,
    },

    /// The playback state machine moved to a new state.
    StateChanged {
        /// State before the command.
        previous: PlaybackState,
        /// State after the command.
        current: PlaybackState,
    },

    /// The current source was re-queued from the beginning.
    Restarted,

    /// The audio backend reported a problem with the output stream.
    ///
    /// Playback may glitch or stall; the player itself stays usable.
    DeviceError {
        /// Backend error message.
        message: String,
    },
}

impl PlayerEvent {
    /// Builds a [`PlayerEvent::LoadFailed`] from an error.
    pub fn load_failed(error: &PlayerError) -> Self {
        Self::LoadFailed {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Callback type for receiving player events.
///
/// Register one via [`PlayerBuilder::on_event()`](crate::PlayerBuilder::on_event).
pub type EventCallback = Arc<dyn Fn(PlayerEvent) + Send + Sync>;

/// Creates an [`EventCallback`] from a closure.
///
/// # Example
///
/// ```
/// use stream_player::{event_callback, PlayerEvent};
///
/// let callback = event_callback(|event: PlayerEvent| {
///     println!("Got event: {:?}", event);
/// });
/// ```
pub fn event_callback<F>(f: F) -> EventCallback
where
    F: Fn(PlayerEvent) + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failed_from_error() {
        let err = PlayerError::decode("bad RIFF header");
        let event = PlayerEvent::load_failed(&err);
        if let PlayerEvent::LoadFailed { kind, message } = event {
            assert_eq!(kind, ErrorKind::DecodeError);
            assert!(message.contains("bad RIFF header"));
        } else {
            panic!("Expected LoadFailed variant");
        }
    }

    #[test]
    fn test_player_event_debug() {
        let event = PlayerEvent::StateChanged {
            previous: PlaybackState::Paused,
            current: PlaybackState::Playing,
        };
        let debug = format!("{event:?}");
        assert!(debug.contains("Paused"));
        assert!(debug.contains("Playing"));
    }

    #[test]
    fn test_event_callback_helper() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let called = Arc::new(AtomicBool::new(false));
        let called_clone = called.clone();

        let callback = event_callback(move |_| {
            called_clone.store(true, Ordering::SeqCst);
        });

        callback(PlayerEvent::Restarted);
        assert!(called.load(Ordering::SeqCst));
    }
}
