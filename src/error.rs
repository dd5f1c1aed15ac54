//! Error types for stream-player.
//!
//! Errors are split into two categories:
//! - **Fatal errors**: [`PlayerError::DeviceInitError`] prevents the player from
//!   being constructed at all, since nothing can be heard without an output device.
//! - **Load errors**: everything else. These abort the operation that raised them
//!   (usually a track load), are surfaced through the
//!   [`EventCallback`](crate::EventCallback), and never disturb current playback.

use std::collections::TryReserveError;
use std::fmt;

/// Errors raised by the playback pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// The source (or requested output) format cannot be converted.
    #[error("unsupported format: {format}")]
    UnsupportedFormat {
        /// Description of the offending format.
        format: String,
    },

    /// Allocation failed while queueing audio for conversion.
    #[error("out of memory queueing {requested} bytes of audio")]
    OutOfMemory {
        /// Number of bytes that could not be reserved.
        requested: usize,
        /// The allocator's error.
        #[source]
        source: TryReserveError,
    },

    /// The converter rejected malformed or truncated sample data.
    #[error("conversion failed: {reason}")]
    ConversionError {
        /// Why the data was rejected.
        reason: String,
    },

    /// The audio output device could not be opened.
    #[error("could not open audio device: {reason}")]
    DeviceInitError {
        /// Why the device could not be opened.
        reason: String,
    },

    /// The audio backend refused to pause or resume the output stream.
    #[error("audio device control failed: {reason}")]
    DeviceControl {
        /// Backend error message.
        reason: String,
    },

    /// The source file could not be decoded.
    #[error("couldn't load audio file: {reason}")]
    DecodeError {
        /// Decoder error message.
        reason: String,
    },
}

impl PlayerError {
    /// Creates an unsupported-format error.
    pub fn unsupported(format: impl fmt::Display) -> Self {
        Self::UnsupportedFormat {
            format: format.to_string(),
        }
    }

    /// Creates a conversion error with the given reason.
    pub fn conversion(reason: impl Into<String>) -> Self {
        Self::ConversionError {
            reason: reason.into(),
        }
    }

    /// Creates a device initialisation error with the given reason.
    pub fn device_init(reason: impl fmt::Display) -> Self {
        Self::DeviceInitError {
            reason: reason.to_string(),
        }
    }

    /// Creates a device control error with the given reason.
    pub fn device_control(reason: impl fmt::Display) -> Self {
        Self::DeviceControl {
            reason: reason.to_string(),
        }
    }

    /// Creates a decode error with the given reason.
    pub fn decode(reason: impl fmt::Display) -> Self {
        Self::DecodeError {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn out_of_memory(requested: usize, source: TryReserveError) -> Self {
        Self::OutOfMemory { requested, source }
    }

    /// Returns the fieldless tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::ConversionError { .. } => ErrorKind::ConversionError,
            Self::DeviceInitError { .. } => ErrorKind::DeviceInitError,
            Self::DeviceControl { .. } => ErrorKind::DeviceControl,
            Self::DecodeError { .. } => ErrorKind::DecodeError,
        }
    }

    /// Returns `true` if the process cannot continue playing audio.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DeviceInitError { .. })
    }
}

/// Category of a [`PlayerError`], carried in user notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`PlayerError::UnsupportedFormat`].
    UnsupportedFormat,
    /// See [`PlayerError::OutOfMemory`].
    OutOfMemory,
    /// See [`PlayerError::ConversionError`].
    ConversionError,
    /// See [`PlayerError::DeviceInitError`].
    DeviceInitError,
    /// See [`PlayerError::DeviceControl`].
    DeviceControl,
    /// See [`PlayerError::DecodeError`].
    DecodeError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsupportedFormat => "unsupported format",
            Self::OutOfMemory => "out of memory",
            Self::ConversionError => "conversion error",
            Self::DeviceInitError => "device init error",
            Self::DeviceControl => "device control error",
            Self::DecodeError => "decode error",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_error_display() {
        let err = PlayerError::device_init("no output devices");
        assert_eq!(
            err.to_string(),
            "could not open audio device: no output devices"
        );
    }

    #[test]
    fn test_conversion_error() {
        let err = PlayerError::conversion("truncated frame");
        assert_eq!(err.to_string(), "conversion failed: truncated frame");
        assert_eq!(err.kind(), ErrorKind::ConversionError);
    }

    #[test]
    fn test_out_of_memory_kind() {
        let source = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let err = PlayerError::out_of_memory(usize::MAX, source);
        assert_eq!(err.kind(), ErrorKind::OutOfMemory);
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_only_device_init_is_fatal() {
        assert!(PlayerError::device_init("x").is_fatal());
        assert!(!PlayerError::decode("x").is_fatal());
        assert!(!PlayerError::unsupported("x").is_fatal());
        assert!(!PlayerError::device_control("x").is_fatal());
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::DecodeError.to_string(), "decode error");
    }
}
