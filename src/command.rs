//! Tagged player commands.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One user action, as issued by a button or a console line.
///
/// Text commands are case-insensitive and take at most one argument:
///
/// | Text               | Command                 |
/// |--------------------|-------------------------|
/// | `play`             | [`Play`](Self::Play)    |
/// | `pause`            | [`Pause`](Self::Pause)  |
/// | `toggle`           | [`TogglePause`](Self::TogglePause) |
/// | `stop`             | [`Stop`](Self::Stop)    |
/// | `restart`          | [`Restart`](Self::Restart) |
/// | `load <path>`      | [`LoadTrack`](Self::LoadTrack) |
/// | `volume <0..1>`    | [`SetVolume`](Self::SetVolume) |
/// | `balance <0..1>`   | [`SetBalance`](Self::SetBalance) |
///
/// # Example
///
/// ```
/// use stream_player::PlayerCommand;
///
/// let cmd: PlayerCommand = "volume 0.5".parse().unwrap();
/// assert_eq!(cmd, PlayerCommand::SetVolume(0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Resume playback.
    Play,
    /// Pause playback, keeping the position.
    Pause,
    /// Pause if playing, otherwise play.
    TogglePause,
    /// Unload the track and go silent.
    Stop,
    /// Rewind the current track to its start.
    Restart,
    /// Decode a WAV file and make it the current track.
    LoadTrack(PathBuf),
    /// Set the volume; out-of-range values are clamped.
    SetVolume(f32),
    /// Set the balance; out-of-range values are clamped.
    SetBalance(f32),
}

/// Error returned when a text command cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    /// The line was empty.
    #[error("empty command")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// The command needs an argument that was not given.
    #[error("{0} requires an argument")]
    MissingArgument(&'static str),

    /// The argument could not be parsed.
    #[error("invalid argument for {command}: {argument}")]
    InvalidArgument {
        /// Command the argument belongs to.
        command: &'static str,
        /// The offending text.
        argument: String,
    },

    /// A command that takes no argument was given one.
    #[error("{0} takes no argument")]
    UnexpectedArgument(&'static str),
}

impl FromStr for PlayerCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (s, ""),
        };
        if word.is_empty() {
            return Err(ParseCommandError::Empty);
        }

        let bare = |cmd: PlayerCommand, name: &'static str| {
            if rest.is_empty() {
                Ok(cmd)
            } else {
                Err(ParseCommandError::UnexpectedArgument(name))
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "play" => bare(Self::Play, "play"),
            "pause" => bare(Self::Pause, "pause"),
            "toggle" => bare(Self::TogglePause, "toggle"),
            "stop" => bare(Self::Stop, "stop"),
            "restart" => bare(Self::Restart, "restart"),
            "load" => {
                if rest.is_empty() {
                    return Err(ParseCommandError::MissingArgument("load"));
                }
                Ok(Self::LoadTrack(PathBuf::from(rest)))
            }
            "volume" => parse_level(rest, "volume").map(Self::SetVolume),
            "balance" => parse_level(rest, "balance").map(Self::SetBalance),
            _ => Err(ParseCommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_level(arg: &str, command: &'static str) -> Result<f32, ParseCommandError> {
    if arg.is_empty() {
        return Err(ParseCommandError::MissingArgument(command));
    }
    arg.parse().map_err(|_| ParseCommandError::InvalidArgument {
        command,
        argument: arg.to_string(),
    })
}

impl fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => write!(f, "play"),
            Self::Pause => write!(f, "pause"),
            Self::TogglePause => write!(f, "toggle"),
            Self::Stop => write!(f, "stop"),
            Self::Restart => write!(f, "restart"),
            Self::LoadTrack(path) => write!(f, "load {}", path.display()),
            Self::SetVolume(v) => write!(f, "volume {v}"),
            Self::SetBalance(b) => write!(f, "balance {b}"),
        }
    }
}
