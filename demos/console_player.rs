//! Console audio player.
//!
//! Reads commands from stdin and plays WAV files through the default output
//! device. Type `help` for the command list.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example console_player -- music.wav
//! RUST_LOG=stream_player=debug cargo run --example console_player
//! ```

use std::io::{self, BufRead, Write};

use stream_player::{Player, PlayerCommand, PlayerEvent};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  load <file.wav>   decode and queue a track
  play | pause      resume or pause playback
  toggle            pause/resume
  restart           rewind the current track
  stop              unload the current track
  volume <0..1>     set the volume
  balance <0..1>    set the balance (0.5 is centred)
  devices           list output devices
  quit              exit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut player = Player::builder()
        .on_event(|event| match event {
            PlayerEvent::LoadFailed { message, .. } => eprintln!("Couldn't load track: {message}"),
            PlayerEvent::SourceLoaded { format, .. } => println!("Loaded {format}"),
            PlayerEvent::DeviceError { message } => eprintln!("Audio device error: {message}"),
            _ => {}
        })
        .build()?;

    println!("Playing through: {}", player.device_name());

    if let Some(path) = std::env::args().nth(1) {
        if player.load_track(&path).is_ok() {
            player.play()?;
        }
    }

    println!("{HELP}");
    let stdin = io::stdin();
    loop {
        print!("[{:?}] > ", player.state());
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "devices" => {
                for name in stream_player::list_output_devices()? {
                    println!("  {name}");
                }
            }
            text => match text.parse::<PlayerCommand>() {
                // Load failures were already reported through the event callback
                Ok(cmd @ PlayerCommand::LoadTrack(_)) => {
                    let _ = player.dispatch(cmd);
                }
                Ok(cmd) => {
                    if let Err(e) = player.dispatch(cmd) {
                        eprintln!("Error: {e}");
                    }
                }
                Err(e) => eprintln!("{e} (type `help`)"),
            },
        }
    }

    player.stop()?;
    Ok(())
}
