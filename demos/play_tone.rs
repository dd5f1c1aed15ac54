//! Plays a synthetic tone in several source formats.
//!
//! Each tone is generated at a different rate, channel count and encoding
//! and hot-swapped in while the device keeps running, then panned across
//! the stereo field.
//!
//! Run with: cargo run --example play_tone

use std::thread;
use std::time::Duration;

use stream_player::{AudioFormat, MockSource, Player, SampleEncoding};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut player = Player::builder().volume(0.3).build()?;
    println!("Output device: {}", player.device_name());
    player.play()?;

    let formats = [
        AudioFormat::new(8_000, 1, SampleEncoding::U8),
        AudioFormat::new(22_050, 1, SampleEncoding::I16),
        AudioFormat::new(44_100, 2, SampleEncoding::I24),
        AudioFormat::new(96_000, 2, SampleEncoding::F32),
    ];

    for (format, frequency) in formats.into_iter().zip([330.0, 440.0, 550.0, 660.0]) {
        let mut mock = MockSource::new(format);
        mock.generate_sine(frequency, 1500);
        println!("{format}: {frequency}Hz");
        player.load_source(mock.into_source())?;
        thread::sleep(Duration::from_millis(1000));
    }

    // Pan hard left to hard right over the rest of the last tone
    player.restart()?;
    for step in 0..=10 {
        player.set_balance(step as f32 / 10.0);
        thread::sleep(Duration::from_millis(120));
    }

    player.stop()?;
    Ok(())
}
