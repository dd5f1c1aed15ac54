//! Output device abstraction and the CPAL implementation.
//!
//! The core only ever asks a device to suspend or resume callback delivery;
//! the device in turn drives a [`DeviceCallback`](crate::DeviceCallback).

mod null;
mod output;

pub use null::NullOutput;
pub use output::OutputDevice;

use cpal::traits::{DeviceTrait, HostTrait};

use crate::format::AudioFormat;
use crate::PlayerError;

/// A hardware (or simulated) output channel whose callbacks can be paused.
///
/// Implementations are opened once with a fixed [`AudioFormat`] and are not
/// reconfigured afterwards. Both control methods must be idempotent.
pub trait AudioOutput {
    /// Starts (or continues) delivering render callbacks.
    fn resume(&mut self) -> Result<(), PlayerError>;

    /// Stops delivering render callbacks until the next [`resume`](Self::resume).
    fn suspend(&mut self) -> Result<(), PlayerError>;

    /// Returns `true` while callbacks are being delivered.
    fn is_running(&self) -> bool;

    /// The fixed format the device renders.
    fn format(&self) -> AudioFormat;

    /// Device name for logging.
    fn name(&self) -> &str;
}

/// Lists all available output devices.
///
/// # Errors
///
/// Returns an error if the audio host cannot be accessed.
pub fn list_output_devices() -> Result<Vec<String>, PlayerError> {
    let host = cpal::default_host();
    let devices = host.output_devices().map_err(PlayerError::device_init)?;

    Ok(devices.filter_map(|d| d.name().ok()).collect())
}

/// Gets the name of the default output device, if any.
pub fn default_output_device_name() -> Option<String> {
    cpal::default_host()
        .default_output_device()
        .and_then(|d| d.name().ok())
}
