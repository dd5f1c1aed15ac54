//! Output that renders nowhere.

use super::AudioOutput;
use crate::format::AudioFormat;
use crate::PlayerError;

/// An output device with no hardware behind it.
///
/// It only tracks whether it would be running. Pair it with a
/// [`DeviceCallback`](crate::DeviceCallback) driven by hand to test the
/// pipeline in CI, or to run the player headless.
#[derive(Debug, Clone)]
pub struct NullOutput {
    format: AudioFormat,
    running: bool,
    resume_calls: usize,
    suspend_calls: usize,
}

impl NullOutput {
    /// Creates a suspended null output in `format`.
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            running: false,
            resume_calls: 0,
            suspend_calls: 0,
        }
    }

    /// How many times [`resume`](AudioOutput::resume) has been called.
    pub fn resume_calls(&self) -> usize {
        self.resume_calls
    }

    /// How many times [`suspend`](AudioOutput::suspend) has been called.
    pub fn suspend_calls(&self) -> usize {
        self.suspend_calls
    }
}

impl Default for NullOutput {
    fn default() -> Self {
        Self::new(AudioFormat::STEREO_F32_48K)
    }
}

impl AudioOutput for NullOutput {
    fn resume(&mut self) -> Result<(), PlayerError> {
        self.resume_calls += 1;
        self.running = true;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), PlayerError> {
        self.suspend_calls += 1;
        self.running = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn format(&self) -> AudioFormat {
        self.format
    }

    fn name(&self) -> &str {
        "null"
    }
}
