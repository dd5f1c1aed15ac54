//! Volume and stereo balance.

/// Volume and balance applied to every block the device callback renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixParameters {
    /// Linear gain in [0.0, 1.0].
    pub volume: f32,
    /// Stereo balance in [0.0, 1.0]; 0.5 is centred.
    pub balance: f32,
}

impl MixParameters {
    /// Centred balance.
    pub const CENTER: f32 = 0.5;

    /// Creates parameters, clamping both values into [0.0, 1.0].
    pub fn new(volume: f32, balance: f32) -> Self {
        Self {
            volume: clamp_volume(volume),
            balance: clamp_balance(balance),
        }
    }
}

impl Default for MixParameters {
    fn default() -> Self {
        Self {
            volume: 1.0,
            balance: Self::CENTER,
        }
    }
}

/// Clamps a volume into [0.0, 1.0]; NaN becomes silence.
pub(crate) fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Clamps a balance into [0.0, 1.0]; NaN becomes centred.
pub(crate) fn clamp_balance(balance: f32) -> f32 {
    if balance.is_nan() {
        MixParameters::CENTER
    } else {
        balance.clamp(0.0, 1.0)
    }
}

/// Applies volume and balance in place to interleaved stereo samples.
///
/// Every sample is scaled by `volume`. Balance attenuates only the side it
/// moves away from: above 0.5 the left channel (even indices) is further
/// scaled by `1.0 - balance`; below 0.5 the right channel (odd indices) is
/// scaled by `balance`. The opposite channel is never boosted.
///
/// No clamping is performed; callers pass values already in [0.0, 1.0].
///
/// # Example
///
/// ```
/// use stream_player::mix;
///
/// let mut block = [1.0f32, 1.0, 0.5, 0.5];
/// mix(&mut block, 0.5, 1.0);
/// assert_eq!(block, [0.0, 0.5, 0.0, 0.25]);
/// ```
pub fn mix(samples: &mut [f32], volume: f32, balance: f32) {
    let (left_gain, right_gain) = if balance > MixParameters::CENTER {
        (volume * (1.0 - balance), volume)
    } else if balance < MixParameters::CENTER {
        (volume, volume * balance)
    } else {
        (volume, volume)
    };

    let mut frames = samples.chunks_exact_mut(2);
    for frame in &mut frames {
        frame[0] *= left_gain;
        frame[1] *= right_gain;
    }
    // An unpaired trailing sample sits in the left slot
    for sample in frames.into_remainder() {
        *sample *= left_gain;
    }
}
