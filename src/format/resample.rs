//! Sample rate conversion.
//!
//! This module provides basic resampling using linear interpolation over
//! interleaved frames. It is fast and allocation-light, which matters because
//! a whole track is converted in one go when it is loaded.

/// Number of output frames produced when resampling `frames` input frames.
///
/// `ceil(frames * to_rate / from_rate)`, computed in integer arithmetic so the
/// byte accounting of the conversion stream is exact.
pub fn output_frames(frames: usize, from_rate: u32, to_rate: u32) -> usize {
    if frames == 0 || from_rate == 0 || to_rate == 0 {
        return 0;
    }
    if from_rate == to_rate {
        return frames;
    }
    let numerator = frames as u128 * u128::from(to_rate);
    numerator.div_ceil(u128::from(from_rate)) as usize
}

/// Resamples interleaved audio from one sample rate to another.
///
/// Each channel is interpolated independently; the interleaving is preserved.
/// Any trailing partial frame is dropped.
///
/// # Arguments
///
/// * `samples` - Interleaved input samples
/// * `channels` - Channels per frame
/// * `from_rate` - Source sample rate in Hz
/// * `to_rate` - Target sample rate in Hz
pub fn resample(samples: &[f32], channels: u16, from_rate: u32, to_rate: u32) -> Vec<f32> {
    let frames = samples.len() / usize::from(channels.max(1));
    let capacity = output_frames(frames, from_rate, to_rate) * usize::from(channels);
    let mut output = Vec::with_capacity(capacity);
    resample_into(samples, channels, from_rate, to_rate, &mut output);
    output
}

/// Resamples interleaved audio, appending the result to `out`.
///
/// Produces exactly `output_frames(frames, from_rate, to_rate)` frames and
/// does not allocate if `out` already has room for them.
pub fn resample_into(
    samples: &[f32],
    channels: u16,
    from_rate: u32,
    to_rate: u32,
    out: &mut Vec<f32>,
) {
    let channels = usize::from(channels);
    if channels == 0 {
        return;
    }
    let frames = samples.len() / channels;
    if from_rate == to_rate {
        out.extend_from_slice(&samples[..frames * channels]);
        return;
    }

    let out_frames = output_frames(frames, from_rate, to_rate);
    let step = f64::from(from_rate) / f64::from(to_rate);

    for i in 0..out_frames {
        let src_pos = i as f64 * step;
        let src_idx = src_pos.floor() as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        if src_idx + 1 < frames {
            // Linear interpolation between two frames
            let a = &samples[src_idx * channels..(src_idx + 1) * channels];
            let b = &samples[(src_idx + 1) * channels..(src_idx + 2) * channels];
            out.extend(a.iter().zip(b).map(|(&s1, &s2)| s1 + (s2 - s1) * frac));
        } else {
            // Last frame or beyond, hold the final value
            let last = src_idx.min(frames - 1);
            out.extend_from_slice(&samples[last * channels..(last + 1) * channels]);
        }
    }
}
