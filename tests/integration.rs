//! Integration tests for stream-player.
//!
//! These drive the controller and the device callback by hand over a
//! `NullOutput`, so they run without audio hardware.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use stream_player::{
    load_wav, AudioFormat, ConversionStream, DeviceCallback, ErrorKind, EventCallback,
    MockSource, NullOutput, PlaybackController, PlaybackSlot, PlaybackState, PlayerCommand,
    PlayerEvent, SampleEncoding, SourceBuffer,
};

fn controller() -> PlaybackController<NullOutput> {
    PlaybackController::new(NullOutput::default(), PlaybackSlot::new())
}

fn constant_source(value: f32, frames: usize) -> SourceBuffer {
    let mut mock = MockSource::device_native();
    mock.add_samples(&vec![value; frames * 2]);
    mock.into_source()
}

fn as_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[test]
fn test_drain_identity_stream_in_32k_gets() {
    let format = AudioFormat::STEREO_F32_48K;
    let mut stream = ConversionStream::new(format, format).unwrap();
    stream.put(&vec![0u8; 480_000]).unwrap();
    stream.flush().unwrap();
    assert_eq!(stream.available(), 480_000);

    let mut sizes = Vec::new();
    loop {
        let chunk = stream.get(32_768);
        if chunk.is_empty() {
            break;
        }
        sizes.push(chunk.len());
    }

    // 14 full gets, then 21,248 bytes (2,656 frames)
    assert_eq!(sizes.len(), 15);
    assert!(sizes[..14].iter().all(|&n| n == 32_768));
    assert_eq!(sizes[14], 21_248);
    assert_eq!(stream.available(), 0);
}

#[test]
fn test_get_never_returns_partial_frames() {
    let format = AudioFormat::STEREO_F32_48K;
    let mut stream = ConversionStream::new(format, format).unwrap();
    stream.put(&[0u8; 64]).unwrap();
    stream.flush().unwrap();

    assert!(stream.get(7).is_empty());
    assert_eq!(stream.get(20).len(), 16);
    assert_eq!(stream.available(), 48);

    stream.clear();
    assert_eq!(stream.available(), 0);
}

#[test]
fn test_22k_mono_grows_to_48k_stereo() {
    let input = AudioFormat::new(22_050, 1, SampleEncoding::I16);
    let mut mock = MockSource::new(input);
    mock.generate_sine(440.0, 1000);
    let source = mock.into_source();
    assert_eq!(source.frame_count(), 22_050);

    let mut stream = ConversionStream::new(input, AudioFormat::STEREO_F32_48K).unwrap();
    stream.put(source.bytes()).unwrap();
    stream.flush().unwrap();

    let available = stream.available();
    assert_eq!(available % 8, 0);
    assert_ne!(available, source.len());
    assert_eq!(available / 8, 48_000);
}

#[test]
fn test_22k_mono_load_queues_48k_stereo() {
    let input = AudioFormat::new(22_050, 1, SampleEncoding::I16);
    let mut mock = MockSource::new(input);
    mock.generate_sine(440.0, 1000);
    let source = mock.into_source();
    let source_bytes = source.len();

    let mut ctl = controller();
    ctl.load_source(source).unwrap();

    let queued = ctl.queued_bytes();
    assert_eq!(queued % 8, 0);
    assert_ne!(queued, source_bytes);
    assert_eq!(queued, 48_000 * 8);
    assert_eq!(ctl.state(), PlaybackState::Paused);
}

#[test]
fn test_oversized_source_fails_without_aborting() {
    let events = Arc::new(Mutex::new(Vec::<PlayerEvent>::new()));
    let sink = events.clone();
    let callback: EventCallback = Arc::new(move |e: PlayerEvent| sink.lock().unwrap().push(e));

    // Every 1 Hz frame expands to ~4 billion output frames
    let output = AudioFormat::new(u32::MAX, 2, SampleEncoding::F32);
    let mut ctl = PlaybackController::new(NullOutput::new(output), PlaybackSlot::new())
        .with_event_callback(callback);

    let small = SourceBuffer::new(vec![0u8; 8], AudioFormat::new(u32::MAX, 2, SampleEncoding::F32));
    ctl.load_source(small).unwrap();
    assert_eq!(ctl.queued_bytes(), 8);

    let huge = SourceBuffer::new(vec![128u8; 1_000_000], AudioFormat::new(1, 1, SampleEncoding::U8));
    let err = ctl.load_source(huge).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OutOfMemory);
    assert_eq!(ctl.queued_bytes(), 8);
    assert_eq!(ctl.source().unwrap().len(), 8);
    assert!(matches!(
        events.lock().unwrap().last(),
        Some(PlayerEvent::LoadFailed {
            kind: ErrorKind::OutOfMemory,
            ..
        })
    ));
}

#[test]
fn test_every_u8_source_frame_is_accounted_for() {
    let input = AudioFormat::new(44_100, 2, SampleEncoding::U8);
    let mut stream = ConversionStream::new(input, AudioFormat::STEREO_F32_48K).unwrap();
    stream.put(&vec![128u8; 441 * 2]).unwrap();
    stream.flush().unwrap();

    // ceil(441 * 48000 / 44100) = 480 frames
    assert_eq!(stream.available(), 480 * 8);
}

#[test]
fn test_stop_then_render_is_silent() {
    let mut ctl = controller();
    ctl.load_source(constant_source(0.5, 1024)).unwrap();
    ctl.play().unwrap();

    let mut callback = ctl.callback();
    ctl.stop().unwrap();

    let mut out = vec![0.25f32; 4096];
    assert_eq!(callback.render(&mut out), 0);
    assert!(out.iter().all(|&s| s == 0.0));
}

#[test]
fn test_volume_clamps_out_of_range() {
    let mut ctl = controller();
    ctl.set_volume(-5.0);
    assert_eq!(ctl.volume(), 0.0);
    ctl.set_volume(2.0);
    assert_eq!(ctl.volume(), 1.0);
    ctl.set_volume(f32::NAN);
    assert_eq!(ctl.volume(), 0.0);
    ctl.set_balance(f32::NAN);
    assert_eq!(ctl.balance(), 0.5);
}

#[test]
fn test_callback_always_fills_request() {
    // (loaded frames, requested bytes)
    let cases: [(Option<usize>, usize); 6] = [
        (None, 0),
        (None, 4096),
        (Some(0), 4096),
        (Some(16), 64),
        (Some(16), 4096),
        (Some(1024), 4096),
    ];

    for (frames, request) in cases {
        let slot = PlaybackSlot::new();
        let mut ctl = PlaybackController::new(NullOutput::default(), slot.clone());
        if let Some(frames) = frames {
            if frames > 0 {
                ctl.load_source(constant_source(1.0, frames)).unwrap();
            }
        }

        let mut callback = DeviceCallback::new(slot);
        let mut out = vec![0xAAu8; request];
        let filled = callback.render_bytes(&mut out);

        let expected = frames.unwrap_or(0).saturating_mul(8).min(request);
        assert_eq!(filled, expected, "frames={frames:?} request={request}");
        assert!(
            out[filled..].iter().all(|&b| b == 0),
            "tail not zeroed for frames={frames:?} request={request}"
        );
    }
}

#[test]
fn test_callback_applies_mix_to_retrieved_audio() {
    let mut ctl = controller();
    ctl.load_source(constant_source(1.0, 4)).unwrap();
    ctl.set_volume(0.5);
    ctl.set_balance(1.0);

    let mut out = vec![0u8; 64];
    ctl.callback().render_bytes(&mut out);

    let samples = as_f32(&out);
    // Full right silences the left channel
    assert_eq!(&samples[..8], &[0.0, 0.5, 0.0, 0.5, 0.0, 0.5, 0.0, 0.5]);
    assert!(samples[8..].iter().all(|&s| s == 0.0));
}

#[test]
fn test_commands_race_a_rendering_thread() {
    let mut ctl = controller();
    let mut callback = ctl.callback();

    let done = Arc::new(AtomicBool::new(false));
    let renders = Arc::new(AtomicUsize::new(0));
    let renderer = {
        let done = done.clone();
        let renders = renders.clone();
        thread::spawn(move || {
            let mut out = [0.0f32; 512];
            let mut bad = Vec::new();
            while !done.load(Ordering::Acquire) {
                callback.render(&mut out);
                for frame in out.chunks_exact(2) {
                    let whole = frame[0] == frame[1];
                    if !whole || ![0.0, 0.25, 0.75].contains(&frame[0]) {
                        bad.push((frame[0], frame[1]));
                    }
                }
                renders.fetch_add(1, Ordering::Release);
            }
            bad
        })
    };

    while renders.load(Ordering::Acquire) == 0 {
        thread::yield_now();
    }

    for _ in 0..200 {
        ctl.load_source(constant_source(0.25, 4800)).unwrap();
        ctl.restart().unwrap();
        ctl.stop().unwrap();
        ctl.load_source(constant_source(0.75, 4800)).unwrap();
        ctl.play().unwrap();
        ctl.restart().unwrap();
    }

    done.store(true, Ordering::Release);
    let bad = renderer.join().unwrap();
    assert!(bad.is_empty(), "unexpected samples: {:?}", &bad[..bad.len().min(8)]);
    assert!(renders.load(Ordering::Acquire) > 0);
}

#[test]
fn test_failed_load_preserves_playback() {
    let events = Arc::new(Mutex::new(Vec::<PlayerEvent>::new()));
    let sink = events.clone();
    let callback: EventCallback = Arc::new(move |e: PlayerEvent| sink.lock().unwrap().push(e));

    let mut ctl = controller().with_event_callback(callback);
    ctl.load_source(constant_source(0.5, 100)).unwrap();
    ctl.play().unwrap();

    let truncated = SourceBuffer::new(vec![0u8; 5], AudioFormat::new(44_100, 2, SampleEncoding::I16));
    let err = ctl.load_source(truncated).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConversionError);

    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert_eq!(ctl.queued_bytes(), 800);

    let mut out = vec![0.0f32; 4];
    ctl.callback().render(&mut out);
    assert_eq!(out, vec![0.5; 4]);

    let events = events.lock().unwrap();
    assert!(matches!(
        events.last(),
        Some(PlayerEvent::LoadFailed {
            kind: ErrorKind::ConversionError,
            ..
        })
    ));
}

#[test]
fn test_restart_replays_from_start() {
    let mut ctl = controller();
    let mut mock = MockSource::device_native();
    mock.add_samples(&[0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
    ctl.load_source(mock.into_source()).unwrap();

    let mut callback = ctl.callback();
    let mut first = [0.0f32; 4];
    callback.render(&mut first);
    assert_eq!(first, [0.1, 0.1, 0.2, 0.2]);

    ctl.dispatch(PlayerCommand::Restart).unwrap();
    let mut again = [0.0f32; 6];
    callback.render(&mut again);
    assert_eq!(again, [0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
}

#[test]
fn test_load_wav_file_through_controller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 24_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..2400 {
        let sample = ((i as f32 / 10.0).sin() * 8000.0) as i16;
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();

    let source = load_wav(&path).unwrap();
    assert_eq!(source.format(), AudioFormat::new(24_000, 1, SampleEncoding::I16));
    assert_eq!(source.frame_count(), 2400);

    let mut ctl = controller();
    ctl.dispatch(PlayerCommand::LoadTrack(path)).unwrap();
    assert_eq!(ctl.state(), PlaybackState::Paused);
    // 2400 frames at 24kHz is 100ms, 4800 frames at 48kHz
    assert_eq!(ctl.queued_bytes(), 4800 * 8);
}

#[test]
fn test_console_commands_drive_player() {
    let mut ctl = controller();
    ctl.load_source(constant_source(0.5, 10)).unwrap();

    for line in ["play", "volume 0.5", "balance 0.25", "pause"] {
        let cmd: PlayerCommand = line.parse().unwrap();
        ctl.dispatch(cmd).unwrap();
    }

    assert_eq!(ctl.state(), PlaybackState::Paused);
    assert_eq!(ctl.volume(), 0.5);
    assert_eq!(ctl.balance(), 0.25);
}
