use showcase_native::audio::Playback;
use showcase_native::wav::{parse, Wav, WavError};
use std::sync::Arc;
use std::time::Duration;

fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn fmt_body(tag: u16, channels: u16, rate: u32, bits: u16) -> Vec<u8> {
    let block_align = channels * bits / 8;
    let mut b = Vec::new();
    b.extend_from_slice(&tag.to_le_bytes());
    b.extend_from_slice(&channels.to_le_bytes());
    b.extend_from_slice(&rate.to_le_bytes());
    b.extend_from_slice(&(rate * block_align as u32).to_le_bytes());
    b.extend_from_slice(&block_align.to_le_bytes());
    b.extend_from_slice(&bits.to_le_bytes());
    b
}

fn riff(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = chunks.concat();
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(&body);
    out
}

fn pcm(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

#[test]
fn parses_stereo_pcm16() {
    let bytes = riff(&[
        chunk(b"fmt ", &fmt_body(1, 2, 44_100, 16)),
        chunk(b"data", &pcm(&[1, -1, 16_384, -32_768])),
    ]);
    let wav = parse(&bytes).unwrap();
    assert_eq!(wav.channels, 2);
    assert_eq!(wav.sample_rate, 44_100);
    assert_eq!(wav.samples, vec![1, -1, 16_384, -32_768]);
    assert_eq!(wav.frames(), 2);
    assert_eq!(wav.sample(1, 0), 0.5);
    assert_eq!(wav.sample(1, 1), -1.0);
}

#[test]
fn skips_unknown_and_odd_sized_chunks() {
    let bytes = riff(&[
        chunk(b"LIST", b"odd"),
        chunk(b"fmt ", &fmt_body(1, 1, 8_000, 16)),
        chunk(b"data", &pcm(&[7, 8, 9])),
    ]);
    let wav = parse(&bytes).unwrap();
    assert_eq!(wav.samples, vec![7, 8, 9]);
    assert_eq!(wav.duration(), Duration::from_secs_f64(3.0 / 8_000.0));
}

#[test]
fn mono_feeds_every_output_channel() {
    let wav = Wav {
        sample_rate: 8_000,
        channels: 1,
        samples: vec![16_384],
    };
    assert_eq!(wav.sample(0, 0), 0.5);
    assert_eq!(wav.sample(0, 1), 0.5);
    assert_eq!(wav.sample(5, 0), 0.0);
}

#[test]
fn rejects_non_riff_input() {
    assert!(matches!(parse(b"OggS...."), Err(WavError::Malformed(_))));
    assert!(matches!(parse(b""), Err(WavError::Malformed(_))));
}

#[test]
fn rejects_non_pcm16() {
    let float = riff(&[
        chunk(b"fmt ", &fmt_body(3, 1, 48_000, 32)),
        chunk(b"data", &[0; 8]),
    ]);
    assert!(matches!(parse(&float), Err(WavError::Unsupported(_))));
    let eight_bit = riff(&[
        chunk(b"fmt ", &fmt_body(1, 1, 8_000, 8)),
        chunk(b"data", &[0; 4]),
    ]);
    assert!(matches!(parse(&eight_bit), Err(WavError::Unsupported(_))));
}

#[test]
fn missing_data_chunk_is_malformed() {
    let bytes = riff(&[chunk(b"fmt ", &fmt_body(1, 1, 8_000, 16))]);
    assert_eq!(
        parse(&bytes),
        Err(WavError::Malformed("missing data chunk".into()))
    );
}

#[test]
fn playback_is_silent_until_started_and_stops_at_end() {
    let clip = Arc::new(Wav {
        sample_rate: 8_000,
        channels: 1,
        samples: vec![16_384, -16_384],
    });
    let mut playback = Playback::new(clip, 8_000);
    let mut frame = [1.0f32; 2];
    playback.next_frame(&mut frame);
    assert_eq!(frame, [0.0, 0.0]);

    playback.start();
    playback.next_frame(&mut frame);
    assert_eq!(frame, [0.5, 0.5]);
    playback.next_frame(&mut frame);
    assert_eq!(frame, [-0.5, -0.5]);
    playback.next_frame(&mut frame);
    assert_eq!(frame, [0.0, 0.0]);
    assert!(!playback.is_playing());
}

#[test]
fn playback_resamples_by_rate_ratio() {
    let clip = Arc::new(Wav {
        sample_rate: 8_000,
        channels: 1,
        samples: vec![0, 16_384],
    });
    // Output at twice the clip rate repeats each frame.
    let mut playback = Playback::new(clip, 16_000);
    playback.start();
    let mut seen = Vec::new();
    for _ in 0..4 {
        let mut frame = [0.0f32; 1];
        playback.next_frame(&mut frame);
        seen.push(frame[0]);
    }
    assert_eq!(seen, vec![0.0, 0.0, 0.5, 0.5]);
    let mut frame = [1.0f32; 1];
    playback.next_frame(&mut frame);
    assert_eq!(frame, [0.0]);
    assert!(!playback.is_playing());
}
