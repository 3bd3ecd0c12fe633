use criterion::{criterion_group, criterion_main, Criterion};
use pcm_orbit::spatial::Vec3;
use pcm_orbit::{PcmDecoder, PlayerConfig, SoundPlayer};
use std::hint::black_box;

/// One second of a 16-bit mono ramp behind a 44-byte header.
fn one_second() -> Vec<u8> {
    let mut raw = vec![0u8; 44];
    for i in 0..44100u32 {
        raw.extend_from_slice(&((i % 65536) as u16 as i16).to_le_bytes());
    }
    raw
}

fn decode(c: &mut Criterion) {
    let raw = one_second();
    let decoder = PcmDecoder::default();
    c.bench_function("decode 1s", |b| {
        b.iter(|| decoder.decode(black_box(&raw)).unwrap())
    });

    let mut out = vec![0.0f32; 44100];
    c.bench_function("decode_into 1s", |b| {
        b.iter(|| decoder.decode_into(black_box(&raw), &mut out).unwrap())
    });
}

fn playback(c: &mut Criterion) {
    let raw = one_second();
    let mut player = SoundPlayer::from_bytes(&raw, &PlayerConfig::default()).unwrap();
    player.set_loop_playing(true);
    let mut out = vec![0.0f32; 1024];
    let mut time = 0.0f32;
    c.bench_function("update and fill 512 stereo frames", |b| {
        b.iter(|| {
            time += 1.0 / 60.0;
            player.update(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), black_box(time));
            player.fill(&mut out, 2)
        })
    });
}

criterion_group!(benches, decode, playback);
criterion_main!(benches);
