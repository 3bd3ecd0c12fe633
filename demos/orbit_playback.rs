use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use pcm_orbit::source::{load_samples, FileSource};
use pcm_orbit::spatial::Vec3;
use pcm_orbit::{PcmDecoder, PlayerConfig, SoundPlayer};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use std::{env, thread};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let source = match env::args().nth(1) {
        Some(path) => FileSource::new(path),
        None => FileSource::in_assets("Assets"),
    };
    let config = PlayerConfig::default();
    let samples = match load_samples(&source, &PcmDecoder::new(config.header_offset)) {
        Ok(samples) => samples,
        Err(e) => {
            log::error!("Failed to load audio data: {e}");
            return Err(e.into());
        }
    };
    let player = SoundPlayer::new(samples, &config)?;
    let specs = player.specs();
    let duration = Duration::from_secs_f32(player.num_samples() as f32 / specs.sample_rate as f32);
    let player = Arc::new(Mutex::new(player));

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no output device"))?;
    println!("Default output device: {:?}", device.name());

    let supported = device.default_output_config()?;
    println!("Default output config: {:?}", supported);
    if supported.sample_rate().0 != specs.sample_rate {
        log::warn!(
            "device runs at {} Hz, samples are played as {} Hz",
            supported.sample_rate().0,
            specs.sample_rate
        );
    }
    let stream_config: cpal::StreamConfig = supported.into();
    let channels = stream_config.channels as usize;

    let callback_player = Arc::clone(&player);
    let err_fn = |err| log::error!("an error occurred on stream: {}", err);
    let stream = device.build_output_stream(
        &stream_config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            match callback_player.lock() {
                Ok(mut player) => {
                    player.fill(data, channels);
                }
                Err(_) => data.fill(0.0),
            }
        },
        err_fn,
        None,
    )?;
    stream.play()?;

    // Listener stands still at the orbit center, a little above it.
    let center = Vec3::ZERO;
    let listener = Vec3::new(0.0, 1.0, 0.0);
    let start = Instant::now();
    while start.elapsed() < duration {
        if let Ok(mut player) = player.lock() {
            let volume = player.update(center, listener, start.elapsed().as_secs_f32());
            log::debug!("position {:?} volume {volume}", player.emitter().position);
        }
        thread::sleep(Duration::from_millis(16));
    }
    Ok(())
}
