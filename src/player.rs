//! Playback cursor for an orbiting, distance-attenuated sound emitter.

use alloc::vec::Vec;

use crate::config::PlayerConfig;
use crate::decoder::PcmDecoder;
use crate::error::PlayerError;
use crate::spatial::{look_at, LinearFalloff, Orbit, Vec3};
use crate::PcmSpecs;

/// Position and facing of the sound source.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Emitter {
    pub position: Vec3,
    /// Unit direction the emitter faces.
    pub forward: Vec3,
}

/// Plays a decoded buffer while the emitter orbits a center point.
///
/// Call [`SoundPlayer::update`] once per frame with the current positions and time, and pull
/// samples from the audio callback with [`SoundPlayer::get_next_frame`] or [`SoundPlayer::fill`].
#[derive(Debug, Clone)]
pub struct SoundPlayer {
    samples: Vec<f32>,
    reading_position: usize,
    loop_playing: bool,
    orbit: Orbit,
    falloff: LinearFalloff,
    emitter: Emitter,
    volume: f32,
}

impl SoundPlayer {
    /// * 'samples' - Decoded mono samples at [`PcmSpecs::ASSUMED`].
    ///
    /// # Errors
    ///
    /// * `PlayerError::NoAudioData` - `samples` is empty.
    pub fn new(samples: Vec<f32>, config: &PlayerConfig) -> Result<Self, PlayerError> {
        if samples.is_empty() {
            return Err(PlayerError::NoAudioData);
        }

        Ok(SoundPlayer {
            samples,
            reading_position: 0,
            loop_playing: config.looping,
            orbit: config.orbit(),
            falloff: config.falloff(),
            emitter: Emitter::default(),
            volume: 1.0,
        })
    }

    /// Decodes `raw` with `config.header_offset` and creates a player from the result.
    pub fn from_bytes(raw: &[u8], config: &PlayerConfig) -> Result<Self, PlayerError> {
        let samples = PcmDecoder::new(config.header_offset).decode(raw)?;
        Self::new(samples, config)
    }

    /// The format the samples are played back with.
    #[must_use]
    pub fn specs(&self) -> PcmSpecs {
        PcmSpecs::ASSUMED
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Index of the next sample to be played.
    pub fn position(&self) -> usize {
        self.reading_position
    }

    /// Move the playback position to the desired sample.
    /// Positions past the end are clamped to the end.
    pub fn set_position(&mut self, sample: usize) {
        self.reading_position = sample.min(self.samples.len());
    }

    /// Enable loop playback.
    /// true: Enable loop playback
    /// false: Disable loop playback
    pub fn set_loop_playing(&mut self, en: bool) {
        self.loop_playing = en;
    }

    pub fn is_finished(&self) -> bool {
        !self.loop_playing && self.reading_position >= self.samples.len()
    }

    pub fn emitter(&self) -> Emitter {
        self.emitter
    }

    /// Current volume in [0.0, 1.0].
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Moves the emitter along its orbit around `center` and recomputes the volume from its
    /// distance to `listener`. Returns the new volume.
    ///
    /// * 'center' - The point the emitter orbits and faces.
    /// * 'listener' - Where the sound is heard from.
    /// * 'time' - Seconds since playback started.
    pub fn update(&mut self, center: Vec3, listener: Vec3, time: f32) -> f32 {
        let position = self.orbit.position(center, time);
        self.emitter = Emitter {
            position,
            forward: look_at(position, center),
        };
        self.volume = self.falloff.volume(listener.distance(position));
        log::trace!("emitter position {:?}, volume {}", position, self.volume);
        self.volume
    }

    /// Return the sample value of the next frame, scaled by the current volume.
    /// * 'out' - Output buffer. Only the first element is written.
    ///
    /// # Errors
    ///
    /// * `PlayerError::InsufficientOutputBuffer` - `out` is empty.
    /// * `PlayerError::FinishedPlaying` - The end was reached and loop playback is disabled.
    pub fn get_next_frame(&mut self, out: &mut [f32]) -> Result<(), PlayerError> {
        let Some(slot) = out.first_mut() else {
            return Err(PlayerError::InsufficientOutputBuffer);
        };
        *slot = self.next_sample().ok_or(PlayerError::FinishedPlaying)? * self.volume;
        Ok(())
    }

    /// Fills an interleaved output buffer, writing each mono frame to every channel.
    /// Frames after the end of a non-looping buffer are silent.
    /// Returns the number of frames taken from the buffer.
    pub fn fill(&mut self, out: &mut [f32], channels: usize) -> usize {
        let mut frames = 0;
        for frame in out.chunks_mut(channels.max(1)) {
            let value = match self.next_sample() {
                Some(sample) => {
                    frames += 1;
                    sample * self.volume
                }
                None => 0.0,
            };
            frame.fill(value);
        }
        frames
    }

    fn next_sample(&mut self) -> Option<f32> {
        if self.reading_position >= self.samples.len() {
            if !self.loop_playing {
                return None;
            }
            log::debug!("looping playback");
            self.reading_position = 0;
        }

        let sample = self.samples[self.reading_position];
        self.reading_position += 1;
        if self.reading_position == self.samples.len() && !self.loop_playing {
            log::debug!("finished playing {} samples", self.samples.len());
        }
        Some(sample)
    }
}
