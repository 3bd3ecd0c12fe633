//! pcm-orbit decodes fixed-layout PCM WAV data and drives a sound emitter that orbits a
//! point while its volume follows the distance to the listener.
//!
//! The decoder trusts a fixed 44-byte header and reads 16-bit signed little-endian mono
//! samples after it. It does not parse the header; the format is always assumed to be
//! [`PcmSpecs::ASSUMED`]. [`inspect_header`] reports what a file really declares.
//!
//! # Examples
//!
//! Decode a WAV file held in memory.
//! ```
//! use pcm_orbit::PcmDecoder;
//!
//! let mut wav = vec![0u8; 44];
//! wav.extend_from_slice(&[0x00, 0x80, 0xFF, 0x7F, 0x00, 0x00]);
//!
//! let samples = PcmDecoder::default().decode(&wav).unwrap();
//! assert_eq!(samples.len(), 3);
//! assert_eq!(samples[0], -1.0);
//! assert_eq!(samples[2], 0.0);
//! ```
//!
//! Play it from an orbiting emitter.
//! ```
//! use pcm_orbit::{PlayerConfig, SoundPlayer, spatial::Vec3};
//!
//! # fn main() -> Result<(), pcm_orbit::PlayerError> {
//! let mut wav = vec![0u8; 44];
//! wav.extend_from_slice(&[0x00, 0x40, 0x00, 0x40]);
//!
//! let mut player = SoundPlayer::from_bytes(&wav, &PlayerConfig::default())?;
//! let center = Vec3::ZERO;
//! let volume = player.update(center, center, 0.0);
//!
//! let mut out = [0.0f32; 1];
//! player.get_next_frame(&mut out)?;
//! assert_eq!(out[0], 0.5 * volume);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;
mod decoder;
mod error;
mod player;
#[cfg(feature = "std")]
pub mod source;
pub mod spatial;
mod wav;

pub use config::PlayerConfig;
pub use decoder::{decode, PcmDecoder};
#[cfg(feature = "std")]
pub use error::{LoadError, SourceError};
pub use error::{DecodeError, PlayerError, WavHeaderError};
pub use fixed::types::I1F15;
pub use player::{Emitter, SoundPlayer};
pub use wav::{inspect_header, DeclaredFormat, WaveFormatTag};

/// Size of a canonical RIFF/WAVE header in bytes.
pub const DEFAULT_HEADER_OFFSET: usize = 44;

/// Basic information on the PCM data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpecs {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels.
    pub num_channels: u16,
    /// Bit depth.
    pub bit_depth: u16,
}

impl PcmSpecs {
    /// The format the decoder assumes for every input, whatever its header says.
    pub const ASSUMED: PcmSpecs = PcmSpecs {
        sample_rate: 44100,
        num_channels: 1,
        bit_depth: 16,
    };
}

impl Default for PcmSpecs {
    fn default() -> Self {
        Self::ASSUMED
    }
}
