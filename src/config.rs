//! Configuration for [`crate::SoundPlayer`].

use crate::spatial::{LinearFalloff, Orbit};
use crate::DEFAULT_HEADER_OFFSET;

/// Player configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Bytes skipped before the first sample (default: 44)
    pub header_offset: usize,

    /// Distance at which the volume reaches zero (default: 200.0)
    pub max_distance: f32,

    /// Orbit speed in radians per second (default: 20.0)
    pub orbit_speed: f32,

    /// Orbit radius (default: 5.0)
    pub orbit_radius: f32,

    /// Restart from the first sample after the last one (default: false)
    pub looping: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            max_distance: 200.0,
            orbit_speed: 20.0,
            orbit_radius: 5.0,
            looping: false,
        }
    }
}

impl PlayerConfig {
    pub fn orbit(&self) -> Orbit {
        Orbit {
            speed: self.orbit_speed,
            radius: self.orbit_radius,
        }
    }

    pub fn falloff(&self) -> LinearFalloff {
        LinearFalloff {
            max_distance: self.max_distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_agree_with_spatial_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.orbit(), Orbit::default());
        assert_eq!(config.falloff(), LinearFalloff::default());
        assert_eq!(config.header_offset, 44);
        assert!(!config.looping);
    }
}
