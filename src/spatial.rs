//! Emitter motion and distance attenuation.
//!
//! Everything here is a pure function of the positions and the time passed in; nothing reads
//! a global clock or transform.
//!
//! # Examples
//!
//! ```
//! use pcm_orbit::spatial::{LinearFalloff, Orbit, Vec3};
//!
//! let orbit = Orbit::default();
//! let center = Vec3::new(0.0, 1.0, 0.0);
//! let emitter = orbit.position(center, 0.0);
//! assert_eq!(emitter, Vec3::new(0.0, 1.0, 5.0));
//!
//! let volume = LinearFalloff::default().volume(emitter.distance(center));
//! assert!((volume - 0.975).abs() < 1e-6);
//! ```

use core::ops::{Add, Mul, Sub};
use num_traits::Float;

/// A point or direction in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        Float::sqrt(self.dot(self))
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length vector.
    pub fn normalize_or_zero(self) -> Vec3 {
        let length = self.length();
        if length > 0.0 && length.is_finite() {
            self * (1.0 / length)
        } else {
            Vec3::ZERO
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Circular motion in the horizontal (x/z) plane around a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Angular speed in radians per second.
    pub speed: f32,
    /// Distance from the center.
    pub radius: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            speed: 20.0,
            radius: 5.0,
        }
    }
}

impl Orbit {
    /// Angle in radians at `time` seconds.
    pub fn angle(&self, time: f32) -> f32 {
        time * self.speed
    }

    /// Offset from the center at `time`: `(sin, 0, cos) * radius`.
    pub fn offset(&self, time: f32) -> Vec3 {
        let angle = self.angle(time);
        Vec3::new(Float::sin(angle), 0.0, Float::cos(angle)) * self.radius
    }

    pub fn position(&self, center: Vec3, time: f32) -> Vec3 {
        center + self.offset(time)
    }
}

/// Unit direction from `from` towards `target`.
/// Returns `Vec3::ZERO` when both points are the same.
pub fn look_at(from: Vec3, target: Vec3) -> Vec3 {
    (target - from).normalize_or_zero()
}

/// Volume falls linearly from 1 at distance 0 to 0 at `max_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFalloff {
    pub max_distance: f32,
}

impl Default for LinearFalloff {
    fn default() -> Self {
        Self {
            max_distance: 200.0,
        }
    }
}

impl LinearFalloff {
    /// Volume in [0.0, 1.0] for a listener `distance` away.
    /// A non-positive `max_distance` or a non-finite distance is silent.
    pub fn volume(&self, distance: f32) -> f32 {
        if self.max_distance.is_nan() || self.max_distance <= 0.0 || !distance.is_finite() {
            return 0.0;
        }
        (1.0 - distance / self.max_distance).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn orbit_quarter_turn() {
        let orbit = Orbit {
            speed: FRAC_PI_2,
            radius: 2.0,
        };
        let p = orbit.position(Vec3::new(1.0, 3.0, 1.0), 1.0);
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 3.0);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn orbit_keeps_radius() {
        let orbit = Orbit::default();
        let center = Vec3::new(-4.0, 0.5, 9.0);
        for i in 0..50 {
            let t = i as f32 * 0.037;
            assert_relative_eq!(orbit.position(center, t).distance(center), 5.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn look_at_direction() {
        let dir = look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert_eq!(dir, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(look_at(Vec3::ZERO, Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn falloff_clamps() {
        let falloff = LinearFalloff::default();
        assert_eq!(falloff.volume(0.0), 1.0);
        assert_relative_eq!(falloff.volume(50.0), 0.75);
        assert_eq!(falloff.volume(200.0), 0.0);
        assert_eq!(falloff.volume(1000.0), 0.0);
        assert_eq!(falloff.volume(-10.0), 1.0);
        assert_eq!(falloff.volume(f32::NAN), 0.0);
    }

    #[test]
    fn falloff_zero_max_distance() {
        let falloff = LinearFalloff { max_distance: 0.0 };
        assert_eq!(falloff.volume(0.0), 0.0);
        assert_eq!(falloff.volume(1.0), 0.0);
    }
}
