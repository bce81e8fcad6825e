//! Arena Survivor - A single-screen arcade survival shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, spawning, difficulty, collisions)
//! - `viewport`: Logical-to-physical resolution mapping
//! - `renderer`: Read-only draw projection of the game state
//! - `config`: Data-driven game balance

pub mod config;
pub mod renderer;
pub mod sim;
pub mod viewport;

pub use config::{ConfigError, GameConfig};
pub use viewport::Viewport;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use super::Color;

    /// Logical base resolution all base magnitudes are authored against
    pub const BASE_WIDTH: f32 = 1920.0;
    pub const BASE_HEIGHT: f32 = 1080.0;

    /// Distance outside the arena edge where enemies appear (base units)
    pub const SPAWN_OFFSET: f32 = 50.0;
    /// Extra gap kept between separated enemies (base units)
    pub const ENEMY_SEPARATION_MARGIN: f32 = 2.0;
    /// Gap an enemy is pushed to after touching the player (base units)
    pub const CONTACT_PUSH_MARGIN: f32 = 5.0;

    /// Enemy radius gain per difficulty tier above 1
    pub const ENEMY_RADIUS_PER_TIER: f32 = 2.0;
    /// Enemy health gain per difficulty tier above 1
    pub const ENEMY_HEALTH_PER_TIER: f32 = 5.0;
    /// Points per tier awarded for a kill
    pub const POINTS_PER_TIER: u64 = 10;
    /// Points per coin on the end-of-session screen
    pub const POINTS_PER_COIN: u64 = 10;

    /// Enemy colours by tier; tiers past the end reuse the last entry
    pub const ENEMY_PALETTE: [Color; 5] = [
        Color::rgb(0xff, 0x44, 0x44),
        Color::rgb(0xff, 0x66, 0x66),
        Color::rgb(0xff, 0x88, 0x44),
        Color::rgb(0xff, 0xaa, 0x44),
        Color::rgb(0xff, 0xcc, 0x44),
    ];
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS colour string (`#rrggbb`, or `rgba(...)` when translucent)
    pub fn to_css(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector in the direction of `v`, or zero when `v` has no length.
///
/// Callers treat the zero vector as "no direction".
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Clamp without panicking on an inverted range (lo wins, matching max(lo, min(hi, v)))
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Uniform sample in `[min, max)`; returns `min` for an empty range
#[inline]
pub fn random_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_3_4() {
        let n = normalize(Vec2::new(3.0, 4.0));
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        // Arena narrower than the entity: lower bound wins
        assert_eq!(clamp(3.0, 10.0, 5.0), 10.0);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgb(0xff, 0x44, 0x44).to_css(), "#ff4444");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_css(), "rgba(0, 0, 0, 0.000)");
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_range(&mut rng, 10.0, 20.0);
            assert!((10.0..20.0).contains(&v));
        }
        assert_eq!(random_range(&mut rng, 5.0, 5.0), 5.0);
    }
}
