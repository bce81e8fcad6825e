//! Player projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A straight-flying projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Travel direction (radians), fixed at launch
    pub angle: f32,
    /// Base displacement per tick (unscaled)
    pub speed: f32,
    /// Base radius (unscaled)
    pub radius: f32,
    pub damage: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, angle: f32, speed: f32, radius: f32, damage: f32) -> Self {
        Self {
            pos,
            angle,
            speed,
            radius,
            damage,
            active: true,
        }
    }

    #[inline]
    pub fn scaled_radius(&self, scale: f32) -> f32 {
        self.radius * scale
    }

    /// Advance one tick and deactivate once fully outside the arena
    pub fn update(&mut self, scale: f32, arena: Vec2) {
        self.pos += Vec2::from_angle(self.angle) * self.speed * scale;

        let r = self.scaled_radius(scale);
        if self.pos.x < -r || self.pos.x > arena.x + r || self.pos.y < -r || self.pos.y > arena.y + r {
            self.active = false;
        }
    }
}
