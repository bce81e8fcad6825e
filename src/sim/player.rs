//! The player avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use super::tick::TickInput;
use crate::clamp;
use crate::config::{BulletConfig, PlayerConfig};

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Canvas-pixel position
    pub pos: Vec2,
    /// Base radius (unscaled)
    pub radius: f32,
    /// Base displacement per tick (unscaled)
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    /// Facing angle toward the pointer (radians)
    pub angle: f32,
    /// Milliseconds until the next shot is allowed (fires at <= 0)
    pub shoot_cooldown: f32,
    shoot_interval: f32,
    bullet_speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, config: &PlayerConfig) -> Self {
        Self {
            pos,
            radius: config.radius,
            speed: config.speed,
            health: config.max_health,
            max_health: config.max_health,
            angle: 0.0,
            shoot_cooldown: 0.0,
            shoot_interval: config.shoot_cooldown_ms,
            bullet_speed: config.bullet_speed,
        }
    }

    #[inline]
    pub fn scaled_radius(&self, scale: f32) -> f32 {
        self.radius * scale
    }

    /// Move from the directional flags, re-aim at the pointer and tick the cooldown.
    ///
    /// Displacement is per tick, not per millisecond; only the cooldown uses `dt_ms`.
    pub fn update(&mut self, dt_ms: f32, input: &TickInput, scale: f32, arena: Vec2) {
        let dir = input.move_direction();
        self.pos += dir * self.speed * scale;

        let r = self.scaled_radius(scale);
        self.pos.x = clamp(self.pos.x, r, arena.x - r);
        self.pos.y = clamp(self.pos.y, r, arena.y - r);

        self.angle = aim_angle(self.pos, input.pointer);

        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= dt_ms;
        }
    }

    /// Fire toward the pointer if the cooldown has elapsed
    pub fn shoot(&mut self, pointer: Vec2, scale: f32, bullet: &BulletConfig) -> Option<Projectile> {
        if self.shoot_cooldown > 0.0 {
            return None;
        }
        let angle = aim_angle(self.pos, pointer);
        let muzzle = self.pos + Vec2::from_angle(angle) * self.scaled_radius(scale);

        self.shoot_cooldown = self.shoot_interval;
        Some(Projectile::new(
            muzzle,
            angle,
            self.bullet_speed,
            bullet.radius,
            bullet.damage,
        ))
    }

    /// Apply damage; returns true once health has reached zero
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount).max(0.0);
        self.health <= 0.0
    }
}

#[inline]
fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Vec2 = Vec2::new(1920.0, 1080.0);

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), &PlayerConfig::default())
    }

    #[test]
    fn test_axis_movement() {
        let mut p = player_at(500.0, 500.0);
        let input = TickInput {
            right: true,
            pointer: Vec2::new(1000.0, 500.0),
            ..Default::default()
        };
        p.update(16.0, &input, 1.0, ARENA);
        assert_eq!(p.pos, Vec2::new(505.0, 500.0));
    }

    #[test]
    fn test_diagonal_has_no_speed_bonus() {
        let mut p = player_at(500.0, 500.0);
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        p.update(16.0, &input, 1.0, ARENA);
        let moved = p.pos.distance(Vec2::new(500.0, 500.0));
        assert!((moved - 5.0).abs() < 1e-4);
        assert!(p.pos.x < 500.0 && p.pos.y < 500.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut p = player_at(500.0, 500.0);
        let input = TickInput {
            up: true,
            down: true,
            ..Default::default()
        };
        p.update(16.0, &input, 1.0, ARENA);
        assert_eq!(p.pos, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_displacement_scales() {
        let mut p = player_at(500.0, 500.0);
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        p.update(16.0, &input, 0.5, ARENA);
        assert_eq!(p.pos.y, 502.5);
    }

    #[test]
    fn test_clamped_to_arena_by_scaled_radius() {
        let mut p = player_at(16.0, 1070.0);
        let input = TickInput {
            left: true,
            down: true,
            ..Default::default()
        };
        p.update(16.0, &input, 1.0, ARENA);
        assert_eq!(p.pos.x, 15.0);
        assert_eq!(p.pos.y, 1080.0 - 15.0);
    }

    #[test]
    fn test_angle_follows_pointer_without_movement() {
        let mut p = player_at(100.0, 100.0);
        let input = TickInput {
            pointer: Vec2::new(100.0, 200.0),
            ..Default::default()
        };
        p.update(16.0, &input, 1.0, ARENA);
        assert!((p.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut p = player_at(100.0, 100.0);
        let bullet = BulletConfig::default();
        let shot = p.shoot(Vec2::new(200.0, 100.0), 1.0, &bullet).unwrap();
        // Spawned at the player's edge along the aim
        assert_eq!(shot.pos, Vec2::new(115.0, 100.0));
        assert_eq!(shot.speed, 10.0);
        assert_eq!(p.shoot_cooldown, 200.0);

        assert!(p.shoot(Vec2::new(200.0, 100.0), 1.0, &bullet).is_none());

        let idle = TickInput::default();
        p.update(150.0, &idle, 1.0, ARENA);
        assert!(p.shoot(Vec2::new(200.0, 100.0), 1.0, &bullet).is_none());
        p.update(50.0, &idle, 1.0, ARENA);
        assert!(p.shoot(Vec2::new(200.0, 100.0), 1.0, &bullet).is_some());
    }

    #[test]
    fn test_take_damage_reports_death_once_at_zero() {
        let mut p = player_at(100.0, 100.0);
        for _ in 0..15 {
            assert!(!p.take_damage(5.0));
        }
        assert_eq!(p.health, 25.0);
        for _ in 0..4 {
            assert!(!p.take_damage(5.0));
        }
        assert!(p.take_damage(5.0));
        assert_eq!(p.health, 0.0);
    }

    #[test]
    fn test_health_never_negative() {
        let mut p = player_at(100.0, 100.0);
        assert!(p.take_damage(1000.0));
        assert_eq!(p.health, 0.0);
    }
}
