//! Enemies that chase the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::config::EnemyConfig;
use crate::consts::{ENEMY_HEALTH_PER_TIER, ENEMY_PALETTE, ENEMY_RADIUS_PER_TIER};

/// A seeking enemy. Its tier is frozen at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Difficulty tier (>= 1) the enemy was spawned at
    pub tier: u32,
    /// Base radius (unscaled)
    pub radius: f32,
    /// Base displacement per tick (unscaled)
    pub speed: f32,
    pub max_health: f32,
    pub health: f32,
    pub active: bool,
    pub color: Color,
}

impl Enemy {
    pub fn new(pos: Vec2, tier: u32, config: &EnemyConfig) -> Self {
        let tier = tier.max(1);
        let steps = (tier - 1) as f32;
        let max_health = config.base_health + steps * ENEMY_HEALTH_PER_TIER;
        Self {
            pos,
            tier,
            radius: config.base_radius + steps * ENEMY_RADIUS_PER_TIER,
            speed: config.base_speed + steps * config.speed_increase,
            max_health,
            health: max_health,
            active: true,
            color: color_for_tier(tier),
        }
    }

    #[inline]
    pub fn scaled_radius(&self, scale: f32) -> f32 {
        self.radius * scale
    }

    /// Step straight toward the target. Coincident positions don't move.
    pub fn update(&mut self, target: Vec2, scale: f32) {
        let to_target = target - self.pos;
        if to_target.length() > 0.0 {
            self.pos += crate::normalize(to_target) * self.speed * scale;
        }
    }

    /// Apply damage; returns true (and deactivates) when this kills the enemy
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health -= amount;
        if self.health <= 0.0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Remaining health as 0..=1 for health bars
    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// Palette colour for a tier, saturating at the last entry
pub fn color_for_tier(tier: u32) -> Color {
    let idx = (tier.max(1) - 1) as usize;
    ENEMY_PALETTE[idx.min(ENEMY_PALETTE.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn enemy(tier: u32) -> Enemy {
        Enemy::new(Vec2::ZERO, tier, &EnemyConfig::default())
    }

    #[test]
    fn test_tier_one_stats() {
        let e = enemy(1);
        assert_eq!(e.radius, 20.0);
        assert_eq!(e.speed, 1.5);
        assert_eq!(e.max_health, 10.0);
        assert_eq!(e.health, 10.0);
        assert_eq!(e.color, ENEMY_PALETTE[0]);
    }

    #[test]
    fn test_palette_saturates() {
        assert_eq!(enemy(5).color, ENEMY_PALETTE[4]);
        assert_eq!(enemy(12).color, ENEMY_PALETTE[4]);
        assert_eq!(enemy(3).color, ENEMY_PALETTE[2]);
    }

    #[test]
    fn test_seeks_target() {
        let mut e = enemy(1);
        e.update(Vec2::new(100.0, 0.0), 1.0);
        assert!((e.pos.x - 1.5).abs() < 1e-6);
        assert_eq!(e.pos.y, 0.0);

        e.update(Vec2::new(1.5, 100.0), 2.0);
        assert!((e.pos.y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_target_does_not_move() {
        let mut e = enemy(1);
        e.update(Vec2::ZERO, 1.0);
        assert_eq!(e.pos, Vec2::ZERO);
        assert!(e.pos.is_finite());
    }

    #[test]
    fn test_take_damage_kills_at_zero() {
        let mut e = enemy(1);
        for _ in 0..9 {
            assert!(!e.take_damage(1.0));
            assert!(e.active);
        }
        assert!(e.take_damage(1.0));
        assert!(!e.active);
    }

    proptest! {
        #[test]
        fn prop_tier_stats(tier in 1u32..200) {
            let e = enemy(tier);
            let t = tier as f32;
            prop_assert_eq!(e.max_health, 10.0 + (t - 1.0) * 5.0);
            prop_assert_eq!(e.radius, 20.0 + (t - 1.0) * 2.0);
            prop_assert!((e.speed - (1.5 + (t - 1.0) * 0.1)).abs() < 1e-4);
            prop_assert_eq!(e.tier, tier);
        }
    }
}
