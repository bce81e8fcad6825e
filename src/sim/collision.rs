//! Collision detection and response
//!
//! Everything is circle-vs-circle using scaled radii, so hit-testing matches what
//! the renderer draws.

use glam::Vec2;

use super::enemy::Enemy;
use super::player::Player;
use super::projectile::Projectile;
use crate::consts::{CONTACT_PUSH_MARGIN, ENEMY_SEPARATION_MARGIN};
use crate::{clamp, distance, normalize};

/// Strict overlap test (touching circles do not collide)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    distance(a, b) < ra + rb
}

/// Keep a circle of radius `r` inside the arena
#[inline]
pub fn clamp_to_arena(pos: Vec2, r: f32, arena: Vec2) -> Vec2 {
    Vec2::new(clamp(pos.x, r, arena.x - r), clamp(pos.y, r, arena.y - r))
}

/// A kill produced by a projectile hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub tier: u32,
    pub pos: Vec2,
}

/// Result of the player-vs-enemy pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactResult {
    /// Enemies that touched the player this tick
    pub hits: u32,
    /// Player health reached zero; remaining contacts were skipped
    pub player_died: bool,
}

/// Push overlapping enemy pairs apart.
///
/// Pairs are handled once each in index order and each member moves half the
/// overlap. A push can create a new overlap with a third enemy; that is left for
/// the next tick.
pub fn separate_enemies(enemies: &mut [Enemy], scale: f32, arena: Vec2) {
    let margin = ENEMY_SEPARATION_MARGIN * scale;

    for i in 0..enemies.len() {
        let (head, tail) = enemies.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.active {
            continue;
        }
        let ra = a.scaled_radius(scale);

        for b in tail.iter_mut().filter(|e| e.active) {
            let rb = b.scaled_radius(scale);
            let delta = b.pos - a.pos;
            let dist = delta.length();
            let min_dist = ra + rb + margin;

            // Zero distance has no push direction
            if dist < min_dist && dist > 0.0 {
                let push = normalize(delta) * (min_dist - dist) * 0.5;
                a.pos = clamp_to_arena(a.pos - push, ra, arena);
                b.pos = clamp_to_arena(b.pos + push, rb, arena);
            }
        }
    }
}

/// Resolve projectile hits against enemies.
///
/// Each active projectile damages at most the first overlapping enemy (array
/// order, so the oldest enemy wins ties rather than the newest) and is spent.
/// Killed enemies are removed immediately so later projectiles this tick cannot
/// hit them.
pub fn resolve_projectile_hits(
    projectiles: &mut [Projectile],
    enemies: &mut Vec<Enemy>,
    scale: f32,
) -> Vec<Kill> {
    let mut kills = Vec::new();

    for shot in projectiles.iter_mut().filter(|p| p.active) {
        let shot_r = shot.scaled_radius(scale);
        let hit = enemies
            .iter()
            .position(|e| e.active && circles_overlap(shot.pos, shot_r, e.pos, e.scaled_radius(scale)));

        if let Some(idx) = hit {
            shot.active = false;
            if enemies[idx].take_damage(shot.damage) {
                let dead = enemies.remove(idx);
                kills.push(Kill {
                    tier: dead.tier,
                    pos: dead.pos,
                });
            }
        }
    }

    kills
}

/// Apply contact damage from every touching enemy and shove survivors' attackers
/// back out to just beyond touching distance.
///
/// Enemies are visited oldest first. Stops at the first contact that kills the player.
pub fn resolve_player_contacts(
    player: &mut Player,
    enemies: &mut [Enemy],
    scale: f32,
    damage: f32,
) -> ContactResult {
    let mut result = ContactResult::default();
    let player_r = player.scaled_radius(scale);
    let margin = CONTACT_PUSH_MARGIN * scale;

    for enemy in enemies.iter_mut().filter(|e| e.active) {
        let enemy_r = enemy.scaled_radius(scale);
        if !circles_overlap(player.pos, player_r, enemy.pos, enemy_r) {
            continue;
        }

        result.hits += 1;
        if player.take_damage(damage) {
            result.player_died = true;
            return result;
        }

        let away = normalize(enemy.pos - player.pos);
        enemy.pos = player.pos + away * (player_r + enemy_r + margin);
    }

    result
}
