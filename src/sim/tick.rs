//! Per-frame simulation tick
//!
//! Order within a tick: difficulty, spawn, player, projectiles, enemies,
//! enemy separation, enemy compaction, projectile hits, player contacts,
//! time-out, HUD.

use glam::Vec2;
use rand::Rng;

use super::collision::{resolve_player_contacts, resolve_projectile_hits, separate_enemies};
use super::enemy::Enemy;
use super::state::{EndReason, GameEvent, GamePhase, GameState};
use crate::consts::{POINTS_PER_TIER, SPAWN_OFFSET};
use crate::{normalize, random_range};

/// Input snapshot captured by the shell once per frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in canvas pixels
    pub pointer: Vec2,
    /// Fire button held
    pub fire: bool,
}

impl TickInput {
    /// Movement direction from the four flags; diagonals are normalized
    pub fn move_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if dir.x != 0.0 && dir.y != 0.0 {
            normalize(dir)
        } else {
            dir
        }
    }
}

/// Advance a playing session by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.events.clear();
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    state.elapsed_ms += dt_ms as f64;

    update_difficulty(state);

    if state.elapsed_ms - state.last_spawn_ms >= state.spawn_interval_ms {
        spawn_enemy(state);
        state.last_spawn_ms = state.elapsed_ms;
    }

    let scale = state.scale();
    let arena = state.arena();
    let Some(player) = state.player.as_mut() else {
        log::warn!("Playing without a player; ending tick");
        return;
    };

    player.update(dt_ms, input, scale, arena);
    if input.fire {
        if let Some(shot) = player.shoot(input.pointer, scale, &state.config.bullet) {
            state.projectiles.push(shot);
            state.events.push(GameEvent::ShotFired);
        }
    }

    for shot in &mut state.projectiles {
        shot.update(scale, arena);
    }
    state.projectiles.retain(|p| p.active);

    let target = player.pos;
    for enemy in state.enemies.iter_mut().filter(|e| e.active) {
        enemy.update(target, scale);
    }
    separate_enemies(&mut state.enemies, scale, arena);
    state.enemies.retain(|e| e.active);

    for kill in resolve_projectile_hits(&mut state.projectiles, &mut state.enemies, scale) {
        // Kills are worth the current global tier, whatever the enemy's own tier
        let points = state.difficulty as u64 * POINTS_PER_TIER;
        state.score += points;
        state.kills += 1;
        state.events.push(GameEvent::EnemyKilled {
            tier: kill.tier,
            points,
        });
        log::debug!("Enemy (tier {}) killed at {:?}, score {}", kill.tier, kill.pos, state.score);
    }

    let contact = resolve_player_contacts(
        player,
        &mut state.enemies,
        scale,
        state.config.session.contact_damage,
    );
    if contact.hits > 0 {
        state.events.push(GameEvent::PlayerHit {
            health: player.health,
        });
    }
    if contact.player_died {
        state.end_session(EndReason::PlayerDied);
        return;
    }

    if state.elapsed_ms >= state.config.session.duration_ms {
        state.end_session(EndReason::TimeUp);
        return;
    }

    state.refresh_hud();
}

/// Raise the global tier once per difficulty interval
fn update_difficulty(state: &mut GameState) {
    if state.elapsed_ms - state.last_difficulty_ms < state.config.session.difficulty_interval_ms {
        return;
    }
    state.difficulty += 1;
    state.spawn_interval_ms = state.config.spawn_interval_ms(state.difficulty);
    state.last_difficulty_ms = state.elapsed_ms;
    state.events.push(GameEvent::DifficultyIncreased {
        tier: state.difficulty,
        spawn_interval_ms: state.spawn_interval_ms,
    });
    log::info!(
        "Difficulty {} (spawn every {}ms)",
        state.difficulty,
        state.spawn_interval_ms
    );
}

/// Spawn one enemy just outside a random arena edge at the current tier
pub fn spawn_enemy(state: &mut GameState) {
    let arena = state.arena();
    let offset = SPAWN_OFFSET * state.scale();
    let rng = &mut state.rng;

    let pos = match rng.random_range(0..4u32) {
        0 => Vec2::new(random_range(rng, 0.0, arena.x), -offset),
        1 => Vec2::new(arena.x + offset, random_range(rng, 0.0, arena.y)),
        2 => Vec2::new(random_range(rng, 0.0, arena.x), arena.y + offset),
        _ => Vec2::new(-offset, random_range(rng, 0.0, arena.y)),
    };

    let tier = state.difficulty;
    state.enemies.push(Enemy::new(pos, tier, &state.config.enemy));
    state.events.push(GameEvent::EnemySpawned { tier });
    log::debug!("Spawned tier {} enemy at {:?}", tier, pos);
}
