//! Builds the per-frame draw list from game state
//!
//! Pure read of `GameState`; call after `tick` in the same frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes::{DrawCmd, facing_triangle, grid_lines};
use crate::Color;
use crate::sim::{GamePhase, GameState};

const BACKGROUND: Color = Color::rgb(0x1a, 0x1a, 0x2e);
const GRID: Color = Color::rgba(78, 205, 196, 26);
const PLAYER_BODY: Color = Color::rgb(0x4e, 0xcd, 0xc4);
const PLAYER_NOTCH: Color = Color::rgb(0x2a, 0x9d, 0x8f);
const BULLET: Color = Color::rgb(0xff, 0xd7, 0x00);
const HEALTH_BAR_BACK: Color = Color::rgb(0x33, 0x33, 0x33);
const HEALTH_BAR_FILL: Color = Color::rgb(0x00, 0xff, 0x00);

/// Which kind of entity a drawable represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawableKind {
    Player,
    Projectile,
    Enemy { tier: u32 },
}

/// Entity-level render info: position, scaled radius and colour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Ordered primitives for one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderFrame {
    pub commands: Vec<DrawCmd>,
}

/// Live entities in draw order: projectiles, enemies, then the player on top
pub fn drawables(state: &GameState) -> Vec<Drawable> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }
    let scale = state.scale();

    let projectiles = state.projectiles.iter().filter(|p| p.active).map(|p| Drawable {
        kind: DrawableKind::Projectile,
        pos: p.pos,
        radius: p.scaled_radius(scale),
        color: BULLET,
    });
    let enemies = state.enemies.iter().filter(|e| e.active).map(|e| Drawable {
        kind: DrawableKind::Enemy { tier: e.tier },
        pos: e.pos,
        radius: e.scaled_radius(scale),
        color: e.color,
    });
    let player = state.player.iter().map(|p| Drawable {
        kind: DrawableKind::Player,
        pos: p.pos,
        radius: p.scaled_radius(scale),
        color: PLAYER_BODY,
    });

    projectiles.chain(enemies).chain(player).collect()
}

/// Full primitive list: background, grid and every live entity
pub fn build_frame(state: &GameState) -> RenderFrame {
    let mut commands = vec![DrawCmd::Clear { color: BACKGROUND }];
    if state.phase != GamePhase::Playing {
        return RenderFrame { commands };
    }

    let scale = state.scale();
    let outline = 2.0 * scale;
    commands.extend(grid_lines(
        state.arena(),
        state.config.ui.grid_size * scale,
        scale,
        GRID,
    ));

    for shot in state.projectiles.iter().filter(|p| p.active) {
        let r = shot.scaled_radius(scale);
        commands.push(DrawCmd::Circle {
            center: shot.pos,
            radius: r,
            color: BULLET,
        });
        commands.push(DrawCmd::Circle {
            center: shot.pos,
            radius: r * 0.5,
            color: Color::WHITE,
        });
    }

    for enemy in state.enemies.iter().filter(|e| e.active) {
        let r = enemy.scaled_radius(scale);
        commands.push(DrawCmd::Circle {
            center: enemy.pos,
            radius: r,
            color: enemy.color,
        });
        commands.push(DrawCmd::Ring {
            center: enemy.pos,
            radius: r,
            width: outline,
            color: Color::WHITE,
        });

        // Health bar only once damaged
        if enemy.health < enemy.max_health {
            let size = Vec2::new(r * 2.0, 4.0 * scale);
            let origin = Vec2::new(enemy.pos.x - r, enemy.pos.y - r - 10.0 * scale);
            commands.push(DrawCmd::Rect {
                origin,
                size,
                color: HEALTH_BAR_BACK,
            });
            commands.push(DrawCmd::Rect {
                origin,
                size: Vec2::new(size.x * enemy.health_fraction(), size.y),
                color: HEALTH_BAR_FILL,
            });
        }
    }

    if let Some(player) = &state.player {
        let r = player.scaled_radius(scale);
        commands.push(DrawCmd::Circle {
            center: player.pos,
            radius: r,
            color: PLAYER_BODY,
        });
        commands.push(DrawCmd::Triangle {
            points: facing_triangle(player.pos, r, player.angle),
            color: PLAYER_NOTCH,
        });
        commands.push(DrawCmd::Ring {
            center: player.pos,
            radius: r,
            width: outline,
            color: Color::WHITE,
        });
    }

    RenderFrame { commands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Enemy, Projectile};
    use crate::viewport::Viewport;

    fn playing() -> GameState {
        let mut state = GameState::new(3, GameConfig::default(), Viewport::new(960.0, 540.0));
        state.start_session();
        state
    }

    #[test]
    fn test_menu_frame_is_background_only() {
        let state = GameState::new(3, GameConfig::default(), Viewport::default());
        let frame = build_frame(&state);
        assert_eq!(frame.commands, vec![DrawCmd::Clear { color: BACKGROUND }]);
        assert!(drawables(&state).is_empty());
    }

    #[test]
    fn test_drawables_use_scaled_radii() {
        let mut state = playing();
        state
            .enemies
            .push(Enemy::new(Vec2::new(10.0, 10.0), 2, &state.config.enemy));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(20.0, 20.0), 0.0, 10.0, 5.0, 1.0));

        let list = drawables(&state);
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].kind, DrawableKind::Projectile);
        assert_eq!(list[0].radius, 2.5);
        assert_eq!(list[1].kind, DrawableKind::Enemy { tier: 2 });
        assert_eq!(list[1].radius, 11.0);
        assert_eq!(list[2].kind, DrawableKind::Player);
        assert_eq!(list[2].radius, 7.5);
    }

    #[test]
    fn test_inactive_entities_not_drawn() {
        let mut state = playing();
        let mut shot = Projectile::new(Vec2::new(20.0, 20.0), 0.0, 10.0, 5.0, 1.0);
        shot.active = false;
        state.projectiles.push(shot);
        let list = drawables(&state);
        assert!(list.iter().all(|d| d.kind != DrawableKind::Projectile));
    }

    #[test]
    fn test_health_bar_only_when_damaged() {
        let mut state = playing();
        state
            .enemies
            .push(Enemy::new(Vec2::new(100.0, 100.0), 1, &state.config.enemy));
        let rects = |s: &GameState| {
            build_frame(s)
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCmd::Rect { .. }))
                .count()
        };
        assert_eq!(rects(&state), 0);

        state.enemies[0].take_damage(5.0);
        assert_eq!(rects(&state), 2);
    }
}
