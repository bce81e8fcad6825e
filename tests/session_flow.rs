use arena_survivor::renderer::{DrawableKind, build_frame, drawables};
use arena_survivor::sim::{EndReason, Enemy, GameEvent, GamePhase, GameState, Projectile, TickInput, tick};
use arena_survivor::{GameConfig, Viewport};
use glam::Vec2;

fn new_session(w: f32, h: f32) -> GameState {
    let mut state = GameState::new(2024, GameConfig::default(), Viewport::new(w, h));
    state.start_session();
    state
}

#[test]
fn idle_ten_seconds_spawns_and_raises_difficulty_once() {
    let mut state = new_session(1920.0, 1080.0);
    let idle = TickInput::default();

    let mut spawned = 0;
    let mut raised = 0;
    for _ in 0..100 {
        tick(&mut state, &idle, 100.0);
        for event in &state.events {
            match event {
                GameEvent::EnemySpawned { .. } => spawned += 1,
                GameEvent::DifficultyIncreased { .. } => raised += 1,
                _ => {}
            }
        }
    }

    assert!(spawned >= 1);
    assert_eq!(raised, 1);
    assert_eq!(state.difficulty, 2);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn killed_enemy_leaves_draw_output() {
    let mut state = new_session(1920.0, 1080.0);
    state.difficulty = 3;
    let mut enemy = Enemy::new(Vec2::new(600.0, 540.0), 3, &state.config.enemy);
    enemy.health = 1.0;
    state.enemies.push(enemy);
    state
        .projectiles
        .push(Projectile::new(Vec2::new(590.0, 540.0), 0.0, 10.0, 5.0, 1.0));

    tick(&mut state, &TickInput::default(), 16.0);

    assert_eq!(state.score, 30);
    assert_eq!(state.kills, 1);
    assert!(
        drawables(&state)
            .iter()
            .all(|d| !matches!(d.kind, DrawableKind::Enemy { .. }))
    );
}

#[test]
fn resize_mid_session_remaps_everything() {
    let mut state = new_session(800.0, 600.0);
    state
        .projectiles
        .push(Projectile::new(Vec2::new(200.0, 150.0), 0.0, 10.0, 5.0, 1.0));
    state
        .enemies
        .push(Enemy::new(Vec2::new(700.0, 100.0), 1, &state.config.enemy));
    let old_scale = state.scale();

    state.resize(1600.0, 1200.0);

    assert_eq!(state.player.as_ref().unwrap().pos, Vec2::new(800.0, 600.0));
    assert_eq!(state.projectiles[0].pos, Vec2::new(400.0, 300.0));
    assert_eq!(state.enemies[0].pos, Vec2::new(1400.0, 200.0));
    assert!(state.scale() > old_scale);

    // Drawn sizes follow the new scale
    let player = drawables(&state)
        .into_iter()
        .find(|d| d.kind == DrawableKind::Player)
        .unwrap();
    assert_eq!(player.radius, 15.0 * state.scale());
}

#[test]
fn death_then_restart_resets_session() {
    let mut state = new_session(1920.0, 1080.0);
    state.player.as_mut().unwrap().health = 5.0;
    state
        .enemies
        .push(Enemy::new(Vec2::new(965.0, 540.0), 1, &state.config.enemy));
    state.score = 95;

    tick(&mut state, &TickInput::default(), 16.0);

    assert_eq!(state.phase, GamePhase::GameOver);
    let summary = state.summary.unwrap();
    assert_eq!(summary.reason, EndReason::PlayerDied);
    assert_eq!(summary.coins, 9);
    // Game-over screen keeps the last values but draws no entities
    assert_eq!(build_frame(&state).commands.len(), 1);

    state.start_session();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 0);
    assert!(state.enemies.is_empty());
    assert!(state.summary.is_none());
    assert_eq!(state.player.as_ref().unwrap().health, 100.0);
}

#[test]
fn full_session_times_out() {
    let mut config = GameConfig::default();
    config.session.duration_ms = 1_000.0;
    let mut state = GameState::new(7, config, Viewport::new(1920.0, 1080.0));
    state.start_session();

    let mut frames = 0;
    while state.phase == GamePhase::Playing {
        tick(&mut state, &TickInput::default(), 16.0);
        frames += 1;
        assert!(frames < 1_000, "session never ended");
    }

    let summary = state.summary.unwrap();
    assert_eq!(summary.reason, EndReason::TimeUp);
    assert_eq!(summary.survival_secs, 1);
    assert_eq!(state.hud.remaining_ms, 0.0);
    assert_eq!(state.hud.timer_text(), "00:00");
}
