//! Session state and its read-only projections
//!
//! One `GameState` is one live session slot: the shell owns it and passes it into
//! `tick` each frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::projectile::Projectile;
use crate::config::GameConfig;
use crate::consts::POINTS_PER_COIN;
use crate::viewport::Viewport;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; final values retained for display
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    PlayerDied,
    TimeUp,
}

/// Final results shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub reason: EndReason,
    pub score: u64,
    pub kills: u32,
    /// Whole seconds survived
    pub survival_secs: u64,
    /// Currency earned (one coin per ten points)
    pub coins: u64,
}

/// Things that happened during the last tick, for the shell to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    DifficultyIncreased { tier: u32, spawn_interval_ms: f64 },
    EnemySpawned { tier: u32 },
    ShotFired,
    EnemyKilled { tier: u32, points: u64 },
    PlayerHit { health: f32 },
    SessionEnded(SessionSummary),
}

/// HUD values (health bar, timer, score line)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub health: f32,
    pub max_health: f32,
    pub remaining_ms: f64,
    pub score: u64,
    pub kills: u32,
    pub difficulty: u32,
}

impl HudSnapshot {
    /// Remaining time as `MM:SS`
    pub fn timer_text(&self) -> String {
        let total_secs = (self.remaining_ms.max(0.0) / 1000.0).floor() as u64;
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    /// `current / max`, current rounded up
    pub fn health_text(&self) -> String {
        format!("{} / {}", self.health.ceil(), self.max_health)
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Present from session start until the state returns to the menu
    pub player: Option<Player>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub kills: u32,
    /// Session-relative clock
    pub elapsed_ms: f64,
    /// Global difficulty tier (>= 1)
    pub difficulty: u32,
    pub spawn_interval_ms: f64,
    pub last_spawn_ms: f64,
    pub last_difficulty_ms: f64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// HUD projection written at the end of each playing tick
    pub hud: HudSnapshot,
    /// Set when the session ends, cleared on start
    pub summary: Option<SessionSummary>,
    seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a state sitting at the menu
    pub fn new(seed: u64, config: GameConfig, viewport: Viewport) -> Self {
        let spawn_interval_ms = config.spawn_interval_ms(1);
        let hud = HudSnapshot {
            health: config.player.max_health,
            max_health: config.player.max_health,
            remaining_ms: config.session.duration_ms,
            score: 0,
            kills: 0,
            difficulty: 1,
        };
        Self {
            config,
            viewport,
            phase: GamePhase::Menu,
            player: None,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            kills: 0,
            elapsed_ms: 0.0,
            difficulty: 1,
            spawn_interval_ms,
            last_spawn_ms: 0.0,
            last_difficulty_ms: 0.0,
            events: Vec::new(),
            hud,
            summary: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reseed the spawner (for a restart with a fresh run)
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Begin (or restart) a session: reset counters and entities, centre the player
    pub fn start_session(&mut self) {
        self.score = 0;
        self.kills = 0;
        self.elapsed_ms = 0.0;
        self.difficulty = 1;
        self.spawn_interval_ms = self.config.spawn_interval_ms(1);
        self.last_spawn_ms = 0.0;
        self.last_difficulty_ms = 0.0;
        self.projectiles.clear();
        self.enemies.clear();
        self.events.clear();
        self.summary = None;
        self.player = Some(Player::new(self.viewport.center(), &self.config.player));
        self.phase = GamePhase::Playing;
        self.refresh_hud();

        log::info!(
            "Session started ({}x{}, scale {:.3}, seed {})",
            self.viewport.width,
            self.viewport.height,
            self.viewport.scale,
            self.seed
        );
    }

    /// Leave the current session for the start screen
    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        self.player = None;
        self.projectiles.clear();
        self.enemies.clear();
        self.events.clear();
    }

    /// Freeze the session and record the final results
    pub fn end_session(&mut self, reason: EndReason) -> SessionSummary {
        let summary = SessionSummary {
            reason,
            score: self.score,
            kills: self.kills,
            survival_secs: (self.elapsed_ms.max(0.0) / 1000.0).floor() as u64,
            coins: self.score / POINTS_PER_COIN,
        };
        self.phase = GamePhase::GameOver;
        self.summary = Some(summary);
        self.events.push(GameEvent::SessionEnded(summary));
        self.refresh_hud();

        log::info!(
            "Session over ({:?}): score {}, kills {}, survived {}s",
            reason,
            summary.score,
            summary.kills,
            summary.survival_secs
        );
        summary
    }

    /// Apply a new canvas size between ticks.
    ///
    /// While playing, live entities are remapped so they keep their relative place.
    pub fn resize(&mut self, width: f32, height: f32) {
        let Some(remap) = self.viewport.resize(width, height) else {
            return;
        };
        if self.phase != GamePhase::Playing {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.pos = remap.apply(player.pos);
        }
        for shot in &mut self.projectiles {
            shot.pos = remap.apply(shot.pos);
        }
        for enemy in &mut self.enemies {
            enemy.pos = remap.apply(enemy.pos);
        }
    }

    /// Arena size in canvas pixels
    #[inline]
    pub fn arena(&self) -> Vec2 {
        self.viewport.size()
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.viewport.scale
    }

    pub fn remaining_ms(&self) -> f64 {
        (self.config.session.duration_ms - self.elapsed_ms).max(0.0)
    }

    /// Recompute the HUD projection from current values
    pub fn refresh_hud(&mut self) {
        let (health, max_health) = self
            .player
            .as_ref()
            .map(|p| (p.health, p.max_health))
            .unwrap_or((self.config.player.max_health, self.config.player.max_health));
        self.hud = HudSnapshot {
            health,
            max_health,
            remaining_ms: self.remaining_ms(),
            score: self.score,
            kills: self.kills,
            difficulty: self.difficulty,
        };
    }
}
