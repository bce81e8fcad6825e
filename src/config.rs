//! Gameplay tuning
//!
//! Every magnitude here is authored against the 1920×1080 base resolution and is
//! multiplied by the viewport scale at use time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Displacement per tick at full input (base units)
    pub speed: f32,
    pub radius: f32,
    pub max_health: f32,
    /// Minimum time between shots
    pub shoot_cooldown_ms: f32,
    /// Projectile displacement per tick (base units)
    pub bullet_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            radius: 15.0,
            max_health: 100.0,
            shoot_cooldown_ms: 200.0,
            bullet_speed: 10.0,
        }
    }
}

/// Enemy tuning; tier-dependent stats grow linearly from these bases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub base_speed: f32,
    pub base_radius: f32,
    pub base_health: f32,
    pub base_spawn_interval_ms: f64,
    /// Speed gained per tier above 1
    pub speed_increase: f32,
    /// Spawn interval lost per tier above 1
    pub spawn_interval_decrease_ms: f64,
    /// Floor for the spawn interval
    pub min_spawn_interval_ms: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            base_speed: 1.5,
            base_radius: 20.0,
            base_health: 10.0,
            base_spawn_interval_ms: 2000.0,
            speed_increase: 0.1,
            spawn_interval_decrease_ms: 50.0,
            min_spawn_interval_ms: 500.0,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub radius: f32,
    pub damage: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            damage: 1.0,
        }
    }
}

/// Session pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session length (3 minutes by default)
    pub duration_ms: f64,
    /// Global difficulty rises by one tier every interval
    pub difficulty_interval_ms: f64,
    /// Damage dealt to the player per touching enemy per tick
    pub contact_damage: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 180_000.0,
            difficulty_interval_ms: 10_000.0,
            contact_damage: 5.0,
        }
    }
}

/// Presentation tuning consumed by the draw projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Background grid spacing (base units)
    pub grid_size: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { grid_size: 50.0 }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

/// Why a configuration was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Not valid JSON for this schema
    Parse(String),
    /// Parsed, but a value is out of range
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid config JSON: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid config value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f64) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("player.speed", self.player.speed as f64)?;
        positive("player.radius", self.player.radius as f64)?;
        positive("player.max_health", self.player.max_health as f64)?;
        positive("player.bullet_speed", self.player.bullet_speed as f64)?;
        let cooldown = self.player.shoot_cooldown_ms;
        if cooldown.is_nan() || cooldown < 0.0 {
            return Err(ConfigError::Invalid {
                field: "player.shoot_cooldown_ms",
                reason: "must not be negative",
            });
        }

        positive("enemy.base_speed", self.enemy.base_speed as f64)?;
        positive("enemy.base_radius", self.enemy.base_radius as f64)?;
        positive("enemy.base_health", self.enemy.base_health as f64)?;
        positive("enemy.base_spawn_interval_ms", self.enemy.base_spawn_interval_ms)?;
        positive("enemy.min_spawn_interval_ms", self.enemy.min_spawn_interval_ms)?;
        if self.enemy.min_spawn_interval_ms > self.enemy.base_spawn_interval_ms {
            return Err(ConfigError::Invalid {
                field: "enemy.min_spawn_interval_ms",
                reason: "must not exceed enemy.base_spawn_interval_ms",
            });
        }

        positive("bullet.radius", self.bullet.radius as f64)?;
        positive("bullet.damage", self.bullet.damage as f64)?;

        positive("session.duration_ms", self.session.duration_ms)?;
        positive("session.difficulty_interval_ms", self.session.difficulty_interval_ms)?;
        positive("ui.grid_size", self.ui.grid_size as f64)?;

        Ok(())
    }

    /// Spawn interval for a global difficulty tier, floored at the configured minimum
    pub fn spawn_interval_ms(&self, tier: u32) -> f64 {
        let steps = tier.saturating_sub(1) as f64;
        (self.enemy.base_spawn_interval_ms - steps * self.enemy.spawn_interval_decrease_ms)
            .max(self.enemy.min_spawn_interval_ms)
    }
}
