//! Simulation module
//!
//! All gameplay logic lives here. It has no rendering or platform dependencies:
//! - Input arrives as a `TickInput` snapshot per frame
//! - Spawning uses the state's seeded RNG only
//! - Entity mutation happens inside `tick`; drawing only reads

pub mod collision;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::{ContactResult, Kill, circles_overlap, separate_enemies};
pub use enemy::{Enemy, color_for_tier};
pub use player::Player;
pub use projectile::Projectile;
pub use state::{EndReason, GameEvent, GamePhase, GameState, HudSnapshot, SessionSummary};
pub use tick::{TickInput, spawn_enemy, tick};
