//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-delta driven clock only (no wall time)
//! - Seeded RNG only
//! - Stable iteration order (insertion order per owning collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod upgrades;

pub use collision::{bullets_vs_asteroids, circles_overlap, player_vs_hazards};
pub use spawner::{SpawnDirector, SpawnPattern};
pub use state::{
    Asteroid, Bullet, Explosion, GameEvent, GamePhase, GameState, Hitbox, Player, Spike,
};
pub use tick::{TickInput, tick};
pub use upgrades::{Upgrade, UpgradeKind, UpgradeSystem, upgrade_pool};
