//! Asterfall - a top-down asteroid barrage arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, upgrades)
//! - `scores`: Score ledger with high-score persistence trigger
//! - `input`: Discrete key events -> per-tick commands
//! - `audio`: Sound identifiers and the fire-and-forget playback boundary
//! - `persistence`: High-score storage boundary
//! - `settings`: Player preferences

pub mod audio;
pub mod input;
pub mod persistence;
pub mod scores;
pub mod settings;
pub mod sim;

pub use scores::ScoreLedger;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// One 60 Hz frame expressed in milliseconds. Tick deltas are in frame
    /// units (1.0 = one frame); the clock advances by `delta * MS_PER_FRAME`.
    pub const MS_PER_FRAME: f64 = 1000.0 / 60.0;

    /// Play area dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Cooldown between volleys, milliseconds
    pub const PLAYER_FIRE_RATE: f64 = 250.0;
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_SIZE: f32 = 6.0;
    pub const BULLET_DAMAGE: i32 = 1;
    /// The player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_MARGIN: f32 = 100.0;

    /// Asteroid defaults
    pub const ASTEROID_MIN_SIZE: f32 = 16.0;
    pub const ASTEROID_MAX_SIZE: f32 = 64.0;
    pub const ASTEROID_MIN_SPEED: f32 = 2.0;
    pub const ASTEROID_MAX_SPEED: f32 = 5.0;
    /// Base milliseconds between spawns, divided by the difficulty multiplier
    pub const ASTEROID_SPAWN_RATE: f64 = 1000.0;
    pub const ASTEROID_BASE_HP: f32 = 1.0;
    pub const ASTEROID_HP_SIZE_FACTOR: f32 = 0.1;
    /// Frames the hit flash lasts (renderer hint carried on the entity)
    pub const ASTEROID_FLASH_FRAMES: f32 = 5.0;

    /// Spike hazards (no HP, collision only)
    pub const SPIKE_MIN_SIZE: f32 = 12.0;
    pub const SPIKE_MAX_SIZE: f32 = 24.0;
    /// Spikes fall this much faster than an asteroid with the same speed roll
    pub const SPIKE_SPEED_FACTOR: f32 = 1.1;
    /// Upgrades required before spikes start spawning
    pub const SPIKE_UNLOCK_UPGRADES: u32 = 5;

    /// Difficulty multiplier cap
    pub const DIFFICULTY_CAP: f64 = 2.5;

    /// Hitbox shrink factors: collisions are biased in the player's favor
    pub const ASTEROID_HITBOX_SCALE: f32 = 0.8;
    pub const BULLET_HITBOX_SCALE: f32 = 0.9;
    pub const PLAYER_HITBOX_SCALE: f32 = 0.8;
    pub const SPIKE_HITBOX_SCALE: f32 = 0.7;

    /// Base points per destroyed asteroid (scaled up by size)
    pub const SCORE_PER_ASTEROID: u64 = 10;

    /// Asteroid kills per upgrade cycle
    pub const KILLS_PER_UPGRADE: u32 = 5;
    /// Upgrade choices offered per cycle
    pub const UPGRADE_CHOICES: usize = 3;

    /// Transient explosion effect duration, frames
    pub const EXPLOSION_FRAMES: f32 = 30.0;
}
