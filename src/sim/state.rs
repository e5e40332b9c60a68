//! Game state and core simulation types
//!
//! Entities own their own motion; each is held by exactly one owning
//! collection (the player owns its bullets, the spawn director owns asteroids
//! and spikes). Everything visual is reduced to data the renderer can poll
//! (flash timers, explosion records) or events it can consume.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawner::{SpawnDirector, SpawnPattern};
use super::upgrades::{Upgrade, UpgradeKind, UpgradeSystem};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Manual pause (unavailable while Selecting or GameOver)
    Paused,
    /// Upgrade screen is up; simulation suspended until a choice is made
    Selecting,
    /// Run ended; only the restart binding is serviced
    GameOver,
}

/// Circular collision proxy, deliberately smaller than the visual footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub center: Vec2,
    pub radius: f32,
}

/// Events emitted by the simulation for the renderer/audio adapters.
///
/// The core never schedules its own animations or sounds, it only reports
/// what happened this tick; frontends decide how to present it.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A volley left the ship
    ShotFired { count: usize },
    /// A bullet struck an asteroid (impact flash hook)
    BulletImpact { pos: Vec2, size: f32 },
    /// Damage was applied to an asteroid
    AsteroidHit { id: u32, damage: i32, pos: Vec2 },
    /// An asteroid crossed zero HP and was removed
    AsteroidDestroyed {
        id: u32,
        pos: Vec2,
        size: f32,
        points: u64,
    },
    /// The spawn director rotated to a new pattern
    PatternChanged { pattern: SpawnPattern },
    /// An upgrade cycle began; three choices are on offer
    UpgradeOffered { choices: Vec<UpgradeKind> },
    /// The chosen upgrade was applied to the player
    UpgradeApplied { kind: UpgradeKind },
    /// The session score beat the persisted high score
    NewHighScore { score: u64 },
    /// The player collided with a hazard
    PlayerDestroyed { pos: Vec2 },
}

/// A player bullet, travelling straight up
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub damage: i32,
}

impl Bullet {
    pub fn update(&mut self, delta: f32) {
        self.pos.y -= self.speed * delta;
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            center: self.pos,
            radius: self.size * BULLET_HITBOX_SCALE,
        }
    }
}

/// A descending asteroid with a size-derived damage model
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// HP multiplier frozen at spawn time from the player's upgrade count.
    /// Later upgrades never rescale an already-spawned asteroid.
    pub hp_scale: f32,
    pub max_hp: i32,
    pub hp: i32,
    /// Remaining hit-flash frames (renderer hint, no gameplay effect)
    pub flash_frames: f32,
}

impl Asteroid {
    pub fn new(id: u32, pos: Vec2, size: f32, speed: f32, hp_scale: f32) -> Self {
        let max_hp = Self::hp_for(size, hp_scale);
        Self {
            id,
            pos,
            size,
            speed,
            hp_scale,
            max_hp,
            hp: max_hp,
            flash_frames: 0.0,
        }
    }

    /// Larger asteroids have more HP; the spawn-time scale multiplies on top.
    fn hp_for(size: f32, hp_scale: f32) -> i32 {
        let size_factor = size / ASTEROID_MIN_SIZE;
        let base_hp = (ASTEROID_BASE_HP + (size_factor - 1.0) * ASTEROID_HP_SIZE_FACTOR * 10.0)
            .floor()
            .max(1.0);
        (base_hp * hp_scale).ceil() as i32
    }

    pub fn update(&mut self, delta: f32) {
        self.pos.y += self.speed * delta;
        if self.flash_frames > 0.0 {
            self.flash_frames = (self.flash_frames - delta).max(0.0);
        }
    }

    /// Subtract damage (HP may go negative). Returns true when destroyed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.flash_frames = ASTEROID_FLASH_FRAMES;
        self.hp <= 0
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT + self.size
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            center: self.pos,
            radius: self.size * ASTEROID_HITBOX_SCALE,
        }
    }
}

/// A spike hazard: no HP, collision only
#[derive(Debug, Clone)]
pub struct Spike {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Spike {
    pub fn update(&mut self, delta: f32) {
        self.pos.y += self.speed * delta;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT + self.size
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            center: self.pos,
            radius: self.size * SPIKE_HITBOX_SCALE,
        }
    }
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Milliseconds between volleys (lower is faster)
    pub fire_rate: f64,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub bullet_damage: i32,
    pub shot_count: u32,
    /// Strictly increases by one per accepted upgrade; read by the spawn
    /// director to scale future asteroid HP and gate spike unlocking.
    pub upgrade_count: u32,
    last_shot_ms: f64,
    pub bullets: Vec<Bullet>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: PLAYER_SPEED,
            moving_left: false,
            moving_right: false,
            fire_rate: PLAYER_FIRE_RATE,
            bullet_speed: BULLET_SPEED,
            bullet_size: BULLET_SIZE,
            bullet_damage: BULLET_DAMAGE,
            shot_count: 1,
            upgrade_count: 0,
            // Off cooldown from the first tick
            last_shot_ms: -PLAYER_FIRE_RATE,
            bullets: Vec::new(),
        }
    }

    pub fn move_left(&mut self) {
        self.moving_left = true;
        self.moving_right = false;
    }

    pub fn move_right(&mut self) {
        self.moving_right = true;
        self.moving_left = false;
    }

    pub fn stop_moving(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
    }

    /// Apply movement, clamp to the play area, advance and prune bullets.
    pub fn update(&mut self, delta: f32) {
        if self.moving_left {
            self.pos.x -= self.speed * delta;
        }
        if self.moving_right {
            self.pos.x += self.speed * delta;
        }

        let half = PLAYER_SIZE / 2.0;
        self.pos.x = self.pos.x.clamp(half, SCREEN_WIDTH - half);

        for bullet in &mut self.bullets {
            bullet.update(delta);
        }
        self.bullets.retain(|b| b.pos.y >= -b.size);
    }

    /// Fire a volley unless still on cooldown. Returns the number of bullets
    /// spawned (zero while cooling down).
    pub fn shoot(&mut self, now_ms: f64, next_id: &mut u32) -> usize {
        if now_ms - self.last_shot_ms < self.fire_rate {
            return 0;
        }
        self.last_shot_ms = now_ms;

        let positions = self.volley_positions();
        let count = positions.len();
        for pos in positions {
            let id = *next_id;
            *next_id += 1;
            self.bullets.push(Bullet {
                id,
                pos,
                size: self.bullet_size,
                speed: self.bullet_speed,
                damage: self.bullet_damage,
            });
        }
        count
    }

    /// Volley geometry, left to right, symmetric about the ship's x.
    ///
    /// One shot is centered; two shots spread a fixed 20 px; three or more
    /// interpolate across `[-spread, +spread]` with `spread = min(n*5, 40)`,
    /// fanned vertically by a sine offset once there are more than three.
    pub fn volley_positions(&self) -> Vec<Vec2> {
        let n = self.shot_count.max(1);
        if n == 1 {
            return vec![self.pos];
        }

        let spread_factor = ((n as f32) * 5.0).min(40.0);
        let spread_width = if n == 2 { 20.0 } else { spread_factor };

        let mut positions = Vec::with_capacity(n as usize);
        for i in 0..n {
            let t = i as f32 / (n - 1) as f32;
            let x_offset = t * spread_width * 2.0 - spread_width;
            let y_offset = if n > 3 {
                -5.0 * (t * std::f32::consts::PI).sin()
            } else {
                0.0
            };
            positions.push(Vec2::new(self.pos.x + x_offset, self.pos.y + y_offset));
        }
        positions
    }

    /// Apply an upgrade. The upgrade count increments before dispatch, so a
    /// kind with no handler would still consume the slot.
    pub fn apply_upgrade(&mut self, upgrade: &Upgrade) {
        self.upgrade_count += 1;

        match upgrade.kind {
            UpgradeKind::FireRateBoost => {
                self.fire_rate = (self.fire_rate * upgrade.value as f64).floor();
                log::info!("fire rate improved to {}ms", self.fire_rate);
            }
            UpgradeKind::BulletSizeBoost => {
                self.bullet_size = (self.bullet_size * upgrade.value).ceil();
            }
            UpgradeKind::BulletSpeedBoost => {
                self.bullet_speed = (self.bullet_speed * upgrade.value).ceil();
            }
            UpgradeKind::AdditionalShot => {
                self.shot_count += upgrade.value as u32;
            }
            UpgradeKind::PlayerSpeedBoost => {
                self.speed = (self.speed * upgrade.value).ceil();
            }
            UpgradeKind::DamageBoost => {
                self.bullet_damage += upgrade.value as i32;
            }
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            center: self.pos,
            radius: PLAYER_SIZE / 2.0 * PLAYER_HITBOX_SCALE,
        }
    }
}

/// A transient explosion record for the renderer. The orchestrator advances
/// these each running tick and garbage-collects completed ones.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub size: f32,
    /// 1.0 for destruction blasts, 0.3 for bullet impacts
    pub particle_scale: f32,
    pub elapsed: f32,
}

impl Explosion {
    /// Advance the effect; returns true once complete.
    pub fn update(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        self.elapsed >= EXPLOSION_FRAMES
    }
}

/// Complete game state, advanced by [`super::tick::tick`]
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation clock in milliseconds, advanced by `delta * MS_PER_FRAME`
    pub now_ms: f64,
    pub phase: GamePhase,
    pub player: Player,
    pub spawner: SpawnDirector,
    pub upgrades: UpgradeSystem,
    pub explosions: Vec<Explosion>,
    /// Events emitted during the most recent tick
    pub events: Vec<GameEvent>,
    pub(super) next_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0.0,
            phase: GamePhase::Running,
            player: Player::new(Vec2::new(
                SCREEN_WIDTH / 2.0,
                SCREEN_HEIGHT - PLAYER_SPAWN_MARGIN,
            )),
            spawner: SpawnDirector::new(),
            upgrades: UpgradeSystem::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset every subsystem to its initial state. The RNG stream continues
    /// (a restarted run is a new run); the score ledger is reset by the
    /// caller because it carries the persisted high score.
    pub fn restart(&mut self) {
        self.now_ms = 0.0;
        self.phase = GamePhase::Running;
        self.player = Player::new(Vec2::new(
            SCREEN_WIDTH / 2.0,
            SCREEN_HEIGHT - PLAYER_SPAWN_MARGIN,
        ));
        self.spawner = SpawnDirector::new();
        self.upgrades = UpgradeSystem::new();
        self.explosions.clear();
        self.events.clear();
        log::info!("game restarted");
    }
}
