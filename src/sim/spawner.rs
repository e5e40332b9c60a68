//! Spawn/difficulty director
//!
//! Owns every asteroid and spike. Spawning is time-gated and shaped by a
//! rotating pattern; difficulty scales spawn frequency and hazard speed.
//! Spikes are a late-game hazard unlocked by upgrade count, on their own gate.

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, GameEvent, Spike};
use crate::consts::*;

/// Algorithmic rule governing where and how many asteroids appear per spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPattern {
    /// One asteroid at uniform-random x
    Random,
    /// 3-5 asteroids jittered around one base x
    Cluster,
    /// A row of evenly spaced segments, each spawning with 70% probability
    Wall,
    /// Single asteroid whose x oscillates sinusoidally over wave time
    Zigzag,
}

const ALL_PATTERNS: [SpawnPattern; 4] = [
    SpawnPattern::Random,
    SpawnPattern::Cluster,
    SpawnPattern::Wall,
    SpawnPattern::Zigzag,
];

/// Accumulated delta-units between pattern rotations (~16s at 60 Hz)
const PATTERN_ROTATE_AFTER: f32 = 1000.0;

#[derive(Debug, Clone)]
pub struct SpawnDirector {
    pub asteroids: Vec<Asteroid>,
    pub spikes: Vec<Spike>,
    pub pattern: SpawnPattern,
    /// Scalar >= 1 (capped) that divides the spawn gate and multiplies speed
    pub difficulty: f64,
    spawn_rate: f64,
    wave_timer: f32,
    last_spawn_ms: f64,
    last_spike_ms: f64,
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self {
            asteroids: Vec::new(),
            spikes: Vec::new(),
            pattern: SpawnPattern::Random,
            difficulty: 1.0,
            spawn_rate: ASTEROID_SPAWN_RATE,
            wave_timer: 0.0,
            last_spawn_ms: 0.0,
            last_spike_ms: 0.0,
        }
    }

    /// One frame of director work: spawn, advance hazards, prune off-screen,
    /// then recompute difficulty.
    pub fn update<R: Rng>(
        &mut self,
        rng: &mut R,
        now_ms: f64,
        delta: f32,
        upgrade_count: u32,
        next_id: &mut u32,
        events: &mut Vec<GameEvent>,
    ) {
        self.spawn_asteroids(rng, now_ms, delta, upgrade_count, next_id, events);
        self.spawn_spikes(rng, now_ms, upgrade_count, next_id);

        for asteroid in &mut self.asteroids {
            asteroid.update(delta);
        }
        self.asteroids.retain(|a| !a.is_off_screen());

        for spike in &mut self.spikes {
            spike.update(delta);
        }
        self.spikes.retain(|s| !s.is_off_screen());

        self.update_difficulty(now_ms);
    }

    fn spawn_asteroids<R: Rng>(
        &mut self,
        rng: &mut R,
        now_ms: f64,
        delta: f32,
        upgrade_count: u32,
        next_id: &mut u32,
        events: &mut Vec<GameEvent>,
    ) {
        self.wave_timer += delta;
        if self.wave_timer > PATTERN_ROTATE_AFTER {
            self.rotate_pattern(rng, events);
            self.wave_timer = 0.0;
        }

        let adjusted_rate = self.spawn_rate / self.difficulty;
        if now_ms - self.last_spawn_ms < adjusted_rate {
            return;
        }
        self.last_spawn_ms = now_ms;

        match self.pattern {
            SpawnPattern::Random => {
                self.spawn_asteroid(rng, None, upgrade_count, next_id);
            }
            SpawnPattern::Cluster => {
                let count = 3 + rng.random_range(0..3);
                let base_x = rng.random_range(0.0..SCREEN_WIDTH);
                for _ in 0..count {
                    let offset = (rng.random::<f32>() - 0.5) * 100.0;
                    self.spawn_asteroid(rng, Some(base_x + offset), upgrade_count, next_id);
                }
            }
            SpawnPattern::Wall => {
                let segments = 4 + self.difficulty as u32;
                let width = SCREEN_WIDTH / segments as f32;
                for i in 0..segments {
                    if rng.random::<f64>() < 0.7 {
                        let x = i as f32 * width + width / 2.0;
                        self.spawn_asteroid(rng, Some(x), upgrade_count, next_id);
                    }
                }
            }
            SpawnPattern::Zigzag => {
                let x = SCREEN_WIDTH / 2.0
                    + (self.wave_timer * 0.01).sin() * (SCREEN_WIDTH / 3.0);
                self.spawn_asteroid(rng, Some(x), upgrade_count, next_id);
            }
        }
    }

    /// Pick a different pattern uniformly at random (resampled until it
    /// differs from the current one).
    fn rotate_pattern<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        let mut next = self.pattern;
        while next == self.pattern {
            next = ALL_PATTERNS[rng.random_range(0..ALL_PATTERNS.len())];
        }
        self.pattern = next;
        log::info!("spawn pattern changed to {:?}", self.pattern);
        events.push(GameEvent::PatternChanged { pattern: next });
    }

    fn spawn_asteroid<R: Rng>(
        &mut self,
        rng: &mut R,
        x: Option<f32>,
        upgrade_count: u32,
        next_id: &mut u32,
    ) {
        let x = x.unwrap_or_else(|| rng.random_range(0.0..SCREEN_WIDTH));
        let size = rng.random_range(ASTEROID_MIN_SIZE..ASTEROID_MAX_SIZE);
        let base_speed = rng.random_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
        let speed = base_speed * self.difficulty as f32;

        // HP scale is frozen at spawn: later upgrades never rescale a live rock
        let hp_scale = 1.0 + 0.2 * upgrade_count as f32;

        let id = *next_id;
        *next_id += 1;
        self.asteroids.push(Asteroid::new(
            id,
            Vec2::new(x, -ASTEROID_MAX_SIZE),
            size,
            speed,
            hp_scale,
        ));
    }

    /// Spike gate in milliseconds: unlocks at five upgrades and tightens by
    /// 200ms per upgrade past that, floored at 500ms.
    pub fn spike_spawn_rate(upgrade_count: u32) -> f64 {
        let past_unlock = upgrade_count.saturating_sub(SPIKE_UNLOCK_UPGRADES) as f64;
        (1800.0 - 200.0 * past_unlock).max(500.0)
    }

    fn spawn_spikes<R: Rng>(
        &mut self,
        rng: &mut R,
        now_ms: f64,
        upgrade_count: u32,
        next_id: &mut u32,
    ) {
        if upgrade_count < SPIKE_UNLOCK_UPGRADES {
            return;
        }
        if now_ms - self.last_spike_ms < Self::spike_spawn_rate(upgrade_count) {
            return;
        }
        self.last_spike_ms = now_ms;

        let x = rng.random_range(0.0..SCREEN_WIDTH);
        let size = rng.random_range(SPIKE_MIN_SIZE..SPIKE_MAX_SIZE);
        let base_speed = rng.random_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
        let speed = base_speed * self.difficulty as f32 * SPIKE_SPEED_FACTOR;

        let id = *next_id;
        *next_id += 1;
        self.spikes.push(Spike {
            id,
            pos: Vec2::new(x, -size),
            size,
            speed,
        });
    }

    /// Difficulty is derived from time since the last spawn, not total
    /// session time, so it resets toward 1 after every spawn. This sawtooth
    /// is intentional: quiet stretches ramp the pressure back up.
    fn update_difficulty(&mut self, now_ms: f64) {
        self.difficulty = (1.0 + (now_ms - self.last_spawn_ms) / 60000.0).min(DIFFICULTY_CAP);
    }

    /// Remove a destroyed asteroid by id.
    pub fn destroy_asteroid(&mut self, id: u32) {
        self.asteroids.retain(|a| a.id != id);
    }
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pattern_rotation_never_repeats_previous() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut director = SpawnDirector::new();
        let mut events = Vec::new();
        for _ in 0..200 {
            let before = director.pattern;
            director.rotate_pattern(&mut rng, &mut events);
            assert_ne!(director.pattern, before);
        }
        assert_eq!(events.len(), 200);
    }

    #[test]
    fn test_spawn_gate_respects_rate() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut director = SpawnDirector::new();
        let mut next_id = 1;
        let mut events = Vec::new();

        // 500ms in: gate closed (rate 1000ms at difficulty 1)
        director.update(&mut rng, 500.0, 1.0, 0, &mut next_id, &mut events);
        assert!(director.asteroids.is_empty());

        // Past the gate: at least one asteroid
        director.update(&mut rng, 1100.0, 1.0, 0, &mut next_id, &mut events);
        assert!(!director.asteroids.is_empty());
    }

    #[test]
    fn test_difficulty_capped() {
        let mut director = SpawnDirector::new();
        director.last_spawn_ms = 0.0;
        director.update_difficulty(10.0 * 60_000.0);
        assert_eq!(director.difficulty, DIFFICULTY_CAP);
    }

    #[test]
    fn test_difficulty_scales_with_time_since_last_spawn() {
        let mut director = SpawnDirector::new();
        director.last_spawn_ms = 0.0;
        director.update_difficulty(30_000.0);
        assert!((director.difficulty - 1.5).abs() < 1e-9);

        // A spawn resets the reference point
        director.last_spawn_ms = 30_000.0;
        director.update_difficulty(30_000.0);
        assert_eq!(director.difficulty, 1.0);
    }

    #[test]
    fn test_spike_rate_formula() {
        assert_eq!(SpawnDirector::spike_spawn_rate(5), 1800.0);
        assert_eq!(SpawnDirector::spike_spawn_rate(6), 1600.0);
        assert_eq!(SpawnDirector::spike_spawn_rate(10), 800.0);
        // Floor at 500ms from upgrade 12 onward
        assert_eq!(SpawnDirector::spike_spawn_rate(12), 500.0);
        assert_eq!(SpawnDirector::spike_spawn_rate(40), 500.0);
    }

    #[test]
    fn test_spikes_locked_below_five_upgrades() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut director = SpawnDirector::new();
        let mut next_id = 1;

        director.spawn_spikes(&mut rng, 60_000.0, 4, &mut next_id);
        assert!(director.spikes.is_empty());

        director.spawn_spikes(&mut rng, 60_000.0, 5, &mut next_id);
        assert_eq!(director.spikes.len(), 1);
    }

    #[test]
    fn test_spike_speed_ten_percent_over_asteroid_roll() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut director = SpawnDirector::new();
        let mut next_id = 1;
        director.spawn_spikes(&mut rng, 60_000.0, 8, &mut next_id);
        let spike = &director.spikes[0];
        let max = ASTEROID_MAX_SPEED * director.difficulty as f32 * SPIKE_SPEED_FACTOR;
        let min = ASTEROID_MIN_SPEED * director.difficulty as f32 * SPIKE_SPEED_FACTOR;
        assert!(spike.speed >= min && spike.speed < max);
    }

    #[test]
    fn test_wall_segment_count_tracks_difficulty() {
        // difficulty 1.0 -> 5 segments max, difficulty 2.5 -> 6 segments max
        let mut rng = Pcg32::seed_from_u64(4);
        let mut director = SpawnDirector::new();
        director.pattern = SpawnPattern::Wall;
        director.difficulty = 2.5;
        let mut next_id = 1;
        let mut events = Vec::new();
        director.spawn_asteroids(&mut rng, 1000.0, 1.0, 0, &mut next_id, &mut events);
        assert!(director.asteroids.len() <= 6);
    }

    #[test]
    fn test_hp_scale_frozen_at_spawn() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut director = SpawnDirector::new();
        let mut next_id = 1;
        director.spawn_asteroid(&mut rng, Some(400.0), 3, &mut next_id);
        let hp_scale = director.asteroids[0].hp_scale;
        assert!((hp_scale - 1.6).abs() < 1e-6);

        // A later spawn at a higher upgrade count does not touch the first
        director.spawn_asteroid(&mut rng, Some(400.0), 10, &mut next_id);
        assert!((director.asteroids[0].hp_scale - 1.6).abs() < 1e-6);
        assert!((director.asteroids[1].hp_scale - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_off_screen_pruning() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut director = SpawnDirector::new();
        let mut next_id = 1;
        let mut events = Vec::new();
        director.spawn_asteroid(&mut rng, Some(100.0), 0, &mut next_id);
        director.asteroids[0].pos.y = SCREEN_HEIGHT + ASTEROID_MAX_SIZE + 1.0;
        director.update(&mut rng, 100.0, 1.0, 0, &mut next_id, &mut events);
        assert!(director.asteroids.iter().all(|a| !a.is_off_screen()));
    }
}
