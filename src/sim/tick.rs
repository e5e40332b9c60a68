//! Per-frame orchestration
//!
//! One tick: player -> spawn director -> collision resolution -> score and
//! upgrade side effects -> transient effect timers. The upgrade screen and
//! the pause flag suspend this pipeline; game over stops everything except
//! the restart binding.

use super::collision;
use super::state::{Explosion, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::scores::ScoreLedger;

/// Input commands for a single tick.
///
/// Movement is edge-driven to match the key model: a `*_down` edge latches
/// the direction, a `*_up` edge releases it only if that direction is still
/// active. `shoot` is level-driven (key repeat); the fire-rate cooldown does
/// the limiting.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left_down: bool,
    pub left_up: bool,
    pub right_down: bool,
    pub right_up: bool,
    pub shoot: bool,
    /// Pause toggle edge (ignored while Selecting or GameOver)
    pub pause: bool,
    /// Restart edge (only honored in GameOver)
    pub restart: bool,
    /// Upgrade choice, 0-based (only honored while Selecting)
    pub select: Option<usize>,
    /// Demo mode: a trivial autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game by one frame of `delta` frame-units (1.0 = 16.667 ms).
pub fn tick(state: &mut GameState, ledger: &mut ScoreLedger, input: &TickInput, delta: f32) {
    state.events.clear();

    // Idle/demo mode: overlay autopilot commands on the incoming input
    let mut input = input.clone();
    if input.idle_mode {
        apply_idle_policy(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
                ledger.reset();
            }
            return;
        }
        GamePhase::Selecting => {
            // All gameplay input is ignored except the selection bindings;
            // the pause toggle is disabled.
            if let Some(index) = input.select
                && let Some(upgrade) = state.upgrades.select(index)
            {
                state.player.apply_upgrade(&upgrade);
                log::info!("upgrade applied: {}", upgrade.name);
                state
                    .events
                    .push(GameEvent::UpgradeApplied { kind: upgrade.kind });
                state.phase = GamePhase::Running;
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Running;
            }
            return;
        }
        GamePhase::Running => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
        }
    }

    state.now_ms += delta as f64 * MS_PER_FRAME;

    // Player movement and shooting
    if input.left_down {
        state.player.move_left();
    }
    if input.right_down {
        state.player.move_right();
    }
    if input.left_up && state.player.moving_left {
        state.player.stop_moving();
    }
    if input.right_up && state.player.moving_right {
        state.player.stop_moving();
    }
    if input.shoot {
        let fired = state.player.shoot(state.now_ms, &mut state.next_id);
        if fired > 0 {
            state.events.push(GameEvent::ShotFired { count: fired });
        }
    }
    state.player.update(delta);

    // Spawn director owns all hazards
    state.spawner.update(
        &mut state.rng,
        state.now_ms,
        delta,
        state.player.upgrade_count,
        &mut state.next_id,
        &mut state.events,
    );

    // Player versus any hazard ends the run
    let player_box = state.player.hitbox();
    let hazard_hit = state
        .spawner
        .asteroids
        .iter()
        .map(|a| a.hitbox())
        .chain(state.spawner.spikes.iter().map(|s| s.hitbox()))
        .any(|h| collision::circles_overlap(&player_box, &h));
    if hazard_hit {
        let pos = state.player.pos;
        state.explosions.push(Explosion {
            pos,
            size: PLAYER_SIZE,
            particle_scale: 1.0,
            elapsed: 0.0,
        });
        state.events.push(GameEvent::PlayerDestroyed { pos });
        state.phase = GamePhase::GameOver;
        log::info!("game over, final score {}", ledger.score());
        return;
    }

    resolve_bullet_hits(state, ledger);

    // Advance transient effects, dropping completed ones
    state.explosions.retain_mut(|e| !e.update(delta));
}

/// Apply all bullet/asteroid pairs for this frame. Bullets are removed
/// unconditionally; an asteroid is removed and scored exactly once even when
/// several bullets push it past zero in the same frame (later pairs against a
/// removed asteroid are no-ops).
fn resolve_bullet_hits(state: &mut GameState, ledger: &mut ScoreLedger) {
    let pairs = collision::bullets_vs_asteroids(&state.player.bullets, &state.spawner.asteroids);
    let mut open_upgrade = false;

    for (bullet_id, asteroid_id) in pairs {
        let Some(index) = state.player.bullets.iter().position(|b| b.id == bullet_id) else {
            continue;
        };
        let bullet = state.player.bullets.remove(index);

        let Some(asteroid) = state
            .spawner
            .asteroids
            .iter_mut()
            .find(|a| a.id == asteroid_id)
        else {
            // Already destroyed earlier this frame; the bullet is still spent
            continue;
        };

        state.explosions.push(Explosion {
            pos: bullet.pos,
            size: bullet.size * 2.0,
            particle_scale: 0.3,
            elapsed: 0.0,
        });
        state.events.push(GameEvent::BulletImpact {
            pos: bullet.pos,
            size: bullet.size,
        });

        let destroyed = asteroid.take_damage(bullet.damage);
        state.events.push(GameEvent::AsteroidHit {
            id: asteroid.id,
            damage: bullet.damage,
            pos: asteroid.pos,
        });

        if destroyed {
            let (pos, size) = (asteroid.pos, asteroid.size);
            let size_bonus = ((size / ASTEROID_MIN_SIZE) * SCORE_PER_ASTEROID as f32).floor() as u64;
            let points = SCORE_PER_ASTEROID + size_bonus;

            state.spawner.destroy_asteroid(asteroid_id);
            state.explosions.push(Explosion {
                pos,
                size,
                particle_scale: 1.0,
                elapsed: 0.0,
            });
            state.events.push(GameEvent::AsteroidDestroyed {
                id: asteroid_id,
                pos,
                size,
                points,
            });

            if ledger.add_score(points) {
                state.events.push(GameEvent::NewHighScore {
                    score: ledger.score(),
                });
            }
            if state.upgrades.record_kill() {
                open_upgrade = true;
            }
            ledger.set_upgrade_progress(state.upgrades.kills_since_upgrade());
        }
    }

    if open_upgrade {
        let choices = state.upgrades.open_selection(&mut state.rng);
        let kinds = choices.iter().map(|u| u.kind).collect();
        state.events.push(GameEvent::UpgradeOffered { choices: kinds });
        state.phase = GamePhase::Selecting;
    }
}

/// Demo autopilot: hold fire, sidestep the nearest descending hazard, take
/// the first upgrade on offer, restart after a loss.
fn apply_idle_policy(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Selecting => {
            input.select = Some(0);
            return;
        }
        GamePhase::GameOver => {
            input.restart = true;
            return;
        }
        GamePhase::Paused => {
            input.pause = true;
            return;
        }
        GamePhase::Running => {}
    }

    input.shoot = true;

    let player = &state.player;
    let threat = state
        .spawner
        .asteroids
        .iter()
        .map(|a| (a.pos, a.size))
        .chain(state.spawner.spikes.iter().map(|s| (s.pos, s.size)))
        .filter(|(pos, size)| {
            pos.y < player.pos.y && (pos.x - player.pos.x).abs() < size + PLAYER_SIZE
        })
        .min_by(|a, b| {
            let da = player.pos.y - a.0.y;
            let db = player.pos.y - b.0.y;
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    match threat {
        Some((pos, _)) if pos.x >= player.pos.x => input.left_down = true,
        Some(_) => input.right_down = true,
        None => {
            // No threat: release and drift back toward center
            if (player.pos.x - SCREEN_WIDTH / 2.0).abs() < 10.0 {
                input.left_up = true;
                input.right_up = true;
            } else if player.pos.x > SCREEN_WIDTH / 2.0 {
                input.left_down = true;
            } else {
                input.right_down = true;
            }
        }
    }
}
