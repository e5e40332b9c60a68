//! Circle-overlap collision engine
//!
//! Pure geometric tests over [`Hitbox`] proxies. Overlap is strict: circles
//! that exactly touch do not collide. Pairing of bullets against asteroids is
//! first-match in asteroid creation order, at most one pair per bullet; the
//! orchestrator applies cumulative damage when several bullets pair with the
//! same asteroid within one frame.

use super::state::{Asteroid, Bullet, Hitbox};

/// True iff the distance between centers is strictly less than the radius sum.
pub fn circles_overlap(a: &Hitbox, b: &Hitbox) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

/// True if the player hitbox overlaps any hazard hitbox. Short-circuits on
/// the first match.
pub fn player_vs_hazards<'a, I>(player: &Hitbox, hazards: I) -> bool
where
    I: IntoIterator<Item = &'a Hitbox>,
{
    hazards.into_iter().any(|h| circles_overlap(player, h))
}

/// For each bullet, find the first asteroid it overlaps and pair them.
/// Returned pairs are `(bullet_id, asteroid_id)`; each bullet contributes at
/// most one pair, but several bullets may pair with the same asteroid.
pub fn bullets_vs_asteroids(bullets: &[Bullet], asteroids: &[Asteroid]) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for bullet in bullets {
        let bullet_box = bullet.hitbox();
        for asteroid in asteroids {
            if circles_overlap(&bullet_box, &asteroid.hitbox()) {
                pairs.push((bullet.id, asteroid.id));
                break;
            }
        }
    }
    pairs
}
