//! Upgrade pool and the per-cycle selection state machine
//!
//! Every fifth destroyed asteroid opens a selection: three distinct upgrades
//! drawn from the fixed pool, bound to keys 1/2/3. Exactly one is applied per
//! cycle, and the pool is sampled fresh each cycle (draws never deplete it).

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::consts::{KILLS_PER_UPGRADE, UPGRADE_CHOICES};

/// Closed set of upgrade effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    /// Multiplies the fire cooldown (value < 1 means faster), floored
    FireRateBoost,
    /// Multiplies bullet size, ceiled
    BulletSizeBoost,
    /// Multiplies bullet speed, ceiled
    BulletSpeedBoost,
    /// Adds to the per-volley shot count
    AdditionalShot,
    /// Multiplies ship speed, ceiled
    PlayerSpeedBoost,
    /// Adds to bullet damage
    DamageBoost,
}

/// Immutable upgrade record drawn from the fixed pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Upgrade {
    pub kind: UpgradeKind,
    pub value: f32,
    pub name: &'static str,
    pub description: &'static str,
}

const POOL: [Upgrade; 6] = [
    Upgrade {
        kind: UpgradeKind::FireRateBoost,
        value: 0.8,
        name: "Faster Firing",
        description: "Reduce time between shots by 20%",
    },
    Upgrade {
        kind: UpgradeKind::BulletSizeBoost,
        value: 1.3,
        name: "Bigger Bullets",
        description: "Increase bullet size by 30%",
    },
    Upgrade {
        kind: UpgradeKind::BulletSpeedBoost,
        value: 1.3,
        name: "Swifter Bullets",
        description: "Increase bullet speed by 30%",
    },
    Upgrade {
        kind: UpgradeKind::AdditionalShot,
        value: 1.0,
        name: "+1 Shot",
        description: "Add one more bullet to your shots",
    },
    Upgrade {
        kind: UpgradeKind::PlayerSpeedBoost,
        value: 1.2,
        name: "Increased Mobility",
        description: "Move 20% faster",
    },
    Upgrade {
        kind: UpgradeKind::DamageBoost,
        value: 1.0,
        name: "+1 Damage",
        description: "Increase bullet damage by 1",
    },
];

/// The fixed upgrade pool
pub fn upgrade_pool() -> &'static [Upgrade] {
    &POOL
}

/// Tracks upgrade progress and the in-flight selection
#[derive(Debug, Clone, Default)]
pub struct UpgradeSystem {
    kills_since_upgrade: u32,
    /// The three options currently on offer (empty outside a cycle)
    choices: Vec<Upgrade>,
}

impl UpgradeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a destroyed asteroid. Returns true when the cycle threshold is
    /// reached; the counter resets to zero at that moment regardless of which
    /// patterns produced the kills.
    pub fn record_kill(&mut self) -> bool {
        self.kills_since_upgrade += 1;
        if self.kills_since_upgrade >= KILLS_PER_UPGRADE {
            self.kills_since_upgrade = 0;
            return true;
        }
        false
    }

    /// Display counter for the HUD ("UPGRADE: n/5")
    pub fn kills_since_upgrade(&self) -> u32 {
        self.kills_since_upgrade
    }

    /// Draw three distinct upgrades without replacement and hold them as the
    /// current offer.
    pub fn open_selection<R: Rng>(&mut self, rng: &mut R) -> &[Upgrade] {
        self.choices = POOL
            .choose_multiple(rng, UPGRADE_CHOICES)
            .copied()
            .collect();
        &self.choices
    }

    pub fn is_selecting(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn choices(&self) -> &[Upgrade] {
        &self.choices
    }

    /// Take the chosen upgrade and close the cycle. Out-of-range or inactive
    /// selections return None and leave the offer open.
    pub fn select(&mut self, index: usize) -> Option<Upgrade> {
        if index >= self.choices.len() {
            return None;
        }
        let chosen = self.choices[index];
        self.choices.clear();
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_cycle_triggers_on_fifth_kill_and_resets() {
        let mut sys = UpgradeSystem::new();
        for _ in 0..4 {
            assert!(!sys.record_kill());
        }
        assert_eq!(sys.kills_since_upgrade(), 4);
        assert!(sys.record_kill());
        assert_eq!(sys.kills_since_upgrade(), 0);

        // Next cycle counts afresh
        for _ in 0..4 {
            assert!(!sys.record_kill());
        }
        assert!(sys.record_kill());
    }

    #[test]
    fn test_selection_draws_three_distinct() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut sys = UpgradeSystem::new();
        for _ in 0..50 {
            let choices: Vec<_> = sys.open_selection(&mut rng).to_vec();
            assert_eq!(choices.len(), 3);
            assert_ne!(choices[0].kind, choices[1].kind);
            assert_ne!(choices[0].kind, choices[2].kind);
            assert_ne!(choices[1].kind, choices[2].kind);
            sys.select(0);
        }
    }

    #[test]
    fn test_select_closes_the_offer() {
        let mut rng = Pcg32::seed_from_u64(12);
        let mut sys = UpgradeSystem::new();
        sys.open_selection(&mut rng);
        assert!(sys.is_selecting());

        // Out-of-range selection leaves the offer open
        assert!(sys.select(3).is_none());
        assert!(sys.is_selecting());

        let chosen = sys.select(1).unwrap();
        assert!(!sys.is_selecting());
        assert!(upgrade_pool().iter().any(|u| u.kind == chosen.kind));

        // No offer active: selection is a no-op
        assert!(sys.select(0).is_none());
    }

    #[test]
    fn test_pool_is_stable_across_draws() {
        // Sampling never depletes the pool
        let mut rng = Pcg32::seed_from_u64(13);
        let mut sys = UpgradeSystem::new();
        for _ in 0..10 {
            sys.open_selection(&mut rng);
            sys.select(0);
        }
        assert_eq!(upgrade_pool().len(), 6);
    }
}
