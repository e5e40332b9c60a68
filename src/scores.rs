//! Live score, persisted best, and the kill counter shown on the HUD.

use crate::persistence::ScoreStore;

/// Tracks the current run's score against the all-time best.
///
/// The best score is written through to the backing [`ScoreStore`] the moment
/// it is beaten, not at game over, so a crash never loses a record.
pub struct ScoreLedger {
    score: u64,
    high_score: u64,
    upgrade_progress: u32,
    store: Box<dyn ScoreStore>,
}

impl ScoreLedger {
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let high_score = store.load();
        Self {
            score: 0,
            high_score,
            upgrade_progress: 0,
            store,
        }
    }

    /// Add points to the running score. Returns true when this pushed the
    /// score past the previous best.
    pub fn add_score(&mut self, points: u64) -> bool {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
            true
        } else {
            false
        }
    }

    /// Start a fresh run. The best score survives.
    pub fn reset(&mut self) {
        self.score = 0;
        self.upgrade_progress = 0;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Kills since the last upgrade, for the HUD progress pips.
    pub fn upgrade_progress(&self) -> u32 {
        self.upgrade_progress
    }

    pub fn set_upgrade_progress(&mut self, kills: u32) {
        self.upgrade_progress = kills;
    }
}
