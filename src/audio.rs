//! Sound effect dispatch
//!
//! The simulation emits [`GameEvent`]s; this module maps them to sound
//! effects and hands them to whatever [`AudioSink`] the frontend provides.
//! Playback is fire-and-forget: a missing or broken audio backend must never
//! affect gameplay, so sinks have no way to report failure.

use rand::Rng;

use crate::sim::GameEvent;

/// Every sound the game can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Shoot,
    Hit,
    Destroy,
    Upgrade,
    Defeat,
}

impl SoundEffect {
    /// Playback rate multiplier. Impact sounds get a small random detune so
    /// rapid kills do not sound machine-gun identical.
    pub fn playback_rate<R: Rng>(self, rng: &mut R) -> f32 {
        match self {
            SoundEffect::Hit | SoundEffect::Destroy => rng.random_range(0.9..1.15),
            SoundEffect::Upgrade => 1.3,
            SoundEffect::Shoot | SoundEffect::Defeat => 1.0,
        }
    }
}

/// Playback backend supplied by the frontend.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, rate: f32, volume: f32);
}

/// Silent backend for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _rate: f32, _volume: f32) {}
}

/// The sound a given event triggers, if any.
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::ShotFired { .. } => Some(SoundEffect::Shoot),
        GameEvent::AsteroidHit { .. } => Some(SoundEffect::Hit),
        GameEvent::AsteroidDestroyed { .. } => Some(SoundEffect::Destroy),
        GameEvent::UpgradeApplied { .. } => Some(SoundEffect::Upgrade),
        GameEvent::PlayerDestroyed { .. } => Some(SoundEffect::Defeat),
        _ => None,
    }
}

/// Play the sounds for one frame's worth of events.
pub fn play_events<R: Rng>(
    sink: &mut dyn AudioSink,
    rng: &mut R,
    events: &[GameEvent],
    volume: f32,
) {
    for event in events {
        if let Some(effect) = sound_for(event) {
            let rate = effect.playback_rate(rng);
            sink.play(effect, rate, volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_impact_sounds_are_detuned_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let rate = SoundEffect::Hit.playback_rate(&mut rng);
            assert!((0.9..1.15).contains(&rate));
            let rate = SoundEffect::Destroy.playback_rate(&mut rng);
            assert!((0.9..1.15).contains(&rate));
        }
    }

    #[test]
    fn test_fixed_rates() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(SoundEffect::Upgrade.playback_rate(&mut rng), 1.3);
        assert_eq!(SoundEffect::Shoot.playback_rate(&mut rng), 1.0);
        assert_eq!(SoundEffect::Defeat.playback_rate(&mut rng), 1.0);
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            sound_for(&GameEvent::ShotFired { count: 2 }),
            Some(SoundEffect::Shoot)
        );
        assert_eq!(
            sound_for(&GameEvent::PlayerDestroyed { pos: Vec2::ZERO }),
            Some(SoundEffect::Defeat)
        );
        // Purely visual events stay silent
        assert_eq!(
            sound_for(&GameEvent::BulletImpact {
                pos: Vec2::ZERO,
                size: 6.0
            }),
            None
        );
        assert_eq!(sound_for(&GameEvent::NewHighScore { score: 10 }), None);
    }

    struct Recorder(Vec<SoundEffect>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _rate: f32, _volume: f32) {
            self.0.push(effect);
        }
    }

    #[test]
    fn test_play_events_dispatches_in_order() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut sink = Recorder(Vec::new());
        let events = vec![
            GameEvent::ShotFired { count: 1 },
            GameEvent::NewHighScore { score: 50 },
            GameEvent::AsteroidDestroyed {
                id: 3,
                pos: Vec2::ZERO,
                size: 16.0,
                points: 20,
            },
        ];
        play_events(&mut sink, &mut rng, &events, 1.0);
        assert_eq!(sink.0, vec![SoundEffect::Shoot, SoundEffect::Destroy]);
    }
}
