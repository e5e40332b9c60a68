//! Keyboard binding layer
//!
//! Translates frontend key events (DOM-style `code` identifiers) into the
//! per-frame [`TickInput`] commands the simulation consumes. The translator
//! accumulates edges between ticks; [`InputTranslator::take_frame`] drains
//! them into one `TickInput` and resets for the next frame.

use crate::sim::TickInput;

/// Game actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    MoveLeft,
    MoveRight,
    Shoot,
    Pause,
    Restart,
    /// Upgrade choice, 0-based
    Select(usize),
}

/// Default key map. Arrows and WASD both steer.
pub fn binding_for(code: &str) -> Option<Binding> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Binding::MoveLeft),
        "ArrowRight" | "KeyD" => Some(Binding::MoveRight),
        "Space" => Some(Binding::Shoot),
        "KeyP" => Some(Binding::Pause),
        "KeyR" => Some(Binding::Restart),
        "Digit1" => Some(Binding::Select(0)),
        "Digit2" => Some(Binding::Select(1)),
        "Digit3" => Some(Binding::Select(2)),
        _ => None,
    }
}

/// Accumulates key edges between simulation ticks.
#[derive(Debug, Default)]
pub struct InputTranslator {
    pending: TickInput,
    shoot_held: bool,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        match binding_for(code) {
            Some(Binding::MoveLeft) => self.pending.left_down = true,
            Some(Binding::MoveRight) => self.pending.right_down = true,
            Some(Binding::Shoot) => self.shoot_held = true,
            Some(Binding::Pause) => self.pending.pause = true,
            Some(Binding::Restart) => self.pending.restart = true,
            Some(Binding::Select(index)) => self.pending.select = Some(index),
            None => {}
        }
    }

    pub fn key_up(&mut self, code: &str) {
        match binding_for(code) {
            Some(Binding::MoveLeft) => self.pending.left_up = true,
            Some(Binding::MoveRight) => self.pending.right_up = true,
            Some(Binding::Shoot) => self.shoot_held = false,
            _ => {}
        }
    }

    /// Drain the accumulated edges for one tick. Held fire persists across
    /// frames; everything else is a one-shot edge.
    pub fn take_frame(&mut self) -> TickInput {
        let mut frame = std::mem::take(&mut self.pending);
        frame.shoot = self.shoot_held;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_map() {
        assert_eq!(binding_for("ArrowLeft"), Some(Binding::MoveLeft));
        assert_eq!(binding_for("KeyA"), Some(Binding::MoveLeft));
        assert_eq!(binding_for("ArrowRight"), Some(Binding::MoveRight));
        assert_eq!(binding_for("KeyD"), Some(Binding::MoveRight));
        assert_eq!(binding_for("Space"), Some(Binding::Shoot));
        assert_eq!(binding_for("KeyP"), Some(Binding::Pause));
        assert_eq!(binding_for("KeyR"), Some(Binding::Restart));
        assert_eq!(binding_for("Digit2"), Some(Binding::Select(1)));
        assert_eq!(binding_for("Escape"), None);
    }

    #[test]
    fn test_edges_are_one_shot() {
        let mut translator = InputTranslator::new();
        translator.key_down("KeyP");
        translator.key_down("ArrowLeft");

        let frame = translator.take_frame();
        assert!(frame.pause);
        assert!(frame.left_down);

        let frame = translator.take_frame();
        assert!(!frame.pause);
        assert!(!frame.left_down);
    }

    #[test]
    fn test_fire_is_held_not_edged() {
        let mut translator = InputTranslator::new();
        translator.key_down("Space");
        assert!(translator.take_frame().shoot);
        assert!(translator.take_frame().shoot);

        translator.key_up("Space");
        assert!(!translator.take_frame().shoot);
    }

    #[test]
    fn test_release_reported_separately_from_press() {
        let mut translator = InputTranslator::new();
        translator.key_down("ArrowRight");
        translator.key_up("ArrowRight");

        // Both edges land in the same frame; the simulation decides what
        // the release means given its current movement flags.
        let frame = translator.take_frame();
        assert!(frame.right_down);
        assert!(frame.right_up);
    }

    #[test]
    fn test_selection_keys() {
        let mut translator = InputTranslator::new();
        translator.key_down("Digit3");
        assert_eq!(translator.take_frame().select, Some(2));
        assert_eq!(translator.take_frame().select, None);
    }
}
