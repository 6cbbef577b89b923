use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Default launch speed for a jump.
pub const DEFAULT_JUMP_SPEED: f64 = 11.0;

/// Discrete commands the shell forwards to the integrator, one per physical
/// key transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    StartMoveRight,
    StopMoveRight,
    StartMoveLeft,
    StopMoveLeft,
    Jump { speed: f64 },
    AirDodge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyTransition {
    Pressed,
    Released,
}

/// Which keys drive which command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_right: char,
    pub move_left: char,
    pub jump: char,
    pub air_dodge: char,
    pub jump_speed: f64,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_right: 's',
            move_left: 'a',
            jump: ' ',
            air_dodge: 'n',
            jump_speed: DEFAULT_JUMP_SPEED,
        }
    }
}

impl KeyBindings {
    /// Map a key transition to a command. Releases only matter for the two
    /// movement keys.
    pub fn command_for(&self, key: char, transition: KeyTransition) -> Option<Command> {
        match transition {
            KeyTransition::Pressed => {
                if key == self.move_right {
                    Some(Command::StartMoveRight)
                } else if key == self.move_left {
                    Some(Command::StartMoveLeft)
                } else if key == self.jump {
                    Some(Command::Jump {
                        speed: self.jump_speed,
                    })
                } else if key == self.air_dodge {
                    Some(Command::AirDodge)
                } else {
                    None
                }
            },
            KeyTransition::Released => {
                if key == self.move_right {
                    Some(Command::StopMoveRight)
                } else if key == self.move_left {
                    Some(Command::StopMoveLeft)
                } else {
                    None
                }
            },
        }
    }
}

/// Held-key tracker that drops OS auto-repeat so each physical transition
/// produces at most one command.
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashSet<char>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw key event. Returns the command to dispatch, if any.
    pub fn on_key(
        &mut self,
        bindings: &KeyBindings,
        key: char,
        transition: KeyTransition,
    ) -> Option<Command> {
        let fresh = match transition {
            KeyTransition::Pressed => self.held.insert(key),
            KeyTransition::Released => self.held.remove(&key),
        };
        if !fresh {
            tracing::trace!(?key, ?transition, "dropping repeated key event");
            return None;
        }
        bindings.command_for(key, transition)
    }

    pub fn is_held(&self, key: char) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_match_demo_keys() {
        let b = KeyBindings::default();
        assert_eq!(
            b.command_for('s', KeyTransition::Pressed),
            Some(Command::StartMoveRight)
        );
        assert_eq!(
            b.command_for('a', KeyTransition::Pressed),
            Some(Command::StartMoveLeft)
        );
        assert_eq!(
            b.command_for(' ', KeyTransition::Pressed),
            Some(Command::Jump { speed: 11.0 })
        );
        assert_eq!(
            b.command_for('n', KeyTransition::Pressed),
            Some(Command::AirDodge)
        );
        assert_eq!(
            b.command_for('s', KeyTransition::Released),
            Some(Command::StopMoveRight)
        );
        assert_eq!(
            b.command_for('a', KeyTransition::Released),
            Some(Command::StopMoveLeft)
        );
    }

    #[test]
    fn releasing_action_keys_does_nothing() {
        let b = KeyBindings::default();
        assert_eq!(b.command_for(' ', KeyTransition::Released), None);
        assert_eq!(b.command_for('n', KeyTransition::Released), None);
        assert_eq!(b.command_for('q', KeyTransition::Pressed), None);
    }

    #[test]
    fn auto_repeat_is_suppressed() {
        let b = KeyBindings::default();
        let mut tracker = KeyTracker::new();
        assert_eq!(
            tracker.on_key(&b, 's', KeyTransition::Pressed),
            Some(Command::StartMoveRight)
        );
        assert!(tracker.is_held('s'));
        assert_eq!(tracker.on_key(&b, 's', KeyTransition::Pressed), None);
        assert_eq!(tracker.on_key(&b, 's', KeyTransition::Pressed), None);
        assert_eq!(
            tracker.on_key(&b, 's', KeyTransition::Released),
            Some(Command::StopMoveRight)
        );
        assert!(!tracker.is_held('s'));
    }

    #[test]
    fn release_without_press_is_dropped() {
        let b = KeyBindings::default();
        let mut tracker = KeyTracker::new();
        assert_eq!(tracker.on_key(&b, 'a', KeyTransition::Released), None);
    }

    #[test]
    fn rebinding_from_toml() {
        let b: KeyBindings = toml::from_str("move_right = \"d\"\njump_speed = 9.5\n").unwrap();
        assert_eq!(
            b.command_for('d', KeyTransition::Pressed),
            Some(Command::StartMoveRight)
        );
        assert_eq!(b.move_left, 'a');
        assert_eq!(
            b.command_for(' ', KeyTransition::Pressed),
            Some(Command::Jump { speed: 9.5 })
        );
    }

    #[test]
    fn command_serializes_with_tag() {
        let cmd: Command = toml::from_str("type = \"jump\"\nspeed = 11.0\n").unwrap();
        assert_eq!(cmd, Command::Jump { speed: 11.0 });
    }
}
