use std::path::Path;

use serde::{Deserialize, Serialize};

use wavedash_core::input::{KeyBindings, KeyTransition};

use crate::error::RunnerError;

/// One raw key event, delivered before the given tick is simulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedKey {
    pub tick: u64,
    pub key: char,
    pub transition: KeyTransition,
}

/// Key events played back by the runner in place of a keyboard.
///
/// ```toml
/// [[events]]
/// tick = 0
/// key = "s"
/// transition = "pressed"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputScript {
    events: Vec<ScriptedKey>,
}

impl InputScript {
    /// Events are ordered by tick; same-tick events keep their given order.
    pub fn new(mut events: Vec<ScriptedKey>) -> Self {
        events.sort_by_key(|e| e.tick);
        Self { events }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let parsed: Self = toml::from_str(content)?;
        Ok(Self::new(parsed.events))
    }

    pub fn load(path: &Path) -> Result<Self, RunnerError> {
        let content = std::fs::read_to_string(path).map_err(|e| RunnerError::io(path, e))?;
        let script = Self::from_toml_str(&content).map_err(|e| RunnerError::toml(path, e))?;
        tracing::info!(
            events = script.events.len(),
            "Loaded input script from {}",
            path.display()
        );
        Ok(script)
    }

    /// Run right, jump once grounded, air-dodge into the floor two ticks
    /// later, then let go and coast.
    pub fn wavedash_demo(keys: &KeyBindings) -> Self {
        use KeyTransition::{Pressed, Released};

        let event = |tick, key, transition| ScriptedKey {
            tick,
            key,
            transition,
        };
        Self::new(vec![
            event(0, keys.move_right, Pressed),
            event(24, keys.jump, Pressed),
            event(26, keys.air_dodge, Pressed),
            event(27, keys.air_dodge, Released),
            event(28, keys.jump, Released),
            event(60, keys.move_right, Released),
        ])
    }

    pub fn events(&self) -> &[ScriptedKey] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Walks an [`InputScript`] in tick order.
#[derive(Debug)]
pub struct ScriptCursor<'a> {
    script: &'a InputScript,
    next: usize,
}

impl<'a> ScriptCursor<'a> {
    pub fn new(script: &'a InputScript) -> Self {
        Self { script, next: 0 }
    }

    /// Events due at or before `tick` that haven't been returned yet.
    pub fn due(&mut self, tick: u64) -> &'a [ScriptedKey] {
        let script: &'a InputScript = self.script;
        let events = &script.events[self.next..];
        let count = events.iter().take_while(|e| e.tick <= tick).count();
        self.next += count;
        &events[..count]
    }

    pub fn finished(&self) -> bool {
        self.next >= self.script.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_sorts_events() {
        let script = InputScript::from_toml_str(
            r#"
            [[events]]
            tick = 10
            key = "n"
            transition = "pressed"

            [[events]]
            tick = 0
            key = " "
            transition = "pressed"

            [[events]]
            tick = 10
            key = "s"
            transition = "released"
            "#,
        )
        .unwrap();

        let keys: Vec<_> = script.events().iter().map(|e| (e.tick, e.key)).collect();
        assert_eq!(keys, vec![(0, ' '), (10, 'n'), (10, 's')]);
        assert_eq!(script.events()[2].transition, KeyTransition::Released);
    }

    #[test]
    fn empty_file_is_an_empty_script() {
        let script = InputScript::from_toml_str("").unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn multi_char_key_is_rejected() {
        let result = InputScript::from_toml_str(
            r#"
            [[events]]
            tick = 0
            key = "space"
            transition = "pressed"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn demo_uses_the_configured_bindings() {
        let keys = KeyBindings {
            move_right: 'd',
            air_dodge: 'k',
            ..Default::default()
        };
        let script = InputScript::wavedash_demo(&keys);
        assert_eq!(script.events()[0].key, 'd');
        assert!(script.events().iter().any(|e| e.key == 'k'));
        assert!(!script.events().iter().any(|e| e.key == 's'));
    }

    #[test]
    fn cursor_hands_out_each_event_once() {
        let script = InputScript::wavedash_demo(&KeyBindings::default());
        let mut cursor = ScriptCursor::new(&script);

        assert_eq!(cursor.due(0).len(), 1);
        assert!(cursor.due(0).is_empty());
        assert!(cursor.due(23).is_empty());
        assert_eq!(cursor.due(27).len(), 3);
        assert!(!cursor.finished());
        assert_eq!(cursor.due(1000).len(), 2);
        assert!(cursor.finished());
    }
}
