use std::path::Path;

use serde::{Deserialize, Serialize};

use wavedash_core::geometry::{GeometryProvider, Level};
use wavedash_core::input::KeyBindings;
use wavedash_physics::config::PhysicsConfig;
use wavedash_physics::level::{SPAWN_X, SPAWN_Y, premade_map};

use crate::error::RunnerError;
use crate::script::InputScript;

/// Runner settings, loaded from `wavedash.toml` (or the file named by
/// `WAVEDASH_CONFIG`) with environment overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub physics: PhysicsConfig,
    pub keys: KeyBindings,
    /// TOML level file. The premade arena is used when unset.
    pub level_path: Option<String>,
    /// TOML key-event script. The built-in wavedash demo is used when unset.
    pub script_path: Option<String>,
    /// Ticks to simulate before the session ends on its own.
    pub ticks: u64,
    /// Pace ticks at `physics.tick_ms` instead of running flat out.
    pub realtime: bool,
    pub spawn_x: f64,
    pub spawn_y: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            keys: KeyBindings::default(),
            level_path: None,
            script_path: None,
            ticks: 240,
            realtime: true,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
        }
    }
}

impl RunnerConfig {
    /// Load from `WAVEDASH_CONFIG` or `wavedash.toml`, falling back to
    /// defaults (with physics from [`PhysicsConfig::load`]) when neither is
    /// readable. Env overrides are applied last.
    pub fn load() -> Self {
        let path = std::env::var("WAVEDASH_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "wavedash.toml".to_string());

        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<RunnerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::with_physics_file()
                },
            },
            Err(_) => {
                tracing::debug!("No {path} found, using defaults");
                Self::with_physics_file()
            },
        };

        config.apply_env_overrides();
        config
    }

    /// Load from an explicit path. Unlike [`RunnerConfig::load`], a missing
    /// or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self, RunnerError> {
        let content = std::fs::read_to_string(path).map_err(|e| RunnerError::io(path, e))?;
        let mut config: Self = toml::from_str(&content).map_err(|e| RunnerError::toml(path, e))?;
        tracing::info!("Loaded configuration from {}", path.display());
        config.apply_env_overrides();
        Ok(config)
    }

    fn with_physics_file() -> Self {
        Self {
            physics: PhysicsConfig::load(),
            ..Default::default()
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WAVEDASH_TICKS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.ticks = n;
        }
        if let Ok(val) = std::env::var("WAVEDASH_REALTIME")
            && let Ok(b) = val.parse::<bool>()
        {
            self.realtime = b;
        }
        if let Ok(path) = std::env::var("WAVEDASH_LEVEL")
            && !path.is_empty()
        {
            self.level_path = Some(path);
        }
        if let Ok(path) = std::env::var("WAVEDASH_SCRIPT")
            && !path.is_empty()
        {
            self.script_path = Some(path);
        }
    }

    /// The configured level file, or the premade arena.
    pub fn load_level(&self) -> Result<Level, RunnerError> {
        let level = match &self.level_path {
            Some(path) => Level::load(path)?,
            None => premade_map()?,
        };
        tracing::info!(
            rects = level.solid_rects().len(),
            light_floors = level.light_floors().len(),
            "level ready"
        );
        Ok(level)
    }

    /// The configured key script, or the built-in wavedash demo.
    pub fn load_script(&self) -> Result<InputScript, RunnerError> {
        match &self.script_path {
            Some(path) => InputScript::load(Path::new(path)),
            None => Ok(InputScript::wavedash_demo(&self.keys)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_spawn_in_premade_arena() {
        let config = RunnerConfig::default();
        assert_eq!(config.ticks, 240);
        assert!(config.realtime);
        assert_eq!((config.spawn_x, config.spawn_y), (50.0, 600.0));
        assert_eq!(config.keys, KeyBindings::default());
        assert!(config.level_path.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: RunnerConfig = toml::from_str(
            r#"
            ticks = 90
            realtime = false

            [physics]
            cancel_dodge_on_land = true

            [keys]
            move_right = "d"
            "#,
        )
        .unwrap();

        assert_eq!(config.ticks, 90);
        assert!(!config.realtime);
        assert!(config.physics.cancel_dodge_on_land);
        assert_eq!(config.physics.gravity, 10.0);
        assert_eq!(config.keys.move_right, 'd');
        assert_eq!(config.keys.move_left, 'a');
        assert_eq!(config.spawn_y, 600.0);
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let err = RunnerConfig::load_from(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, RunnerError::Io { .. }));
    }

    #[test]
    fn default_level_is_premade_arena() {
        let level = RunnerConfig::default().load_level().unwrap();
        assert_eq!(level.width, 1300);
        assert_eq!(level.height, 700);
    }

    #[test]
    fn default_script_is_demo() {
        let config = RunnerConfig::default();
        let script = config.load_script().unwrap();
        assert_eq!(script, InputScript::wavedash_demo(&config.keys));
    }
}
