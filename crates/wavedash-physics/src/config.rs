use serde::{Deserialize, Serialize};

/// Downward acceleration (units/s^2; y grows downward).
pub const GRAVITY: f64 = 10.0;
/// Jerk added per held direction key.
pub const MOVE_JERK: f64 = 3.0;
/// Horizontal speed past which held-direction jerk stops accumulating.
pub const SPEED_CAP: f64 = 6.0;
/// Quadratic term of the friction curve `|-a * v^2 + b|`.
pub const FRICTION_QUADRATIC: f64 = 0.2;
/// Constant term of the friction curve.
pub const FRICTION_CONSTANT: f64 = 11.0;
/// Launch speed of an air dodge.
pub const AIR_DODGE_SPEED: f64 = 6.0;
/// Ticks an air dodge lasts before it ends on its own.
pub const AIR_DODGE_TICKS: u32 = 12;
/// Launch angle (radians) for a dodge toward the right, pointing down-right.
pub const AIR_DODGE_RIGHT_ANGLE: f64 = 5.5;
/// Launch angle (radians) for a dodge toward the left, pointing down-left.
pub const AIR_DODGE_LEFT_ANGLE: f64 = 3.9;
/// Share of landing speed converted into horizontal speed by a wavedash.
pub const WAVEDASH_FACTOR: f64 = 0.9;
/// Default jump launch speed.
pub const JUMP_SPEED: f64 = 11.0;
/// Side length of the square player hitbox.
pub const PLAYER_LENGTH: i32 = 20;
/// Fixed tick period in milliseconds.
pub const TICK_MS: u32 = 16;

/// Tunable physics parameters, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub move_jerk: f64,
    pub speed_cap: f64,
    pub friction_quadratic: f64,
    pub friction_constant: f64,
    pub air_dodge_speed: f64,
    pub air_dodge_ticks: u32,
    pub air_dodge_right_angle: f64,
    pub air_dodge_left_angle: f64,
    pub wavedash_factor: f64,
    pub jump_speed: f64,
    pub player_length: i32,
    pub tick_ms: u32,
    /// End an air dodge as soon as it touches down instead of waiting out the
    /// full duration. Gravity comes back but the wavedash speed is kept.
    pub cancel_dodge_on_land: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_jerk: MOVE_JERK,
            speed_cap: SPEED_CAP,
            friction_quadratic: FRICTION_QUADRATIC,
            friction_constant: FRICTION_CONSTANT,
            air_dodge_speed: AIR_DODGE_SPEED,
            air_dodge_ticks: AIR_DODGE_TICKS,
            air_dodge_right_angle: AIR_DODGE_RIGHT_ANGLE,
            air_dodge_left_angle: AIR_DODGE_LEFT_ANGLE,
            wavedash_factor: WAVEDASH_FACTOR,
            jump_speed: JUMP_SPEED,
            player_length: PLAYER_LENGTH,
            tick_ms: TICK_MS,
            cancel_dodge_on_land: false,
        }
    }
}

impl PhysicsConfig {
    /// Load config from `WAVEDASH_PHYSICS_CONFIG` or `config/physics.toml`,
    /// falling back to defaults if neither is present or parseable.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("WAVEDASH_PHYSICS_CONFIG")
            && let Some(config) = Self::read(&path)
        {
            return config;
        }
        Self::read("config/physics.toml").unwrap_or_default()
    }

    fn read(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<Self>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                None
            },
        }
    }

    /// Tick period in seconds.
    pub fn dt_secs(&self) -> f64 {
        f64::from(self.tick_ms) / 1000.0
    }
}
