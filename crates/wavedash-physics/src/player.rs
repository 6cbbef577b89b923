use serde::{Deserialize, Serialize};

use wavedash_core::color::Color;

use crate::config::PhysicsConfig;

/// Which direction keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    Idle,
    Right,
    Left,
    /// Both keys held. Their jerk cancels out.
    Both,
}

impl Movement {
    pub fn press_right(self) -> Self {
        match self {
            Movement::Idle => Movement::Right,
            Movement::Left => Movement::Both,
            held => held,
        }
    }

    pub fn release_right(self) -> Self {
        match self {
            Movement::Right => Movement::Idle,
            Movement::Both => Movement::Left,
            other => other,
        }
    }

    pub fn press_left(self) -> Self {
        match self {
            Movement::Idle => Movement::Left,
            Movement::Right => Movement::Both,
            held => held,
        }
    }

    pub fn release_left(self) -> Self {
        match self {
            Movement::Left => Movement::Idle,
            Movement::Both => Movement::Right,
            other => other,
        }
    }

    pub fn holds_right(self) -> bool {
        matches!(self, Movement::Right | Movement::Both)
    }

    pub fn holds_left(self) -> bool {
        matches!(self, Movement::Left | Movement::Both)
    }

    /// True when exactly one direction is held.
    pub fn is_accelerating(self) -> bool {
        matches!(self, Movement::Right | Movement::Left)
    }

    /// Net horizontal jerk for this input state.
    pub fn jerk(self, per_key: f64) -> f64 {
        match self {
            Movement::Right => per_key,
            Movement::Left => -per_key,
            Movement::Idle | Movement::Both => 0.0,
        }
    }
}

/// An air dodge in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirDodge {
    pub elapsed_ticks: u32,
}

/// Rounded hitbox edges, snapshotted at tick start for penetration tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

/// What the shell needs to draw the player: a filled, outlined square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRect {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub fill: Color,
    pub outline: Color,
}

/// Round a continuous coordinate to the pixel grid used by collision tests.
/// Truncates toward zero after adding one half.
pub(crate) fn to_pixel(v: f64) -> i32 {
    (v + 0.5) as i32
}

/// Kinematic state of the single player entity. Position is the top-left of
/// a square hitbox; y grows downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub length: i32,
    pub fill_color: Color,
    pub outline_color: Color,
    pub x_spd: f64,
    pub y_spd: f64,
    pub x_acc: f64,
    pub y_acc: f64,
    pub movement: Movement,
    pub air_dodge: Option<AirDodge>,
    /// Derived fresh every tick by collision resolution.
    pub grounded: bool,
}

impl Player {
    /// White player with a black outline at `(x, y)`, resting under gravity.
    pub fn new(x: f64, y: f64, config: &PhysicsConfig) -> Self {
        Self {
            x,
            y,
            length: config.player_length,
            fill_color: Color::WHITE,
            outline_color: Color::BLACK,
            x_spd: 0.0,
            y_spd: 0.0,
            x_acc: 0.0,
            y_acc: config.gravity,
            movement: Movement::Idle,
            air_dodge: None,
            grounded: false,
        }
    }

    pub fn set_location(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn left_x(&self) -> i32 {
        to_pixel(self.x)
    }

    pub fn right_x(&self) -> i32 {
        to_pixel(self.x + f64::from(self.length))
    }

    pub fn top_y(&self) -> i32 {
        to_pixel(self.y)
    }

    pub fn bottom_y(&self) -> i32 {
        to_pixel(self.y + f64::from(self.length))
    }

    pub fn center_x(&self) -> f64 {
        self.x + f64::from(self.length) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + f64::from(self.length) / 2.0
    }

    pub fn edges(&self) -> Edges {
        Edges {
            left: self.left_x(),
            right: self.right_x(),
            top: self.top_y(),
            bottom: self.bottom_y(),
        }
    }

    pub fn is_air_dodging(&self) -> bool {
        self.air_dodge.is_some()
    }

    pub fn x_jrk(&self, config: &PhysicsConfig) -> f64 {
        self.movement.jerk(config.move_jerk)
    }

    pub fn render_rect(&self) -> RenderRect {
        RenderRect {
            x: self.left_x(),
            y: self.top_y(),
            size: self.length,
            fill: self.fill_color,
            outline: self.outline_color,
        }
    }

    pub fn move_right(&mut self) {
        self.movement = self.movement.press_right();
    }

    pub fn move_left(&mut self) {
        self.movement = self.movement.press_left();
    }

    /// Releasing a key that isn't held leaves the input state untouched.
    pub fn stop_moving_right(&mut self) {
        self.movement = self.movement.release_right();
    }

    pub fn stop_moving_left(&mut self) {
        self.movement = self.movement.release_left();
    }

    /// Launch upward. Only works from the ground and outside an air dodge.
    pub fn jump(&mut self, speed: f64) -> bool {
        if self.is_air_dodging() || !self.grounded {
            return false;
        }
        self.y_spd = -speed;
        self.x_acc = 0.0;
        true
    }

    /// Start an air dodge, launching down-right unless only left is held.
    /// Gravity is suspended until the dodge ends. Re-dodging mid-dodge
    /// relaunches without resetting the dodge timer.
    pub fn air_dodge(&mut self, config: &PhysicsConfig) -> bool {
        if self.grounded {
            return false;
        }
        let direction = if self.movement.holds_right() || !self.movement.holds_left() {
            config.air_dodge_right_angle
        } else {
            config.air_dodge_left_angle
        };
        self.x_acc = 0.0;
        self.y_acc = 0.0;
        self.x_spd = config.air_dodge_speed * direction.cos();
        self.y_spd = -config.air_dodge_speed * direction.sin();
        self.air_dodge = Some(self.air_dodge.unwrap_or_default());
        true
    }

    /// Stop dead, restore gravity and leave the dodge.
    pub fn end_air_dodge(&mut self, config: &PhysicsConfig) {
        self.y_acc = config.gravity;
        self.x_spd = 0.0;
        self.y_spd = 0.0;
        self.air_dodge = None;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(0.0, 0.0, &PhysicsConfig::default())
    }
}
