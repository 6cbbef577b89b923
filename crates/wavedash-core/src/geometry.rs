use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A solid, axis-aligned collider. `(x, y)` is the top-left corner and y grows
/// downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        f64::from(self.x) + f64::from(self.width) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        f64::from(self.y) + f64::from(self.height) / 2.0
    }
}

/// A one-way platform segment spanning `[left, right]` at height `top`.
/// Only blocks bodies arriving from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightFloor {
    pub left: i32,
    pub top: i32,
    pub right: i32,
}

impl LightFloor {
    pub const fn new(left: i32, top: i32, right: i32) -> Self {
        Self { left, top, right }
    }
}

/// Read-only source of static level geometry, queried once per tick.
pub trait GeometryProvider {
    fn solid_rects(&self) -> &[Rect];
    fn light_floors(&self) -> &[LightFloor];
}

/// Validated static level: arena size plus its colliders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub width: u32,
    pub height: u32,
    rects: Vec<Rect>,
    light_floors: Vec<LightFloor>,
}

/// On-disk layout of a level file, validated into a [`Level`].
#[derive(Debug, Deserialize)]
struct LevelFile {
    width: u32,
    height: u32,
    #[serde(default)]
    rects: Vec<Rect>,
    #[serde(default)]
    light_floors: Vec<LightFloor>,
}

impl Level {
    /// Build a level, rejecting negative rect sizes and inverted light floors.
    /// Empty collider lists are allowed.
    pub fn new(
        width: u32,
        height: u32,
        rects: Vec<Rect>,
        light_floors: Vec<LightFloor>,
    ) -> Result<Self, GeometryError> {
        for (index, rect) in rects.iter().enumerate() {
            if rect.width < 0 || rect.height < 0 {
                return Err(GeometryError::NegativeSize { index, rect: *rect });
            }
        }
        for (index, floor) in light_floors.iter().enumerate() {
            if floor.right < floor.left {
                return Err(GeometryError::InvertedLightFloor {
                    index,
                    floor: *floor,
                });
            }
        }
        tracing::debug!(
            rects = rects.len(),
            light_floors = light_floors.len(),
            "level geometry validated"
        );
        Ok(Self {
            width,
            height,
            rects,
            light_floors,
        })
    }

    /// Parse a level from TOML text.
    ///
    /// ```toml
    /// width = 1300
    /// height = 700
    /// rects = [{ x = 0, y = 650, width = 1300, height = 50 }]
    /// light_floors = [{ left = 150, top = 520, right = 400 }]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, GeometryError> {
        let file: LevelFile = toml::from_str(content)?;
        Self::new(file.width, file.height, file.rects, file.light_floors)
    }

    /// Read and validate a level file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GeometryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

impl GeometryProvider for Level {
    fn solid_rects(&self) -> &[Rect] {
        &self.rects
    }

    fn light_floors(&self) -> &[LightFloor] {
        &self.light_floors
    }
}
