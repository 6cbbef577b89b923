use wavedash_core::error::GeometryError;
use wavedash_core::geometry::{Level, LightFloor, Rect};

/// Arena width in world units.
pub const ARENA_WIDTH: u32 = 1300;
/// Arena height in world units.
pub const ARENA_HEIGHT: u32 = 700;
/// Player spawn, just above the ground slab near the left wall.
pub const SPAWN_X: f64 = 50.0;
pub const SPAWN_Y: f64 = ARENA_HEIGHT as f64 - 100.0;

/// The built-in demo arena: a ground slab, side walls, a block and a ledge to
/// bump into, and three light floors to wavedash across.
pub fn premade_map() -> Result<Level, GeometryError> {
    let rects = vec![
        // Ground
        Rect::new(0, 650, 1300, 50),
        // Side walls
        Rect::new(0, 0, 20, 650),
        Rect::new(1280, 0, 20, 650),
        // Block resting on the ground
        Rect::new(500, 560, 80, 90),
        // Floating ledge
        Rect::new(800, 420, 200, 30),
    ];
    let light_floors = vec![
        LightFloor::new(150, 520, 400),
        LightFloor::new(650, 450, 780),
        LightFloor::new(1000, 350, 1200),
    ];
    Level::new(ARENA_WIDTH, ARENA_HEIGHT, rects, light_floors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavedash_core::geometry::GeometryProvider;

    #[test]
    fn premade_map_is_valid() {
        let level = premade_map().unwrap();
        assert_eq!(level.width, ARENA_WIDTH);
        assert_eq!(level.height, ARENA_HEIGHT);
        assert_eq!(level.solid_rects()[0], Rect::new(0, 650, 1300, 50));
        assert_eq!(level.light_floors().len(), 3);
    }

    #[test]
    fn spawn_is_above_ground_and_clear_of_walls() {
        let level = premade_map().unwrap();
        let ground = level.solid_rects()[0];
        assert!(SPAWN_Y + 20.0 < f64::from(ground.y));
        let left_wall = level.solid_rects()[1];
        assert!(SPAWN_X > f64::from(left_wall.right()));
    }
}
