pub mod color;
pub mod error;
pub mod geometry;
pub mod input;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::geometry::{Level, LightFloor, Rect};

    /// Ground slab used by the demo arena.
    pub const GROUND: Rect = Rect::new(0, 650, 1300, 50);

    /// Build a level from the given colliders, panicking on invalid geometry.
    pub fn make_level(rects: Vec<Rect>, light_floors: Vec<LightFloor>) -> Level {
        Level::new(1300, 700, rects, light_floors).expect("test geometry must be valid")
    }

    /// A level holding only the ground slab.
    pub fn ground_level() -> Level {
        make_level(vec![GROUND], vec![])
    }

    /// A level with no colliders at all.
    pub fn empty_level() -> Level {
        make_level(vec![], vec![])
    }

    /// Assert two floats agree within `tol`.
    pub fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual} (tolerance {tol})"
        );
    }
}
