//! Axis-aligned rectangles and the overlap test shared by both games.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in play-field pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A square with its top-left corner at `(x, y)`.
    pub fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap on both axes. Rectangles that only share an edge do not
    /// collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// True if every edge lies inside `[0, width] x [0, height]`.
    pub fn within(&self, width: f64, height: f64) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

/// Free-function form of [`Rect::intersects`].
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Rect::square(0.0, 0.0, 10.0);
        let b = Rect::square(5.0, 5.0, 10.0);
        assert!(collides(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::square(0.0, 0.0, 10.0);
        let right = Rect::square(10.0, 0.0, 10.0);
        let below = Rect::square(0.0, 10.0, 10.0);
        assert!(!collides(&a, &right));
        assert!(!collides(&a, &below));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_contained_rect_collides() {
        let outer = Rect::square(0.0, 0.0, 100.0);
        let inner = Rect::square(40.0, 40.0, 5.0);
        assert!(collides(&outer, &inner));
    }

    #[test]
    fn test_collision_is_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let a = Rect::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(0.0..40.0),
                rng.gen_range(0.0..40.0),
            );
            let b = Rect::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(0.0..40.0),
                rng.gen_range(0.0..40.0),
            );
            assert_eq!(collides(&a, &b), collides(&b, &a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_within_bounds() {
        assert!(Rect::square(0.0, 0.0, 30.0).within(100.0, 100.0));
        assert!(Rect::square(70.0, 70.0, 30.0).within(100.0, 100.0));
        assert!(!Rect::square(71.0, 0.0, 30.0).within(100.0, 100.0));
        assert!(!Rect::square(-1.0, 0.0, 30.0).within(100.0, 100.0));
    }
}
