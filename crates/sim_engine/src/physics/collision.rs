//! Circle overlap tests for the broad phase

use crate::foundation::math::Vec2;

/// A bounding circle for collision detection
#[derive(Debug, Clone, Copy)]
pub struct BoundingCircle {
    /// The center position of the circle in domain space
    pub center: Vec2,
    /// The radius of the circle
    pub radius: f64,
}

impl BoundingCircle {
    /// Creates a new bounding circle with the given center and radius
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Distance between this circle's center and another's
    pub fn center_distance(&self, other: &Self) -> f64 {
        (self.center - other.center).magnitude()
    }

    /// Check if this circle overlaps another
    ///
    /// The test is strict: circles whose boundaries exactly touch do not
    /// count as overlapping.
    pub fn intersects(&self, other: &Self) -> bool {
        self.center_distance(other) < self.radius + other.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_overlapping_circles_intersect() {
        let a = BoundingCircle::new(Vec2::new(0.0, 0.0), 0.1);
        let b = BoundingCircle::new(Vec2::new(0.15, 0.0), 0.1);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_distant_circles_do_not_intersect() {
        let a = BoundingCircle::new(Vec2::new(-0.5, 0.0), 0.1);
        let b = BoundingCircle::new(Vec2::new(0.5, 0.0), 0.1);

        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_touching_circles_do_not_intersect() {
        // Strict inequality: center distance equal to the radius sum misses
        let a = BoundingCircle::new(Vec2::new(0.0, 0.0), 0.1);
        let b = BoundingCircle::new(Vec2::new(0.2, 0.0), 0.1);

        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_center_distance() {
        let a = BoundingCircle::new(Vec2::new(0.0, 3.0), 0.1);
        let b = BoundingCircle::new(Vec2::new(4.0, 0.0), 0.1);

        assert_relative_eq!(a.center_distance(&b), 5.0);
    }
}
