//! Circle colliders and intersection tests
//!
//! All collision in the game reduces to circle-vs-circle checks in
//! normalized board space. Colliders store a local offset from their
//! owner's position so a shape can sit off-center (an explosion blast
//! ring, for example).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circular collision shape attached to a game object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    /// Offset from the owner's position (board units)
    pub offset: Vec2,
    /// Radius (board units)
    pub radius: f32,
}

impl CircleCollider {
    /// Collider centered on its owner
    pub fn centered(radius: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            radius,
        }
    }

    /// Absolute center given the owner's position
    #[inline]
    pub fn center(&self, owner_pos: Vec2) -> Vec2 {
        owner_pos + self.offset
    }
}

/// Closed intersection test: exactly-touching circles count as colliding.
///
/// Symmetric and side-effect free. Compares squared distances to avoid
/// the square root.
#[inline]
pub fn circles_intersect(a_pos: Vec2, a: &CircleCollider, b_pos: Vec2, b: &CircleCollider) -> bool {
    let reach = a.radius + b.radius;
    a.center(a_pos).distance_squared(b.center(b_pos)) <= reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_circles_intersect() {
        let a = CircleCollider::centered(0.05);
        let b = CircleCollider::centered(0.05);
        assert!(circles_intersect(
            Vec2::new(0.5, 0.5),
            &a,
            Vec2::new(0.55, 0.5),
            &b
        ));
    }

    #[test]
    fn test_exactly_touching_counts_as_hit() {
        let a = CircleCollider::centered(0.05);
        let b = CircleCollider::centered(0.05);
        // Centers exactly 0.1 apart, sum of radii exactly 0.1
        assert!(circles_intersect(
            Vec2::new(0.4, 0.5),
            &a,
            Vec2::new(0.5, 0.5),
            &b
        ));
    }

    #[test]
    fn test_separated_circles_miss() {
        let a = CircleCollider::centered(0.02);
        let b = CircleCollider::centered(0.02);
        assert!(!circles_intersect(
            Vec2::new(0.1, 0.1),
            &a,
            Vec2::new(0.9, 0.9),
            &b
        ));
    }

    #[test]
    fn test_symmetry() {
        let a = CircleCollider::centered(0.03);
        let b = CircleCollider::centered(0.07);
        let pa = Vec2::new(0.45, 0.5);
        let pb = Vec2::new(0.52, 0.5);
        assert_eq!(
            circles_intersect(pa, &a, pb, &b),
            circles_intersect(pb, &b, pa, &a)
        );
    }

    #[test]
    fn test_offset_shifts_center() {
        let a = CircleCollider {
            offset: Vec2::new(0.2, 0.0),
            radius: 0.05,
        };
        let b = CircleCollider::centered(0.05);
        // Owners far apart, but a's offset brings the shapes together
        assert!(circles_intersect(
            Vec2::new(0.3, 0.5),
            &a,
            Vec2::new(0.55, 0.5),
            &b
        ));
        assert!(!circles_intersect(
            Vec2::new(0.3, 0.5),
            &CircleCollider::centered(0.05),
            Vec2::new(0.55, 0.5),
            &b
        ));
    }
}
