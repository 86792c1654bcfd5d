//! Spatial primitives shared by every entity category
//!
//! Every entity is an axis-aligned box: a centre plus half-extents.
//! Positions use a y-up coordinate system (UP is +y).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as centre + half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub half: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, half: Vec2) -> Self {
        Self { pos, half }
    }

    /// Square body with equal half-extents
    pub fn square(pos: Vec2, half: f32) -> Self {
        Self::new(pos, Vec2::splat(half))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.half
    }

    /// Strict AABB intersection. Boxes that only share an edge do not overlap,
    /// so a tank can rest flush against a wall.
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Copy of this body moved by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Body {
        Body::new(self.pos + delta, self.half)
    }
}

/// One of the four orthogonal headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Unit vector for this heading
    pub fn dir(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::Y,
            Facing::Down => Vec2::NEG_Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }

    pub fn opposite(self) -> Facing {
        match self {
            Facing::Up => Facing::Down,
            Facing::Down => Facing::Up,
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Heading along the dominant axis of `delta`. Ties go horizontal.
    pub fn toward(delta: Vec2) -> Facing {
        if delta.x.abs() >= delta.y.abs() {
            if delta.x >= 0.0 { Facing::Right } else { Facing::Left }
        } else if delta.y > 0.0 {
            Facing::Up
        } else {
            Facing::Down
        }
    }

    /// Quadrant of the pointer angle: four 90° sectors centred on
    /// right (0°), up (90°), left (180°) and down (270°).
    pub fn from_angle(angle: f32) -> Facing {
        use std::f32::consts::FRAC_PI_4;
        let a = crate::normalize_angle(angle);
        if (-FRAC_PI_4..FRAC_PI_4).contains(&a) {
            Facing::Right
        } else if (FRAC_PI_4..3.0 * FRAC_PI_4).contains(&a) {
            Facing::Up
        } else if (-3.0 * FRAC_PI_4..-FRAC_PI_4).contains(&a) {
            Facing::Down
        } else {
            Facing::Left
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Body::square(Vec2::new(0.0, 0.0), 10.0);
        let touching = Body::square(Vec2::new(20.0, 0.0), 10.0);
        let inside = Body::square(Vec2::new(19.0, 5.0), 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_toward_prefers_horizontal_on_tie() {
        assert_eq!(Facing::toward(Vec2::new(5.0, 5.0)), Facing::Right);
        assert_eq!(Facing::toward(Vec2::new(-5.0, 5.0)), Facing::Left);
        assert_eq!(Facing::toward(Vec2::new(1.0, -9.0)), Facing::Down);
        assert_eq!(Facing::toward(Vec2::new(0.0, 3.0)), Facing::Up);
    }

    #[test]
    fn test_pointer_quadrants() {
        use std::f32::consts::PI;
        assert_eq!(Facing::from_angle(0.0), Facing::Right);
        assert_eq!(Facing::from_angle(PI / 2.0), Facing::Up);
        assert_eq!(Facing::from_angle(PI), Facing::Left);
        assert_eq!(Facing::from_angle(-PI / 2.0), Facing::Down);
        assert_eq!(Facing::from_angle(0.7), Facing::Right);
        assert_eq!(Facing::from_angle(0.9), Facing::Up);
        assert_eq!(Facing::from_angle(-2.0), Facing::Down);
        assert_eq!(Facing::from_angle(2.0), Facing::Up);
        assert_eq!(Facing::from_angle(2.5), Facing::Left);
        assert_eq!(Facing::from_angle(-2.5), Facing::Left);
        // Wraps past PI
        assert_eq!(Facing::from_angle(2.0 * PI + 0.1), Facing::Right);
    }
}
