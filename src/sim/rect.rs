//! Axis-aligned rectangle geometry for sprites, hitboxes and the playfield
//!
//! Rectangles are stored as center + size so that hitboxes follow their
//! owner's position without recomputing corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Center point (screen space)
    pub center: Vec2,
    /// Full width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, Vec2::splat(side))
    }

    /// The whole playfield, top-left at the origin
    pub fn playfield() -> Self {
        Self::new(
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        )
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half()
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Point strictly inside (points on the border are outside)
    pub fn contains_point_strict(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
    }

    /// Grow (or shrink with negative values) by the given total amounts, keeping the center
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        Self::new(
            self.center,
            Vec2::new((self.size.x + dw).max(0.0), (self.size.y + dh).max(0.0)),
        )
    }

    /// Move this rectangle the minimum distance needed to lie inside `bounds`
    pub fn clamp_inside(&self, bounds: &Rect) -> Self {
        let half = self.half();
        let (b_min, b_max) = (bounds.min(), bounds.max());
        let clamp_axis = |c: f32, h: f32, lo: f32, hi: f32| {
            if hi - lo <= 2.0 * h {
                (lo + hi) / 2.0
            } else {
                c.clamp(lo + h, hi - h)
            }
        };
        Self::new(
            Vec2::new(
                clamp_axis(self.center.x, half.x, b_min.x, b_max.x),
                clamp_axis(self.center.y, half.y, b_min.y, b_max.y),
            ),
            self.size,
        )
    }

    /// Size of the axis-aligned bounds of a `length` x `width` box rotated by `degrees`
    pub fn rotated_extent(length: f32, width: f32, degrees: f32) -> Vec2 {
        let rad = degrees.to_radians();
        let (s, c) = (rad.sin().abs(), rad.cos().abs());
        Vec2::new(length * c + width * s, length * s + width * c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::square(Vec2::new(0.0, 0.0), 10.0);
        let touching = Rect::square(Vec2::new(10.0, 0.0), 10.0);
        let inside = Rect::square(Vec2::new(9.0, 9.0), 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let sprite = Rect::square(Vec2::new(320.0, 670.0), 50.0);
        let graze = sprite.inflate(-10.0, -10.0);
        assert_eq!(graze.center, sprite.center);
        assert_eq!(graze.size, Vec2::splat(40.0));
        // Shrinking never produces a negative size
        assert_eq!(sprite.inflate(-80.0, -80.0).size, Vec2::ZERO);
    }

    #[test]
    fn test_clamp_inside_playfield() {
        let field = Rect::playfield();
        let r = Rect::square(Vec2::new(-30.0, 800.0), 50.0).clamp_inside(&field);
        assert_eq!(r.center, Vec2::new(25.0, SCREEN_HEIGHT - 25.0));
    }

    #[test]
    fn test_rotated_extent() {
        let flat = Rect::rotated_extent(100.0, 5.0, 0.0);
        assert!((flat.x - 100.0).abs() < 1e-3 && (flat.y - 5.0).abs() < 1e-3);
        let upright = Rect::rotated_extent(100.0, 5.0, 90.0);
        assert!((upright.x - 5.0).abs() < 1e-3 && (upright.y - 100.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, aw in 1.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, bw in 1.0f32..50.0,
        ) {
            let a = Rect::square(Vec2::new(ax, ay), aw);
            let b = Rect::square(Vec2::new(bx, by), bw);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_clamp_inside_is_contained(x in -500.0f32..1500.0, y in -500.0f32..1500.0) {
            let field = Rect::playfield();
            let r = Rect::square(Vec2::new(x, y), 50.0).clamp_inside(&field);
            prop_assert!(r.min().x >= 0.0 && r.max().x <= SCREEN_WIDTH);
            prop_assert!(r.min().y >= 0.0 && r.max().y <= SCREEN_HEIGHT);
        }
    }
}
