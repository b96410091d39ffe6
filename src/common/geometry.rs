//! Arena geometry.
//!
//! Positions are entity centres in arena space: origin top-left, `+y` down.

use bevy::prelude::*;

/// Centre position plus axis-aligned bounding box size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Body {
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn square(pos: Vec2, side: f32) -> Self {
        Self::new(pos, Vec2::splat(side))
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn distance(&self, other: &Body) -> f32 {
        self.pos.distance(other.pos)
    }

    /// Strict AABB overlap. Touching edges do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        let d = (self.pos - other.pos).abs();
        let reach = self.half_extents() + other.half_extents();
        d.x < reach.x && d.y < reach.y
    }

    /// Circle test on widths: centre distance below half the summed widths.
    #[inline]
    pub fn touches_radially(&self, other: &Body) -> bool {
        self.distance(other) < (self.size.x + other.size.x) * 0.5
    }
}

/// Clamp `pos` inside `[margin, extent - margin]` on both axes.
#[inline]
pub fn clamp_inside(pos: Vec2, extent: Vec2, margin: Vec2) -> Vec2 {
    pos.clamp(margin, (extent - margin).max(margin))
}

/// True when `pos` lies more than `margin` outside `[0, extent]`.
#[inline]
pub fn is_outside(pos: Vec2, extent: Vec2, margin: f32) -> bool {
    pos.x < -margin || pos.y < -margin || pos.x > extent.x + margin || pos.y > extent.y + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let a = Body::square(Vec2::ZERO, 10.0);
        assert!(a.overlaps(&Body::square(Vec2::new(9.9, 0.0), 10.0)));
        assert!(!a.overlaps(&Body::square(Vec2::new(10.0, 0.0), 10.0)));
        assert!(!a.overlaps(&Body::square(Vec2::new(0.0, 10.0), 10.0)));
    }

    #[test]
    fn radial_touch_uses_half_summed_widths() {
        let projectile = Body::square(Vec2::ZERO, 8.0);
        let zombie = Body::square(Vec2::new(15.9, 0.0), 24.0);
        assert!(projectile.touches_radially(&zombie));
        let far = Body::square(Vec2::new(16.0, 0.0), 24.0);
        assert!(!projectile.touches_radially(&far));
    }

    #[test]
    fn clamp_keeps_margin_from_walls() {
        let extent = Vec2::new(100.0, 50.0);
        let margin = Vec2::splat(10.0);
        assert_eq!(clamp_inside(Vec2::new(-5.0, 60.0), extent, margin), Vec2::new(10.0, 40.0));
    }

    #[test]
    fn outside_respects_margin() {
        let extent = Vec2::new(100.0, 100.0);
        assert!(!is_outside(Vec2::new(-49.0, 50.0), extent, 50.0));
        assert!(is_outside(Vec2::new(-51.0, 50.0), extent, 50.0));
        assert!(is_outside(Vec2::new(50.0, 151.0), extent, 50.0));
    }
}
