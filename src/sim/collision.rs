//! Collision detection between shield segments and enemy boxes
//!
//! Shield/enemy contact is a boundary test: a shield segment only hits an
//! enemy when it crosses or touches one of the enemy box edges. A segment
//! lying entirely inside a box does not count.

use glam::Vec2;

use super::geometry::{Rect, Segment};

/// Signed area of the triangle (a, b, c); positive when counter-clockwise
#[inline]
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// `p` is collinear with `seg` - is it within the segment's extent?
#[inline]
fn within_extent(seg: &Segment, p: Vec2) -> bool {
    p.x >= seg.a.x.min(seg.b.x)
        && p.x <= seg.a.x.max(seg.b.x)
        && p.y >= seg.a.y.min(seg.b.y)
        && p.y <= seg.a.y.max(seg.b.y)
}

/// Check if two segments intersect (crossing, touching or collinear overlap)
pub fn segments_intersect(s: &Segment, t: &Segment) -> bool {
    let d1 = orientation(t.a, t.b, s.a);
    let d2 = orientation(t.a, t.b, s.b);
    let d3 = orientation(s.a, s.b, t.a);
    let d4 = orientation(s.a, s.b, t.b);

    // Proper crossing: each segment straddles the other's line
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    // Touching / collinear cases
    (d1 == 0.0 && within_extent(t, s.a))
        || (d2 == 0.0 && within_extent(t, s.b))
        || (d3 == 0.0 && within_extent(s, t.a))
        || (d4 == 0.0 && within_extent(s, t.b))
}

/// Check if a segment crosses any edge of a rectangle
pub fn segment_intersects_rect(seg: &Segment, rect: &Rect) -> bool {
    rect.edges().iter().any(|edge| segments_intersect(edge, seg))
}
