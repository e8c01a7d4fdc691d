//! Segment and rectangle primitives plus rotation helpers
//!
//! Shields are made of line segments in local space that get rotated about the
//! origin each tick; enemies are axis-aligned boxes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Apply `f` to both endpoints
    #[inline]
    pub fn map(self, f: impl Fn(Vec2) -> Vec2) -> Self {
        Self {
            a: f(self.a),
            b: f(self.b),
        }
    }

    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }
}

/// Axis-aligned rectangle, origin at the top-left corner (screen space)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of the given half-extent centered on `center`
    pub fn centered(center: Vec2, half: f32) -> Self {
        Self::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
    }

    /// Overlap test; touching edges count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }

    /// Boundary edges in fixed winding order:
    /// left (top→bottom), bottom (left→right), right (bottom→top), top (right→left)
    pub fn edges(&self) -> [Segment; 4] {
        let tl = Vec2::new(self.x, self.y);
        let bl = Vec2::new(self.x, self.y + self.height);
        let br = Vec2::new(self.x + self.width, self.y + self.height);
        let tr = Vec2::new(self.x + self.width, self.y);
        [
            Segment::new(tl, bl),
            Segment::new(bl, br),
            Segment::new(br, tr),
            Segment::new(tr, tl),
        ]
    }
}

/// Rotate a point around the origin
#[inline]
pub fn rotate_point(p: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y)
}

/// Rotate both endpoints of a segment around the origin
#[inline]
pub fn rotate_segment(seg: Segment, angle: f32) -> Segment {
    seg.map(|p| rotate_point(p, angle))
}
