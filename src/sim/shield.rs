//! Shield definitions and their world-space collision geometry

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Segment, rotate_segment};
use crate::consts::SHIELD_ROTATION_OFFSET;

/// A shield type: a texture plus collision segments in local space.
///
/// Local space has its origin at the shield pivot (the player's center) and is
/// measured in scale units, with +x pointing along the aim before rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub name: String,
    /// Opaque texture key for the renderer
    pub texture: String,
    pub segments: Vec<Segment>,
}

impl Shield {
    pub fn new(name: &str, texture: &str, segments: Vec<Segment>) -> Self {
        Self {
            name: name.to_string(),
            texture: texture.to_string(),
            segments,
        }
    }

    /// Collision segments in world space for the given aim.
    ///
    /// Rotate by `aim + 270°`, scale, then translate to `center`. Recomputed
    /// every call since aim and scale change continuously.
    pub fn world_segments(
        &self,
        aim: f32,
        scale: f32,
        center: Vec2,
    ) -> impl Iterator<Item = Segment> + '_ {
        let angle = aim + SHIELD_ROTATION_OFFSET;
        self.segments
            .iter()
            .map(move |seg| rotate_segment(*seg, angle).map(|p| p * scale + center))
    }
}

/// Aim angle (radians) for a pointer position.
///
/// Pointing right of center gives π/2, straight down gives π.
pub fn aim_from_pointer(pointer: Vec2, center: Vec2) -> f32 {
    let d = pointer - center;
    std::f32::consts::PI - d.x.atan2(d.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn basic() -> Shield {
        Shield::new(
            "Basic",
            "basic.png",
            vec![Segment::new(Vec2::new(2.2, -1.8), Vec2::new(2.2, 1.8))],
        )
    }

    #[test]
    fn test_aim_from_pointer() {
        let c = Vec2::new(100.0, 100.0);
        assert!((aim_from_pointer(Vec2::new(200.0, 100.0), c) - FRAC_PI_2).abs() < 1e-5);
        assert!((aim_from_pointer(Vec2::new(100.0, 200.0), c) - PI).abs() < 1e-5);
        assert!(aim_from_pointer(Vec2::new(100.0, 0.0), c).abs() < 1e-5);
    }

    #[test]
    fn test_shield_faces_pointer() {
        let center = Vec2::new(400.0, 250.0);
        let scale = 10.0;
        let shield = basic();

        // Aim right: the segment sits 2.2 scale units right of center
        let aim = aim_from_pointer(center + Vec2::new(50.0, 0.0), center);
        let seg = shield.world_segments(aim, scale, center).next().unwrap();
        let mid = (seg.a + seg.b) / 2.0;
        assert!((mid - (center + Vec2::new(22.0, 0.0))).length() < 1e-3);

        // Aim down: the segment sits below center
        let aim = aim_from_pointer(center + Vec2::new(0.0, 50.0), center);
        let seg = shield.world_segments(aim, scale, center).next().unwrap();
        let mid = (seg.a + seg.b) / 2.0;
        assert!((mid - (center + Vec2::new(0.0, 22.0))).length() < 1e-3);
        assert!((seg.length() - 36.0).abs() < 1e-3);
    }
}
