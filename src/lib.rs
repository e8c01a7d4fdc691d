//! Block-Cycle - rotating-shield arcade survival core
//!
//! Core modules:
//! - `sim`: Simulation (enemies, collisions, scoring, shop, tick driver)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Enemy slot table capacity
    pub const MAX_ENEMIES: usize = 255;
    /// Maximum collision segments a shield may carry
    pub const MAX_SHIELD_SEGMENTS: usize = 4;

    /// Viewport diagonal is divided by this to get `scale`
    pub const SCALE_DIVISOR: f32 = 50.0;
    /// Window size before the presentation layer reports one
    pub const DEFAULT_WINDOW: (f32, f32) = (800.0, 500.0);

    /// Extra shield rotation on top of the player's aim (270 degrees)
    pub const SHIELD_ROTATION_OFFSET: f32 = 3.0 * std::f32::consts::FRAC_PI_2;

    /// Shop slide-in/out animation length (seconds)
    pub const SHOP_SLIDE_TIME: f32 = 0.2;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Heading (radians) that points from `from` to `to`.
///
/// Headings use the game's convention where travel is `(sin h, cos h)`,
/// so `0` points down the screen (+y) and `π/2` points right (+x).
#[inline]
pub fn heading_towards(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.x.atan2(d.y)
}

/// Unit travel vector for a heading
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), heading.cos())
}

/// Viewport scale factor: diagonal / 50
#[inline]
pub fn scale_for_window(size: Vec2) -> f32 {
    size.length() / consts::SCALE_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_convention() {
        let h = heading_towards(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((h - FRAC_PI_2).abs() < 1e-6);
        let v = heading_vector(h);
        assert!((v - Vec2::X).length() < 1e-6);

        let down = heading_towards(Vec2::ZERO, Vec2::new(0.0, 5.0));
        assert!(down.abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(2.5 * PI) - FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) + FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle_range() {
        let mut angle = -20.0f32;
        while angle < 20.0 {
            let n = normalize_angle(angle);
            assert!((-PI..PI).contains(&n), "{angle} -> {n}");
            angle += 0.37;
        }
    }

    #[test]
    fn test_scale_for_window() {
        let s = scale_for_window(Vec2::new(300.0, 400.0));
        assert!((s - 10.0).abs() < 1e-6);
    }
}
