//! Filmic tone curve (Narkowicz ACES fit).
//!
//! ```text
//! out = x(2.51x + 0.03) / (x(2.43x + 0.59) + 0.14)
//! ```
//!
//! The denominator has no real roots, so the curve is defined for every
//! finite input. The result is not clamped.

use glam::Vec3;

use crate::color::ColorSample;

const A: f32 = 2.51;
const B: f32 = 0.03;
const C: f32 = 2.43;
const D: f32 = 0.59;
const E: f32 = 0.14;

#[inline]
pub fn filmic(x: f32) -> f32 {
    (x * (A * x + B)) / (x * (C * x + D) + E)
}

/// Componentwise [`filmic`].
pub fn apply_tone_map(rgb: ColorSample) -> ColorSample {
    Vec3::new(filmic(rgb.x), filmic(rgb.y), filmic(rgb.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_black_maps_to_black() {
        assert_eq!(filmic(0.0), 0.0);
    }

    #[test]
    fn test_known_points() {
        assert!((filmic(0.5) - 0.616_307).abs() < EPSILON);
        assert!((filmic(1.0) - 0.803_797_5).abs() < EPSILON);
    }

    #[test]
    fn test_monotonic_on_unit_range() {
        let mut prev = filmic(0.0);
        for i in 1..=100 {
            let y = filmic(i as f32 / 100.0);
            assert!(y > prev);
            prev = y;
        }
    }

    #[test]
    fn test_hdr_input_compresses_toward_limit() {
        // Asymptote is A / C ≈ 1.033; not clamped to 1.
        let y = filmic(100.0);
        assert!(y > 1.0 && y < A / C);
    }

    #[test]
    fn test_negative_input_is_finite() {
        for x in [-0.1, -1.0, -10.0] {
            assert!(filmic(x).is_finite());
        }
    }
}
