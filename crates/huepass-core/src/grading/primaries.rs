//! Exposure, contrast, and gamma.

use glam::Vec3;

use crate::color::{ColorSample, saturate3};

/// Perceptual mid gray, `0.5^2.2`. Contrast pivots here rather than at 0.5.
pub const CONTRAST_MIDPOINT: f32 = 0.217_637_64;

/// Multiply by `2^exposure`.
pub fn apply_exposure(rgb: ColorSample, exposure: f32) -> ColorSample {
    rgb * exposure.exp2()
}

/// Linear contrast around [`CONTRAST_MIDPOINT`].
///
/// ```text
/// out = (in − mid) × contrast + mid
/// ```
pub fn apply_contrast(rgb: ColorSample, contrast: f32) -> ColorSample {
    let mid = Vec3::splat(CONTRAST_MIDPOINT);
    (rgb - mid) * contrast + mid
}

/// Clamp to `[0, 1]`, then raise to `1 / gamma`.
///
/// This is the first stage that bounds the signal; everything after it
/// starts from `[0, 1]`.
pub fn apply_gamma(rgb: ColorSample, gamma: f32) -> ColorSample {
    saturate3(rgb).powf(1.0 / gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_midpoint_constant() {
        assert!((CONTRAST_MIDPOINT - 0.5_f32.powf(2.2)).abs() < EPSILON);
    }

    #[test]
    fn test_exposure_one_stop_doubles() {
        let out = apply_exposure(Vec3::new(0.1, 0.2, 0.3), 1.0);
        assert!((out - Vec3::new(0.2, 0.4, 0.6)).abs().max_element() < EPSILON);
    }

    #[test]
    fn test_exposure_zero_is_identity() {
        let rgb = Vec3::new(0.1, 0.2, 0.3);
        assert_eq!(apply_exposure(rgb, 0.0), rgb);
    }

    #[test]
    fn test_contrast_at_midpoint_is_fixed() {
        let rgb = Vec3::splat(CONTRAST_MIDPOINT);
        let out = apply_contrast(rgb, 1.8);
        assert!((out - rgb).abs().max_element() < EPSILON);
    }

    #[test]
    fn test_contrast_zero_flattens_to_midpoint() {
        let out = apply_contrast(Vec3::new(0.0, 0.5, 1.0), 0.0);
        assert!((out - Vec3::splat(CONTRAST_MIDPOINT)).abs().max_element() < EPSILON);
    }

    #[test]
    fn test_contrast_spreads_values() {
        let out = apply_contrast(Vec3::splat(0.8), 1.5);
        assert!(out.x > 0.8);
        let out = apply_contrast(Vec3::splat(0.1), 1.5);
        assert!(out.x < 0.1);
    }

    #[test]
    fn test_gamma_clamps_before_power() {
        let out = apply_gamma(Vec3::new(-0.5, 2.0, 0.25), 2.0);
        assert_eq!(out.x, 0.0);
        assert_eq!(out.y, 1.0);
        assert!((out.z - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_gamma_maps_nan_to_black() {
        let out = apply_gamma(Vec3::new(f32::NAN, 0.5, 0.5), 1.1);
        assert_eq!(out.x, 0.0);
    }
}
