//! Color sample type and the scalar helpers shared by every stage.
//!
//! HSV here is the branch-free formulation used by fragment shaders: hue in
//! turns `[0, 1)`, saturation and value unbounded for HDR input. The small
//! epsilon in the denominators keeps gray and black pixels finite.

use glam::Vec3;

/// An RGB triple. Nominally `[0, 1]` per channel, but intermediate stages
/// may push channels above 1.
pub type ColorSample = Vec3;

/// Rec. 601 luma weights used by saturation, vibrancy, and split toning.
pub const LUMA_REC601: Vec3 = Vec3::new(0.299, 0.587, 0.114);

const HSV_EPSILON: f32 = 1e-10;

/// Weighted luminance of `rgb`.
#[inline]
pub fn luminance(rgb: ColorSample) -> f32 {
    rgb.dot(LUMA_REC601)
}

/// Hermite smoothstep between `edge0` and `edge1`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn saturate(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Per-channel [`saturate`].
#[inline]
pub fn saturate3(rgb: ColorSample) -> ColorSample {
    Vec3::new(saturate(rgb.x), saturate(rgb.y), saturate(rgb.z))
}

/// Replace non-finite channels with 0 so a malformed source pixel grades as black.
#[inline]
pub fn sanitize(rgb: ColorSample) -> ColorSample {
    let fix = |c: f32| if c.is_finite() { c } else { 0.0 };
    Vec3::new(fix(rgb.x), fix(rgb.y), fix(rgb.z))
}

/// Wrap a hue into `[0, 1)`.
#[inline]
pub fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Convert RGB to HSV `(hue, saturation, value)`.
pub fn rgb_to_hsv(c: ColorSample) -> Vec3 {
    // p = (max(g,b), min(g,b), hue offset, hue offset when r is max)
    let p = if c.y >= c.z {
        [c.y, c.z, 0.0, -1.0 / 3.0]
    } else {
        [c.z, c.y, -1.0, 2.0 / 3.0]
    };
    let q = if c.x >= p[0] {
        [c.x, p[1], p[2], p[0]]
    } else {
        [p[0], p[1], p[3], c.x]
    };

    let d = q[0] - q[3].min(q[1]);
    Vec3::new(
        (q[2] + (q[3] - q[1]) / (6.0 * d + HSV_EPSILON)).abs(),
        d / (q[0] + HSV_EPSILON),
        q[0],
    )
}

/// Convert HSV `(hue, saturation, value)` back to RGB.
pub fn hsv_to_rgb(hsv: Vec3) -> ColorSample {
    let channel = |offset: f32| {
        let k = (hsv.x * 6.0 + offset).rem_euclid(6.0);
        ((k - 3.0).abs() - 1.0).clamp(0.0, 1.0)
    };
    let rgb = Vec3::new(channel(0.0), channel(4.0), channel(2.0));
    hsv.z * Vec3::ONE.lerp(rgb, hsv.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(
            (a - b).abs().max_element() < EPSILON,
            "{a:?} vs {b:?}"
        );
    }

    #[test]
    fn test_primaries_hue() {
        assert!(rgb_to_hsv(Vec3::new(1.0, 0.0, 0.0)).x.abs() < EPSILON);
        assert!((rgb_to_hsv(Vec3::new(0.0, 1.0, 0.0)).x - 1.0 / 3.0).abs() < EPSILON);
        assert!((rgb_to_hsv(Vec3::new(0.0, 0.0, 1.0)).x - 2.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_gray_has_zero_saturation() {
        let hsv = rgb_to_hsv(Vec3::splat(0.4));
        assert!(hsv.y.abs() < EPSILON);
        assert!((hsv.z - 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_black_is_finite() {
        let hsv = rgb_to_hsv(Vec3::ZERO);
        assert!(hsv.is_finite());
        assert_close(hsv_to_rgb(hsv), Vec3::ZERO);
    }

    #[test]
    fn test_hsv_round_trip() {
        for rgb in [
            Vec3::new(0.8, 0.4, 0.2),
            Vec3::new(0.1, 0.9, 0.5),
            Vec3::new(0.3, 0.2, 0.7),
            Vec3::new(0.6, 0.6, 0.1),
        ] {
            assert_close(hsv_to_rgb(rgb_to_hsv(rgb)), rgb);
        }
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 0.5, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 0.5, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_saturate_maps_nan_to_zero() {
        assert_eq!(saturate(f32::NAN), 0.0);
        assert_eq!(saturate(2.0), 1.0);
        assert_eq!(saturate(-0.5), 0.0);
    }

    #[test]
    fn test_sanitize_replaces_non_finite() {
        let rgb = sanitize(Vec3::new(f32::NAN, f32::INFINITY, 0.25));
        assert_eq!(rgb, Vec3::new(0.0, 0.0, 0.25));
    }

    #[test]
    fn test_wrap_hue() {
        assert!((wrap_hue(1.25) - 0.25).abs() < EPSILON);
        assert!((wrap_hue(-0.25) - 0.75).abs() < EPSILON);
        assert!(wrap_hue(-1e-9) < 1.0);
    }
}
