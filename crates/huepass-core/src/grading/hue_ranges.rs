//! Per-hue-range HSL adjustment.
//!
//! Eight buckets are centered at `i / 8` turns. A pixel's hue is weighted
//! against every center with a wrap-aware Gaussian,
//!
//! ```text
//! d_i = min(|h − c_i|, 1 − |h − c_i|)
//! w_i = exp(−d_i² / (2σ²))
//! shift = Σ w_i × adjust[i] / Σ w_i
//! ```
//!
//! and the normalized hue/saturation/value shifts are applied in HSV. Hue
//! wraps; saturation and value clamp to `[0, 1]`. When `Σ w_i` falls below
//! the configured floor (only reachable with a very small σ) the shift is
//! zero instead of a division by ~0.

use crate::color::{ColorSample, hsv_to_rgb, rgb_to_hsv, wrap_hue};
use crate::params::HUE_BUCKETS;

/// Gaussian falloff of the buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketWeighting {
    /// Bucket width in turns.
    pub sigma: f32,
    /// Total weight below which the shift falls back to zero.
    pub min_weight_sum: f32,
}

impl Default for BucketWeighting {
    fn default() -> Self {
        Self {
            sigma: 0.08,
            min_weight_sum: 1e-6,
        }
    }
}

/// Normalized shift for one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HslShift {
    pub hue: f32,
    pub sat: f32,
    pub lum: f32,
}

/// Per-bucket adjustment arrays, index = bucket.
#[derive(Debug, Clone, Copy)]
pub struct HueRangeAdjust<'a> {
    pub hue: &'a [f32; HUE_BUCKETS],
    pub sat: &'a [f32; HUE_BUCKETS],
    pub lum: &'a [f32; HUE_BUCKETS],
}

/// Center hue of bucket `index`, in turns.
#[inline]
pub fn bucket_center(index: usize) -> f32 {
    index as f32 / HUE_BUCKETS as f32
}

/// Distance between two hues on the unit circle.
#[inline]
pub fn circular_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs();
    diff.min(1.0 - diff)
}

/// Unnormalized Gaussian weight of every bucket for `hue`.
pub fn bucket_weights(hue: f32, sigma: f32) -> [f32; HUE_BUCKETS] {
    let two_sigma_sq = 2.0 * sigma * sigma;
    std::array::from_fn(|i| {
        let d = circular_distance(hue, bucket_center(i));
        (-(d * d) / two_sigma_sq).exp()
    })
}

/// Weighted-average shift for `hue`.
pub fn hue_range_shift(hue: f32, adjust: HueRangeAdjust<'_>, weighting: BucketWeighting) -> HslShift {
    let weights = bucket_weights(hue, weighting.sigma);
    let total: f32 = weights.iter().sum();
    // Also catches NaN from a zero sigma.
    if !(total >= weighting.min_weight_sum) {
        return HslShift::default();
    }

    let mut shift = HslShift::default();
    for (i, w) in weights.iter().enumerate() {
        shift.hue += w * adjust.hue[i];
        shift.sat += w * adjust.sat[i];
        shift.lum += w * adjust.lum[i];
    }
    HslShift {
        hue: shift.hue / total,
        sat: shift.sat / total,
        lum: shift.lum / total,
    }
}

/// Apply the per-range shift in HSV space.
pub fn apply_hue_ranges(
    rgb: ColorSample,
    adjust: HueRangeAdjust<'_>,
    weighting: BucketWeighting,
) -> ColorSample {
    let mut hsv = rgb_to_hsv(rgb);
    let shift = hue_range_shift(hsv.x, adjust, weighting);
    hsv.x = wrap_hue(hsv.x + shift.hue);
    hsv.y = (hsv.y + shift.sat).clamp(0.0, 1.0);
    hsv.z = (hsv.z + shift.lum).clamp(0.0, 1.0);
    hsv_to_rgb(hsv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPSILON: f32 = 1e-5;
    const ZERO: [f32; HUE_BUCKETS] = [0.0; HUE_BUCKETS];

    fn ramp(scale: f32) -> [f32; HUE_BUCKETS] {
        std::array::from_fn(|i| (i as f32 - 3.5) * scale)
    }

    #[test]
    fn test_circular_distance_wraps() {
        assert!((circular_distance(0.95, 0.05) - 0.1).abs() < EPSILON);
        assert!((circular_distance(0.0, 0.5) - 0.5).abs() < EPSILON);
        assert_eq!(circular_distance(0.25, 0.25), 0.0);
    }

    #[test]
    fn test_weights_peak_at_center() {
        let w = bucket_weights(bucket_center(3), 0.08);
        assert_eq!(w[3], 1.0);
        assert!(w.iter().enumerate().all(|(i, &x)| i == 3 || x < 1.0));
        // Symmetric neighbors.
        assert!((w[2] - w[4]).abs() < EPSILON);
    }

    #[test]
    fn test_red_wraps_between_first_and_last_bucket() {
        let w = bucket_weights(0.99, 0.08);
        assert!(w[0] > w[7]);
        assert!(w[7] > w[1]);
    }

    #[test]
    fn test_zero_arrays_give_zero_shift() {
        let adjust = HueRangeAdjust {
            hue: &ZERO,
            sat: &ZERO,
            lum: &ZERO,
        };
        for i in 0..20 {
            let shift = hue_range_shift(i as f32 / 20.0, adjust, BucketWeighting::default());
            assert_eq!(shift, HslShift::default());
        }
    }

    #[test]
    fn test_uniform_arrays_give_uniform_shift() {
        let hue = [0.1; HUE_BUCKETS];
        let adjust = HueRangeAdjust {
            hue: &hue,
            sat: &ZERO,
            lum: &ZERO,
        };
        let shift = hue_range_shift(0.37, adjust, BucketWeighting::default());
        assert!((shift.hue - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_narrow_sigma_isolates_bucket() {
        let (hue, sat, lum) = (ramp(0.1), ramp(-0.2), ramp(0.05));
        let adjust = HueRangeAdjust {
            hue: &hue,
            sat: &sat,
            lum: &lum,
        };
        let weighting = BucketWeighting {
            sigma: 1e-3,
            ..BucketWeighting::default()
        };
        for i in 0..HUE_BUCKETS {
            let shift = hue_range_shift(bucket_center(i), adjust, weighting);
            assert!((shift.hue - hue[i]).abs() < EPSILON);
            assert!((shift.sat - sat[i]).abs() < EPSILON);
            assert!((shift.lum - lum[i]).abs() < EPSILON);
        }
    }

    #[test]
    fn test_degenerate_weight_falls_back_to_zero_shift() {
        let hue = ramp(0.1);
        let adjust = HueRangeAdjust {
            hue: &hue,
            sat: &hue,
            lum: &hue,
        };
        let weighting = BucketWeighting {
            sigma: 1e-3,
            ..BucketWeighting::default()
        };
        // Halfway between two centers every weight underflows to 0.
        let shift = hue_range_shift(1.0 / 16.0, adjust, weighting);
        assert_eq!(shift, HslShift::default());

        let zero_sigma = BucketWeighting {
            sigma: 0.0,
            ..BucketWeighting::default()
        };
        let shift = hue_range_shift(0.3, adjust, zero_sigma);
        assert!(shift.hue.is_finite());
    }

    #[test]
    fn test_zero_arrays_keep_in_gamut_color() {
        let adjust = HueRangeAdjust {
            hue: &ZERO,
            sat: &ZERO,
            lum: &ZERO,
        };
        let rgb = Vec3::new(0.7, 0.2, 0.4);
        let out = apply_hue_ranges(rgb, adjust, BucketWeighting::default());
        assert!((out - rgb).abs().max_element() < EPSILON);
    }

    #[test]
    fn test_value_shift_darkens_matching_hue() {
        let mut lum = ZERO;
        lum[0] = -0.8;
        let adjust = HueRangeAdjust {
            hue: &ZERO,
            sat: &ZERO,
            lum: &lum,
        };
        let red = apply_hue_ranges(Vec3::new(0.8, 0.1, 0.1), adjust, BucketWeighting::default());
        assert!(red.x < 0.5);
        let cyan = Vec3::new(0.1, 0.8, 0.8);
        let out = apply_hue_ranges(cyan, adjust, BucketWeighting::default());
        assert!((out - cyan).abs().max_element() < 1e-3);
    }
}
