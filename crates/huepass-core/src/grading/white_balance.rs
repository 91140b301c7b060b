//! White balance from a color temperature.
//!
//! Uses the piecewise Kelvin-to-RGB fit (Tanner Helland) on `t = K / 100`:
//!
//! ```text
//! red   = 1                                      t ≤ 66
//!       = 329.698727446 × (t − 60)^−0.1332047592 / 255   t > 66
//! green = (99.4708025861 × ln t − 161.1195681661) / 255  t ≤ 66
//!       = 288.1221695283 × (t − 60)^−0.0755148492 / 255  t > 66
//! blue  = 1                                      t ≥ 66
//!       = 0                                      t ≤ 19
//!       = (138.5177312231 × ln(t − 10) − 305.0447927307) / 255   otherwise
//! ```
//!
//! Each channel is clamped to `[0, 1]`. At 6600 K the multiplier is white.
//! The two fits do not meet exactly at `t = 66`; green steps by about 0.013
//! and blue by about 0.01.

use glam::Vec3;

use crate::color::{ColorSample, saturate};

/// Temperature at which [`kelvin_to_rgb`] returns `(1, 1, 1)`.
pub const NEUTRAL_KELVIN: f32 = 6600.0;

/// RGB multiplier for a color temperature. Input is clamped to `[1000, 40000]`.
#[allow(clippy::excessive_precision)]
pub fn kelvin_to_rgb(kelvin: f32) -> ColorSample {
    let t = kelvin.clamp(1000.0, 40000.0) / 100.0;

    let red = if t <= 66.0 {
        1.0
    } else {
        329.698727446 * (t - 60.0).powf(-0.1332047592) / 255.0
    };

    let green = if t <= 66.0 {
        (99.4708025861 * t.ln() - 161.1195681661) / 255.0
    } else {
        288.1221695283 * (t - 60.0).powf(-0.0755148492) / 255.0
    };

    let blue = if t >= 66.0 {
        1.0
    } else if t <= 19.0 {
        0.0
    } else {
        (138.5177312231 * (t - 10.0).ln() - 305.0447927307) / 255.0
    };

    Vec3::new(saturate(red), saturate(green), saturate(blue))
}

/// Multiply `rgb` by the temperature's multiplier.
pub fn apply_kelvin(rgb: ColorSample, kelvin: f32) -> ColorSample {
    rgb * kelvin_to_rgb(kelvin)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn assert_close(a: Vec3, b: Vec3, eps: f32) {
        assert!((a - b).abs().max_element() < eps, "{a:?} vs {b:?}");
    }

    #[test]
    fn test_neutral_point_is_white() {
        assert_eq!(kelvin_to_rgb(NEUTRAL_KELVIN), Vec3::ONE);
    }

    #[test]
    fn test_default_4000k() {
        assert_close(
            kelvin_to_rgb(4000.0),
            Vec3::new(1.0, 0.807_122_5, 0.651_299_4),
            EPSILON,
        );
    }

    #[test]
    fn test_candle_light_has_no_blue() {
        let rgb = kelvin_to_rgb(1900.0);
        assert_eq!(rgb.z, 0.0);
        assert_eq!(rgb.x, 1.0);
    }

    #[test]
    fn test_cool_end_reduces_red() {
        assert_close(
            kelvin_to_rgb(40000.0),
            Vec3::new(0.594_801_5, 0.727_565_7, 1.0),
            EPSILON,
        );
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(kelvin_to_rgb(10.0), kelvin_to_rgb(1000.0));
        assert_eq!(kelvin_to_rgb(1e9), kelvin_to_rgb(40000.0));
    }

    #[test]
    fn test_channels_stay_in_unit_range() {
        let mut k = 1000.0;
        while k <= 40000.0 {
            let rgb = kelvin_to_rgb(k);
            assert!(rgb.min_element() >= 0.0 && rgb.max_element() <= 1.0, "{k}: {rgb:?}");
            k += 50.0;
        }
    }

    #[test]
    fn test_warm_light_tints_gray() {
        let out = apply_kelvin(Vec3::splat(0.5), 3000.0);
        assert!(out.x > out.y && out.y > out.z);
    }
}
