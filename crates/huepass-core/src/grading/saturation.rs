//! Hue rotation, saturation, and vibrancy.

use glam::Vec3;

use crate::color::{ColorSample, hsv_to_rgb, luminance, rgb_to_hsv, smoothstep, wrap_hue};

/// Rotate hue by `offset` turns in HSV space.
pub fn apply_hue_offset(rgb: ColorSample, offset: f32) -> ColorSample {
    let mut hsv = rgb_to_hsv(rgb);
    hsv.x = wrap_hue(hsv.x + offset);
    hsv_to_rgb(hsv)
}

/// Blend between the luma gray and the color by `1 + saturation`.
///
/// ```text
/// out = mix(luma, in, 1 + saturation)
/// ```
///
/// `saturation = 0` is the no-op point; positive values extrapolate away
/// from gray.
pub fn apply_saturation(rgb: ColorSample, saturation: f32) -> ColorSample {
    let gray = Vec3::splat(luminance(rgb));
    gray.lerp(rgb, 1.0 + saturation)
}

/// Saturation boost weighted toward muted pixels.
///
/// ```text
/// chroma = max(in) − min(in)
/// factor = 1 + vibrancy × (1 − smoothstep(0, 0.5, chroma))
/// out    = mix(luma, in, factor)
/// ```
///
/// Pixels with a channel spread of 0.5 or more are left unchanged.
pub fn apply_vibrancy(rgb: ColorSample, vibrancy: f32) -> ColorSample {
    let chroma = rgb.max_element() - rgb.min_element();
    let factor = 1.0 + vibrancy * (1.0 - smoothstep(0.0, 0.5, chroma));
    let gray = Vec3::splat(luminance(rgb));
    gray.lerp(rgb, factor)
}
