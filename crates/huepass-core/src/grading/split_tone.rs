//! Split toning: a multiplicative tint chosen by luminance.
//!
//! ```text
//! t    = smoothstep(0, 1, luma(in) + balance)
//! tone = mix(shadow_tint, highlight_tint, t)
//! out  = in × tone
//! ```

use glam::Vec3;

use crate::color::{ColorSample, luminance, smoothstep};

pub fn apply_split_tone(
    rgb: ColorSample,
    shadow_tint: Vec3,
    highlight_tint: Vec3,
    balance: f32,
) -> ColorSample {
    let t = smoothstep(0.0, 1.0, luminance(rgb) + balance);
    rgb * shadow_tint.lerp(highlight_tint, t)
}
