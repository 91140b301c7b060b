//! Channel mixer.
//!
//! ```text
//! mixed = (dot(red_row, in), dot(green_row, in), dot(blue_row, in))
//! out   = max(mixed × contrast + brightness, 0)
//! ```
//!
//! There is no upper clamp: a mixer row summing above 1 produces HDR values
//! that the later gamma stage clamps.

use glam::{Mat3, Vec3};

use crate::color::ColorSample;

/// Contrast factor applied inside the mixer. Contrast proper happens in
/// [`super::primaries::apply_contrast`].
pub const MIXER_CONTRAST: f32 = 1.0;

/// Build the mix matrix with `red`, `green`, `blue` as its rows.
pub fn mix_matrix(red: [f32; 3], green: [f32; 3], blue: [f32; 3]) -> Mat3 {
    Mat3::from_cols(
        Vec3::from_array(red),
        Vec3::from_array(green),
        Vec3::from_array(blue),
    )
    .transpose()
}

/// Apply the channel mixer, brightness offset, and the negative clamp.
pub fn apply_channel_mix(
    rgb: ColorSample,
    matrix: &Mat3,
    contrast: f32,
    brightness: f32,
) -> ColorSample {
    (*matrix * rgb * contrast + Vec3::splat(brightness)).max(Vec3::ZERO)
}
