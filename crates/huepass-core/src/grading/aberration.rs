//! Radial chromatic aberration.
//!
//! Red is sampled pushed outward from the image center, blue pulled inward,
//! green in place. The displacement grows with the squared distance from
//! the center:
//!
//! ```text
//! offset = normalize(uv − center) × |uv − center|² × amount
//! out    = (src(uv + offset).r, src(uv).g, src(uv − offset).b)
//! ```

use glam::Vec2;

use crate::color::ColorSample;
use crate::image::SampleSource;

/// Normalized image center.
pub const IMAGE_CENTER: Vec2 = Vec2::splat(0.5);

/// Displacement of the red sample at `uv`. The blue sample uses the negation.
/// Zero at the exact center.
pub fn channel_offset(uv: Vec2, amount: f32) -> Vec2 {
    let from_center = uv - IMAGE_CENTER;
    let strength = from_center.length_squared() * amount;
    from_center.normalize_or_zero() * strength
}

/// Sample `source` with per-channel radial offsets.
pub fn apply_chromatic_aberration<S>(source: &S, uv: Vec2, amount: f32) -> ColorSample
where
    S: SampleSource + ?Sized,
{
    let center = source.sample(uv);
    if amount == 0.0 {
        return center;
    }

    let offset = channel_offset(uv, amount);
    ColorSample::new(
        source.sample(uv + offset).x,
        center.y,
        source.sample(uv - offset).z,
    )
}
