//! Core transform evaluation: applies the full grading chain to one pixel.
//!
//! Order is fixed and load-bearing:
//! 1. Chromatic aberration (samples the source)
//! 2. Channel mixer + brightness, negative clamp
//! 3. Exposure
//! 4. Contrast around `0.5^2.2`
//! 5. Gamma (first clamp to `[0, 1]`)
//! 6. White balance from kelvin
//! 7. Hue rotation
//! 8. Saturation
//! 9. Vibrancy
//! 10. Split toning
//! 11. Per-hue-range HSL
//! 12. Filmic tone map (output is not re-clamped)

use glam::{Mat3, Vec2, Vec3};

use crate::color::{ColorSample, sanitize};
use crate::grading::hue_ranges::{BucketWeighting, HueRangeAdjust};
use crate::grading::{
    aberration, hue_ranges, mixer, primaries, saturation, split_tone, tone_map, white_balance,
};
use crate::image::SampleSource;
use crate::params::GradeParameters;

/// The color stages that follow source sampling, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ChannelMix,
    Exposure,
    Contrast,
    Gamma,
    WhiteBalance,
    HueOffset,
    Saturation,
    Vibrancy,
    SplitTone,
    HueRanges,
    ToneMap,
}

impl Stage {
    pub const ALL: [Stage; 11] = [
        Stage::ChannelMix,
        Stage::Exposure,
        Stage::Contrast,
        Stage::Gamma,
        Stage::WhiteBalance,
        Stage::HueOffset,
        Stage::Saturation,
        Stage::Vibrancy,
        Stage::SplitTone,
        Stage::HueRanges,
        Stage::ToneMap,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ChannelMix => "channel mix",
            Self::Exposure => "exposure",
            Self::Contrast => "contrast",
            Self::Gamma => "gamma",
            Self::WhiteBalance => "white balance",
            Self::HueOffset => "hue offset",
            Self::Saturation => "saturation",
            Self::Vibrancy => "vibrancy",
            Self::SplitTone => "split tone",
            Self::HueRanges => "hue ranges",
            Self::ToneMap => "tone map",
        }
    }

    pub fn apply(self, rgb: ColorSample, ctx: &GradeContext<'_>) -> ColorSample {
        let p = ctx.params;
        match self {
            Self::ChannelMix => {
                mixer::apply_channel_mix(rgb, &ctx.mix, mixer::MIXER_CONTRAST, p.brightness)
            }
            Self::Exposure => primaries::apply_exposure(rgb, p.exposure),
            Self::Contrast => primaries::apply_contrast(rgb, p.contrast),
            Self::Gamma => primaries::apply_gamma(rgb, p.gamma),
            Self::WhiteBalance => rgb * ctx.white_balance,
            Self::HueOffset => saturation::apply_hue_offset(rgb, p.hue_offset),
            Self::Saturation => saturation::apply_saturation(rgb, p.saturation),
            Self::Vibrancy => saturation::apply_vibrancy(rgb, p.vibrancy),
            Self::SplitTone => split_tone::apply_split_tone(
                rgb,
                ctx.shadow_tint,
                ctx.highlight_tint,
                p.split_tone_balance,
            ),
            Self::HueRanges => hue_ranges::apply_hue_ranges(
                rgb,
                HueRangeAdjust {
                    hue: &p.hue_adjust,
                    sat: &p.sat_adjust,
                    lum: &p.lum_adjust,
                },
                ctx.weighting,
            ),
            Self::ToneMap => tone_map::apply_tone_map(rgb),
        }
    }
}

/// Per-frame values derived once from [`GradeParameters`].
#[derive(Debug, Clone)]
pub struct GradeContext<'a> {
    pub params: &'a GradeParameters,
    pub mix: Mat3,
    pub white_balance: Vec3,
    pub shadow_tint: Vec3,
    pub highlight_tint: Vec3,
    pub weighting: BucketWeighting,
}

impl<'a> GradeContext<'a> {
    pub fn new(params: &'a GradeParameters, weighting: BucketWeighting) -> Self {
        Self {
            params,
            mix: mixer::mix_matrix(params.red_mix, params.green_mix, params.blue_mix),
            white_balance: white_balance::kelvin_to_rgb(params.kelvin),
            shadow_tint: Vec3::from_array(params.shadow_tint),
            highlight_tint: Vec3::from_array(params.highlight_tint),
            weighting,
        }
    }

    /// Run stages 2–12 on an already-sampled color.
    pub fn grade(&self, rgb: ColorSample) -> ColorSample {
        Stage::ALL
            .iter()
            .fold(sanitize(rgb), |color, stage| stage.apply(color, self))
    }

    /// Run all twelve stages for the pixel at `uv`.
    pub fn grade_at<S>(&self, source: &S, uv: Vec2) -> ColorSample
    where
        S: SampleSource + ?Sized,
    {
        let sampled =
            aberration::apply_chromatic_aberration(source, uv, self.params.chromatic_aberration);
        self.grade(sampled)
    }

    /// Color after every stage, in order. For inspecting a grade.
    pub fn trace(&self, rgb: ColorSample) -> Vec<(Stage, ColorSample)> {
        let mut color = sanitize(rgb);
        Stage::ALL
            .iter()
            .map(|&stage| {
                color = stage.apply(color, self);
                (stage, color)
            })
            .collect()
    }
}

/// The core function: stages 2–12 with the default bucket weighting.
///
/// Chromatic aberration needs the source image; use
/// [`GradingPipeline::evaluate`](super::pipeline::GradingPipeline::evaluate)
/// for the full chain.
pub fn evaluate_transform(rgb: ColorSample, params: &GradeParameters) -> ColorSample {
    GradeContext::new(params, BucketWeighting::default()).grade(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_trace_matches_grade() {
        let params = GradeParameters::default();
        let ctx = GradeContext::new(&params, BucketWeighting::default());
        let rgb = Vec3::new(0.3, 0.5, 0.2);
        let trace = ctx.trace(rgb);
        assert_eq!(trace.len(), Stage::ALL.len());
        assert_eq!(trace.last().map(|(s, _)| *s), Some(Stage::ToneMap));
        let (_, last) = trace[trace.len() - 1];
        assert!((last - ctx.grade(rgb)).abs().max_element() < EPSILON);
    }

    #[test]
    fn test_identity_stages_pass_through() {
        let params = GradeParameters::identity();
        let ctx = GradeContext::new(&params, BucketWeighting::default());
        let rgb = Vec3::new(0.25, 0.6, 0.45);
        for (stage, color) in ctx.trace(rgb) {
            if stage == Stage::ToneMap {
                break;
            }
            assert!(
                (color - rgb).abs().max_element() < EPSILON,
                "{} changed {rgb:?} to {color:?}",
                stage.label()
            );
        }
    }

    #[test]
    fn test_non_finite_input_grades_as_black() {
        let params = GradeParameters::default();
        let black = evaluate_transform(Vec3::ZERO, &params);
        let out = evaluate_transform(Vec3::new(f32::NAN, f32::INFINITY, f32::NEG_INFINITY), &params);
        assert_eq!(out, black);
    }

    #[test]
    fn test_hdr_input_is_bounded_by_tone_map() {
        let params = GradeParameters::default();
        let out = evaluate_transform(Vec3::splat(50.0), &params);
        assert!(out.is_finite());
        assert!(out.max_element() < 1.04);
    }
}
