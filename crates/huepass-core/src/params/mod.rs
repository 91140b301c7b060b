//! The grading parameter set and its typed get/set contract.
//!
//! `GradeParameters` is the single source of truth for the grade. The UI
//! writes here through [`GradeParameters::set`] (or a [`ParamCommand`] sent
//! to the [`SharedGradeParameters`] store); the pipeline reads the fields.
//!
//! [`ParamCommand`]: command::ParamCommand
//! [`SharedGradeParameters`]: shared::SharedGradeParameters

pub mod command;
pub mod field;
pub mod shared;

use serde::{Deserialize, Serialize};

use crate::error::GradeError;
use field::{ParamDescriptor, ParamId, ParamKind, ParamValue};

/// Number of hue buckets in the per-range HSL stage. Bucket `i` is centered
/// at hue `i / HUE_BUCKETS` turns.
pub const HUE_BUCKETS: usize = 8;

/// Every tunable input of the grading pass.
///
/// Fields are public for reading. Writes that must keep the declared ranges
/// go through [`set`](Self::set), [`set_clamped`](Self::set_clamped) or
/// [`set_band`](Self::set_band); values built by hand or deserialized can be
/// checked with [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeParameters {
    // Channel mixer rows: output channel = dot(row, input).
    /// Red output row. Default: `[1.2, 0, 0]`.
    pub red_mix: [f32; 3],
    /// Green output row. Default: `[0, 1, 0]`.
    pub green_mix: [f32; 3],
    /// Blue output row. Default: `[0, 0.1, 0.95]`.
    pub blue_mix: [f32; 3],

    /// Offset added after mixing. 0.0 = neutral.
    pub brightness: f32,
    /// Contrast around the perceptual gray point. 1.0 = neutral.
    pub contrast: f32,
    /// Saturation offset; the blend factor is `1 + saturation`. Default 0.6.
    pub saturation: f32,
    /// Boost applied to low-saturation pixels. Default 1.1.
    pub vibrancy: f32,
    /// Hue rotation in turns. 0.0 = no rotation.
    pub hue_offset: f32,
    /// Display gamma; output is raised to `1 / gamma`. Default 1.1.
    pub gamma: f32,

    /// Multiplicative tint for shadows. Default: `[0.6, 0.6, 0.6]`.
    pub shadow_tint: [f32; 3],
    /// Multiplicative tint for highlights. Default: `[0.9, 1, 1]`.
    pub highlight_tint: [f32; 3],
    /// Shifts the shadow/highlight threshold. 0.0 = centered.
    pub split_tone_balance: f32,

    /// Exposure in stops. Default 0.1.
    pub exposure: f32,
    /// White balance temperature in kelvin. Default 4000.
    pub kelvin: f32,
    /// Radial channel offset strength. 0.0 = off.
    pub chromatic_aberration: f32,

    // Per-hue-range adjustments, index = bucket.
    /// Hue shift per bucket, in turns.
    pub hue_adjust: [f32; HUE_BUCKETS],
    /// Saturation shift per bucket.
    pub sat_adjust: [f32; HUE_BUCKETS],
    /// Value shift per bucket.
    pub lum_adjust: [f32; HUE_BUCKETS],
}

impl Default for GradeParameters {
    /// The starting look of a session. Note this is not a no-op grade; see
    /// [`GradeParameters::identity`].
    fn default() -> Self {
        Self {
            red_mix: [1.2, 0.0, 0.0],
            green_mix: [0.0, 1.0, 0.0],
            blue_mix: [0.0, 0.1, 0.95],
            brightness: 0.0,
            contrast: 1.0,
            saturation: 0.6,
            vibrancy: 1.1,
            hue_offset: 0.0,
            gamma: 1.1,
            shadow_tint: [0.6, 0.6, 0.6],
            highlight_tint: [0.9, 1.0, 1.0],
            split_tone_balance: 0.0,
            exposure: 0.1,
            kelvin: 4000.0,
            chromatic_aberration: 0.0,
            hue_adjust: [0.0; HUE_BUCKETS],
            sat_adjust: [0.0; HUE_BUCKETS],
            lum_adjust: [0.0; HUE_BUCKETS],
        }
    }
}

impl GradeParameters {
    /// Settings at which every stage except tone mapping passes color through.
    ///
    /// Saturation is 0 here because the stage blends by `1 + saturation`;
    /// kelvin is 6600, where the temperature multiplier is exactly white.
    pub fn identity() -> Self {
        Self {
            red_mix: [1.0, 0.0, 0.0],
            green_mix: [0.0, 1.0, 0.0],
            blue_mix: [0.0, 0.0, 1.0],
            brightness: 0.0,
            contrast: 1.0,
            saturation: 0.0,
            vibrancy: 0.0,
            hue_offset: 0.0,
            gamma: 1.0,
            shadow_tint: [1.0, 1.0, 1.0],
            highlight_tint: [1.0, 1.0, 1.0],
            split_tone_balance: 0.0,
            exposure: 0.0,
            kelvin: 6600.0,
            chromatic_aberration: 0.0,
            hue_adjust: [0.0; HUE_BUCKETS],
            sat_adjust: [0.0; HUE_BUCKETS],
            lum_adjust: [0.0; HUE_BUCKETS],
        }
    }

    /// Descriptors for every field, in control-panel order.
    pub fn descriptors() -> Vec<ParamDescriptor> {
        ParamId::ALL.into_iter().map(ParamId::descriptor).collect()
    }

    /// Current value of `id`.
    pub fn get(&self, id: ParamId) -> ParamValue {
        match id {
            ParamId::RedMix => ParamValue::Vector(self.red_mix),
            ParamId::GreenMix => ParamValue::Vector(self.green_mix),
            ParamId::BlueMix => ParamValue::Vector(self.blue_mix),
            ParamId::Brightness => ParamValue::Scalar(self.brightness),
            ParamId::Contrast => ParamValue::Scalar(self.contrast),
            ParamId::Saturation => ParamValue::Scalar(self.saturation),
            ParamId::Vibrancy => ParamValue::Scalar(self.vibrancy),
            ParamId::HueOffset => ParamValue::Scalar(self.hue_offset),
            ParamId::Gamma => ParamValue::Scalar(self.gamma),
            ParamId::ShadowTint => ParamValue::Vector(self.shadow_tint),
            ParamId::HighlightTint => ParamValue::Vector(self.highlight_tint),
            ParamId::SplitToneBalance => ParamValue::Scalar(self.split_tone_balance),
            ParamId::Exposure => ParamValue::Scalar(self.exposure),
            ParamId::Kelvin => ParamValue::Scalar(self.kelvin),
            ParamId::ChromaticAberration => ParamValue::Scalar(self.chromatic_aberration),
            ParamId::HueAdjust => ParamValue::Bands(self.hue_adjust),
            ParamId::SatAdjust => ParamValue::Bands(self.sat_adjust),
            ParamId::LumAdjust => ParamValue::Bands(self.lum_adjust),
        }
    }

    /// Set `id` to `value`, refusing anything outside the declared range.
    /// On error the field is unchanged.
    pub fn set(&mut self, id: ParamId, value: ParamValue) -> Result<(), GradeError> {
        check_kind(id, &value)?;
        for &c in value.components() {
            check_range(id, c)?;
        }
        self.store(id, value)
    }

    /// Set `id` to `value` clamped into the declared range. Returns the value
    /// actually stored. NaN components and shape mismatches are still errors.
    pub fn set_clamped(&mut self, id: ParamId, value: ParamValue) -> Result<ParamValue, GradeError> {
        check_kind(id, &value)?;
        let mut clamped = value;
        for c in clamped.components_mut() {
            *c = clamp_to_range(id, *c)?;
        }
        self.store(id, clamped)?;
        Ok(clamped)
    }

    /// Set a single hue bucket of a band field.
    pub fn set_band(&mut self, id: ParamId, index: usize, value: f32) -> Result<(), GradeError> {
        if id.kind() != ParamKind::Bands {
            return Err(GradeError::KindMismatch {
                param: id,
                expected: id.kind(),
            });
        }
        if index >= HUE_BUCKETS {
            return Err(GradeError::BandIndex { param: id, index });
        }
        check_range(id, value)?;
        self.bands_mut(id)[index] = value;
        Ok(())
    }

    /// [`set`](Self::set) addressed by canonical field name.
    pub fn set_by_name(&mut self, name: &str, value: ParamValue) -> Result<(), GradeError> {
        let id = ParamId::from_name(name).ok_or_else(|| GradeError::UnknownParam(name.to_owned()))?;
        self.set(id, value)
    }

    /// Restore one field to its default.
    pub fn reset_param(&mut self, id: ParamId) {
        let defaults = Self::default();
        match id {
            ParamId::RedMix => self.red_mix = defaults.red_mix,
            ParamId::GreenMix => self.green_mix = defaults.green_mix,
            ParamId::BlueMix => self.blue_mix = defaults.blue_mix,
            ParamId::Brightness => self.brightness = defaults.brightness,
            ParamId::Contrast => self.contrast = defaults.contrast,
            ParamId::Saturation => self.saturation = defaults.saturation,
            ParamId::Vibrancy => self.vibrancy = defaults.vibrancy,
            ParamId::HueOffset => self.hue_offset = defaults.hue_offset,
            ParamId::Gamma => self.gamma = defaults.gamma,
            ParamId::ShadowTint => self.shadow_tint = defaults.shadow_tint,
            ParamId::HighlightTint => self.highlight_tint = defaults.highlight_tint,
            ParamId::SplitToneBalance => self.split_tone_balance = defaults.split_tone_balance,
            ParamId::Exposure => self.exposure = defaults.exposure,
            ParamId::Kelvin => self.kelvin = defaults.kelvin,
            ParamId::ChromaticAberration => {
                self.chromatic_aberration = defaults.chromatic_aberration
            }
            ParamId::HueAdjust => self.hue_adjust = defaults.hue_adjust,
            ParamId::SatAdjust => self.sat_adjust = defaults.sat_adjust,
            ParamId::LumAdjust => self.lum_adjust = defaults.lum_adjust,
        }
    }

    /// Check every field against its declared range.
    pub fn validate(&self) -> Result<(), GradeError> {
        for id in ParamId::ALL {
            for &c in self.get(id).components() {
                check_range(id, c)?;
            }
        }
        Ok(())
    }

    /// Write a value whose shape matches `id`; anything else is a
    /// [`GradeError::KindMismatch`] and leaves the field untouched.
    fn store(&mut self, id: ParamId, value: ParamValue) -> Result<(), GradeError> {
        match (id, value) {
            (ParamId::RedMix, ParamValue::Vector(v)) => self.red_mix = v,
            (ParamId::GreenMix, ParamValue::Vector(v)) => self.green_mix = v,
            (ParamId::BlueMix, ParamValue::Vector(v)) => self.blue_mix = v,
            (ParamId::ShadowTint, ParamValue::Vector(v)) => self.shadow_tint = v,
            (ParamId::HighlightTint, ParamValue::Vector(v)) => self.highlight_tint = v,
            (ParamId::Brightness, ParamValue::Scalar(v)) => self.brightness = v,
            (ParamId::Contrast, ParamValue::Scalar(v)) => self.contrast = v,
            (ParamId::Saturation, ParamValue::Scalar(v)) => self.saturation = v,
            (ParamId::Vibrancy, ParamValue::Scalar(v)) => self.vibrancy = v,
            (ParamId::HueOffset, ParamValue::Scalar(v)) => self.hue_offset = v,
            (ParamId::Gamma, ParamValue::Scalar(v)) => self.gamma = v,
            (ParamId::SplitToneBalance, ParamValue::Scalar(v)) => self.split_tone_balance = v,
            (ParamId::Exposure, ParamValue::Scalar(v)) => self.exposure = v,
            (ParamId::Kelvin, ParamValue::Scalar(v)) => self.kelvin = v,
            (ParamId::ChromaticAberration, ParamValue::Scalar(v)) => {
                self.chromatic_aberration = v
            }
            (ParamId::HueAdjust | ParamId::SatAdjust | ParamId::LumAdjust, ParamValue::Bands(v)) => {
                *self.bands_mut(id) = v
            }
            _ => {
                return Err(GradeError::KindMismatch {
                    param: id,
                    expected: id.kind(),
                });
            }
        }
        Ok(())
    }

    fn bands_mut(&mut self, id: ParamId) -> &mut [f32; HUE_BUCKETS] {
        match id {
            ParamId::SatAdjust => &mut self.sat_adjust,
            ParamId::LumAdjust => &mut self.lum_adjust,
            _ => &mut self.hue_adjust,
        }
    }
}

fn check_kind(id: ParamId, value: &ParamValue) -> Result<(), GradeError> {
    if value.fits(id.kind()) {
        Ok(())
    } else {
        Err(GradeError::KindMismatch {
            param: id,
            expected: id.kind(),
        })
    }
}

fn check_range(id: ParamId, value: f32) -> Result<(), GradeError> {
    let (min, max) = id.bounds();
    // NaN fails both comparisons.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(GradeError::OutOfRange {
            param: id,
            value,
            min,
            max,
        })
    }
}

fn clamp_to_range(id: ParamId, value: f32) -> Result<f32, GradeError> {
    let (min, max) = id.bounds();
    if value.is_nan() {
        return Err(GradeError::OutOfRange {
            param: id,
            value,
            min,
            max,
        });
    }
    Ok(value.clamp(min, max))
}
