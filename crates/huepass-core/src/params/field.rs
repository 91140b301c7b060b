//! Field identities, value shapes, and declared domains of [`GradeParameters`].
//!
//! Every serialization boundary names fields by [`ParamId::name`], which is
//! also the serde representation of `ParamId` itself.
//!
//! [`GradeParameters`]: super::GradeParameters

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{GradeParameters, HUE_BUCKETS};

/// Identifies one field of [`GradeParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamId {
    RedMix,
    GreenMix,
    BlueMix,
    Brightness,
    Contrast,
    Saturation,
    Vibrancy,
    HueOffset,
    Gamma,
    ShadowTint,
    HighlightTint,
    SplitToneBalance,
    Exposure,
    Kelvin,
    ChromaticAberration,
    HueAdjust,
    SatAdjust,
    LumAdjust,
}

impl ParamId {
    /// All fields in control-panel order.
    pub const ALL: [ParamId; 18] = [
        ParamId::RedMix,
        ParamId::GreenMix,
        ParamId::BlueMix,
        ParamId::Brightness,
        ParamId::Contrast,
        ParamId::Saturation,
        ParamId::Vibrancy,
        ParamId::HueOffset,
        ParamId::Gamma,
        ParamId::ShadowTint,
        ParamId::HighlightTint,
        ParamId::SplitToneBalance,
        ParamId::Exposure,
        ParamId::Kelvin,
        ParamId::ChromaticAberration,
        ParamId::HueAdjust,
        ParamId::SatAdjust,
        ParamId::LumAdjust,
    ];

    /// Canonical field name used across serialization boundaries.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RedMix => "redMix",
            Self::GreenMix => "greenMix",
            Self::BlueMix => "blueMix",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Vibrancy => "vibrancy",
            Self::HueOffset => "hueOffset",
            Self::Gamma => "gamma",
            Self::ShadowTint => "shadowTint",
            Self::HighlightTint => "highlightTint",
            Self::SplitToneBalance => "splitToneBalance",
            Self::Exposure => "exposure",
            Self::Kelvin => "kelvin",
            Self::ChromaticAberration => "chromaticAberration",
            Self::HueAdjust => "hueAdjust",
            Self::SatAdjust => "satAdjust",
            Self::LumAdjust => "lumAdjust",
        }
    }

    /// Human-readable label for control panels.
    pub const fn label(self) -> &'static str {
        match self {
            Self::RedMix => "Red Mix",
            Self::GreenMix => "Green Mix",
            Self::BlueMix => "Blue Mix",
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
            Self::Saturation => "Saturation",
            Self::Vibrancy => "Vibrancy",
            Self::HueOffset => "Hue Offset",
            Self::Gamma => "Gamma",
            Self::ShadowTint => "Shadow Tint",
            Self::HighlightTint => "Highlight Tint",
            Self::SplitToneBalance => "Split Tone Balance",
            Self::Exposure => "Exposure",
            Self::Kelvin => "Kelvin",
            Self::ChromaticAberration => "Chromatic Aberration",
            Self::HueAdjust => "Hue Adjustments",
            Self::SatAdjust => "Saturation Adjustments",
            Self::LumAdjust => "Luminance Adjustments",
        }
    }

    /// Look up a field by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    pub const fn kind(self) -> ParamKind {
        match self {
            Self::RedMix | Self::GreenMix | Self::BlueMix => ParamKind::Vector,
            Self::ShadowTint | Self::HighlightTint => ParamKind::Color,
            Self::HueAdjust | Self::SatAdjust | Self::LumAdjust => ParamKind::Bands,
            _ => ParamKind::Scalar,
        }
    }

    /// Declared inclusive range of each scalar or component.
    /// `None` for the unconstrained mix vectors.
    pub const fn range(self) -> Option<(f32, f32)> {
        match self {
            Self::RedMix | Self::GreenMix | Self::BlueMix => None,
            Self::ShadowTint | Self::HighlightTint => Some((0.0, 1.0)),
            Self::Brightness | Self::HueOffset | Self::SplitToneBalance => Some((-1.0, 1.0)),
            Self::Contrast | Self::Saturation | Self::Vibrancy => Some((0.0, 2.0)),
            Self::Gamma => Some((0.1, 2.0)),
            Self::Exposure => Some((-5.0, 5.0)),
            Self::Kelvin => Some((1000.0, 40000.0)),
            Self::ChromaticAberration => Some((0.0, 0.05)),
            Self::HueAdjust | Self::SatAdjust | Self::LumAdjust => Some((-1.0, 1.0)),
        }
    }

    /// Range used for validation; unconstrained fields still exclude infinities.
    pub(crate) const fn bounds(self) -> (f32, f32) {
        match self.range() {
            Some(range) => range,
            None => (f32::MIN, f32::MAX),
        }
    }

    /// Slider increment for scalar and band controls.
    pub const fn step(self) -> Option<f32> {
        match self.kind() {
            ParamKind::Vector | ParamKind::Color => None,
            _ => match self {
                Self::Kelvin => Some(100.0),
                Self::ChromaticAberration => Some(0.001),
                _ => Some(0.01),
            },
        }
    }

    pub fn default_value(self) -> ParamValue {
        GradeParameters::default().get(self)
    }

    /// Full control description for the binding layer.
    pub fn descriptor(self) -> ParamDescriptor {
        ParamDescriptor {
            id: self,
            label: self.label(),
            kind: self.kind(),
            range: self.range().map(|(min, max)| [min, max]),
            step: self.step(),
            default: self.default_value(),
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Scalar,
    /// Unconstrained 3-vector (channel mixer rows).
    Vector,
    /// 3-vector constrained to `[0, 1]` per channel.
    Color,
    /// One scalar per hue bucket.
    Bands,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Vector => write!(f, "3-vector"),
            Self::Color => write!(f, "color"),
            Self::Bands => write!(f, "{HUE_BUCKETS}-band"),
        }
    }
}

/// A field value. Serialized untagged: a JSON number, a 3-array, or an 8-array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f32),
    Vector([f32; 3]),
    Bands([f32; HUE_BUCKETS]),
}

impl ParamValue {
    /// Whether this value has the shape `kind` expects.
    pub fn fits(&self, kind: ParamKind) -> bool {
        matches!(
            (self, kind),
            (Self::Scalar(_), ParamKind::Scalar)
                | (Self::Vector(_), ParamKind::Vector | ParamKind::Color)
                | (Self::Bands(_), ParamKind::Bands)
        )
    }

    pub fn components(&self) -> &[f32] {
        match self {
            Self::Scalar(v) => std::slice::from_ref(v),
            Self::Vector(v) => v,
            Self::Bands(v) => v,
        }
    }

    pub(crate) fn components_mut(&mut self) -> &mut [f32] {
        match self {
            Self::Scalar(v) => std::slice::from_mut(v),
            Self::Vector(v) => v,
            Self::Bands(v) => v,
        }
    }
}

/// Everything a control panel needs to present one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDescriptor {
    #[serde(rename = "name")]
    pub id: ParamId,
    pub label: &'static str,
    pub kind: ParamKind,
    /// Inclusive `[min, max]` per component, absent when unconstrained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f32>,
    pub default: ParamValue,
}
