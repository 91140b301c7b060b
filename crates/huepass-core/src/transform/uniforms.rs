//! GPU-ready packing of [`GradeParameters`].
//!
//! Laid out for a std140 uniform block: every vector is padded to a vec4
//! and the eight-wide bands are split into two vec4s. Loose scalars are
//! grouped four to a vec4.

use bytemuck::{Pod, Zeroable};

use crate::params::{GradeParameters, HUE_BUCKETS};

/// Shader-side layout of the grade. 224 bytes.
///
/// ```text
/// scalars_a = (brightness, contrast, saturation, vibrancy)
/// scalars_b = (hue_offset, gamma, split_tone_balance, exposure)
/// scalars_c = (kelvin, chromatic_aberration, 0, 0)
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GradeUniforms {
    pub red_mix: [f32; 4],
    pub green_mix: [f32; 4],
    pub blue_mix: [f32; 4],
    pub shadow_tint: [f32; 4],
    pub highlight_tint: [f32; 4],
    pub hue_adjust: [[f32; 4]; 2],
    pub sat_adjust: [[f32; 4]; 2],
    pub lum_adjust: [[f32; 4]; 2],
    pub scalars_a: [f32; 4],
    pub scalars_b: [f32; 4],
    pub scalars_c: [f32; 4],
}

impl GradeUniforms {
    /// Raw bytes for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

fn vec4(v: [f32; 3]) -> [f32; 4] {
    [v[0], v[1], v[2], 0.0]
}

fn bands(v: &[f32; HUE_BUCKETS]) -> [[f32; 4]; 2] {
    [[v[0], v[1], v[2], v[3]], [v[4], v[5], v[6], v[7]]]
}

impl From<&GradeParameters> for GradeUniforms {
    fn from(p: &GradeParameters) -> Self {
        Self {
            red_mix: vec4(p.red_mix),
            green_mix: vec4(p.green_mix),
            blue_mix: vec4(p.blue_mix),
            shadow_tint: vec4(p.shadow_tint),
            highlight_tint: vec4(p.highlight_tint),
            hue_adjust: bands(&p.hue_adjust),
            sat_adjust: bands(&p.sat_adjust),
            lum_adjust: bands(&p.lum_adjust),
            scalars_a: [p.brightness, p.contrast, p.saturation, p.vibrancy],
            scalars_b: [p.hue_offset, p.gamma, p.split_tone_balance, p.exposure],
            scalars_c: [p.kelvin, p.chromatic_aberration, 0.0, 0.0],
        }
    }
}
