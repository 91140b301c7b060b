//! Source and graded frame representation.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::ColorSample;
use crate::error::GradeError;

/// Bit depth of the frame a [`GradingImage`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit floating point (render targets, HDR buffers).
    F32,
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "8-bit"),
            Self::U16 => write!(f, "16-bit"),
            Self::F32 => write!(f, "32-bit float"),
        }
    }
}

/// Anything the chromatic aberration stage can read color from.
///
/// `uv` is normalized image space: `(0, 0)` is the top-left corner and
/// `(1, 1)` the bottom-right corner.
pub trait SampleSource {
    fn sample(&self, uv: Vec2) -> ColorSample;
}

/// A bare color is a uniform image: every coordinate returns it.
impl SampleSource for ColorSample {
    fn sample(&self, _uv: Vec2) -> ColorSample {
        *self
    }
}

/// Frame representation. Always stored as RGBA f32, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in RGBA f32 format.
    pub pixels: Vec<[f32; 4]>,
    /// Bit depth of the source frame.
    pub source_bit_depth: BitDepth,
}

impl GradingImage {
    /// Wrap a pixel buffer, checking that it matches the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<[f32; 4]>,
        source_bit_depth: BitDepth,
    ) -> Result<Self, GradeError> {
        let image = Self {
            width,
            height,
            pixels,
            source_bit_depth,
        };
        image.check_buffer()?;
        Ok(image)
    }

    /// Fields are public, so a frame can be assembled whose buffer does not
    /// match its dimensions. Readers that index by `(x, y)` check this first.
    pub fn check_buffer(&self) -> Result<(), GradeError> {
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(GradeError::ImageSize {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// A frame filled with one opaque color.
    pub fn solid(width: u32, height: u32, color: ColorSample) -> Self {
        Self {
            width,
            height,
            pixels: vec![[color.x, color.y, color.z, 1.0]; width as usize * height as usize],
            source_bit_depth: BitDepth::F32,
        }
    }

    /// Convert a decoded image into a grading frame.
    pub fn from_dynamic(img: &image::DynamicImage) -> Self {
        let rgba = img.to_rgba32f();
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|p| p.0).collect();

        let source_bit_depth = match img.color() {
            image::ColorType::Rgb16
            | image::ColorType::Rgba16
            | image::ColorType::L16
            | image::ColorType::La16 => BitDepth::U16,
            image::ColorType::Rgb32F | image::ColorType::Rgba32F => BitDepth::F32,
            _ => BitDepth::U8,
        };

        Self {
            width,
            height,
            pixels,
            source_bit_depth,
        }
    }

    /// Quantize to 8-bit RGBA for display or encoding.
    pub fn to_rgba8(&self) -> image::RgbaImage {
        let to_u8 = |c: f32| (crate::color::saturate(c) * 255.0).round() as u8;
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixels[self.index(x, y)];
            image::Rgba([to_u8(p[0]), to_u8(p[1]), to_u8(p[2]), to_u8(p[3])])
        })
    }

    /// Pixel count.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// True when the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGB of the pixel at `(x, y)`.
    pub fn rgb_at(&self, x: u32, y: u32) -> ColorSample {
        let p = self.pixels[self.index(x, y)];
        Vec3::new(p[0], p[1], p[2])
    }

    /// Normalized coordinate of the center of pixel `(x, y)`.
    pub fn pixel_center(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        )
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn texel(&self, x: i64, y: i64) -> ColorSample {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        self.rgb_at(x, y)
    }
}

/// Bilinear filtering with clamp-to-edge addressing.
impl SampleSource for GradingImage {
    fn sample(&self, uv: Vec2) -> ColorSample {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        // Texel centers sit at half-integer positions.
        let px = uv.x * self.width as f32 - 0.5;
        let py = uv.y * self.height as f32 - 0.5;
        if px.is_nan() || py.is_nan() {
            return Vec3::ZERO;
        }
        // Past one texel outside the edge every tap clamps to the border
        // anyway; bounding here keeps the integer neighbours from overflowing
        // and maps infinities onto the border.
        let px = px.clamp(-1.0, self.width as f32);
        let py = py.clamp(-1.0, self.height as f32);

        let x0 = px.floor();
        let y0 = py.floor();
        let fx = px - x0;
        let fy = py - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), fx);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), fx);
        top.lerp(bottom, fy)
    }
}
