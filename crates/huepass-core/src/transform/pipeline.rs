//! Frame-level driver: runs the transform once per output pixel.

use std::time::Instant;

use glam::Vec2;
use rayon::prelude::*;

use super::evaluate::GradeContext;
use crate::color::ColorSample;
use crate::config::PipelineConfig;
use crate::error::GradeError;
use crate::grading::hue_ranges::BucketWeighting;
use crate::image::{BitDepth, GradingImage, SampleSource};
use crate::params::GradeParameters;
use crate::params::shared::SharedGradeParameters;

/// The grading pass. Stateless apart from its configuration.
#[derive(Debug, Clone, Default)]
pub struct GradingPipeline {
    config: PipelineConfig,
}

impl GradingPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Bucket weighting derived from the configured sigma.
    pub fn weighting(&self) -> BucketWeighting {
        BucketWeighting {
            sigma: self.config.hue_sigma,
            min_weight_sum: self.config.min_weight_sum,
        }
    }

    /// All twelve stages for the pixel at `uv`.
    pub fn evaluate<S>(&self, source: &S, uv: Vec2, params: &GradeParameters) -> ColorSample
    where
        S: SampleSource + ?Sized,
    {
        GradeContext::new(params, self.weighting()).grade_at(source, uv)
    }

    /// Stages 2–12 on a single color, as if sampled from a uniform image.
    pub fn grade_color(&self, rgb: ColorSample, params: &GradeParameters) -> ColorSample {
        GradeContext::new(params, self.weighting()).grade(rgb)
    }

    /// Grade every pixel of `source`. Output alpha is always 1.
    pub fn grade_image(
        &self,
        source: &GradingImage,
        params: &GradeParameters,
    ) -> Result<GradingImage, GradeError> {
        if source.is_empty() {
            return Err(GradeError::EmptyImage);
        }
        source.check_buffer()?;

        let start = Instant::now();
        let ctx = GradeContext::new(params, self.weighting());
        let width = source.width as usize;
        let mut pixels = vec![[0.0, 0.0, 0.0, 1.0]; source.pixel_count()];

        let grade_row = |(y, row): (usize, &mut [[f32; 4]])| {
            for (x, out) in row.iter_mut().enumerate() {
                let uv = source.pixel_center(x as u32, y as u32);
                let rgb = ctx.grade_at(source, uv);
                *out = [rgb.x, rgb.y, rgb.z, 1.0];
            }
        };

        let parallel = source.pixel_count() >= self.config.parallel_threshold;
        if parallel {
            pixels.par_chunks_mut(width).enumerate().for_each(grade_row);
        } else {
            pixels.chunks_mut(width).enumerate().for_each(grade_row);
        }

        tracing::debug!(
            width = source.width,
            height = source.height,
            parallel,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "graded frame"
        );

        GradingImage::new(source.width, source.height, pixels, BitDepth::F32)
    }

    /// Grade one frame against the live store. The parameters are read once,
    /// so every pixel of the frame sees the same snapshot.
    pub fn grade_frame(
        &self,
        source: &GradingImage,
        store: &SharedGradeParameters,
    ) -> Result<GradingImage, GradeError> {
        let params = store.snapshot();
        self.grade_image(source, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_empty_image_is_rejected() {
        let pipeline = GradingPipeline::default();
        let empty = GradingImage::solid(0, 4, Vec3::ZERO);
        assert_eq!(
            pipeline.grade_image(&empty, &GradeParameters::default()),
            Err(GradeError::EmptyImage)
        );
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let pipeline = GradingPipeline::default();
        let source = GradingImage {
            width: 4,
            height: 4,
            pixels: vec![[0.5; 4]; 3],
            source_bit_depth: BitDepth::F32,
        };
        assert_eq!(
            pipeline.grade_image(&source, &GradeParameters::default()),
            Err(GradeError::ImageSize {
                expected: 16,
                actual: 3
            })
        );
    }

    #[test]
    fn test_huge_aberration_does_not_panic() {
        let pipeline = GradingPipeline::default();
        let mut params = GradeParameters::default();
        // Bypasses the setter, so the declared range is not enforced.
        params.chromatic_aberration = 1e30;
        let mut pixels = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                pixels.push([x as f32 / 3.0, y as f32 / 3.0, 0.5, 1.0]);
            }
        }
        let source = GradingImage::new(4, 4, pixels, BitDepth::F32).unwrap();
        let out = pipeline.grade_image(&source, &params).unwrap();
        assert!(out.pixels.iter().all(|p| p.iter().all(|c| c.is_finite())));

        let edge = pipeline.evaluate(&source, Vec2::new(1e30, 0.5), &GradeParameters::default());
        assert!(edge.is_finite());
    }

    #[test]
    fn test_solid_frame_matches_grade_color() {
        let pipeline = GradingPipeline::default();
        let params = GradeParameters::default();
        let color = Vec3::new(0.4, 0.5, 0.6);
        let out = pipeline
            .grade_image(&GradingImage::solid(3, 2, color), &params)
            .unwrap();
        let expected = pipeline.grade_color(color, &params);
        for p in &out.pixels {
            assert!((Vec3::new(p[0], p[1], p[2]) - expected).abs().max_element() < EPSILON);
            assert_eq!(p[3], 1.0);
        }
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let mut pixels = Vec::new();
        for y in 0..8 {
            for x in 0..8 {
                pixels.push([x as f32 / 7.0, y as f32 / 7.0, 0.3, 0.5]);
            }
        }
        let source = GradingImage::new(8, 8, pixels, BitDepth::F32).unwrap();
        let mut params = GradeParameters::default();
        params.chromatic_aberration = 0.05;

        let serial = GradingPipeline::new(PipelineConfig {
            parallel_threshold: usize::MAX,
            ..PipelineConfig::default()
        });
        let parallel = GradingPipeline::new(PipelineConfig {
            parallel_threshold: 0,
            ..PipelineConfig::default()
        });
        assert_eq!(
            serial.grade_image(&source, &params).unwrap(),
            parallel.grade_image(&source, &params).unwrap()
        );
    }

    #[test]
    fn test_weighting_follows_config() {
        let pipeline = GradingPipeline::new(PipelineConfig {
            hue_sigma: 0.02,
            ..PipelineConfig::default()
        });
        assert_eq!(pipeline.weighting().sigma, 0.02);
    }
}
