//! Runtime configuration for the grading pipeline and parameter store.

use serde::{Deserialize, Serialize};

/// Default Gaussian width of each hue bucket, in turns.
const DEFAULT_HUE_SIGMA: f32 = 0.08;
/// Total bucket weight below which the per-range shift is treated as zero.
const DEFAULT_MIN_WEIGHT_SUM: f32 = 1e-6;
/// Pixel count at which frame grading switches to rayon.
const DEFAULT_PARALLEL_THRESHOLD: usize = 128 * 128;

/// How the parameter store treats a write outside a field's declared range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Refuse the write with [`GradeError::OutOfRange`](crate::GradeError).
    /// The stored value is left untouched.
    #[default]
    Reject,
    /// Clamp the value into the declared range and accept it.
    /// NaN is still refused.
    Clamp,
}

impl WritePolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(Self::Reject),
            "clamp" => Some(Self::Clamp),
            _ => None,
        }
    }
}

/// Pipeline configuration.
///
/// The bucket count and bucket centers of the per-hue-range stage are fixed
/// constants in [`crate::params`]; only the bucket width is tunable here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Gaussian sigma of each hue bucket, in turns.
    pub hue_sigma: f32,
    /// Minimum total bucket weight before the per-range shift falls back to zero.
    pub min_weight_sum: f32,
    /// Frames with at least this many pixels are graded in parallel.
    pub parallel_threshold: usize,
    /// Out-of-range handling for parameter writes.
    pub write_policy: WritePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hue_sigma: DEFAULT_HUE_SIGMA,
            min_weight_sum: DEFAULT_MIN_WEIGHT_SUM,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            write_policy: WritePolicy::Reject,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `HUEPASS_HUE_SIGMA`, `HUEPASS_PARALLEL_THRESHOLD`
    /// and `HUEPASS_WRITE_POLICY`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(raw) = env_var("HUEPASS_HUE_SIGMA") {
            match raw.parse::<f32>() {
                Ok(sigma) if sigma.is_finite() && sigma > 0.0 => config.hue_sigma = sigma,
                _ => tracing::warn!("ignoring HUEPASS_HUE_SIGMA={raw:?}"),
            }
        }
        if let Some(raw) = env_var("HUEPASS_PARALLEL_THRESHOLD") {
            match raw.parse::<usize>() {
                Ok(threshold) => config.parallel_threshold = threshold,
                Err(_) => tracing::warn!("ignoring HUEPASS_PARALLEL_THRESHOLD={raw:?}"),
            }
        }
        if let Some(raw) = env_var("HUEPASS_WRITE_POLICY") {
            match WritePolicy::parse(&raw) {
                Some(policy) => config.write_policy = policy,
                None => tracing::warn!("ignoring HUEPASS_WRITE_POLICY={raw:?}"),
            }
        }

        config
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
