//! Live parameter store shared between the UI writer and the render loop.
//!
//! One writer (the UI binding layer), many readers (frame grading). Readers
//! take a [`snapshot`](SharedGradeParameters::snapshot) once per frame so
//! fields used together, such as the two split-tone tints, never tear.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::GradeParameters;
use super::command::ParamCommand;
use super::field::{ParamId, ParamValue};
use crate::config::WritePolicy;
use crate::error::GradeError;
use crate::transform::uniforms::GradeUniforms;

struct Inner {
    params: RwLock<GradeParameters>,
    /// Bumped on every effective write, while the write lock is held.
    generation: AtomicU64,
    policy: WritePolicy,
}

/// Cloneable handle to the session's [`GradeParameters`].
#[derive(Clone)]
pub struct SharedGradeParameters {
    inner: Arc<Inner>,
}

impl Default for SharedGradeParameters {
    fn default() -> Self {
        Self::new(GradeParameters::default(), WritePolicy::default())
    }
}

impl std::fmt::Debug for SharedGradeParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedGradeParameters")
            .field("generation", &self.generation())
            .field("policy", &self.inner.policy)
            .finish_non_exhaustive()
    }
}

impl SharedGradeParameters {
    pub fn new(params: GradeParameters, policy: WritePolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                params: RwLock::new(params),
                generation: AtomicU64::new(0),
                policy,
            }),
        }
    }

    pub fn policy(&self) -> WritePolicy {
        self.inner.policy
    }

    /// Number of effective writes since creation.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Owned copy of the current parameters.
    pub fn snapshot(&self) -> GradeParameters {
        self.inner.params.read().clone()
    }

    /// Run `f` against the current parameters under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&GradeParameters) -> R) -> R {
        f(&*self.inner.params.read())
    }

    /// Current value of one field.
    pub fn get(&self, id: ParamId) -> ParamValue {
        self.inner.params.read().get(id)
    }

    /// Apply a command under the store's write policy.
    /// Returns whether the parameters changed.
    pub fn apply(&self, cmd: &ParamCommand) -> Result<bool, GradeError> {
        let mut params = self.inner.params.write();
        match cmd.apply(&mut params, self.inner.policy) {
            Ok(true) => {
                let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
                match cmd.target() {
                    Some(param) => tracing::debug!(
                        %param,
                        value = ?params.get(param),
                        generation,
                        "grade parameter updated"
                    ),
                    None => tracing::info!(generation, "grade parameters reset to defaults"),
                }
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => {
                tracing::warn!(%err, "rejected grade parameter write");
                Err(err)
            }
        }
    }

    /// Shorthand for [`ParamCommand::Set`]. Returns the stored value, which
    /// differs from `value` when the store clamps.
    pub fn set(&self, param: ParamId, value: ParamValue) -> Result<ParamValue, GradeError> {
        self.apply(&ParamCommand::Set { param, value })?;
        Ok(self.get(param))
    }

    /// Replace the whole parameter set after validating it.
    pub fn replace(&self, new_params: GradeParameters) -> Result<bool, GradeError> {
        new_params.validate()?;
        let mut params = self.inner.params.write();
        if *params == new_params {
            return Ok(false);
        }
        *params = new_params;
        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(generation, "grade parameters replaced");
        Ok(true)
    }
}

/// Host-side cache of the packed uniform block.
///
/// Re-packs only when the store's generation has moved since the last
/// refresh, so an idle UI costs one atomic load per frame.
#[derive(Debug, Clone)]
pub struct UniformSync {
    generation: Option<u64>,
    uniforms: GradeUniforms,
}

impl Default for UniformSync {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSync {
    pub fn new() -> Self {
        Self {
            generation: None,
            uniforms: GradeUniforms::from(&GradeParameters::default()),
        }
    }

    /// Returns the re-packed block when it must be uploaded, `None` when the
    /// previously uploaded block is still current.
    pub fn refresh(&mut self, store: &SharedGradeParameters) -> Option<&GradeUniforms> {
        if self.generation == Some(store.generation()) {
            return None;
        }
        let params = store.inner.params.read();
        // Read under the lock so the generation matches the packed values.
        let generation = store.inner.generation.load(Ordering::Acquire);
        self.uniforms = GradeUniforms::from(&*params);
        self.generation = Some(generation);
        Some(&self.uniforms)
    }

    /// The most recently packed block.
    pub fn current(&self) -> &GradeUniforms {
        &self.uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_visible_to_next_read() {
        let store = SharedGradeParameters::default();
        let reader = store.clone();
        store
            .set(ParamId::Kelvin, ParamValue::Scalar(5500.0))
            .unwrap();
        assert_eq!(reader.snapshot().kelvin, 5500.0);
        assert_eq!(reader.generation(), 1);
    }

    #[test]
    fn test_noop_write_keeps_generation() {
        let store = SharedGradeParameters::default();
        store.set(ParamId::Contrast, ParamValue::Scalar(1.0)).unwrap();
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_rejected_write_keeps_generation() {
        let store = SharedGradeParameters::default();
        assert!(store.set(ParamId::Contrast, ParamValue::Scalar(4.0)).is_err());
        assert_eq!(store.generation(), 0);
        assert_eq!(store.snapshot().contrast, 1.0);
    }

    #[test]
    fn test_clamping_store_returns_stored_value() {
        let store = SharedGradeParameters::new(GradeParameters::default(), WritePolicy::Clamp);
        let stored = store.set(ParamId::Contrast, ParamValue::Scalar(4.0)).unwrap();
        assert_eq!(stored, ParamValue::Scalar(2.0));
    }

    #[test]
    fn test_replace_validates() {
        let store = SharedGradeParameters::default();
        let mut bad = GradeParameters::default();
        bad.gamma = 0.0;
        assert!(store.replace(bad).is_err());
        assert_eq!(store.replace(GradeParameters::identity()), Ok(true));
        assert_eq!(store.snapshot(), GradeParameters::identity());
    }

    #[test]
    fn test_uniform_sync_repacks_only_on_change() {
        let store = SharedGradeParameters::default();
        let mut sync = UniformSync::new();
        assert!(sync.refresh(&store).is_some());
        assert!(sync.refresh(&store).is_none());

        store
            .set(ParamId::Exposure, ParamValue::Scalar(1.5))
            .unwrap();
        let packed = sync.refresh(&store).expect("generation moved");
        assert_eq!(packed.scalars_b[3], 1.5);
        assert!(sync.refresh(&store).is_none());
    }

    #[test]
    fn test_concurrent_writer_and_reader() {
        let store = SharedGradeParameters::default();
        let writer = store.clone();
        let handle = std::thread::spawn(move || {
            for i in 0..100 {
                let v = (i % 10) as f32 / 10.0;
                writer
                    .apply(&ParamCommand::SetBand {
                        param: ParamId::HueAdjust,
                        index: i % 8,
                        value: v,
                    })
                    .unwrap();
            }
        });
        for _ in 0..100 {
            assert!(store.snapshot().validate().is_ok());
        }
        handle.join().unwrap();
        assert!(store.generation() > 0);
    }
}
