//! Discrete parameter edits sent from the UI binding layer.

use serde::{Deserialize, Serialize};

use super::GradeParameters;
use super::field::{ParamId, ParamValue};
use crate::config::WritePolicy;
use crate::error::GradeError;

/// One "set field F to value V" message.
///
/// Commands are independent: no ordering is required across different
/// fields, only read-after-write on the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ParamCommand {
    /// Replace a whole field.
    Set { param: ParamId, value: ParamValue },
    /// Replace one hue bucket of a band field.
    SetBand {
        param: ParamId,
        index: usize,
        value: f32,
    },
    /// Restore one field to its default.
    ResetParam { param: ParamId },
    /// Restore every field to its default.
    ResetAll,
}

impl ParamCommand {
    /// The field this command touches, or `None` for [`ParamCommand::ResetAll`].
    pub fn target(&self) -> Option<ParamId> {
        match self {
            Self::Set { param, .. } | Self::SetBand { param, .. } | Self::ResetParam { param } => {
                Some(*param)
            }
            Self::ResetAll => None,
        }
    }

    /// Apply to `params` under `policy`. Returns whether anything changed.
    pub fn apply(&self, params: &mut GradeParameters, policy: WritePolicy) -> Result<bool, GradeError> {
        match self {
            Self::Set { param, value } => {
                let before = params.get(*param);
                match policy {
                    WritePolicy::Reject => params.set(*param, *value)?,
                    WritePolicy::Clamp => {
                        params.set_clamped(*param, *value)?;
                    }
                }
                Ok(params.get(*param) != before)
            }
            Self::SetBand {
                param,
                index,
                value,
            } => {
                let before = params.get(*param);
                let value = match policy {
                    WritePolicy::Reject => *value,
                    WritePolicy::Clamp => clamp_band(*param, *value)?,
                };
                params.set_band(*param, *index, value)?;
                Ok(params.get(*param) != before)
            }
            Self::ResetParam { param } => {
                let before = params.get(*param);
                params.reset_param(*param);
                Ok(params.get(*param) != before)
            }
            Self::ResetAll => {
                let defaults = GradeParameters::default();
                if *params == defaults {
                    Ok(false)
                } else {
                    *params = defaults;
                    Ok(true)
                }
            }
        }
    }
}

fn clamp_band(param: ParamId, value: f32) -> Result<f32, GradeError> {
    let (min, max) = param.bounds();
    if value.is_nan() {
        return Err(GradeError::OutOfRange {
            param,
            value,
            min,
            max,
        });
    }
    Ok(value.clamp(min, max))
}
