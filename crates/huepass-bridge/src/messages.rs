//! Message contracts between the control panel and the grading host.
//!
//! Both directions use `#[serde(tag = "type", content = "data")]`, so a
//! message reads `{"type":"SetParam","data":{"name":"exposure","value":0.5}}`.
//! Field names are the canonical camelCase names of [`ParamId`].

use serde::{Deserialize, Serialize};

use huepass_core::{GradeParameters, ParamId, ParamKind, ParamValue};

use crate::error::BridgeError;
use crate::hex::encode_hex;

/// Messages from the UI to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToHost {
    /// Request a full state sync after the UI connects.
    RequestState,

    /// Set one field. Names are matched against the parameter table by
    /// the host, so an unknown name is answered with an error message.
    SetParam { name: String, value: ParamValue },

    /// Set a tint from a color picker.
    SetColor { name: String, hex: String },

    /// Set one hue bucket of a band field.
    SetBand {
        name: String,
        index: usize,
        value: f32,
    },

    /// Restore one field to its default.
    ResetParam { name: String },

    /// Restore every field to its default.
    ResetGrade,
}

impl UiToHost {
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Messages from the host to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostToUi {
    /// Full state sync, sent in answer to [`UiToHost::RequestState`].
    Initialize {
        params: GradeParameters,
        controls: Vec<ControlDescriptor>,
    },

    /// One field now holds `value`. Sent after every accepted write, carrying
    /// the stored value so a clamped write moves the control back in range.
    ParamChanged { name: ParamId, value: ParamValue },

    /// Several fields changed at once (reset).
    ParamsUpdated { params: GradeParameters },

    /// A message could not be decoded or applied.
    Error { message: String },
}

impl HostToUi {
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Presentation data for one control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlDescriptor {
    pub name: ParamId,
    pub label: String,
    pub kind: ParamKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f32>,
    pub value: ParamValue,
    pub default: ParamValue,
    /// `#rrggbb` form of color fields, for the picker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

impl ControlDescriptor {
    pub fn new(id: ParamId, params: &GradeParameters) -> Self {
        let descriptor = id.descriptor();
        let value = params.get(id);
        let hex = match (descriptor.kind, value) {
            (ParamKind::Color, ParamValue::Vector(rgb)) => Some(encode_hex(rgb)),
            _ => None,
        };
        Self {
            name: id,
            label: descriptor.label.to_owned(),
            kind: descriptor.kind,
            range: descriptor.range,
            step: descriptor.step,
            value,
            default: descriptor.default,
            hex,
        }
    }

    /// One descriptor per field, in control-panel order.
    pub fn all(params: &GradeParameters) -> Vec<Self> {
        ParamId::ALL
            .into_iter()
            .map(|id| Self::new(id, params))
            .collect()
    }
}
