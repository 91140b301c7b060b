//! Applies inbound UI messages to the live parameter store.

use huepass_core::{GradeError, ParamCommand, ParamId, ParamValue, SharedGradeParameters};

use crate::error::BridgeError;
use crate::hex::decode_hex;
use crate::messages::{ControlDescriptor, HostToUi, UiToHost};

/// Host side of the control panel connection.
///
/// Every inbound message is answered with zero or more outbound messages;
/// failures become [`HostToUi::Error`] and never abort the host.
#[derive(Debug, Clone, Default)]
pub struct ControlBridge {
    store: SharedGradeParameters,
}

impl ControlBridge {
    pub fn new(store: SharedGradeParameters) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedGradeParameters {
        &self.store
    }

    /// Full state sync for a newly connected UI.
    pub fn initialize(&self) -> HostToUi {
        let params = self.store.snapshot();
        let controls = ControlDescriptor::all(&params);
        HostToUi::Initialize { params, controls }
    }

    /// Decode and handle one raw JSON message.
    pub fn handle_json(&self, raw: &str) -> Vec<HostToUi> {
        match UiToHost::from_json(raw) {
            Ok(msg) => self.handle(msg),
            Err(err) => {
                tracing::warn!(%err, "failed to decode UI message");
                vec![HostToUi::Error {
                    message: err.to_string(),
                }]
            }
        }
    }

    /// Handle one decoded message.
    pub fn handle(&self, msg: UiToHost) -> Vec<HostToUi> {
        match self.dispatch(msg) {
            Ok(replies) => replies,
            Err(err) => {
                tracing::warn!(%err, "UI message rejected");
                vec![HostToUi::Error {
                    message: err.to_string(),
                }]
            }
        }
    }

    fn dispatch(&self, msg: UiToHost) -> Result<Vec<HostToUi>, BridgeError> {
        match msg {
            UiToHost::RequestState => {
                tracing::info!("UI requested state");
                Ok(vec![self.initialize()])
            }
            UiToHost::SetParam { name, value } => {
                let param = lookup(&name)?;
                self.write(ParamCommand::Set { param, value })
            }
            UiToHost::SetColor { name, hex } => {
                let param = lookup(&name)?;
                let value = ParamValue::Vector(decode_hex(&hex)?);
                self.write(ParamCommand::Set { param, value })
            }
            UiToHost::SetBand { name, index, value } => {
                let param = lookup(&name)?;
                self.write(ParamCommand::SetBand {
                    param,
                    index,
                    value,
                })
            }
            UiToHost::ResetParam { name } => {
                let param = lookup(&name)?;
                self.write(ParamCommand::ResetParam { param })
            }
            UiToHost::ResetGrade => {
                tracing::info!("UI reset the grade");
                self.store.apply(&ParamCommand::ResetAll)?;
                Ok(vec![HostToUi::ParamsUpdated {
                    params: self.store.snapshot(),
                }])
            }
        }
    }

    /// Apply a single-field command and echo the stored value.
    fn write(&self, cmd: ParamCommand) -> Result<Vec<HostToUi>, BridgeError> {
        self.store.apply(&cmd)?;
        Ok(cmd
            .target()
            .map(|name| HostToUi::ParamChanged {
                name,
                value: self.store.get(name),
            })
            .into_iter()
            .collect())
    }
}

fn lookup(name: &str) -> Result<ParamId, GradeError> {
    ParamId::from_name(name).ok_or_else(|| GradeError::UnknownParam(name.to_owned()))
}
