//! Huepass Bridge: the UI binding boundary.
//!
//! JSON message contracts between a control panel and the grading host,
//! the 8-bit hex conversion used by color pickers, and [`ControlBridge`],
//! which applies inbound messages to a [`SharedGradeParameters`] store.
//!
//! [`SharedGradeParameters`]: huepass_core::SharedGradeParameters

pub mod bridge;
pub mod error;
pub mod hex;
pub mod messages;

pub use bridge::ControlBridge;
pub use error::BridgeError;
pub use hex::{decode_hex, encode_hex};
pub use messages::{ControlDescriptor, HostToUi, UiToHost};
