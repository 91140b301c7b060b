//! Grading stages. Each stage is a pure function of one color sample and
//! the parameters it reads; [`crate::transform::evaluate`] chains them.

pub mod aberration;
pub mod hue_ranges;
pub mod mixer;
pub mod primaries;
pub mod saturation;
pub mod split_tone;
pub mod tone_map;
pub mod white_balance;
