//! 8-bit hex strings for color pickers.
//!
//! ```text
//! encode: channel_255 = round_half_even(clamp(channel, 0, 1) × 255)
//! decode: channel     = channel_255 / 255
//! ```
//!
//! Strings are `#rrggbb`, lowercase on output. Decoding accepts either case
//! and an optional leading `#`, but exactly six digits.

use std::str::FromStr;

use palette::Srgb;

use crate::error::BridgeError;

fn to_u8(channel: f32) -> u8 {
    let clamped = if channel.is_nan() {
        0.0
    } else {
        channel.clamp(0.0, 1.0)
    };
    (clamped * 255.0).round_ties_even() as u8
}

/// Format a color as `#rrggbb`.
pub fn encode_hex(rgb: [f32; 3]) -> String {
    let srgb = Srgb::new(to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]));
    format!("#{srgb:x}")
}

/// Parse `#rrggbb` (or `rrggbb`) into `[0, 1]` channels.
pub fn decode_hex(input: &str) -> Result<[f32; 3], BridgeError> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if digits.len() != 6 {
        return Err(hex_error(input, "expected 6 hex digits"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(hex_error(input, "non-hex character"));
    }

    let srgb = Srgb::<u8>::from_str(digits).map_err(|e| hex_error(input, &e.to_string()))?;
    Ok([
        f32::from(srgb.red) / 255.0,
        f32::from(srgb.green) / 255.0,
        f32::from(srgb.blue) / 255.0,
    ])
}

fn hex_error(input: &str, reason: &str) -> BridgeError {
    BridgeError::Hex {
        input: input.to_owned(),
        reason: reason.to_owned(),
    }
}
