//! Textual byte lists, e.g. `[226, 130, 172]` or `e2 82 ac`.

use super::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};

/// Rendering style for [`format_bytes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteFormat {
    /// `[226, 130, 172]`
    #[default]
    Decimal,
    /// `e2 82 ac`
    Hex,
}

/// Renders `bytes` in the requested style.
pub fn format_bytes(bytes: &[u8], format: ByteFormat) -> String {
    match format {
        ByteFormat::Decimal => {
            let items = bytes
                .iter()
                .map(|byte| byte.to_string())
                .collect::<Vec<_>>();
            format!("[{}]", items.join(", "))
        }
        ByteFormat::Hex => bytes
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Parses a byte list.
///
/// Tokens are separated by commas and/or whitespace and may be wrapped in one
/// pair of square brackets. Each token is decimal (`0..=255`) or `0x` hex.
pub fn parse_bytes(input: &str) -> CodecResult<Vec<u8>> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_byte)
        .collect()
}

fn parse_byte(token: &str) -> CodecResult<u8> {
    let parsed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => token.parse::<u8>(),
    };
    parsed.map_err(|_| CodecError::InvalidByteLiteral(token.to_string()))
}
