//! Byte/string codec used by explorer views to move text through byte arrays.
//!
//! # Responsibility
//! - Encode text into a UTF-8 style byte sequence.
//! - Decode byte sequences back into text, leniently by default.
//! - Render and parse byte lists for display and command-line input.
//!
//! # Invariants
//! - `decode(encode(s)) == s` for every string.
//! - `decode` never fails and never panics; malformed input degrades instead.
//! - `decode_strict` accepts exactly the well-formed UTF-8 byte sequences.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod decode;
mod encode;
mod format;

pub use decode::{decode, decode_strict, decode_with, DecodeInput};
pub use encode::{encode, encode_into, encoded_len};
pub use format::{format_bytes, parse_bytes, ByteFormat};

pub type CodecResult<T> = Result<T, CodecError>;

/// Decoding policy applied to byte input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Infer sequence length from the leading byte only. Never fails.
    #[default]
    Lenient,
    /// Reject anything that is not well-formed UTF-8.
    Strict,
}

impl DecodeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

/// Malformed-input errors reported by strict decoding and byte-list parsing.
///
/// Offsets are byte positions in the decoded input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A `10xxxxxx` byte where a character should start.
    UnexpectedContinuation { offset: usize, byte: u8 },
    /// Leading byte announcing more than four bytes (`0xF8..=0xFF`).
    InvalidLeadingByte { offset: usize, byte: u8 },
    /// Input ended before the announced sequence was complete.
    Truncated {
        offset: usize,
        expected: usize,
        available: usize,
    },
    /// Byte inside a sequence without the `10` prefix.
    InvalidContinuation { offset: usize, byte: u8 },
    /// Value encoded with more bytes than its range requires.
    Overlong { offset: usize, value: u32 },
    /// Surrogate or value above `U+10FFFF`.
    InvalidCodePoint { offset: usize, value: u32 },
    /// Token in a textual byte list that is not a byte value.
    InvalidByteLiteral(String),
}

impl CodecError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedContinuation { .. } => "unexpected_continuation",
            Self::InvalidLeadingByte { .. } => "invalid_leading_byte",
            Self::Truncated { .. } => "truncated",
            Self::InvalidContinuation { .. } => "invalid_continuation",
            Self::Overlong { .. } => "overlong",
            Self::InvalidCodePoint { .. } => "invalid_code_point",
            Self::InvalidByteLiteral(_) => "invalid_byte_literal",
        }
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedContinuation { offset, byte } => {
                write!(f, "unexpected continuation byte 0x{byte:02x} at offset {offset}")
            }
            Self::InvalidLeadingByte { offset, byte } => {
                write!(f, "invalid leading byte 0x{byte:02x} at offset {offset}")
            }
            Self::Truncated {
                offset,
                expected,
                available,
            } => write!(
                f,
                "truncated sequence at offset {offset}: expected {expected} bytes, found {available}"
            ),
            Self::InvalidContinuation { offset, byte } => {
                write!(f, "invalid continuation byte 0x{byte:02x} at offset {offset}")
            }
            Self::Overlong { offset, value } => {
                write!(f, "overlong encoding of U+{value:04X} at offset {offset}")
            }
            Self::InvalidCodePoint { offset, value } => {
                write!(f, "invalid code point 0x{value:X} at offset {offset}")
            }
            Self::InvalidByteLiteral(token) => write!(f, "invalid byte literal `{token}`"),
        }
    }
}

impl Error for CodecError {}
