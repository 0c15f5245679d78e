//! Byte-sequence to text decoding.
//!
//! # Lenient mode
//! The sequence length is taken from the run of leading 1-bits of the first
//! byte (`110xxxxx` -> 2, `1110xxxx` -> 3, ...). The following bytes are not
//! checked for their `10` prefix, so malformed input decodes to something
//! rather than failing:
//! - a lone `10xxxxxx` byte yields its low 6 bits as a character,
//! - `0xFF` (no 0-bit) and bytes below `0x80` map to `U+0000..=U+00FF`,
//! - a sequence cut off by the end of input uses the bytes that remain,
//! - values that are not Unicode scalar values become `U+FFFD`.
//!
//! # Strict mode
//! Plain UTF-8 validation with the byte offset of the first fault.

use super::{CodecError, CodecResult, DecodeMode};
use log::{debug, warn};

/// Input accepted by [`decode`]: raw bytes or text that was already decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeInput<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for DecodeInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for DecodeInput<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Self::Bytes(value.as_slice())
    }
}

impl<'a> From<&'a Vec<u8>> for DecodeInput<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Self::Bytes(value.as_slice())
    }
}

impl<'a> From<&'a str> for DecodeInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for DecodeInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

/// Decodes bytes into text using the lenient algorithm.
///
/// Text input is returned unchanged.
pub fn decode<'a>(input: impl Into<DecodeInput<'a>>) -> String {
    match input.into() {
        DecodeInput::Text(text) => text.to_owned(),
        DecodeInput::Bytes(bytes) => decode_lenient(bytes),
    }
}

/// Decodes bytes as well-formed UTF-8, reporting the first fault.
pub fn decode_strict(bytes: &[u8]) -> CodecResult<String> {
    scan_strict(bytes).inspect_err(|err| {
        warn!(
            "event=decode module=codec status=error mode=strict input_len={} error_code={} error={}",
            bytes.len(),
            err.code(),
            err
        );
    })
}

/// Decodes with the given policy. Text input is returned unchanged.
pub fn decode_with<'a>(input: impl Into<DecodeInput<'a>>, mode: DecodeMode) -> CodecResult<String> {
    match (input.into(), mode) {
        (DecodeInput::Text(text), _) => Ok(text.to_owned()),
        (DecodeInput::Bytes(bytes), DecodeMode::Lenient) => Ok(decode_lenient(bytes)),
        (DecodeInput::Bytes(bytes), DecodeMode::Strict) => decode_strict(bytes),
    }
}

fn decode_lenient(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut replaced = 0usize;
    let mut pos = 0;

    while pos < bytes.len() {
        let lead = bytes[pos];
        let Some(len) = announced_len(lead) else {
            text.push(char::from(lead));
            pos += 1;
            continue;
        };

        let end = bytes.len().min(pos + len);
        // Why: a 7-byte lead carries up to 36 payload bits; a `u32` shift would
        // drop the high bits and turn an out-of-range value into a valid char.
        let value = bytes[pos + 1..end]
            .iter()
            .fold(u64::from(lead & payload_mask(len)), |acc, &byte| {
                (acc << 6) | u64::from(byte & 0x3F)
            });

        match u32::try_from(value).ok().and_then(char::from_u32) {
            Some(ch) => text.push(ch),
            None => {
                text.push(char::REPLACEMENT_CHARACTER);
                replaced += 1;
            }
        }
        pos = end;
    }

    if replaced > 0 {
        debug!(
            "event=decode module=codec status=lossy mode=lenient input_len={} replaced={}",
            bytes.len(),
            replaced
        );
    }
    text
}

fn scan_strict(bytes: &[u8]) -> CodecResult<String> {
    let mut text = String::with_capacity(bytes.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let lead = bytes[pos];
        let len = match announced_len(lead) {
            None if lead < 0x80 => {
                text.push(char::from(lead));
                pos += 1;
                continue;
            }
            Some(1) => {
                return Err(CodecError::UnexpectedContinuation {
                    offset: pos,
                    byte: lead,
                })
            }
            Some(len @ 2..=4) => len,
            _ => {
                return Err(CodecError::InvalidLeadingByte {
                    offset: pos,
                    byte: lead,
                })
            }
        };

        let end = bytes.len().min(pos + len);
        let mut value = u32::from(lead & payload_mask(len));
        for (index, &byte) in bytes[pos + 1..end].iter().enumerate() {
            if byte & 0xC0 != 0x80 {
                return Err(CodecError::InvalidContinuation {
                    offset: pos + 1 + index,
                    byte,
                });
            }
            value = (value << 6) | u32::from(byte & 0x3F);
        }
        if end - pos < len {
            return Err(CodecError::Truncated {
                offset: pos,
                expected: len,
                available: end - pos,
            });
        }
        if value < min_value(len) {
            return Err(CodecError::Overlong { offset: pos, value });
        }

        let ch =
            char::from_u32(value).ok_or(CodecError::InvalidCodePoint { offset: pos, value })?;
        text.push(ch);
        pos = end;
    }

    Ok(text)
}

/// Length announced by a `1…10…` leading byte; `None` for ASCII and `0xFF`.
fn announced_len(lead: u8) -> Option<usize> {
    match lead.leading_ones() {
        0 | 8 => None,
        ones => Some(ones as usize),
    }
}

/// Mask for the low `7 - len` payload bits of a leading byte.
fn payload_mask(len: usize) -> u8 {
    (0xFFu32 >> (len + 1)) as u8
}

fn min_value(len: usize) -> u32 {
    match len {
        2 => 0x80,
        3 => 0x800,
        _ => 0x1_0000,
    }
}

#[cfg(test)]
mod tests {
    use super::{announced_len, decode, decode_strict, decode_with, payload_mask};
    use crate::codec::{CodecError, DecodeMode};

    #[test]
    fn announced_len_counts_leading_ones() {
        assert_eq!(announced_len(0x41), None);
        assert_eq!(announced_len(0x80), Some(1));
        assert_eq!(announced_len(0xC3), Some(2));
        assert_eq!(announced_len(0xE2), Some(3));
        assert_eq!(announced_len(0xF0), Some(4));
        assert_eq!(announced_len(0xFE), Some(7));
        assert_eq!(announced_len(0xFF), None);
    }

    #[test]
    fn payload_mask_keeps_seven_minus_len_bits() {
        assert_eq!(payload_mask(1), 0b0011_1111);
        assert_eq!(payload_mask(2), 0b0001_1111);
        assert_eq!(payload_mask(3), 0b0000_1111);
        assert_eq!(payload_mask(4), 0b0000_0111);
        assert_eq!(payload_mask(7), 0);
    }

    #[test]
    fn lenient_lone_continuation_keeps_low_bits() {
        assert_eq!(decode(b"\xBF"), "\u{3F}");
        assert_eq!(decode(b"\x41\x81\x42"), "A\u{1}B");
    }

    #[test]
    fn lenient_ignores_continuation_prefix() {
        // 0x41 lacks the `10` prefix but still contributes its low 6 bits.
        assert_eq!(decode(b"\xC3\x41"), "\u{C1}");
    }

    #[test]
    fn lenient_maps_ff_to_latin1() {
        assert_eq!(decode(b"\xFF"), "\u{FF}");
    }

    #[test]
    fn lenient_uses_remaining_bytes_when_truncated() {
        assert_eq!(decode(b"\x41\xE2\x82"), "A\u{82}");
        assert_eq!(decode(b"\xC3"), "\u{3}");
    }

    #[test]
    fn lenient_replaces_surrogates_and_out_of_range_values() {
        assert_eq!(decode(b"\xED\xA0\x80"), "\u{FFFD}");
        assert_eq!(decode(b"\xF7\xBF\xBF\xBF"), "\u{FFFD}");
        assert_eq!(
            decode(b"\xFE\xBF\xBF\xBF\xBF\xBF\xBF\x41"),
            "\u{FFFD}A"
        );
    }

    #[test]
    fn strict_reports_offsets() {
        assert_eq!(
            decode_strict(&[0x41, 0x80]),
            Err(CodecError::UnexpectedContinuation {
                offset: 1,
                byte: 0x80
            })
        );
        assert_eq!(
            decode_strict(&[0xF8, 0x88, 0x80, 0x80, 0x80]),
            Err(CodecError::InvalidLeadingByte {
                offset: 0,
                byte: 0xF8
            })
        );
        assert_eq!(
            decode_strict(&[0xE2, 0x82]),
            Err(CodecError::Truncated {
                offset: 0,
                expected: 3,
                available: 2
            })
        );
        assert_eq!(
            decode_strict(&[0xE2, 0x41, 0xAC]),
            Err(CodecError::InvalidContinuation {
                offset: 1,
                byte: 0x41
            })
        );
        assert_eq!(
            decode_strict(&[0xC0, 0x80]),
            Err(CodecError::Overlong {
                offset: 0,
                value: 0
            })
        );
        assert_eq!(
            decode_strict(&[0xED, 0xA0, 0x80]),
            Err(CodecError::InvalidCodePoint {
                offset: 0,
                value: 0xD800
            })
        );
    }

    #[test]
    fn decode_with_passes_text_through_in_both_modes() {
        assert_eq!(decode_with("ready", DecodeMode::Strict).unwrap(), "ready");
        assert_eq!(decode_with("ready", DecodeMode::Lenient).unwrap(), "ready");
    }

    #[test]
    fn decode_with_strict_surfaces_errors() {
        assert!(decode_with(b"\xFF", DecodeMode::Strict).is_err());
        assert_eq!(decode_with(b"\xFF", DecodeMode::Lenient).unwrap(), "\u{FF}");
    }
}
