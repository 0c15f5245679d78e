//! Text to byte-sequence encoding.

/// Encodes `text` into its byte sequence.
///
/// Code points are written in order using 1 to 4 bytes each, selected by
/// range: `..=0x7F`, `0x80..=0x7FF`, `0x800..=0xFFFF`, `0x10000..=0x10FFFF`.
pub fn encode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    encode_into(text, &mut bytes);
    bytes
}

/// Appends the encoding of `text` to `out`.
pub fn encode_into(text: &str, out: &mut Vec<u8>) {
    for ch in text.chars() {
        push_char(u32::from(ch), out);
    }
}

/// Returns how many bytes [`encode`] emits for `ch`.
pub fn encoded_len(ch: char) -> usize {
    match u32::from(ch) {
        0x1_0000..=0x10_FFFF => 4,
        0x0800..=0xFFFF => 3,
        0x0080..=0x07FF => 2,
        _ => 1,
    }
}

fn push_char(c: u32, out: &mut Vec<u8>) {
    match c {
        0x1_0000..=0x10_FFFF => out.extend_from_slice(&[
            0xF0 | ((c >> 18) & 0x07) as u8,
            0x80 | ((c >> 12) & 0x3F) as u8,
            0x80 | ((c >> 6) & 0x3F) as u8,
            0x80 | (c & 0x3F) as u8,
        ]),
        0x0800..=0xFFFF => out.extend_from_slice(&[
            0xE0 | ((c >> 12) & 0x0F) as u8,
            0x80 | ((c >> 6) & 0x3F) as u8,
            0x80 | (c & 0x3F) as u8,
        ]),
        0x0080..=0x07FF => {
            out.extend_from_slice(&[0xC0 | ((c >> 6) & 0x1F) as u8, 0x80 | (c & 0x3F) as u8])
        }
        _ => out.push((c & 0xFF) as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::{encode, encode_into, encoded_len};

    #[test]
    fn ascii_maps_to_single_bytes() {
        assert_eq!(encode("A"), vec![65]);
        assert_eq!(encode("getPeers"), b"getPeers".to_vec());
    }

    #[test]
    fn euro_sign_uses_three_bytes() {
        assert_eq!(encode("€"), vec![0xE2, 0x82, 0xAC]);
    }

    #[test]
    fn encoded_len_follows_range_boundaries() {
        let cases = [
            ('\u{7F}', 1),
            ('\u{80}', 2),
            ('\u{7FF}', 2),
            ('\u{800}', 3),
            ('\u{FFFF}', 3),
            ('\u{10000}', 4),
            ('\u{10FFFF}', 4),
        ];
        for (ch, expected) in cases {
            assert_eq!(encoded_len(ch), expected, "U+{:04X}", u32::from(ch));
            assert_eq!(encode(ch.encode_utf8(&mut [0; 4])).len(), expected);
        }
    }

    #[test]
    fn encode_into_appends_without_clearing() {
        let mut out = vec![0x00];
        encode_into("é", &mut out);
        assert_eq!(out, vec![0x00, 0xC3, 0xA9]);
    }
}
