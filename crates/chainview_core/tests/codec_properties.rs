use chainview_core::{decode, encode, encoded_len, DecodeInput};

const SAMPLES: &[&str] = &[
    "",
    "A",
    "getBlockchainStatus",
    "héllo wörld",
    "€ 1,234.50",
    "区块链浏览器",
    "😀 emoji 𝄞 clef",
    "\u{0}\u{7F}\u{80}\u{7FF}\u{800}\u{FFFF}\u{10000}\u{10FFFF}",
];

#[test]
fn decode_inverts_encode() {
    for sample in SAMPLES {
        assert_eq!(decode(&encode(sample)), *sample, "sample {sample:?}");
    }
}

#[test]
fn encode_matches_native_utf8() {
    for sample in SAMPLES {
        assert_eq!(encode(sample), sample.as_bytes(), "sample {sample:?}");
    }
}

#[test]
fn ascii_encodes_to_one_identical_byte() {
    for byte in 0u8..=0x7F {
        let text = char::from(byte).to_string();
        assert_eq!(encode(&text), vec![byte]);
    }
}

#[test]
fn range_boundaries_use_expected_lengths() {
    let cases = [
        (0x0080, 2),
        (0x07FF, 2),
        (0x0800, 3),
        (0xFFFF, 3),
        (0x1_0000, 4),
        (0x10_FFFF, 4),
    ];
    for (value, expected) in cases {
        let ch = char::from_u32(value).unwrap();
        let bytes = encode(&ch.to_string());
        assert_eq!(bytes.len(), expected, "U+{value:04X}");
        assert_eq!(encoded_len(ch), expected);
        assert_eq!(decode(&bytes), ch.to_string());
    }
}

#[test]
fn known_vectors() {
    assert_eq!(encode("A"), vec![65]);
    assert_eq!(decode(&[65u8]), "A");
    assert_eq!(encode("€"), vec![0xE2, 0x82, 0xAC]);
    assert_eq!(decode(b"\xE2\x82\xAC"), "€");
    assert_eq!(encode("😀"), vec![0xF0, 0x9F, 0x98, 0x80]);
    assert_eq!(decode(b"\xF0\x9F\x98\x80"), "😀");
}

#[test]
fn decode_returns_text_input_unchanged() {
    let text = String::from("already decoded €");
    assert_eq!(decode(&text), text);
    assert_eq!(decode("plain"), "plain");
    assert_eq!(decode(DecodeInput::Text("\u{FFFD}")), "\u{FFFD}");
}

#[test]
fn lenient_decode_never_panics_on_any_byte_pair() {
    for first in 0u8..=0xFF {
        for second in 0u8..=0xFF {
            let decoded = decode(&[first, second, 0x80]);
            assert!(decoded.chars().count() <= 3);
        }
    }
}
