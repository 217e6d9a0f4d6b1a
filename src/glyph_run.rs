//! Glyph run encoding for Identity-H text.
//!
//! Each glyph index becomes a 2-byte big-endian code. The codes are written as
//! lowercase hex digits with no separators, so a batch `[50, 53)` encodes to
//! `003200330034`.
//!
//! Indices above `u16::MAX` are truncated to their low 16 bits. Fonts cannot
//! declare more than 65535 glyphs, so this only matters for synthetic input.

use byteorder::{BigEndian, ByteOrder};

use crate::layout::GlyphBatch;

/// Bytes per glyph code under Identity-H.
pub const BYTES_PER_GLYPH: usize = 2;

/// Encode the glyph indices of `batch` as hex digits.
pub fn encode_hex(batch: &GlyphBatch) -> String {
    let mut codes = vec![0u8; batch.len() * BYTES_PER_GLYPH];
    for (chunk, gid) in codes.chunks_exact_mut(BYTES_PER_GLYPH).zip(batch.range()) {
        BigEndian::write_u16(chunk, gid as u16);
    }

    let mut hex = String::with_capacity(codes.len() * 2);
    for byte in &codes {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Encode `batch` as a hex string operand, `<...>`.
pub fn hex_operand(batch: &GlyphBatch) -> String {
    format!("<{}>", encode_hex(batch))
}

/// Decode hex digits (with or without angle brackets) back to glyph codes.
///
/// Returns `None` on odd-length input, non-hex digits, or a length that is not
/// a multiple of the code width.
pub fn decode_hex(text: &str) -> Option<Vec<u16>> {
    let hex = text.trim().trim_start_matches('<').trim_end_matches('>');
    if hex.len() % (BYTES_PER_GLYPH * 2) != 0 {
        return None;
    }

    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect::<Option<Vec<u8>>>()?;

    Some(bytes.chunks_exact(BYTES_PER_GLYPH).map(BigEndian::read_u16).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_small_run() {
        assert_eq!(encode_hex(&GlyphBatch::new(50, 53)), "003200330034");
    }

    #[test]
    fn test_encode_empty_run() {
        assert_eq!(encode_hex(&GlyphBatch::new(7, 7)), "");
        assert_eq!(hex_operand(&GlyphBatch::new(7, 7)), "<>");
    }

    #[test]
    fn test_encode_is_lowercase_and_fixed_width() {
        let hex = encode_hex(&GlyphBatch::new(0x00fe, 0x0100));
        assert_eq!(hex, "00fe00ff");
    }

    #[test]
    fn test_high_indices_wrap() {
        assert_eq!(encode_hex(&GlyphBatch::new(65_535, 65_537)), "ffff0000");
    }

    #[test]
    fn test_full_batch_width() {
        let hex = encode_hex(&GlyphBatch::new(0, 50));
        assert_eq!(hex.len(), 50 * 4);
        assert!(hex.starts_with("00000001"));
        assert!(hex.ends_with("0031"));
    }

    #[test]
    fn test_decode_operand() {
        assert_eq!(decode_hex("<003200330034>"), Some(vec![50, 51, 52]));
        assert_eq!(decode_hex("00ff"), Some(vec![255]));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode_hex("<003>"), None);
        assert_eq!(decode_hex("zz00"), None);
    }
}
