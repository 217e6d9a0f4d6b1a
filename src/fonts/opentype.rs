//! TrueType/OpenType glyph counting.
//!
//! The glyph count is the `maxp` table's `numGlyphs`, which is also the size
//! of the font's glyph order. Only the table directory and `maxp` are read, so
//! fonts with odd `head` or `hhea` values and fonts declaring zero glyphs are
//! still accepted.

use byteorder::{BigEndian, ByteOrder};
use ttf_parser::{RawFace, Tag};

use super::GlyphCounter;
use crate::error::{Error, Result};

/// Offset of `numGlyphs` in the `maxp` table (after the version field).
const MAXP_NUM_GLYPHS_OFFSET: usize = 4;

/// Glyph counter for TrueType and OpenType fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenTypeCounter;

impl GlyphCounter for OpenTypeCounter {
    fn glyph_count(&self, data: &[u8]) -> Result<u32> {
        if data.is_empty() {
            return Err(Error::Font("font file is empty".to_string()));
        }

        // Collections resolve to their first face.
        let raw = RawFace::parse(data, 0).map_err(|e| Error::Font(e.to_string()))?;
        let maxp = raw
            .table(Tag::from_bytes(b"maxp"))
            .ok_or_else(|| Error::Font("font has no maxp table".to_string()))?;
        let count = maxp
            .get(MAXP_NUM_GLYPHS_OFFSET..MAXP_NUM_GLYPHS_OFFSET + 2)
            .map(BigEndian::read_u16)
            .ok_or_else(|| Error::Font(format!("maxp table is truncated ({} bytes)", maxp.len())))?;

        log::debug!("OpenType maxp reports {} glyphs", count);
        Ok(u32::from(count))
    }
}
