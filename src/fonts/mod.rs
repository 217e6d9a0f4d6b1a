//! Glyph counting for embedded font programs.
//!
//! The generator only needs one fact about the input font: how many glyphs it
//! defines. [`GlyphCounter`] is the seam for that question, with one
//! implementation per supported font container.

mod opentype;
mod type1;

pub use opentype::OpenTypeCounter;
pub use type1::{Type1Counter, Type1Font};

use crate::error::Result;

/// Reports the number of glyphs defined by a font program.
pub trait GlyphCounter: Send + Sync {
    /// Count the glyphs in `data`, the complete bytes of a font file.
    fn glyph_count(&self, data: &[u8]) -> Result<u32>;
}

/// Kind of font program embedded in the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKind {
    /// TrueType or OpenType (CFF) outline font
    OpenType,
    /// PostScript Type 1 font, PFA or PFB container
    Type1,
}

impl FontKind {
    /// Glyph counter for this kind of font.
    pub fn counter(self) -> Box<dyn GlyphCounter> {
        match self {
            FontKind::OpenType => Box::new(OpenTypeCounter),
            FontKind::Type1 => Box::new(Type1Counter),
        }
    }
}

impl std::fmt::Display for FontKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontKind::OpenType => write!(f, "OpenType"),
            FontKind::Type1 => write!(f, "Type 1"),
        }
    }
}
