//! Configuration for document generation.
//!
//! Both programs share one generator; they differ only in the values held by
//! [`GeneratorConfig`]. The presets [`GeneratorConfig::outline`] and
//! [`GeneratorConfig::type1`] reproduce the fixed literals of the output format.

use crate::fonts::FontKind;

/// Glyph indices shown by one `Tj` instruction.
pub const GLYPHS_PER_SEGMENT: u32 = 50;

/// `Tj` instructions per page (outline variant).
pub const SEGMENTS_PER_PAGE: u32 = 75;

/// First object number used for page descriptors (outline variant).
pub const PAGE_OBJECT_IDX_START: u32 = 100;

/// First object number used for page content streams (outline variant).
pub const PAGE_CONTENTS_IDX_START: u32 = 200;

/// How page descriptor and content stream objects are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumbering {
    /// Numbers are handed out from the shared counter in emission order.
    Sequential,
    /// Page `i` gets `page_base + i`, its contents get `contents_base + i`.
    Offset {
        /// Base for page descriptor numbers
        page_base: u32,
        /// Base for content stream numbers
        contents_base: u32,
    },
}

/// Document generation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// PDF version written in the header (e.g., "1.1")
    pub pdf_version: String,

    /// Split batches across pages. When false every batch lands on one page.
    pub pages_enabled: bool,

    /// `/Subtype` of the embedded font program stream
    pub payload_subtype: String,

    /// `/Subtype` of the descendant font dictionary
    pub descendant_subtype: String,

    /// `/Widths` of the descendant font, omitted when `None`
    pub descendant_widths: Option<Vec<i64>>,

    /// Glyphs per `Tj` instruction
    pub glyphs_per_segment: u32,

    /// `Tj` instructions per page (ignored when pages are disabled)
    pub segments_per_page: u32,

    /// Object numbering for pages and content streams
    pub page_numbering: PageNumbering,

    /// Absolute text origin of the first line on each page
    pub origin: (i32, i32),

    /// Downward offset between consecutive lines
    pub line_spacing: i32,

    /// Font size passed to `Tf`
    pub font_size: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::outline()
    }
}

impl GeneratorConfig {
    /// Preset for TrueType/OpenType fonts: many pages, offset numbering.
    pub fn outline() -> Self {
        Self {
            pdf_version: "1.1".to_string(),
            pages_enabled: true,
            payload_subtype: "OpenType".to_string(),
            descendant_subtype: "OpenType".to_string(),
            descendant_widths: Some(vec![1000]),
            glyphs_per_segment: GLYPHS_PER_SEGMENT,
            segments_per_page: SEGMENTS_PER_PAGE,
            page_numbering: PageNumbering::Offset {
                page_base: PAGE_OBJECT_IDX_START,
                contents_base: PAGE_CONTENTS_IDX_START,
            },
            origin: (10, 775),
            line_spacing: 10,
            font_size: 12,
        }
    }

    /// Preset for Type 1 fonts: a single page, sequential numbering.
    pub fn type1() -> Self {
        Self {
            pages_enabled: false,
            payload_subtype: "Type1".to_string(),
            descendant_subtype: "Type1".to_string(),
            descendant_widths: None,
            page_numbering: PageNumbering::Sequential,
            origin: (10, 780),
            ..Self::outline()
        }
    }

    /// Preset matching the given font kind.
    pub fn for_kind(kind: FontKind) -> Self {
        match kind {
            FontKind::OpenType => Self::outline(),
            FontKind::Type1 => Self::type1(),
        }
    }

    /// Set the number of glyphs per `Tj` instruction.
    pub fn with_glyphs_per_segment(mut self, glyphs: u32) -> Self {
        self.glyphs_per_segment = glyphs.max(1);
        self
    }

    /// Set the number of `Tj` instructions per page.
    pub fn with_segments_per_page(mut self, segments: u32) -> Self {
        self.segments_per_page = segments.max(1);
        self
    }

    /// Enable or disable splitting batches across pages.
    pub fn with_pages_enabled(mut self, enable: bool) -> Self {
        self.pages_enabled = enable;
        self
    }

    /// Set page/content object numbering.
    pub fn with_page_numbering(mut self, numbering: PageNumbering) -> Self {
        self.page_numbering = numbering;
        self
    }

    /// Glyphs that fit on one page.
    pub fn glyphs_per_page(&self) -> u32 {
        self.segments_per_page * self.glyphs_per_segment
    }
}
