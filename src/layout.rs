//! Batch and page planning.
//!
//! Splits the glyph index space `[0, glyph_count)` into batches of at most
//! `glyphs_per_segment` indices, then groups batches into pages. The planner
//! is pure arithmetic: the same count and config always give the same plan.

use std::ops::Range;

use crate::config::GeneratorConfig;

/// Contiguous run of glyph indices shown by one `Tj` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBatch {
    /// First glyph index (inclusive)
    pub start: u32,
    /// Last glyph index (exclusive)
    pub end: u32,
}

impl GlyphBatch {
    /// Create a batch covering `[start, end)`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Glyph indices in this batch.
    pub fn range(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Number of glyphs in this batch.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Whether the batch holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Batches assigned to one page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePlan {
    /// Batches in emission order
    pub batches: Vec<GlyphBatch>,
}

/// Complete batch/page layout for one font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Glyphs in the font
    pub glyph_count: u32,
    /// Number of `Tj` instructions across the document
    pub segment_count: u32,
    /// Pages in emission order
    pub pages: Vec<PagePlan>,
}

impl LayoutPlan {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All batches across all pages, in emission order.
    pub fn batches(&self) -> impl Iterator<Item = &GlyphBatch> {
        self.pages.iter().flat_map(|page| page.batches.iter())
    }
}

/// `ceil(glyph_count / glyphs_per_segment)`.
pub fn segment_count(glyph_count: u32, glyphs_per_segment: u32) -> u32 {
    glyph_count.div_ceil(glyphs_per_segment.max(1))
}

/// `ceil(glyph_count / glyphs_per_page)`.
pub fn page_count(glyph_count: u32, glyphs_per_page: u32) -> u32 {
    glyph_count.div_ceil(glyphs_per_page.max(1))
}

/// Plan batches and pages for `glyph_count` glyphs.
///
/// With pages enabled, a font with zero glyphs produces zero pages. With pages
/// disabled, there is always exactly one page, possibly holding no batches.
pub fn plan(glyph_count: u32, config: &GeneratorConfig) -> LayoutPlan {
    let per_segment = config.glyphs_per_segment.max(1);
    let segments = segment_count(glyph_count, per_segment);

    let batches: Vec<GlyphBatch> = (0..segments)
        .map(|i| {
            let start = i * per_segment;
            GlyphBatch::new(start, start.saturating_add(per_segment).min(glyph_count))
        })
        .collect();

    let pages = if config.pages_enabled {
        let per_page = config.segments_per_page.max(1) as usize;
        let pages: Vec<PagePlan> = batches
            .chunks(per_page)
            .map(|chunk| PagePlan {
                batches: chunk.to_vec(),
            })
            .collect();
        debug_assert_eq!(
            pages.len() as u32,
            page_count(glyph_count, config.glyphs_per_page())
        );
        pages
    } else {
        vec![PagePlan { batches }]
    };

    log::debug!(
        "Planned {} glyphs into {} segments on {} pages",
        glyph_count,
        segments,
        pages.len()
    );

    LayoutPlan {
        glyph_count,
        segment_count: segments,
        pages,
    }
}
