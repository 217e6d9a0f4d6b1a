//! One-pass document generation.
//!
//! `font bytes → glyph count → layout plan → object graph → PDF bytes`.

use std::io::{self, Write};
use std::path::Path;

use bytes::Bytes;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::fonts::{FontKind, GlyphCounter};
use crate::layout::{self, LayoutPlan};
use crate::writer::{ObjectGraphBuilder, PdfWriter};

/// A fully serialized document and the numbers that shaped it.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// Glyphs in the input font
    pub glyph_count: u32,
    /// Batch/page layout used
    pub plan: LayoutPlan,
    /// PDF bytes
    pub bytes: Vec<u8>,
}

impl GeneratedDocument {
    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.plan.page_count()
    }
}

/// Generates glyph test documents for one kind of font.
pub struct Generator {
    config: GeneratorConfig,
    counter: Box<dyn GlyphCounter>,
}

impl Generator {
    /// Generator with the preset configuration for `kind`.
    pub fn new(kind: FontKind) -> Self {
        Self::with_config(kind, GeneratorConfig::for_kind(kind))
    }

    /// Generator with a custom configuration.
    pub fn with_config(kind: FontKind, config: GeneratorConfig) -> Self {
        Self {
            config,
            counter: kind.counter(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Count the glyphs of `font_data`.
    pub fn count_glyphs(&self, font_data: &[u8]) -> Result<u32> {
        self.counter.glyph_count(font_data)
    }

    /// Build the document for a known glyph count.
    ///
    /// The font bytes are embedded verbatim; they are not parsed here.
    pub fn render(&self, glyph_count: u32, font_data: impl Into<Bytes>) -> Result<GeneratedDocument> {
        let plan = layout::plan(glyph_count, &self.config);
        log::info!(
            "{} glyphs, {} segments, {} pages",
            glyph_count,
            plan.segment_count,
            plan.page_count()
        );

        let graph = ObjectGraphBuilder::new(&self.config).build(&plan, font_data.into())?;
        let bytes = PdfWriter::new(self.config.pdf_version.clone()).finish(&graph)?;

        Ok(GeneratedDocument {
            glyph_count,
            plan,
            bytes,
        })
    }

    /// Count glyphs and build the document.
    pub fn generate(&self, font_data: &[u8]) -> Result<GeneratedDocument> {
        let glyph_count = self.count_glyphs(font_data)?;
        self.render(glyph_count, Bytes::copy_from_slice(font_data))
    }

    /// Read `font_path`, build the document and write it to `output_path`.
    ///
    /// Nothing is written unless the whole document was built.
    pub fn generate_file(
        &self,
        font_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<GeneratedDocument> {
        self.generate_file_with_progress(font_path, output_path, &mut io::sink())
    }

    /// Like [`generate_file`](Self::generate_file), printing progress lines to
    /// `progress`: the glyph count once it is known, then the page count when
    /// pages are enabled.
    pub fn generate_file_with_progress<W: Write>(
        &self,
        font_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        progress: &mut W,
    ) -> Result<GeneratedDocument> {
        let font_data = std::fs::read(font_path.as_ref())?;

        let glyph_count = self.count_glyphs(&font_data)?;
        writeln!(progress, "Glyphs in font: {}", glyph_count)?;

        let doc = self.render(glyph_count, font_data)?;
        if self.config.pages_enabled {
            writeln!(progress, "Generated pages: {}", doc.page_count())?;
        }

        std::fs::write(output_path.as_ref(), &doc.bytes)?;
        log::info!(
            "Wrote {} bytes to {}",
            doc.bytes.len(),
            output_path.as_ref().display()
        );
        Ok(doc)
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
