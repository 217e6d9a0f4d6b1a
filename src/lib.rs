// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # font2pdf
//!
//! Generates minimal PDF documents that embed a font program and show every
//! glyph it defines. The documents are test inputs for a renderer's font
//! handling: each glyph index from 0 to the font's glyph count is painted
//! through an Identity-H composite font, so the renderer has to resolve and
//! rasterize every glyph.
//!
//! ## Layout
//!
//! - Glyph indices are shown 50 at a time, one `Tj` per line.
//! - OpenType/TrueType fonts put 75 lines on a page and use as many pages as
//!   needed; page objects are numbered from 100, content streams from 200.
//! - Type 1 fonts put every line on a single page.
//!
//! The output has no cross-reference table. It is accepted by permissive
//! renderers and is not meant to be conformant.
//!
//! ## Limitations
//!
//! - There is no `xref`, `startxref` or `%%EOF`; readers must rebuild the
//!   cross-reference table by scanning.
//! - Every stream carries an exact `/Length`, content streams included. A
//!   content stream with an empty `<< >>` dictionary is not produced.
//! - Glyph indices above 65535 wrap to 16 bits in the `Tj` operands.
//! - Page and content stream numbers in the OpenType layout collide past 100
//!   pages; such documents fail with [`Error::ObjectIdCollision`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use font2pdf::{FontKind, Generator};
//!
//! # fn main() -> font2pdf::Result<()> {
//! let doc = Generator::new(FontKind::OpenType).generate_file("font.otf", "glyphs.pdf")?;
//! println!("Glyphs in font: {}", doc.glyph_count);
//! println!("Generated pages: {}", doc.page_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0
//! * MIT license
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Font parsing
pub mod fonts;

// Planning and encoding
pub mod glyph_run;
pub mod layout;

// Document structure
pub mod object;
pub mod writer;

// One-pass generation
pub mod generator;

// Command-line driver
pub mod cli;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use fonts::{FontKind, GlyphCounter};
pub use generator::{GeneratedDocument, Generator};
