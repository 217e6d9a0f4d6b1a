//! PDF content stream builder.
//!
//! Builds the text-only content streams of the generated pages: one text
//! object per page holding a font selection, a position move and a hex glyph
//! run per line.

use crate::error::Result;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(String, f32),
    /// Move text position (Td)
    MoveText(f32, f32),
    /// Show hex-encoded text (Tj) - for CIDFonts
    ShowHexText(String),
}

/// Builder for PDF content streams.
///
/// Creates the byte sequence for a PDF content stream from operations.
/// Operators inside a text object are indented by two spaces.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Select a font resource. Always emits `Tf`, even when unchanged.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFont(font_name.to_string(), size))
    }

    /// Move the text position relative to the start of the current line.
    pub fn move_text(&mut self, tx: f32, ty: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveText(tx, ty))
    }

    /// Show a hex glyph run. `hex` must already be formatted as `<XXXX...>`.
    pub fn show_hex(&mut self, hex: impl Into<String>) -> &mut Self {
        self.op(ContentStreamOp::ShowHexText(hex.into()))
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            if !matches!(op, ContentStreamOp::BeginText | ContentStreamOp::EndText) {
                write!(buf, "  ")?;
            }
            self.write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, size),
            ContentStreamOp::MoveText(tx, ty) => write!(w, "{} {} Td", tx, ty),
            ContentStreamOp::ShowHexText(hex) => write!(w, "{} Tj", hex),
        }
    }
}
