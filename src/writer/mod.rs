//! PDF writing module for generating glyph test documents.
//!
//! ## Architecture
//!
//! ```text
//! LayoutPlan + font bytes
//!     ↓
//! [ObjectGraphBuilder] (numbered DocumentObjects, one pass)
//!     ↓
//! [ContentStreamBuilder] (per-page glyph lines)
//!     ↓
//! [PdfWriter] (header, objects, trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```

mod content_stream;
mod document_graph;
mod object_serializer;
mod pdf_writer;

pub use content_stream::ContentStreamBuilder;
pub use document_graph::{
    DocumentGraph, DocumentObject, ObjectGraphBuilder, ObjectIdAllocator, BASE_FONT_NAME,
    FONT_BBOX, FONT_FLAGS, FONT_RESOURCE_NAME, MEDIA_BOX,
};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::PdfWriter;
