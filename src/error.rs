//! Error types for the font2pdf library.
//!
//! This module defines all error types that can occur while counting glyphs,
//! assembling the object graph, and writing the output document.

/// Result type alias for font2pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error while reading the font or writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The font could not be interpreted by the glyph counter
    #[error("Font error: {0}")]
    Font(String),

    /// Type 1 font does not start with a PostScript font header
    #[error("Invalid Type 1 header: expected '%!PS-AdobeFont' or '%!FontType'")]
    InvalidType1Header,

    /// Type 1 font has no CharStrings dictionary
    #[error("Type 1 font has no /CharStrings dictionary")]
    MissingCharStrings,

    /// Two object number ranges overlap
    #[error("Object number {id} is allocated more than once")]
    ObjectIdCollision {
        /// Colliding object number
        id: u32,
    },

    /// The same object number is emitted twice
    #[error("Object {0} 0 R emitted more than once")]
    DuplicateObject(u32),

    /// An object references a number that is never emitted
    #[error("Object {from} 0 R references missing object {to} 0 R")]
    DanglingReference {
        /// Object holding the reference
        from: u32,
        /// Referenced object number
        to: u32,
    },
}
