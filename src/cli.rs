//! Shared command-line driver for the `ttfotf_to_pdf` and `type1_to_pdf`
//! binaries.
//!
//! Usage: `<program> <font file> <output .pdf path>`.

use std::io::Write;

use crate::error::Result;
use crate::fonts::FontKind;
use crate::generator::{GeneratedDocument, Generator};

/// Result of one command-line invocation.
#[derive(Debug)]
pub enum Outcome {
    /// The document was written
    Written(GeneratedDocument),
    /// Wrong number of arguments; holds the usage line
    Usage(String),
}

/// Usage line for `program`.
pub fn usage(kind: FontKind, program: &str) -> String {
    match kind {
        FontKind::OpenType => format!("Usage: {} <font file> <output .pdf path>", program),
        FontKind::Type1 => format!("Usage: {} <.pfb font file> <output .pdf path>", program),
    }
}

/// Run with `args` as received by `main` (program name first).
///
/// Progress lines go to `out`; the output file is written last.
pub fn run<W: Write>(kind: FontKind, args: &[String], out: &mut W) -> Result<Outcome> {
    let [program, font_path, output_path] = args else {
        let program = args.first().map(String::as_str).unwrap_or(match kind {
            FontKind::OpenType => "ttfotf_to_pdf",
            FontKind::Type1 => "type1_to_pdf",
        });
        return Ok(Outcome::Usage(usage(kind, program)));
    };
    log::debug!("{}: {} font {} -> {}", program, kind, font_path, output_path);

    Generator::new(kind)
        .generate_file_with_progress(font_path, output_path, out)
        .map(Outcome::Written)
}
