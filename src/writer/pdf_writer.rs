//! PDF document writer.
//!
//! Writes a [`DocumentGraph`] as header, objects and trailer. There is no
//! cross-reference table, `startxref` or `%%EOF`: the documents target
//! permissive renderers, and readers that need an xref must rebuild it by
//! scanning, which is part of what the generated files exercise.

use super::document_graph::DocumentGraph;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use std::io::Write;

/// Serializes a document graph to bytes.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    /// PDF version (e.g., "1.1")
    version: String,
    serializer: ObjectSerializer,
}

impl PdfWriter {
    /// Create a writer for the given header version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            serializer: ObjectSerializer::new(),
        }
    }

    /// Write the complete document to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W, graph: &DocumentGraph) -> Result<()> {
        writeln!(w, "%PDF-{}", self.version)?;
        writeln!(w)?;

        for obj in graph.objects() {
            self.serializer
                .write_indirect(w, obj.id(), 0, &obj.to_object())?;
        }

        let trailer = ObjectSerializer::dict(vec![("Root", ObjectSerializer::reference(graph.root(), 0))]);
        writeln!(w, "trailer")?;
        w.write_all(&self.serializer.serialize(&trailer))?;
        writeln!(w)?;
        Ok(())
    }

    /// Build the complete document in memory.
    pub fn finish(&self, graph: &DocumentGraph) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_to(&mut output, graph)?;
        log::debug!(
            "Serialized {} objects into {} bytes",
            graph.objects().len(),
            output.len()
        );
        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new("1.1")
    }
}
