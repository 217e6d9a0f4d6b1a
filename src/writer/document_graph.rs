//! Object graph assembly.
//!
//! The generated document is a fixed set of object roles:
//!
//! ```text
//! Catalog ──► PageTreeRoot ──► PageDescriptor (one per page)
//!                                 │        │
//!                                 │        └──► ContentStream (one per page)
//!                                 └──► Type0 font (inline) ──► FontDescendant
//!                                                                  │
//!                                            FontDescriptor (inline) ──► FontProgram
//! ```
//!
//! Objects are numbered by [`ObjectIdAllocator`] in emission order. Page and
//! content stream numbers may instead come from fixed bases (see
//! [`PageNumbering`]), which keeps the numbering of the outline preset stable
//! no matter how many pages a font needs.

use std::collections::HashSet;

use bytes::Bytes;

use super::content_stream::ContentStreamBuilder;
use super::object_serializer::ObjectSerializer as S;
use crate::config::{GeneratorConfig, PageNumbering};
use crate::error::{Error, Result};
use crate::glyph_run;
use crate::layout::{LayoutPlan, PagePlan};
use crate::object::{Dictionary, Object};

/// Name of the composite font in each page's resources.
pub const FONT_RESOURCE_NAME: &str = "CustomFont";

/// `/BaseFont` and `/FontName` of the embedded font.
pub const BASE_FONT_NAME: &str = "TestFont";

/// Media box of every page, US Letter.
pub const MEDIA_BOX: [i64; 4] = [0, 0, 612, 792];

/// Font descriptor `/Flags` (fixed pitch + symbolic).
pub const FONT_FLAGS: i64 = 5;

/// Font descriptor `/FontBBox`.
pub const FONT_BBOX: [i64; 4] = [0, 0, 10, 10];

/// One numbered object of the generated document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentObject {
    /// Document catalog
    Catalog {
        /// Object number
        id: u32,
        /// Page tree root
        pages: u32,
    },
    /// Root of the page tree
    PageTreeRoot {
        /// Object number
        id: u32,
        /// Page descriptors, in page order
        kids: Vec<u32>,
    },
    /// A single page
    PageDescriptor {
        /// Object number
        id: u32,
        /// Page tree root
        parent: u32,
        /// Content stream of this page
        contents: u32,
        /// Descendant font referenced by the page's Type0 font
        descendant: u32,
    },
    /// Embedded font program, verbatim
    FontProgram {
        /// Object number
        id: u32,
        /// `/Subtype` of the stream
        subtype: String,
        /// Font file bytes
        data: Bytes,
    },
    /// Page content stream
    ContentStream {
        /// Object number
        id: u32,
        /// Operator bytes
        data: Bytes,
    },
    /// Descendant font with an inline font descriptor
    FontDescendant {
        /// Object number
        id: u32,
        /// `/Subtype` of the font
        subtype: String,
        /// `/Widths`, when present
        widths: Option<Vec<i64>>,
        /// Font program referenced by `/FontFile3`
        program: u32,
    },
}

impl DocumentObject {
    /// Object number.
    pub fn id(&self) -> u32 {
        match self {
            DocumentObject::Catalog { id, .. }
            | DocumentObject::PageTreeRoot { id, .. }
            | DocumentObject::PageDescriptor { id, .. }
            | DocumentObject::FontProgram { id, .. }
            | DocumentObject::ContentStream { id, .. }
            | DocumentObject::FontDescendant { id, .. } => *id,
        }
    }

    /// Role name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentObject::Catalog { .. } => "Catalog",
            DocumentObject::PageTreeRoot { .. } => "PageTreeRoot",
            DocumentObject::PageDescriptor { .. } => "PageDescriptor",
            DocumentObject::FontProgram { .. } => "FontProgram",
            DocumentObject::ContentStream { .. } => "ContentStream",
            DocumentObject::FontDescendant { .. } => "FontDescendant",
        }
    }

    /// PDF object for this role.
    pub fn to_object(&self) -> Object {
        match self {
            DocumentObject::Catalog { pages, .. } => S::dict(vec![("Pages", S::reference(*pages, 0))]),
            DocumentObject::PageTreeRoot { kids, .. } => S::dict(vec![
                ("Type", S::name("Pages")),
                ("Count", S::integer(kids.len() as i64)),
                ("Kids", S::array(kids.iter().map(|&k| S::reference(k, 0)).collect())),
            ]),
            DocumentObject::PageDescriptor {
                parent,
                contents,
                descendant,
                ..
            } => {
                let type0 = S::dict(vec![
                    ("Type", S::name("Font")),
                    ("Subtype", S::name("Type0")),
                    ("BaseFont", S::name(BASE_FONT_NAME)),
                    ("Encoding", S::name("Identity-H")),
                    ("DescendantFonts", S::array(vec![S::reference(*descendant, 0)])),
                ]);
                S::dict(vec![
                    ("Type", S::name("Page")),
                    ("MediaBox", S::array(MEDIA_BOX.iter().map(|&v| S::integer(v)).collect())),
                    ("Contents", S::reference(*contents, 0)),
                    ("Parent", S::reference(*parent, 0)),
                    (
                        "Resources",
                        S::dict(vec![("Font", S::dict(vec![(FONT_RESOURCE_NAME, type0)]))]),
                    ),
                ])
            },
            DocumentObject::FontProgram { subtype, data, .. } => {
                let mut dict = Dictionary::new();
                dict.insert("Subtype".to_string(), S::name(subtype));
                dict.insert("Length".to_string(), S::integer(data.len() as i64));
                Object::Stream {
                    dict,
                    data: data.clone(),
                }
            },
            DocumentObject::ContentStream { data, .. } => Object::Stream {
                dict: Dictionary::new(),
                data: data.clone(),
            },
            DocumentObject::FontDescendant {
                subtype,
                widths,
                program,
                ..
            } => {
                let descriptor = S::dict(vec![
                    ("Type", S::name("FontDescriptor")),
                    ("FontName", S::name(BASE_FONT_NAME)),
                    ("Flags", S::integer(FONT_FLAGS)),
                    ("FontBBox", S::array(FONT_BBOX.iter().map(|&v| S::integer(v)).collect())),
                    ("FontFile3", S::reference(*program, 0)),
                ]);
                let mut entries = vec![
                    ("FontDescriptor", descriptor),
                    ("Type", S::name("Font")),
                    ("Subtype", S::name(subtype)),
                    ("BaseFont", S::name(BASE_FONT_NAME)),
                ];
                if let Some(widths) = widths {
                    entries.push(("Widths", S::array(widths.iter().map(|&w| S::integer(w)).collect())));
                }
                S::dict(entries)
            },
        }
    }
}

/// Hands out object numbers and rejects any number handed out twice.
#[derive(Debug)]
pub struct ObjectIdAllocator {
    next: u32,
    numbering: PageNumbering,
    used: HashSet<u32>,
}

impl ObjectIdAllocator {
    /// Create an allocator starting at object 1.
    pub fn new(numbering: PageNumbering) -> Self {
        Self {
            next: 1,
            numbering,
            used: HashSet::new(),
        }
    }

    /// Allocate the next sequential object number.
    pub fn alloc(&mut self) -> Result<u32> {
        let id = self.next;
        self.next += 1;
        self.claim(id)
    }

    /// Allocate the object number of page `index`.
    pub fn alloc_page(&mut self, index: usize) -> Result<u32> {
        match self.numbering {
            PageNumbering::Sequential => self.alloc(),
            PageNumbering::Offset { page_base, .. } => self.claim_offset(page_base, index),
        }
    }

    /// Allocate the object number of the content stream of page `index`.
    pub fn alloc_contents(&mut self, index: usize) -> Result<u32> {
        match self.numbering {
            PageNumbering::Sequential => self.alloc(),
            PageNumbering::Offset { contents_base, .. } => self.claim_offset(contents_base, index),
        }
    }

    fn claim_offset(&mut self, base: u32, index: usize) -> Result<u32> {
        let id = u32::try_from(index)
            .ok()
            .and_then(|i| base.checked_add(i))
            .ok_or(Error::ObjectIdCollision { id: u32::MAX })?;
        self.claim(id)
    }

    fn claim(&mut self, id: u32) -> Result<u32> {
        if self.used.insert(id) {
            Ok(id)
        } else {
            Err(Error::ObjectIdCollision { id })
        }
    }
}

/// The complete object list of one document, in emission order.
#[derive(Debug, Clone)]
pub struct DocumentGraph {
    objects: Vec<DocumentObject>,
    root: u32,
}

impl DocumentGraph {
    /// Objects in emission order.
    pub fn objects(&self) -> &[DocumentObject] {
        &self.objects
    }

    /// Object number of the catalog.
    pub fn root(&self) -> u32 {
        self.root
    }

    /// Check that every object number is unique and every reference resolves.
    pub fn verify(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for obj in &self.objects {
            if !ids.insert(obj.id()) {
                return Err(Error::DuplicateObject(obj.id()));
            }
        }

        if !ids.contains(&self.root) {
            return Err(Error::DanglingReference { from: 0, to: self.root });
        }
        for obj in &self.objects {
            for r in obj.to_object().references() {
                if !ids.contains(&r.id) {
                    return Err(Error::DanglingReference {
                        from: obj.id(),
                        to: r.id,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Builds the [`DocumentGraph`] for a layout plan and a font program.
#[derive(Debug, Clone)]
pub struct ObjectGraphBuilder<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ObjectGraphBuilder<'a> {
    /// Create a builder for the given configuration.
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Assemble all objects in emission order.
    ///
    /// Order: catalog, page tree, pages, font program, content streams,
    /// descendant font. Numbers are allocated in the same order.
    pub fn build(&self, plan: &LayoutPlan, font_data: Bytes) -> Result<DocumentGraph> {
        let mut ids = ObjectIdAllocator::new(self.config.page_numbering);

        let catalog = ids.alloc()?;
        let tree = ids.alloc()?;
        let pages = (0..plan.page_count())
            .map(|i| ids.alloc_page(i))
            .collect::<Result<Vec<u32>>>()?;
        let program = ids.alloc()?;
        let contents = (0..plan.page_count())
            .map(|i| ids.alloc_contents(i))
            .collect::<Result<Vec<u32>>>()?;
        let descendant = ids.alloc()?;

        let mut objects = Vec::with_capacity(4 + 2 * pages.len());
        objects.push(DocumentObject::Catalog {
            id: catalog,
            pages: tree,
        });
        objects.push(DocumentObject::PageTreeRoot {
            id: tree,
            kids: pages.clone(),
        });
        for (&id, &content) in pages.iter().zip(&contents) {
            objects.push(DocumentObject::PageDescriptor {
                id,
                parent: tree,
                contents: content,
                descendant,
            });
        }
        objects.push(DocumentObject::FontProgram {
            id: program,
            subtype: self.config.payload_subtype.clone(),
            data: font_data,
        });
        for (&id, page) in contents.iter().zip(&plan.pages) {
            objects.push(DocumentObject::ContentStream {
                id,
                data: Bytes::from(self.page_content(page)?),
            });
        }
        objects.push(DocumentObject::FontDescendant {
            id: descendant,
            subtype: self.config.descendant_subtype.clone(),
            widths: self.config.descendant_widths.clone(),
            program,
        });

        for obj in &objects {
            log::debug!("Object {} 0 R: {}", obj.id(), obj.kind());
        }

        let graph = DocumentGraph {
            objects,
            root: catalog,
        };
        graph.verify()?;
        Ok(graph)
    }

    /// Content stream of one page: one line per batch, top to bottom.
    pub fn page_content(&self, page: &PagePlan) -> Result<Vec<u8>> {
        let (x, y) = self.config.origin;
        let mut builder = ContentStreamBuilder::new();
        builder.begin_text();
        for (i, batch) in page.batches.iter().enumerate() {
            builder.set_font(FONT_RESOURCE_NAME, self.config.font_size as f32);
            if i == 0 {
                builder.move_text(x as f32, y as f32);
            } else {
                builder.move_text(0.0, -(self.config.line_spacing as f32));
            }
            builder.show_hex(glyph_run::hex_operand(batch));
        }
        builder.end_text();
        builder.build()
    }
}
