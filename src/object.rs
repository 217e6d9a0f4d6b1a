//! PDF object types.

use indexmap::IndexMap;

/// Dictionary keyed by name, kept in insertion order.
pub type Dictionary = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer value
    Integer(i64),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dictionary,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Collect every indirect reference reachable inside this object,
    /// in depth-first order.
    pub fn references(&self) -> Vec<ObjectRef> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<ObjectRef>) {
        match self {
            Object::Reference(r) => out.push(*r),
            Object::Array(items) => items.iter().for_each(|o| o.collect_references(out)),
            Object::Dictionary(dict) | Object::Stream { dict, .. } => {
                dict.values().for_each(|o| o.collect_references(out))
            },
            Object::Integer(_) | Object::Name(_) => {},
        }
    }
}
