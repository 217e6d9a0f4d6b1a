//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation. Dictionaries keep the
//! insertion order of their keys, so the same object graph always produces
//! the same bytes.

use crate::object::{Dictionary, Object, ObjectRef};
use std::io::Write;

/// Serializer for PDF objects.
///
/// Converts PDF Object types to their byte representation following
/// the PDF specification syntax rules. Dictionaries are written one key per
/// line, nested dictionaries indented by two spaces per level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj, 0).unwrap();
        buf
    }

    /// Write an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn write_indirect<W: Write>(
        &self,
        w: &mut W,
        id: u32,
        gen: u16,
        obj: &Object,
    ) -> std::io::Result<()> {
        writeln!(w, "{} {} obj", id, gen)?;
        self.write_object(w, obj, 0)?;
        write!(w, "\nendobj\n")
    }

    /// Write an object to a buffer.
    fn write_object<W: Write>(&self, w: &mut W, obj: &Object, depth: usize) -> std::io::Result<()> {
        match obj {
            Object::Integer(i) => write!(w, "{}", i),
            Object::Name(n) => self.write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr, depth),
            Object::Dictionary(dict) => self.write_dictionary(w, dict, depth),
            Object::Stream { dict, data } => self.write_stream(w, dict, data, depth),
            Object::Reference(r) => write!(w, "{}", r),
        }
    }

    /// Write a PDF name.
    ///
    /// Names start with `/` and escape special characters with `#xx`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> std::io::Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            match byte {
                // Regular characters (no escaping needed)
                b'!'
                | b'"'
                | b'$'..=b'&'
                | b'\''
                | b'*'..=b'.'
                | b'0'..=b'9'
                | b';'
                | b'='
                | b'?'
                | b'@'
                | b'A'..=b'Z'
                | b'^'..=b'z'
                | b'|'
                | b'~' => {
                    w.write_all(&[byte])?;
                },
                // Delimiters, whitespace, `#` and non-ASCII
                _ => {
                    write!(w, "#{:02X}", byte)?;
                },
            }
        }
        Ok(())
    }

    /// Write a PDF array.
    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object], depth: usize) -> std::io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj, depth)?;
        }
        write!(w, "]")
    }

    /// Write a PDF dictionary.
    fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &Dictionary,
        depth: usize,
    ) -> std::io::Result<()> {
        write!(w, "<<")?;

        for (key, value) in dict {
            write!(w, "\n{}", "  ".repeat(depth + 1))?;
            self.write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value, depth + 1)?;
        }

        if !dict.is_empty() {
            write!(w, "\n{}", "  ".repeat(depth))?;
        }
        write!(w, ">>")
    }

    /// Write a PDF stream.
    ///
    /// `/Length` is appended when the dictionary does not already carry one.
    fn write_stream<W: Write>(
        &self,
        w: &mut W,
        dict: &Dictionary,
        data: &[u8],
        depth: usize,
    ) -> std::io::Result<()> {
        if dict.contains_key("Length") {
            self.write_dictionary(w, dict, depth)?;
        } else {
            let mut dict_with_length = dict.clone();
            dict_with_length.insert("Length".to_string(), Object::Integer(data.len() as i64));
            self.write_dictionary(w, &dict_with_length, depth)?;
        }
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")
    }
}

/// Helper functions for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create an Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Create an Array object.
    pub fn array(items: Vec<Object>) -> Object {
        Object::Array(items)
    }

    /// Create a Dictionary object, preserving entry order.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        let map: Dictionary = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Object::Dictionary(map)
    }

    /// Create a Reference object.
    pub fn reference(id: u32, gen: u16) -> Object {
        Object::Reference(ObjectRef::new(id, gen))
    }
}
