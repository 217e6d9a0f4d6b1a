//! Type 1 glyph counting.
//!
//! A Type 1 font is a PostScript program with a clear-text part followed by an
//! `eexec`-encrypted private part. The glyph set is the `/CharStrings`
//! dictionary, which normally lives in the private part:
//!
//! ```text
//! /CharStrings 3 dict dup begin
//! /.notdef 9 RD <9 binary bytes> ND
//! /A 23 RD <23 binary bytes> ND
//! ...
//! end
//! ```
//!
//! Two containers are accepted. PFB files wrap the parts in segments tagged
//! `0x80 0x01` (text) and `0x80 0x02` (binary). PFA files are plain text with
//! the private part following the `eexec` keyword, usually hex encoded.

use byteorder::{ByteOrder, LittleEndian};
use nom::{
    bytes::complete::{tag, take, take_till, take_till1, take_while},
    character::complete::digit1,
    combinator::map_res,
    sequence::preceded,
    IResult,
};

use super::GlyphCounter;
use crate::error::{Error, Result};

const PFB_MARKER: u8 = 0x80;
const PFB_TEXT_SEGMENT: u8 = 0x01;
const PFB_BINARY_SEGMENT: u8 = 0x02;
const PFB_EOF_SEGMENT: u8 = 0x03;

/// Decryption seed for the eexec section.
const EEXEC_SEED: u16 = 55665;
const EEXEC_C1: u16 = 52845;
const EEXEC_C2: u16 = 22719;

/// Random bytes prefixed to the plaintext of an eexec section.
const EEXEC_PREFIX_LEN: usize = 4;

/// Glyph counter for Type 1 fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Type1Counter;

impl GlyphCounter for Type1Counter {
    fn glyph_count(&self, data: &[u8]) -> Result<u32> {
        let font = Type1Font::parse(data)?;
        font.charstring_count()
    }
}

/// A Type 1 font split into its clear-text and decrypted private parts.
#[derive(Debug, Clone)]
pub struct Type1Font {
    /// Clear-text part, up to and including `eexec`
    pub clear: Vec<u8>,
    /// Decrypted private part with the random prefix removed
    pub private: Vec<u8>,
}

impl Type1Font {
    /// Split and decrypt a PFB or PFA font.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.first() == Some(&PFB_MARKER) {
            Self::parse_pfb(data)
        } else {
            Self::parse_pfa(data)
        }
    }

    fn parse_pfb(data: &[u8]) -> Result<Self> {
        let mut clear = Vec::new();
        let mut encrypted = Vec::new();
        let mut pos = 0usize;

        while pos < data.len() {
            let header = data
                .get(pos..pos + 2)
                .ok_or_else(|| Error::Font(format!("truncated PFB segment at byte {}", pos)))?;
            if header[0] != PFB_MARKER {
                return Err(Error::Font(format!("bad PFB marker at byte {}", pos)));
            }
            if header[1] == PFB_EOF_SEGMENT {
                break;
            }

            let size = data
                .get(pos + 2..pos + 6)
                .map(LittleEndian::read_u32)
                .ok_or_else(|| Error::Font(format!("truncated PFB segment at byte {}", pos)))?;
            let start = pos + 6;
            let end = start
                .checked_add(size as usize)
                .filter(|&end| end <= data.len())
                .ok_or_else(|| Error::Font(format!("PFB segment at byte {} overruns file", pos)))?;
            let segment = &data[start..end];

            match header[1] {
                PFB_TEXT_SEGMENT => clear.extend_from_slice(segment),
                PFB_BINARY_SEGMENT => encrypted.extend_from_slice(segment),
                other => {
                    return Err(Error::Font(format!("unknown PFB segment type {}", other)));
                },
            }
            pos = end;
        }

        verify_header(&clear)?;
        log::debug!(
            "PFB: {} clear-text bytes, {} encrypted bytes",
            clear.len(),
            encrypted.len()
        );

        Ok(Self {
            clear,
            private: decrypt(&encrypted),
        })
    }

    fn parse_pfa(data: &[u8]) -> Result<Self> {
        verify_header(data)?;

        let Some(start) = find_eexec_data(data) else {
            log::warn!("PFA has no eexec section; searching clear text only");
            return Ok(Self {
                clear: data.to_vec(),
                private: Vec::new(),
            });
        };

        let (clear, raw_private) = data.split_at(start);
        let is_hex = raw_private.len() >= 4 && raw_private[..4].iter().all(u8::is_ascii_hexdigit);
        let encrypted = if is_hex {
            decode_hex(raw_private)
        } else {
            raw_private.to_vec()
        };
        log::debug!(
            "PFA: {} clear-text bytes, {} encrypted bytes (hex: {})",
            clear.len(),
            encrypted.len(),
            is_hex
        );

        Ok(Self {
            clear: clear.to_vec(),
            private: decrypt(&encrypted),
        })
    }

    /// Number of entries in the `/CharStrings` dictionary.
    pub fn charstring_count(&self) -> Result<u32> {
        let section = find_charstrings(&self.private)
            .or_else(|| find_charstrings(&self.clear))
            .ok_or(Error::MissingCharStrings)?;
        count_charstrings(section)
    }
}

fn verify_header(data: &[u8]) -> Result<()> {
    if data.starts_with(b"%!PS-AdobeFont") || data.starts_with(b"%!FontType") {
        Ok(())
    } else {
        Err(Error::InvalidType1Header)
    }
}

/// Offset of the first byte after `eexec` and its trailing whitespace.
fn find_eexec_data(data: &[u8]) -> Option<usize> {
    let keyword = find(data, b"eexec")?;
    let mut start = keyword + b"eexec".len();
    while let Some(&c) = data.get(start) {
        match c {
            b' ' | b'\t' | b'\n' => {},
            // A lone CR ends the keyword line; CR LF is skipped as a pair.
            b'\r' if data.get(start + 1) == Some(&b'\n') => {},
            b'\r' => {
                start += 1;
                break;
            },
            _ => break,
        }
        start += 1;
    }
    (start < data.len()).then_some(start)
}

/// Hex digits to bytes. Whitespace is skipped; decoding stops at the first
/// other non-hex character.
fn decode_hex(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() / 2);
    let mut high: Option<u8> = None;
    for &c in data {
        if is_whitespace(c) {
            continue;
        }
        let Some(nibble) = (c as char).to_digit(16) else {
            break;
        };
        match high.take() {
            Some(h) => out.push((h << 4) | nibble as u8),
            None => high = Some(nibble as u8),
        }
    }
    if let Some(h) = high {
        out.push(h << 4);
    }
    out
}

/// eexec decryption, dropping the random prefix.
fn decrypt(data: &[u8]) -> Vec<u8> {
    let mut r = EEXEC_SEED;
    data.iter()
        .map(|&c| {
            let plain = c ^ (r >> 8) as u8;
            r = (u16::from(c).wrapping_add(r))
                .wrapping_mul(EEXEC_C1)
                .wrapping_add(EEXEC_C2);
            plain
        })
        .skip(EEXEC_PREFIX_LEN)
        .collect()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Slice starting right after the `/CharStrings` key.
fn find_charstrings(data: &[u8]) -> Option<&[u8]> {
    const KEY: &[u8] = b"/CharStrings";
    find(data, KEY).map(|pos| &data[pos + KEY.len()..])
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\r' | b'\t' | b'\0' | 0x0C)
}

fn is_delimiter(c: u8) -> bool {
    matches!(c, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
}

fn skip_ws(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while(is_whitespace)(input)
}

fn trim_ws(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|&c| !is_whitespace(c)).unwrap_or(input.len());
    &input[start..]
}

/// A bare keyword such as `dict`, `begin`, `RD` or `ND`.
fn keyword(input: &[u8]) -> IResult<&[u8], &[u8]> {
    preceded(skip_ws, take_till1(|c| is_whitespace(c) || is_delimiter(c)))(input)
}

fn name(input: &[u8]) -> IResult<&[u8], &[u8]> {
    preceded(
        skip_ws,
        preceded(tag("/"), take_till(|c| is_whitespace(c) || is_delimiter(c))),
    )(input)
}

fn integer(input: &[u8]) -> IResult<&[u8], usize> {
    map_res(preceded(skip_ws, digit1), |digits: &[u8]| {
        std::str::from_utf8(digits)
            .map_err(|_| ())
            .and_then(|s| s.parse::<usize>().map_err(|_| ()))
    })(input)
}

/// One `/name len RD <binary> ND` entry; returns the glyph name.
fn charstring(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (input, glyph) = name(input)?;
    let (input, len) = integer(input)?;
    let (input, _rd) = keyword(input)?;
    // Exactly one separator byte precedes the binary data.
    let (input, _) = take(1usize)(input)?;
    let (input, _data) = take(len)(input)?;
    Ok((skip_terminator(input), glyph))
}

/// Skip `ND`, `|-`, `noaccess def` and similar up to the next entry or `end`.
fn skip_terminator(mut input: &[u8]) -> &[u8] {
    loop {
        let rest = trim_ws(input);
        if rest.is_empty() || rest[0] == b'/' {
            return rest;
        }
        match keyword(rest) {
            Ok((_, b"end")) => return rest,
            Ok((after, _)) => input = after,
            Err(_) => return rest,
        }
    }
}

fn count_charstrings(section: &[u8]) -> Result<u32> {
    let malformed = |what: &str| Error::Font(format!("malformed /CharStrings: {}", what));

    let (mut input, declared) =
        integer(section).map_err(|_| malformed("missing dictionary size"))?;

    loop {
        let (rest, word) = keyword(input).map_err(|_| malformed("missing 'begin'"))?;
        input = rest;
        if word == b"begin" {
            break;
        }
    }

    let mut count = 0u32;
    loop {
        let rest = trim_ws(input);
        if !rest.starts_with(b"/") {
            break;
        }
        let (rest, glyph) = charstring(rest).map_err(|_| {
            malformed(&format!("truncated entry after {} glyphs", count))
        })?;
        log::trace!("CharString /{}", String::from_utf8_lossy(glyph));
        count += 1;
        input = rest;
    }

    if count as usize != declared {
        log::warn!(
            "/CharStrings declares {} entries but defines {}",
            declared,
            count
        );
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encrypt(plain: &[u8]) -> Vec<u8> {
        let mut r = EEXEC_SEED;
        let mut out = Vec::with_capacity(plain.len() + EEXEC_PREFIX_LEN);
        for &p in [0u8; EEXEC_PREFIX_LEN].iter().chain(plain) {
            let c = p ^ (r >> 8) as u8;
            r = (u16::from(c).wrapping_add(r))
                .wrapping_mul(EEXEC_C1)
                .wrapping_add(EEXEC_C2);
            out.push(c);
        }
        out
    }

    fn private_dict(glyphs: &[&str]) -> Vec<u8> {
        let mut out = b"dup /Private 8 dict dup begin\n/RD{string currentfile exch readstring pop}executeonly def\n".to_vec();
        out.extend_from_slice(format!("2 index /CharStrings {} dict dup begin\n", glyphs.len()).as_bytes());
        for glyph in glyphs {
            // Binary payload deliberately contains delimiters and whitespace.
            out.extend_from_slice(format!("/{} 5 RD ", glyph).as_bytes());
            out.extend_from_slice(&[b'/', b' ', 0x80, b'e', b'\n']);
            out.extend_from_slice(b" ND\n");
        }
        out.extend_from_slice(b"end\nend\nmark currentfile closefile\n");
        out
    }

    const CLEAR: &[u8] = b"%!PS-AdobeFont-1.0: Test 001.000\n/FontName /Test def\ncurrentfile eexec\n";

    #[test]
    fn test_decrypt_inverts_encrypt() {
        let plain = b"/CharStrings 1 dict dup begin";
        assert_eq!(decrypt(&encrypt(plain)), plain.to_vec());
    }

    #[test]
    fn test_pfa_hex_private() {
        let mut font = CLEAR.to_vec();
        for (i, byte) in encrypt(&private_dict(&[".notdef", "A", "B"])).iter().enumerate() {
            font.extend_from_slice(format!("{:02x}", byte).as_bytes());
            if i % 32 == 31 {
                font.push(b'\n');
            }
        }
        font.extend_from_slice(b"\n0000000000000000\ncleartomark\n");

        assert_eq!(Type1Counter.glyph_count(&font).unwrap(), 3);
    }

    #[test]
    fn test_pfb_segments() {
        let encrypted = encrypt(&private_dict(&[".notdef", "space", "a", "b"]));
        let mut font = Vec::new();
        font.extend_from_slice(&[PFB_MARKER, PFB_TEXT_SEGMENT]);
        font.extend_from_slice(&(CLEAR.len() as u32).to_le_bytes());
        font.extend_from_slice(CLEAR);
        font.extend_from_slice(&[PFB_MARKER, PFB_BINARY_SEGMENT]);
        font.extend_from_slice(&(encrypted.len() as u32).to_le_bytes());
        font.extend_from_slice(&encrypted);
        font.extend_from_slice(&[PFB_MARKER, PFB_EOF_SEGMENT]);

        assert_eq!(Type1Counter.glyph_count(&font).unwrap(), 4);
    }

    #[test]
    fn test_pipe_style_operators() {
        let section = b" 2 dict dup begin\n/.notdef 3 -| a b |-\n/x 2 -| \x00\x01 |-\nend";
        assert_eq!(count_charstrings(section).unwrap(), 2);
    }

    #[test]
    fn test_noaccess_def_terminator() {
        let section = b" 1 dict dup begin\n/.notdef 2 RD zz noaccess def\nend";
        assert_eq!(count_charstrings(section).unwrap(), 1);
    }

    #[test]
    fn test_bad_header() {
        let err = Type1Counter.glyph_count(b"%!PS-Adobe-3.0\nnot a font").unwrap_err();
        assert!(matches!(err, Error::InvalidType1Header));
    }

    #[test]
    fn test_missing_charstrings() {
        let err = Type1Counter
            .glyph_count(b"%!FontType1-1.0: Empty\n/FontName /Empty def\n")
            .unwrap_err();
        assert!(matches!(err, Error::MissingCharStrings));
    }

    #[test]
    fn test_truncated_entry() {
        let section = b" 1 dict dup begin\n/.notdef 50 RD abc";
        assert!(matches!(count_charstrings(section), Err(Error::Font(_))));
    }

    #[test]
    fn test_truncated_pfb_segment() {
        let font = [PFB_MARKER, PFB_TEXT_SEGMENT, 0xff, 0xff, 0, 0, b'%'];
        assert!(matches!(Type1Counter.glyph_count(&font), Err(Error::Font(_))));
    }

    #[test]
    fn test_find_eexec_data_skips_crlf() {
        let data = b"currentfile eexec\r\nABCD";
        assert_eq!(find_eexec_data(data), Some(19));
    }
}
