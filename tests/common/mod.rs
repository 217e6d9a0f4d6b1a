//! Shared helpers for integration tests: synthetic fonts and a tiny reader
//! for the generated PDF text.

#![allow(dead_code)]

use regex::bytes::Regex;

/// Minimal TrueType file: `head`, `hhea`, `maxp`.
pub fn minimal_sfnt(num_glyphs: u16) -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    head[18..20].copy_from_slice(&1000u16.to_be_bytes());

    let mut hhea = vec![0u8; 36];
    hhea[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());

    let mut maxp = vec![0x00, 0x00, 0x50, 0x00];
    maxp.extend_from_slice(&num_glyphs.to_be_bytes());

    let tables: [(&[u8; 4], Vec<u8>); 3] = [(b"head", head), (b"hhea", hhea), (b"maxp", maxp)];
    let directory_len = 12 + 16 * tables.len();

    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&[0u8; 6]);

    let mut body = Vec::new();
    for (tag, data) in &tables {
        out.extend_from_slice(*tag);
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&((directory_len + body.len()) as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
    }
    out.extend_from_slice(&body);
    out
}

const EEXEC_SEED: u16 = 55665;

fn eexec_encrypt(plain: &[u8]) -> Vec<u8> {
    let mut r = EEXEC_SEED;
    let mut out = Vec::with_capacity(plain.len() + 4);
    for &p in b"\x11\x22\x33\x44".iter().chain(plain) {
        let c = p ^ (r >> 8) as u8;
        r = (u16::from(c).wrapping_add(r)).wrapping_mul(52845).wrapping_add(22719);
        out.push(c);
    }
    out
}

const TYPE1_CLEAR: &[u8] = b"%!PS-AdobeFont-1.0: SynthFont 001.000\n\
%%Title: SynthFont\n\
12 dict begin\n\
/FontName /SynthFont def\n\
/FontType 1 def\n\
/FontMatrix [0.001 0 0 0.001 0 0] readonly def\n\
/Encoding StandardEncoding def\n\
currentdict end\n\
currentfile eexec\n";

fn type1_private(num_glyphs: usize) -> Vec<u8> {
    let mut out = b"dup /Private 8 dict dup begin\n\
/RD{string currentfile exch readstring pop}executeonly def\n\
/ND{noaccess def}executeonly def\n\
/NP{noaccess put}executeonly def\n\
/Subrs 1 array\n\
dup 0 4 RD \x0b\x0b\x0b\x0b NP\n\
ND\n"
        .to_vec();
    out.extend_from_slice(format!("2 index /CharStrings {} dict dup begin\n", num_glyphs).as_bytes());
    for i in 0..num_glyphs {
        let name = if i == 0 { ".notdef".to_string() } else { format!("g{}", i) };
        out.extend_from_slice(format!("/{} 6 RD ", name).as_bytes());
        out.extend_from_slice(&[0x8b, 0x20, b'/', b'}', 0x0d, 0x0e]);
        out.extend_from_slice(b" ND\n");
    }
    out.extend_from_slice(b"end\nend\nreadonly put\nnoaccess put\ndup /FontName get exch definefont pop\nmark currentfile closefile\n");
    out
}

/// Type 1 font in a PFB container with `num_glyphs` CharStrings.
pub fn type1_pfb(num_glyphs: usize) -> Vec<u8> {
    let encrypted = eexec_encrypt(&type1_private(num_glyphs));
    let trailer = [b"0".repeat(512), b"\ncleartomark\n".to_vec()].concat();

    let mut out = Vec::new();
    for (kind, segment) in [(1u8, TYPE1_CLEAR), (2u8, &encrypted[..]), (1u8, &trailer[..])] {
        out.extend_from_slice(&[0x80, kind]);
        out.extend_from_slice(&(segment.len() as u32).to_le_bytes());
        out.extend_from_slice(segment);
    }
    out.extend_from_slice(&[0x80, 0x03]);
    out
}

/// Type 1 font in a hex-encoded PFA container with `num_glyphs` CharStrings.
pub fn type1_pfa(num_glyphs: usize) -> Vec<u8> {
    let mut out = TYPE1_CLEAR.to_vec();
    for (i, byte) in eexec_encrypt(&type1_private(num_glyphs)).iter().enumerate() {
        out.extend_from_slice(format!("{:02X}", byte).as_bytes());
        if i % 32 == 31 {
            out.push(b'\n');
        }
    }
    out.push(b'\n');
    for _ in 0..8 {
        out.extend_from_slice(&[b'0'; 64]);
        out.push(b'\n');
    }
    out.extend_from_slice(b"cleartomark\n");
    out
}

/// Object numbers of every `N 0 obj` line, in file order.
pub fn object_ids(pdf: &[u8]) -> Vec<u32> {
    let re = Regex::new(r"(?m)^(\d+) 0 obj$").unwrap();
    re.captures_iter(pdf)
        .map(|c| std::str::from_utf8(&c[1]).unwrap().parse().unwrap())
        .collect()
}

/// Body of object `id`, from after `N 0 obj\n` up to `\nendobj\n`.
///
/// Stream bodies are skipped using their `/Length`, so binary payloads that
/// happen to contain `endobj` do not confuse the reader.
pub fn object_body(pdf: &[u8], id: u32) -> Option<Vec<u8>> {
    let header = format!("{} 0 obj\n", id);
    let start = find(pdf, header.as_bytes())? + header.len();
    let rest = &pdf[start..];

    if let Some((dict, data)) = split_stream(rest) {
        let end = dict.len() + b"\nstream\n".len() + data.len() + b"\nendstream".len();
        return Some(rest[..end].to_vec());
    }
    let end = find(rest, b"\nendobj\n")?;
    Some(rest[..end].to_vec())
}

/// Stream payload of object `id`, sized by its `/Length`.
pub fn stream_data(pdf: &[u8], id: u32) -> Option<Vec<u8>> {
    let header = format!("{} 0 obj\n", id);
    let start = find(pdf, header.as_bytes())? + header.len();
    split_stream(&pdf[start..]).map(|(_, data)| data.to_vec())
}

/// Declared `/Length` of stream object `id`.
pub fn stream_length(pdf: &[u8], id: u32) -> Option<usize> {
    let header = format!("{} 0 obj\n", id);
    let start = find(pdf, header.as_bytes())? + header.len();
    let rest = &pdf[start..];
    let dict_end = find(rest, b"\nstream\n")?;
    let re = Regex::new(r"/Length (\d+)").unwrap();
    let caps = re.captures(&rest[..dict_end])?;
    std::str::from_utf8(&caps[1]).ok()?.parse().ok()
}

fn split_stream(rest: &[u8]) -> Option<(&[u8], &[u8])> {
    let dict_end = find(rest, b"\nstream\n")?;
    // Only a stream if the dictionary closes right before the keyword.
    if !rest[..dict_end].ends_with(b">>") || find(&rest[..dict_end], b"endobj").is_some() {
        return None;
    }
    let re = Regex::new(r"/Length (\d+)").unwrap();
    let caps = re.captures(&rest[..dict_end])?;
    let len: usize = std::str::from_utf8(&caps[1]).ok()?.parse().ok()?;
    let data_start = dict_end + b"\nstream\n".len();
    let data = rest.get(data_start..data_start + len)?;
    Some((&rest[..dict_end], data))
}

/// Every `N 0 R` reference inside non-stream parts of the document.
pub fn references(pdf: &[u8]) -> Vec<u32> {
    let re = Regex::new(r"(\d+) 0 R\b").unwrap();
    let mut out = Vec::new();
    for id in object_ids(pdf) {
        let body = object_body(pdf, id).unwrap();
        let dict = match find(&body, b"\nstream\n") {
            Some(end) => &body[..end],
            None => &body[..],
        };
        out.extend(
            re.captures_iter(dict)
                .map(|c| std::str::from_utf8(&c[1]).unwrap().parse::<u32>().unwrap()),
        );
    }
    let trailer_start = find(pdf, b"trailer\n").unwrap();
    out.extend(
        re.captures_iter(&pdf[trailer_start..])
            .map(|c| std::str::from_utf8(&c[1]).unwrap().parse::<u32>().unwrap()),
    );
    out
}

/// Glyph codes of every `<...> Tj` in a content stream, in order.
pub fn shown_glyphs(content: &[u8]) -> Vec<Vec<u16>> {
    let text = std::str::from_utf8(content).unwrap();
    let re = regex::Regex::new(r"<([0-9a-f]*)> Tj").unwrap();
    re.captures_iter(text)
        .map(|c| font2pdf::glyph_run::decode_hex(&c[1]).unwrap())
        .collect()
}

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
