//! Character encoding detection for XML input
//!
//! Engines parse from `&str`, so raw bytes are transcoded to UTF-8 first.
//! The encoding is taken from the byte order mark, then from the raw
//! UTF-16 signature of `<?`, then from the `encoding` pseudo-attribute of
//! the XML declaration, falling back to UTF-8.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::error::{Error, Result};

/// Declarations longer than this are not looked at
const MAX_DECLARATION_LEN: usize = 1024;

/// Work out which encoding `input` is in.
///
/// Returns the encoding and the length of the byte order mark to skip.
pub fn detect_encoding(input: &[u8]) -> Result<(&'static Encoding, usize)> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(input) {
        return Ok((encoding, bom_len));
    }
    if input.starts_with(&[b'<', 0, b'?', 0]) {
        return Ok((UTF_16LE, 0));
    }
    if input.starts_with(&[0, b'<', 0, b'?']) {
        return Ok((UTF_16BE, 0));
    }

    match declared_encoding(input) {
        None => Ok((UTF_8, 0)),
        Some(label) => match Encoding::for_label(label.as_bytes()) {
            // UTF-16 labels without a BOM or UTF-16 signature are read as UTF-8
            Some(encoding) if !encoding.is_ascii_compatible() => Ok((UTF_8, 0)),
            Some(encoding) => Ok((encoding, 0)),
            None => Err(Error::parse(format!("unsupported encoding: {label}"))),
        },
    }
}

/// Decode an XML document to UTF-8 text.
///
/// When the input was not UTF-8, the `encoding` pseudo-attribute of the
/// declaration is rewritten to `UTF-8` so it matches the returned text.
pub fn decode_document(input: &[u8]) -> Result<Cow<'_, str>> {
    let (encoding, bom_len) = detect_encoding(input)?;
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&input[bom_len..])
        .ok_or_else(|| Error::parse(format!("input is not valid {}", encoding.name())))?;

    if encoding == UTF_8 {
        return Ok(text);
    }
    Ok(Cow::Owned(relabel_declaration(&text)))
}

/// Value of the `encoding` pseudo-attribute, if the input starts with an
/// XML declaration carrying one
fn declared_encoding(input: &[u8]) -> Option<String> {
    let head = &input[..input.len().min(MAX_DECLARATION_LEN)];
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let end = head.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&head[..end]).ok()?;
    encoding_value_span(declaration).map(|(start, end)| declaration[start..end].to_string())
}

/// Byte range of the quoted `encoding` value inside a declaration
fn encoding_value_span(declaration: &str) -> Option<(usize, usize)> {
    let key = declaration.find("encoding")?;
    let after_key = key + "encoding".len();
    let rest = &declaration[after_key..];
    let eq = rest.find('=')?;
    if !rest[..eq].trim().is_empty() {
        return None;
    }
    let value = rest[eq + 1..].trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let start = declaration.len() - value.len() + 1;
    let len = declaration[start..].find(quote)?;
    Some((start, start + len))
}

fn relabel_declaration(text: &str) -> String {
    if !text.starts_with("<?xml") {
        return text.to_string();
    }
    let Some(end) = text.find("?>") else {
        return text.to_string();
    };
    match encoding_value_span(&text[..end]) {
        Some((start, stop)) => format!("{}UTF-8{}", &text[..start], &text[stop..]),
        None => text.to_string(),
    }
}
