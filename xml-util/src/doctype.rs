//! Document type declaration handling
//!
//! xot does not accept a DOCTYPE. Before parsing, the declaration is cut
//! out of the prolog and the general entities declared in its internal
//! subset are expanded in the document content and attribute values.
//! External entities are not fetched; references to them are left for
//! the parser to reject.

use std::borrow::Cow;
use std::collections::HashMap;

use maybe_xml::{token::Ty, Lexer};
use xml_engine_traits::error::{Error, Result};

/// Nesting limit for entities that reference other entities
const MAX_ENTITY_DEPTH: usize = 16;

/// Upper bound on the size of the expanded document
const MAX_EXPANDED_LEN: usize = 16 * 1024 * 1024;

const PREDEFINED: [&str; 5] = ["lt", "gt", "amp", "apos", "quot"];

/// Remove the DOCTYPE from `text` and expand its internal entities.
///
/// Text without a DOCTYPE is returned unchanged.
pub fn resolve_doctype(text: &str) -> Result<Cow<'_, str>> {
    let Some((start, end)) = find_doctype(text) else {
        return Ok(Cow::Borrowed(text));
    };

    let entities = internal_entities(&text[start..end]);
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..start]);
    if entities.is_empty() {
        out.push_str(&text[end..]);
    } else {
        expand_body(&text[end..], &entities, &mut out)?;
    }
    Ok(Cow::Owned(out))
}

/// Byte range of the DOCTYPE declaration in the prolog
fn find_doctype(text: &str) -> Option<(usize, usize)> {
    let lexer = Lexer::from_str(text);
    let mut pos = 0;
    loop {
        let start = pos;
        let token = lexer.tokenize(&mut pos)?;
        match token.ty() {
            Ty::Declaration(_) if text[start..pos].starts_with("<!DOCTYPE") => {
                return Some((start, pos));
            }
            Ty::StartTag(_) | Ty::EmptyElementTag(_) => return None,
            _ => {}
        }
    }
}

/// General entities with a literal value from the internal subset
fn internal_entities(doctype: &str) -> HashMap<String, String> {
    let mut entities = HashMap::new();
    let (Some(open), Some(close)) = (doctype.find('['), doctype.rfind(']')) else {
        return entities;
    };
    if close <= open {
        return entities;
    }

    let subset = &doctype[open + 1..close];
    let lexer = Lexer::from_str(subset);
    let mut pos = 0;
    loop {
        let start = pos;
        let Some(token) = lexer.tokenize(&mut pos) else {
            break;
        };
        if let Ty::Declaration(_) = token.ty() {
            if let Some((name, value)) = parse_entity_decl(&subset[start..pos]) {
                // The first declaration of an entity is binding
                entities.entry(name).or_insert(value);
            }
        }
    }
    entities
}

/// Parse `<!ENTITY name "value">`. Parameter and external entities give `None`.
fn parse_entity_decl(decl: &str) -> Option<(String, String)> {
    let body = decl.strip_prefix("<!ENTITY")?.strip_suffix('>')?;
    if !body.starts_with(char::is_whitespace) {
        return None;
    }
    let body = body.trim_start();
    if body.starts_with('%') {
        return None;
    }

    let name_end = body.find(char::is_whitespace)?;
    let name = &body[..name_end];
    let rest = body[name_end..].trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value_len = rest[1..].find(quote)?;
    Some((name.to_string(), rest[1..1 + value_len].to_string()))
}

/// Copy the document body, expanding entities in character data and tags
fn expand_body(body: &str, entities: &HashMap<String, String>, out: &mut String) -> Result<()> {
    let lexer = Lexer::from_str(body);
    let mut pos = 0;
    loop {
        let start = pos;
        let Some(token) = lexer.tokenize(&mut pos) else {
            break;
        };
        let raw = &body[start..pos];
        match token.ty() {
            Ty::Characters(_) | Ty::StartTag(_) | Ty::EmptyElementTag(_) => {
                expand_refs(raw, entities, 0, out)?;
            }
            _ => out.push_str(raw),
        }
    }
    // Anything the lexer could not finish is handed to the parser as is
    out.push_str(&body[pos..]);
    Ok(())
}

fn expand_refs(
    text: &str,
    entities: &HashMap<String, String>,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    if depth > MAX_ENTITY_DEPTH {
        return Err(Error::parse("entity references nest too deeply"));
    }

    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let replacement = after
            .find(';')
            .map(|semi| &after[..semi])
            .filter(|name| !name.starts_with('#') && !PREDEFINED.contains(name))
            .and_then(|name| entities.get(name).map(|value| (name, value)));

        match replacement {
            Some((name, value)) => {
                expand_refs(value, entities, depth + 1, out)?;
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }

        if out.len() > MAX_EXPANDED_LEN {
            return Err(Error::parse("entity expansion exceeds size limit"));
        }
    }
    out.push_str(rest);
    Ok(())
}
