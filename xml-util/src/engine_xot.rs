//! xot parser wrapper
//!
//! Supports:
//! - XML parsing into a self-contained document, from any encoding
//!   `encoding_rs` knows, with the DOCTYPE resolved beforehand
//! - Serialization back to XML text
//! - Building documents element by element

use xml_engine_traits::{
    decode_document,
    error::{Error, Result},
    tree::{MutableXmlDocument, XmlDocument},
    XmlParser,
};
use xot::{Node, Xot};

use crate::doctype::resolve_doctype;

/// xot-backed parser. Every document gets its own `Xot` arena.
#[derive(Debug, Default, Clone, Copy)]
pub struct XotParser;

impl XotParser {
    pub fn new() -> Self {
        Self
    }
}

/// Parsed XML document
///
/// Owns the arena its nodes live in, so it can be serialized without
/// any other engine context.
pub struct XotDocument {
    xot: Xot,
    root: Node,
}

impl std::fmt::Debug for XotDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XotDocument")
            .field("document_element", &self.document_element_name())
            .finish()
    }
}

impl XotDocument {
    /// Get a reference to the underlying Xot
    pub fn xot(&self) -> &Xot {
        &self.xot
    }

    /// The document node
    pub fn root(&self) -> Node {
        self.root
    }

    fn document_element(&self) -> Option<Node> {
        self.xot
            .children(self.root)
            .find(|child| self.xot.element(*child).is_some())
    }
}

impl XmlDocument for XotDocument {
    fn serialize(&self) -> Result<String> {
        self.xot
            .to_string(self.root)
            .map_err(|e| Error::transform(format!("Serialization error: {}", e)))
    }

    fn has_child_nodes(&self) -> bool {
        self.xot.first_child(self.root).is_some()
    }

    fn document_element_name(&self) -> Option<String> {
        let element = self.document_element()?;
        let name = self.xot.node_name(element)?;
        Some(self.xot.local_name_str(name).to_string())
    }
}

impl MutableXmlDocument for XotDocument {
    fn append_element(&mut self, name: &str) -> Result<()> {
        let name = self.xot.add_name(name);
        let element = self.xot.new_element(name);
        self.xot
            .append(self.root, element)
            .map_err(|e| Error::parse(e.to_string()))
    }
}

impl XmlParser for XotParser {
    type Document = XotDocument;

    fn parse(&self, input: &[u8]) -> Result<Self::Document> {
        let text = decode_document(input)?;
        let text = resolve_doctype(&text)?;
        let mut xot = Xot::new();
        let root = xot.parse(&text).map_err(|e| Error::parse(e.to_string()))?;
        Ok(XotDocument { xot, root })
    }

    fn new_document(&self) -> Result<Self::Document> {
        let mut xot = Xot::new();
        let root = xot.new_document();
        Ok(XotDocument { xot, root })
    }
}
