//! XML document abstraction trait

use crate::error::Result;

/// Trait for parsed XML documents.
///
/// A document owns everything needed to serialize it, so it can be
/// handed between parser and transformer without an engine context.
pub trait XmlDocument {
    /// Serialize the whole document to XML text, without an XML declaration
    fn serialize(&self) -> Result<String>;

    /// True when the document node has at least one child
    fn has_child_nodes(&self) -> bool;

    /// Local name of the root element, if there is one
    fn document_element_name(&self) -> Option<String>;
}

/// Documents that can be built up after creation
pub trait MutableXmlDocument: XmlDocument {
    /// Append an empty element with the given name to the document node
    fn append_element(&mut self, name: &str) -> Result<()>;
}
