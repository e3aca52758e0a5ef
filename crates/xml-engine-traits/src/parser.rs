//! XML parser abstraction trait

use crate::error::Result;
use crate::tree::XmlDocument;

/// Trait for engines that turn bytes into a document tree.
///
/// Implementations are cheap to construct; callers create one per
/// operation rather than sharing an instance.
pub trait XmlParser {
    /// The document type produced by this parser
    type Document: XmlDocument;

    /// Parse a complete XML document from bytes
    fn parse(&self, input: &[u8]) -> Result<Self::Document>;

    /// Create a fresh document with no children
    fn new_document(&self) -> Result<Self::Document>;

    /// Parse XML from a string
    fn parse_str(&self, xml: &str) -> Result<Self::Document> {
        self.parse(xml.as_bytes())
    }
}
