//! Core trait abstractions for XML processing engines.
//!
//! This crate defines the capabilities a parser and an XSLT transformer
//! must provide to be driven by the formatting utilities in `xml-util`.

pub mod encoding;
pub mod error;
pub mod parser;
pub mod tree;
pub mod xslt;

pub use encoding::decode_document;
pub use error::{Error, Result};
pub use parser::XmlParser;
pub use tree::{MutableXmlDocument, XmlDocument};
pub use xslt::XsltEngine;
