//! xml-util: XML parsing, serialization and XSLT formatting helpers
//!
//! Thin, stateless wrappers around an XML parser (xot) and an XSLT
//! transformer (xrust).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use xml_util::XmlFormatter;
//!
//! let formatter = XmlFormatter::new();
//! let doc = formatter.parse_file("catalog.xml")?;
//! let html = formatter.format_file(&doc, "catalog.xsl").into_value();
//! println!("{}", html);
//! ```

pub mod config;
pub mod doctype;
pub mod error;
pub mod fetch;
pub mod formatter;
pub mod log;
pub mod outcome;
pub mod output;
pub mod source;

pub mod engine_xot;
pub mod engine_xrust;

// Re-export core types
pub use config::FormatterConfig;
pub use error::{Error, Result};
pub use formatter::{Document, XmlFormatter};
pub use log::{LogSink, MemoryLog, TracingLog};
pub use outcome::Logged;
pub use output::{OutputMethod, OutputSettings};
pub use source::StyleSource;

// Re-export capability traits
pub use xml_engine_traits::{MutableXmlDocument, XmlDocument, XmlParser, XsltEngine};
