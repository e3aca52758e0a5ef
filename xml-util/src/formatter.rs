//! Parsing, serialization and XSLT formatting operations
//!
//! [`XmlFormatter`] holds nothing but a log sink and read-only
//! configuration. Every call builds its own parser and transformer, and
//! every file or stream it opens is closed before the call returns.
//!
//! Two error policies apply:
//! - document construction (`parse_*`, `new_document`) logs and returns
//!   the error;
//! - serialization and formatting log the error and return a degraded
//!   [`Logged`] value (empty string or no-op) instead.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use url::Url;
use xml_engine_traits::{
    error::{Error, Result},
    XmlDocument, XmlParser, XsltEngine,
};

use crate::config::{FormatterConfig, XML_DECLARATION};
use crate::engine_xot::{XotDocument, XotParser};
use crate::engine_xrust::XrustEngine;
use crate::fetch::fetch_url;
use crate::log::{LogSink, TracingLog};
use crate::outcome::Logged;
use crate::source::StyleSource;

/// Document type produced by the formatter
pub type Document = XotDocument;

const CONSTRUCT_FAILED: &str = "Could not construct XML from input stream";
const NEW_DOCUMENT_FAILED: &str = "Could not construct DOM.";
const MISSING_SOURCE: &str = "Could not obtain style or XML source object";
const OUTPUT_NOT_OPENED: &str = "Could not open output file";

/// XML parsing, serialization and XSLT formatting helpers
#[derive(Debug, Default, Clone)]
pub struct XmlFormatter<L: LogSink = TracingLog> {
    log: L,
    config: FormatterConfig,
}

impl XmlFormatter<TracingLog> {
    /// Formatter logging through `tracing` with default settings
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: LogSink> XmlFormatter<L> {
    /// Formatter writing to `log` with default settings
    pub fn with_log(log: L) -> Self {
        Self::with_config(log, FormatterConfig::default())
    }

    /// Formatter writing to `log` with the given settings
    pub fn with_config(log: L, config: FormatterConfig) -> Self {
        Self { log, config }
    }

    /// The sink failures are reported to
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Settings this formatter was built with
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn context(&self) -> &str {
        &self.config.log_context
    }

    // ==================== Document Construction ====================

    /// Parse the XML file at `path`
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let file = File::open(path.as_ref()).map_err(|e| self.construct_failed(e.into()))?;
        self.parse_stream(BufReader::new(file))
    }

    /// Parse everything `reader` yields as one XML document
    pub fn parse_stream<R: Read>(&self, mut reader: R) -> Result<Document> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| self.construct_failed(e.into()))?;
        self.parse_bytes(&bytes)
    }

    /// Parse XML held in memory
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Document> {
        XotParser::new()
            .parse(bytes)
            .map_err(|e| self.construct_failed(e))
    }

    pub fn parse_str(&self, xml: &str) -> Result<Document> {
        self.parse_bytes(xml.as_bytes())
    }

    /// Fetch `url`, buffer the whole body and parse it
    pub fn parse_url(&self, url: &str) -> Result<Document> {
        let bytes = fetch_url(url, &self.config).map_err(|e| self.construct_failed(e))?;
        self.parse_bytes(&bytes)
    }

    /// A fresh document with no children
    pub fn new_document(&self) -> Result<Document> {
        XotParser::new().new_document().map_err(|e| {
            self.log.error(NEW_DOCUMENT_FAILED, self.context(), &e);
            e
        })
    }

    fn construct_failed(&self, err: Error) -> Error {
        self.log.error(CONSTRUCT_FAILED, self.context(), &err);
        err
    }

    // ==================== Serialization ====================

    fn serialize(&self, doc: &Document) -> Result<String> {
        let body = doc.serialize()?;
        if self.config.xml_declaration {
            Ok(format!("{}{}", XML_DECLARATION, body))
        } else {
            Ok(body)
        }
    }

    /// Write `doc` to standard output
    pub fn write_to_stdout(&self, doc: &Document) -> Logged<()> {
        let written = self.serialize(doc).and_then(|text| {
            let mut out = std::io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()?;
            Ok(())
        });
        self.settle(written)
    }

    /// Serialize `doc` to a string; empty on failure
    pub fn to_text(&self, doc: &Document) -> Logged<String> {
        let text = self.serialize(doc);
        self.settle(text)
    }

    /// Write `doc` to `path`, replacing any existing file
    pub fn write_to_file<P: AsRef<Path>>(&self, doc: &Document, path: P) -> Logged<()> {
        let mut out = match self.create_output(path.as_ref()) {
            Ok(out) => out,
            Err(e) => return Logged::failed(e),
        };
        let written = self.serialize(doc).and_then(|text| {
            out.write_all(text.as_bytes())?;
            out.flush()?;
            Ok(())
        });
        self.settle(written)
    }

    fn create_output(&self, path: &Path) -> Result<BufWriter<File>> {
        match File::create(path) {
            Ok(file) => Ok(BufWriter::new(file)),
            Err(e) => {
                let err = Error::from(e);
                self.log.error(OUTPUT_NOT_OPENED, self.context(), &err);
                Err(err)
            }
        }
    }

    // ==================== Stylesheet Transformation ====================

    /// Format `doc` with the stylesheet given as text
    pub fn format(&self, doc: &Document, stylesheet: &str) -> Logged<String> {
        self.transform(Some(doc), Some(&StyleSource::text(stylesheet)))
    }

    /// Format `doc` with the stylesheet stored at `stylesheet`
    pub fn format_file<P: AsRef<Path>>(&self, doc: &Document, stylesheet: P) -> Logged<String> {
        self.transform(Some(doc), Some(&StyleSource::file(stylesheet)))
    }

    /// Format `doc` with any stylesheet source
    pub fn format_source(&self, doc: &Document, source: &StyleSource) -> Logged<String> {
        self.transform(Some(doc), Some(source))
    }

    /// Format `doc` with the stylesheet at `stylesheet` and write the
    /// result to `output`. The output file is created before the
    /// transform runs and is left empty if the transform fails.
    pub fn format_to_file<P, Q>(&self, doc: &Document, stylesheet: P, output: Q) -> Logged<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let mut out = match self.create_output(output.as_ref()) {
            Ok(out) => out,
            Err(e) => return Logged::failed(e),
        };
        let written = self
            .run_transform(doc, &StyleSource::file(stylesheet))
            .and_then(|text| {
                out.write_all(text.as_bytes())?;
                out.flush()?;
                Ok(())
            });
        self.settle(written)
    }

    /// Apply `source` to `doc`.
    ///
    /// A missing document or stylesheet produces one warning and an empty
    /// string. Compilation or execution failures are logged as errors and
    /// also produce an empty string.
    pub fn transform(&self, doc: Option<&Document>, source: Option<&StyleSource>) -> Logged<String> {
        let (doc, source) = match (doc, source) {
            (Some(doc), Some(source)) => (doc, source),
            _ => {
                self.log.warn(MISSING_SOURCE, self.context());
                return Logged::failed(Error::configuration(MISSING_SOURCE));
            }
        };
        let text = self.run_transform(doc, source);
        self.settle(text)
    }

    fn run_transform(&self, doc: &Document, source: &StyleSource) -> Result<String> {
        let xslt = source.read().map_err(|e| match e {
            Error::Io(io) => Error::configuration(format!("Could not read stylesheet: {}", io)),
            other => other,
        })?;
        let source_xml = doc.serialize()?;

        // Includes and imports resolve against the stylesheet's own location
        let base = match source {
            StyleSource::File(path) => Self::base_url(path),
            _ => None,
        };

        let engine = XrustEngine::new();
        let stylesheet = engine.compile_with_base(&xslt, base.as_ref().map(Url::as_str))?;
        engine.apply(&stylesheet, &source_xml)
    }

    fn base_url(path: &Path) -> Option<Url> {
        let path = path.canonicalize().ok()?;
        Url::from_file_path(path).ok()
    }

    /// Log a failed best-effort step and degrade to the default value
    fn settle<T: Default>(&self, result: Result<T>) -> Logged<T> {
        match result {
            Ok(value) => Logged::ok(value),
            Err(err) => {
                let message = match &err {
                    Error::Configuration(msg) => format!("Transformer Factory error: {}", msg),
                    other => format!("Transformer error: {}", other),
                };
                self.log.error(&message, self.context(), &err);
                Logged::failed(err)
            }
        }
    }
}
