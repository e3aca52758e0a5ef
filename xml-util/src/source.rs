//! Stylesheet sources

use std::path::{Path, PathBuf};

use xml_engine_traits::{
    decode_document,
    error::{Error, Result},
};

/// Where an XSLT stylesheet comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    /// Stylesheet text held in memory
    Text(String),
    /// Stylesheet stored in a file, read at transform time
    File(PathBuf),
    /// Raw stylesheet bytes, e.g. already loaded from another store
    Bytes(Vec<u8>),
}

impl StyleSource {
    pub fn text<S: Into<String>>(xslt: S) -> Self {
        StyleSource::Text(xslt.into())
    }

    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        StyleSource::File(path.as_ref().to_path_buf())
    }

    /// Load the stylesheet text. Nothing is kept open after this returns.
    pub fn read(&self) -> Result<String> {
        match self {
            StyleSource::Text(text) => Ok(text.clone()),
            StyleSource::File(path) => {
                let bytes = std::fs::read(path)?;
                Self::decode(&bytes)
            }
            StyleSource::Bytes(bytes) => Self::decode(bytes),
        }
    }

    fn decode(bytes: &[u8]) -> Result<String> {
        decode_document(bytes)
            .map(|text| text.into_owned())
            .map_err(|e| Error::configuration(format!("Unreadable stylesheet: {}", e)))
    }
}

impl From<&str> for StyleSource {
    fn from(xslt: &str) -> Self {
        StyleSource::Text(xslt.to_string())
    }
}

impl From<String> for StyleSource {
    fn from(xslt: String) -> Self {
        StyleSource::Text(xslt)
    }
}

impl From<PathBuf> for StyleSource {
    fn from(path: PathBuf) -> Self {
        StyleSource::File(path)
    }
}

impl From<&Path> for StyleSource {
    fn from(path: &Path) -> Self {
        StyleSource::File(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_source_reads_back() {
        assert_eq!(StyleSource::from("<x/>").read().unwrap(), "<x/>");
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = StyleSource::file("/nonexistent/style.xsl");
        assert!(matches!(source.read(), Err(Error::Io(_))));
    }

    #[test]
    fn invalid_bytes_are_configuration_error() {
        let source = StyleSource::Bytes(b"<xsl:stylesheet>\xFF\xFD".to_vec());
        assert!(source.read().unwrap_err().is_configuration());
    }
}
