//! Error types for XML parsing and transformation

/// Result type for XML engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for parsing, serialization and XSLT operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file or network stream could not be opened, read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not well-formed XML
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// A parsing or transforming engine could not be set up
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Applying a compiled stylesheet failed
    #[error("XSLT transformation error: {0}")]
    Transform(String),
}

impl Error {
    /// Create a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new transformation error
    pub fn transform<S: Into<String>>(msg: S) -> Self {
        Error::Transform(msg.into())
    }

    /// Wrap any displayable failure as an IO error of kind `Other`
    pub fn io_other<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Io(std::io::Error::other(err))
    }

    /// True for errors raised while setting up an engine
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}
