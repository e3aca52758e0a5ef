//! Formatter configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use xml_engine_traits::error::{Error, Result};

/// Declaration written in front of serialized documents
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Read-only settings shared by every formatter operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Prefix serialized documents with an XML declaration
    pub xml_declaration: bool,
    /// Timeout for fetching documents over HTTP, in seconds
    pub fetch_timeout_secs: u64,
    /// User agent sent when fetching documents over HTTP
    pub user_agent: String,
    /// Context string attached to every log entry
    pub log_context: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            fetch_timeout_secs: 30,
            user_agent: concat!("xml-util/", env!("CARGO_PKG_VERSION")).to_string(),
            log_context: "xml_util::formatter".to_string(),
        }
    }
}

impl FormatterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::configuration(format!("Invalid formatter configuration: {}", e)))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    pub fn with_log_context<S: Into<String>>(mut self, context: S) -> Self {
        self.log_context = context.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FormatterConfig::from_json_str(r#"{"xml_declaration": false}"#).unwrap();
        assert!(!config.xml_declaration);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert_eq!(config.log_context, "xml_util::formatter");
    }

    #[test]
    fn invalid_json_is_configuration_error() {
        let err = FormatterConfig::from_json_str("{not json").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn builders() {
        let config = FormatterConfig::default()
            .with_xml_declaration(false)
            .with_log_context("reports");
        assert!(!config.xml_declaration);
        assert_eq!(config.log_context, "reports");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
    }
}
