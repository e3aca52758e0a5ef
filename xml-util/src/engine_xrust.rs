//! xrust transformer wrapper
//!
//! Supports:
//! - XSLT ~1.0 compilation and application
//! - `xsl:include` / `xsl:import` of `file:` stylesheets relative to a base URI
//! - `xsl:output` method (xml, html, text) and `omit-xml-declaration`
//!
//! Does NOT support:
//! - document() and other external fetches from inside a stylesheet

use url::Url;
use xrust::item::{Item as XrustItem, Node, SequenceTrait};
use xrust::parser::xml::parse as parse_xml;
use xrust::transform::context::{Context, StaticContextBuilder};
use xrust::trees::smite::RNode;
use xrust::xdmerror::{Error as XrustError, ErrorKind};
use xrust::xslt::from_document;

use xml_engine_traits::{
    decode_document,
    error::{Error, Result},
    XsltEngine,
};

use crate::output::{OutputMethod, OutputSettings};

/// Compiled stylesheet: the xrust evaluation context built from it and
/// the output settings it declares.
#[derive(Clone)]
pub struct XrustStylesheet {
    context: Context<RNode>,
    output: OutputSettings,
}

impl XrustStylesheet {
    pub fn output(&self) -> &OutputSettings {
        &self.output
    }
}

/// xrust engine wrapper
#[derive(Debug, Default, Clone, Copy)]
pub struct XrustEngine;

impl XrustEngine {
    pub fn new() -> Self {
        Self
    }

    fn parse_document(xml: &str) -> std::result::Result<RNode, XrustError> {
        let doc = RNode::new_document();
        parse_xml(doc.clone(), xml, None)?;
        Ok(doc)
    }

    /// Load an included or imported stylesheet
    fn load(url: &Url) -> std::result::Result<String, XrustError> {
        if url.scheme() != "file" {
            return Err(XrustError::new(
                ErrorKind::NotImplemented,
                format!("cannot load stylesheet from {url}"),
            ));
        }
        let path = url
            .to_file_path()
            .map_err(|_| XrustError::new(ErrorKind::Unknown, format!("not a local file URL: {url}")))?;
        let bytes = std::fs::read(&path).map_err(|e| {
            XrustError::new(
                ErrorKind::Unknown,
                format!("unable to read {}: {}", path.display(), e),
            )
        })?;
        decode_document(&bytes)
            .map(|text| text.into_owned())
            .map_err(|e| XrustError::new(ErrorKind::ParseError, format!("{}: {}", path.display(), e)))
    }
}

impl XsltEngine for XrustEngine {
    type Stylesheet = XrustStylesheet;

    fn compile_with_base(&self, xslt: &str, base_uri: Option<&str>) -> Result<Self::Stylesheet> {
        let base = base_uri
            .map(Url::parse)
            .transpose()
            .map_err(|e| Error::configuration(format!("Invalid stylesheet base URI: {}", e)))?;

        let style = Self::parse_document(xslt)
            .map_err(|e| Error::configuration(format!("Failed to parse stylesheet: {}", e)))?;

        let context = from_document(
            style,
            base,
            |s: &str| Self::parse_document(s),
            |url: &Url| Self::load(url),
        )
        .map_err(|e| Error::configuration(e.to_string()))?;

        Ok(XrustStylesheet {
            context,
            output: OutputSettings::from_stylesheet(xslt),
        })
    }

    fn apply(&self, stylesheet: &Self::Stylesheet, source_xml: &str) -> Result<String> {
        let source = Self::parse_document(source_xml)
            .map_err(|e| Error::transform(format!("Failed to read source document: {}", e)))?;

        let mut context = stylesheet.context.clone();
        context.context(vec![XrustItem::Node(source)], 0);
        context.result_document(RNode::new_document());

        let mut static_context = StaticContextBuilder::new()
            .message(|_| Ok(()))
            .fetcher(|_| Err(XrustError::new(ErrorKind::NotImplemented, "not implemented")))
            .parser(|_| Err(XrustError::new(ErrorKind::NotImplemented, "not implemented")))
            .build();

        let sequence = context
            .evaluate(&mut static_context)
            .map_err(|e| Error::transform(e.to_string()))?;

        let markup = sequence.to_xml();
        let output = &stylesheet.output;
        Ok(match output.effective_method(&markup) {
            OutputMethod::Text => sequence.to_string(),
            OutputMethod::Html => markup,
            OutputMethod::Xml => output.finish_xml(markup),
        })
    }

    fn xslt_version(&self) -> &'static str {
        "1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:template match="@*|node()">
        <xsl:copy>
            <xsl:apply-templates select="@*|node()"/>
        </xsl:copy>
    </xsl:template>
</xsl:stylesheet>"#;

    const TEXT_OUTPUT: &str = r#"<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:output method="text"/>
    <xsl:template match="/"><xsl:value-of select="a"/></xsl:template>
</xsl:stylesheet>"#;

    #[test]
    fn identity_transform() {
        let engine = XrustEngine::new();
        let out = engine
            .transform_string(IDENTITY, "<root>Hello</root>")
            .unwrap();
        assert!(out.starts_with("<?xml"), "xml output carries a declaration: {out}");
        assert!(out.contains("root"));
        assert!(out.contains("Hello"));
    }

    #[test]
    fn text_output_is_unescaped() {
        let out = XrustEngine::new()
            .transform_string(TEXT_OUTPUT, "<a>x &amp; y &lt; z</a>")
            .unwrap();
        assert_eq!(out, "x & y < z");
    }

    #[test]
    fn omit_xml_declaration() {
        let xslt = IDENTITY.replace(
            "<xsl:template",
            r#"<xsl:output omit-xml-declaration="yes"/><xsl:template"#,
        );
        let out = XrustEngine::new().transform_string(&xslt, "<root/>").unwrap();
        assert!(!out.starts_with("<?xml"), "got {out}");
    }

    #[test]
    fn malformed_stylesheet_is_configuration_error() {
        let err = XrustEngine::new().compile("<xsl:stylesheet").unwrap_err();
        assert!(err.is_configuration(), "got {err:?}");
    }

    #[test]
    fn invalid_base_uri_is_configuration_error() {
        let err = XrustEngine::new()
            .compile_with_base(IDENTITY, Some("not a uri"))
            .unwrap_err();
        assert!(err.is_configuration(), "got {err:?}");
    }

    #[test]
    fn version() {
        assert_eq!(XrustEngine::new().xslt_version(), "1.0");
    }
}
