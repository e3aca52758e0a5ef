//! `xsl:output` settings of a stylesheet

use xot::Xot;

use crate::config::XML_DECLARATION;
use crate::doctype::resolve_doctype;

const XSLT_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Transform";

/// Serialization method requested by `xsl:output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMethod {
    Xml,
    Html,
    Text,
}

impl OutputMethod {
    fn from_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "xml" => Some(OutputMethod::Xml),
            "html" => Some(OutputMethod::Html),
            "text" => Some(OutputMethod::Text),
            _ => None,
        }
    }
}

/// How the result of a transform is written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSettings {
    /// Explicit method; `None` picks html or xml from the result
    pub method: Option<OutputMethod>,
    pub omit_xml_declaration: bool,
}

impl OutputSettings {
    /// Read the top-level `xsl:output` elements of a stylesheet.
    ///
    /// Later elements override earlier ones attribute by attribute.
    /// A stylesheet that cannot be read here gets the defaults.
    pub fn from_stylesheet(xslt: &str) -> Self {
        let mut settings = OutputSettings::default();
        let Ok(text) = resolve_doctype(xslt) else {
            return settings;
        };
        let mut xot = Xot::new();
        let Ok(root) = xot.parse(&text) else {
            return settings;
        };

        let namespace = xot.add_namespace(XSLT_NAMESPACE);
        let output_name = xot.add_name_ns("output", namespace);
        let method_name = xot.add_name("method");
        let omit_name = xot.add_name("omit-xml-declaration");

        let Some(stylesheet) = xot.children(root).find(|n| xot.element(*n).is_some()) else {
            return settings;
        };
        for child in xot.children(stylesheet) {
            if xot.node_name(child) != Some(output_name) {
                continue;
            }
            if let Some(method) = xot.get_attribute(child, method_name) {
                settings.method = OutputMethod::from_attribute(method);
            }
            if let Some(omit) = xot.get_attribute(child, omit_name) {
                settings.omit_xml_declaration = omit.trim() == "yes";
            }
        }
        settings
    }

    /// Method to use for a result whose markup is `markup`
    pub fn effective_method(&self, markup: &str) -> OutputMethod {
        self.method.unwrap_or_else(|| {
            let head = markup.trim_start();
            let is_html = head
                .get(..5)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("<html"))
                && head[5..].starts_with(|c: char| c == '>' || c == '/' || c.is_whitespace());
            if is_html {
                OutputMethod::Html
            } else {
                OutputMethod::Xml
            }
        })
    }

    /// Finish xml-method output: prepend the declaration unless omitted
    pub fn finish_xml(&self, markup: String) -> String {
        if self.omit_xml_declaration || markup.starts_with("<?xml") {
            markup
        } else {
            format!("{}{}", XML_DECLARATION, markup)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_method_and_declaration() {
        let settings = OutputSettings::from_stylesheet(
            r#"<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:output method="text" omit-xml-declaration="yes"/>
</xsl:stylesheet>"#,
        );
        assert_eq!(settings.method, Some(OutputMethod::Text));
        assert!(settings.omit_xml_declaration);
    }

    #[test]
    fn defaults_without_output_element() {
        let settings = OutputSettings::from_stylesheet(
            r#"<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform"/>"#,
        );
        assert_eq!(settings, OutputSettings::default());
    }

    #[test]
    fn output_in_other_namespace_is_ignored() {
        let settings = OutputSettings::from_stylesheet(
            r#"<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform" xmlns:o="urn:other">
  <o:output method="text"/>
</xsl:stylesheet>"#,
        );
        assert_eq!(settings.method, None);
    }

    #[test]
    fn html_detected_from_result() {
        let settings = OutputSettings::default();
        assert_eq!(settings.effective_method("<html><body/></html>"), OutputMethod::Html);
        assert_eq!(settings.effective_method("<HTML lang=\"en\"/>"), OutputMethod::Html);
        assert_eq!(settings.effective_method("<htmlx/>"), OutputMethod::Xml);
        assert_eq!(settings.effective_method("<list/>"), OutputMethod::Xml);
    }

    #[test]
    fn finish_xml_adds_declaration_once() {
        let settings = OutputSettings::default();
        assert_eq!(settings.finish_xml("<a/>".to_string()), format!("{XML_DECLARATION}<a/>"));
        assert_eq!(
            settings.finish_xml(format!("{XML_DECLARATION}<a/>")),
            format!("{XML_DECLARATION}<a/>")
        );
    }
}
