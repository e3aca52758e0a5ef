//! XSLT engine abstraction trait

use crate::error::Result;

/// Trait for XSLT transformation engines.
///
/// The source document is handed over as serialized XML so that the
/// transformer does not need to share a tree model with the parser.
pub trait XsltEngine {
    /// Type representing a compiled stylesheet
    type Stylesheet;

    /// Compile an XSLT stylesheet, resolving `xsl:include` and
    /// `xsl:import` hrefs against `base_uri` when one is given
    fn compile_with_base(&self, xslt: &str, base_uri: Option<&str>) -> Result<Self::Stylesheet>;

    /// Apply a compiled stylesheet to a serialized source document
    fn apply(&self, stylesheet: &Self::Stylesheet, source_xml: &str) -> Result<String>;

    /// Get the XSLT version supported by this engine
    fn xslt_version(&self) -> &'static str;

    /// Compile an XSLT stylesheet from its text
    fn compile(&self, xslt: &str) -> Result<Self::Stylesheet> {
        self.compile_with_base(xslt, None)
    }

    /// Compile and apply in one step
    fn transform_string(&self, xslt: &str, source_xml: &str) -> Result<String> {
        let stylesheet = self.compile(xslt)?;
        self.apply(&stylesheet, source_xml)
    }
}
