//! HTML to editor document conversion.
//!
//! The pipeline is:
//!
//! 1. Parse the HTML with html5ever
//! 2. Build a typed tree from the body's children
//! 3. Normalize it ([`crate::normalize`])
//!
//! Unknown markup never fails a conversion: it is classified as `skip` and
//! spliced away. Elements missing data their kind needs are kept with empty
//! attrs and reported in [`Conversion::issues`]. Only whole-document failures
//! (nesting past [`ConvertOptions::max_depth`], extractor errors) are errors.

mod builder;
mod group;

use serde::{Deserialize, Serialize};

use crate::dom;
use crate::error::{Error, Result};
use crate::extract::{join_pages, Extractor, ExtractorHandle};
use crate::model::Document;
use crate::normalize::normalize;
use crate::util::{decode_text, sniff_charset};

use builder::Builder;

/// Default nesting limit for source elements.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Conversion settings.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// let options: tiptree::ConvertOptions =
///     serde_json::from_str(r#"{ "max_depth": 64 }"#).unwrap();
/// assert_eq!(options.max_depth, 64);
/// assert!(options.drop_whitespace_runs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Deepest element nesting accepted before the conversion fails.
    pub max_depth: usize,
    /// Drop inline runs made only of whitespace (indentation between tags)
    /// instead of wrapping them in paragraphs. Code blocks keep theirs.
    ///
    /// On by default, which departs from the literal grouping rule. Set it to
    /// `false` to make every closed run a paragraph, including a lone `"\n"`
    /// between two blocks.
    pub drop_whitespace_runs: bool,
    /// Keep a source element's `data-node-id` as the node id when it is a
    /// UUID not yet used in this conversion.
    pub reuse_source_ids: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            drop_whitespace_runs: true,
            reuse_source_ids: false,
        }
    }
}

impl ConvertOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_drop_whitespace_runs(mut self, drop: bool) -> Self {
        self.drop_whitespace_runs = drop;
        self
    }

    pub fn with_reuse_source_ids(mut self, reuse: bool) -> Self {
        self.reuse_source_ids = reuse;
        self
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// A converted document plus the problems recovered from along the way.
#[derive(Debug)]
pub struct Conversion {
    pub document: Document,
    /// [`Error::MalformedStructure`] diagnostics, one per affected element.
    pub issues: Vec<Error>,
}

/// Converts extractor HTML into editor documents.
///
/// Holds no per-document state; one converter can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert an HTML string.
    pub fn convert(&self, html: &str) -> Result<Conversion> {
        self.convert_named("<input>", html)
    }

    /// Convert an HTML string, naming it `name` in errors and logs.
    pub fn convert_named(&self, name: &str, html: &str) -> Result<Conversion> {
        let dom = dom::parse_html(html);
        let children = dom::body_children(&dom);

        let mut builder = Builder::new(&self.options);
        let nodes = builder
            .build_top_level(&children)
            .map_err(|e| Error::conversion_failed(name, e))?;
        let issues = builder.into_issues();

        let document = Document::new(normalize(nodes));
        log::debug!(
            "converted {name}: {} top-level nodes, {} nodes total, {} issues",
            document.content.len(),
            document.node_count(),
            issues.len()
        );

        Ok(Conversion { document, issues })
    }

    /// Convert raw HTML bytes of unknown encoding.
    ///
    /// UTF-8 (with or without BOM) is tried first, then the document's own
    /// `charset` declaration, then Windows-1252.
    pub fn convert_bytes(&self, name: &str, bytes: &[u8]) -> Result<Conversion> {
        let html = decode_text(bytes, sniff_charset(bytes));
        self.convert_named(name, &html)
    }

    /// Extract a PDF to HTML with `handle`'s engine and convert the result.
    ///
    /// Page boundaries are marked with sentinel elements that the converter
    /// drops.
    pub fn convert_pdf<E: Extractor>(
        &self,
        handle: &ExtractorHandle<E>,
        pdf: &[u8],
    ) -> Result<Conversion> {
        const NAME: &str = "<pdf>";

        let engine = handle
            .acquire()
            .map_err(|e| Error::conversion_failed(NAME, e))?;
        let pages = engine
            .extract_pages(pdf)
            .map_err(|e| Error::conversion_failed(NAME, e))?;
        log::debug!("extracted {} pages from {} bytes", pages.len(), pdf.len());

        self.convert_named(NAME, &join_pages(&pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert!(options.drop_whitespace_runs);
        assert!(!options.reuse_source_ids);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{ "reuse_source_ids": true }"#).unwrap();
        assert!(options.reuse_source_ids);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_depth_failure_names_input() {
        let converter = Converter::new(ConvertOptions::default().with_max_depth(2));
        let err = converter
            .convert_named("report.html", "<ul><li><ul><li>x</li></ul></li></ul>")
            .unwrap_err();

        match err {
            Error::ConversionFailed { input, source } => {
                assert_eq!(input, "report.html");
                assert!(matches!(*source, Error::DepthLimitExceeded { limit: 2 }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_convert_bytes_windows_1252() {
        // "café" with é as 0xE9
        let bytes = b"<p>caf\xE9</p>";
        let conversion = Converter::default().convert_bytes("legacy.html", bytes).unwrap();
        assert_eq!(conversion.document.text_content(), "café");
        assert_eq!(
            conversion.document.content[0].kind(),
            Some(NodeKind::Paragraph)
        );
    }
}
