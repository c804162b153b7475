//! Documentation page extraction.
//!
//! ### Page Access
//! - `PageAccess` is the only view of the DOM the extractors get: select, text, attribute, inner HTML, remove.
//! - `HtmlPage` implements it over `scraper`; each call parses and owns its own page.
//!
//! ### Details Pipeline
//! - Required header and body regions; a missing region fails the whole call.
//! - Body sanitization (scripts, styles, index column, sidebar), then root-relative link rewriting.
//! - Markdown conversion with `**`/`*` emphasis, assembled under `# Overview` and `# Documentation`.
//!
//! ### Search
//! - Marked result anchors in document order, hrefs made absolute against the site root.

pub mod document;
pub mod dom;
pub mod links;
pub mod markdown;
pub mod search;

pub use document::{assemble_documentation, extract_package};
pub use dom::{HtmlPage, PageAccess};
pub use links::rewrite_root_relative;
pub use markdown::{MarkdownConverter, MarkdownStyle};
pub use search::extract_search_results;

/// CSS selectors describing the documentation site's page structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Package title (first match).
    pub title: String,
    /// Overview text used as the package description.
    pub description: String,
    /// Version label.
    pub version: String,
    /// Header region, required.
    pub header: String,
    /// Documentation body region, required.
    pub body: String,
    /// Subtrees removed from the body before conversion.
    pub noise: Vec<String>,
    /// Search result anchors.
    pub search_result: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            title: "h1".into(),
            description: ".Documentation-overview".into(),
            version: ".DetailsHeader-version".into(),
            header: ".go-Main-headerContent".into(),
            body: ".Documentation-content".into(),
            noise: vec![
                "script".into(),
                "style".into(),
                ".Documentation-indexColumn".into(),
                ".Documentation-sidebar".into(),
            ],
            search_result: r#"a[data-gtmc="search result"]"#.into(),
        }
    }
}
