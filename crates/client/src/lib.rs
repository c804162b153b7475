//! Client code for godoc-mcp.
//!
//! This crate provides the HTTP fetch pipeline, documentation page extraction,
//! and the `PackageSource` used by the server and CLI.

pub mod extract;
pub mod fetch;
pub mod source;

pub use extract::{
    HtmlPage, MarkdownConverter, MarkdownStyle, PageAccess, PageLayout, assemble_documentation, extract_package,
    extract_search_results, rewrite_root_relative,
};

pub use fetch::{FetchClient, FetchConfig, FetchResponse};
pub use source::{GoDocClient, PackageSource};
