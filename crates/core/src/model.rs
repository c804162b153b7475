//! Domain model shared by the extractors, the client and the tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One documentation subject on the package site.
///
/// Search results fill only `name` and `url`; details extraction fills every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Package {
    /// Import path or page title.
    pub name: String,
    /// Short synopsis, may be empty.
    pub description: String,
    /// Absolute URL of the package page.
    pub url: String,
    /// Free-form version label, may be empty.
    pub version: String,
    /// Assembled Markdown documentation, empty for search results.
    pub documentation: String,
}

impl Package {
    /// A search hit: name and url only.
    pub fn summary(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into(), ..Default::default() }
    }
}
