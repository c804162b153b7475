//! Package search and details against the documentation site.

use async_trait::async_trait;
use godoc_core::{AppConfig, Error, Package};
use std::time::Instant;
use url::Url;

use crate::extract::{
    HtmlPage, MarkdownConverter, MarkdownStyle, PageLayout, extract_package, extract_search_results,
};
use crate::fetch::{FetchClient, FetchConfig, canonicalize, same_site, search_url};

/// Converter shared by every details call. The style never changes at runtime.
static CONVERTER: MarkdownConverter = MarkdownConverter::new(MarkdownStyle::DEFAULT);

/// Source of package information.
///
/// Tools depend on this trait so they can be exercised without the network.
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// Candidate packages for `query`, in the site's ranking order.
    async fn search(&self, query: &str) -> Result<Vec<Package>, Error>;

    /// Fully extracted documentation for the package page at `url`.
    async fn details(&self, url: &str) -> Result<Package, Error>;
}

/// [`PackageSource`] backed by live pages of the documentation site.
#[derive(Debug, Clone)]
pub struct GoDocClient {
    fetcher: FetchClient,
    site: Url,
    base_url: String,
    layout: PageLayout,
}

impl GoDocClient {
    /// Create a client for the site configured in `config`.
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        let site = canonicalize(&config.base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let fetcher = FetchClient::new(FetchConfig::from(config))?;

        Ok(Self { fetcher, site, base_url: config.site_root().to_string(), layout: PageLayout::default() })
    }

    /// Use a different page layout, e.g. for a mirror with its own markup.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Site root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    fn parse_search_page(&self, html: &str) -> Result<Vec<Package>, Error> {
        let page = HtmlPage::parse(html);
        extract_search_results(&page, &self.base_url, &self.layout)
    }

    fn parse_details_page(&self, html: &str, url: &str) -> Result<Package, Error> {
        let mut page = HtmlPage::parse(html);
        extract_package(&mut page, url, &self.base_url, &self.layout, &CONVERTER)
    }
}

#[async_trait]
impl PackageSource for GoDocClient {
    async fn search(&self, query: &str) -> Result<Vec<Package>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        let start = Instant::now();
        let url = search_url(&self.base_url, query).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let response = self.fetcher.fetch(url.as_str()).await?;
        let packages = self.parse_search_page(&response.text())?;

        tracing::info!(
            query,
            results = packages.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );

        Ok(packages)
    }

    async fn details(&self, url: &str) -> Result<Package, Error> {
        if url.trim().is_empty() {
            return Err(Error::InvalidInput("url cannot be empty".into()));
        }

        let target = canonicalize(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        if !same_site(&target, &self.site) {
            return Err(Error::InvalidUrl(format!("{} is not on {}", target, self.base_url)));
        }

        let start = Instant::now();
        let response = self.fetcher.fetch(target.as_str()).await?;
        if !same_site(&response.final_url, &self.site) {
            return Err(Error::InvalidUrl(format!("{} redirected to {}", target, response.final_url)));
        }
        let package = self.parse_details_page(&response.text(), url)?;

        tracing::info!(
            url,
            name = %package.name,
            bytes = response.bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "details extracted"
        );

        Ok(package)
    }
}
