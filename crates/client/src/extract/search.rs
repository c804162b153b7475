//! Search-results page extraction.

use godoc_core::{Error, Package};

use super::PageLayout;
use super::dom::PageAccess;

/// Collect the search hits of a results page, in document order.
///
/// Anchors without an `href` are skipped. A page with no hits yields an empty list.
pub fn extract_search_results<P: PageAccess>(
    page: &P, base_url: &str, layout: &PageLayout,
) -> Result<Vec<Package>, Error> {
    let base = base_url.trim_end_matches('/');
    let mut packages = Vec::new();

    for anchor in page.select(&layout.search_result)? {
        let Some(href) = page.attr_of(anchor, "href") else {
            tracing::warn!(text = %page.text_of(Some(anchor)), "skipping search result without href");
            continue;
        };
        packages.push(search_hit(base, &href));
    }

    Ok(packages)
}

/// Name and absolute URL for one result href.
fn search_hit(base: &str, href: &str) -> Package {
    if href.starts_with("http://") || href.starts_with("https://") {
        let name = href.strip_prefix(&format!("{base}/")).unwrap_or(href);
        return Package::summary(name, href);
    }

    match href.strip_prefix('/') {
        Some(name) => Package::summary(name, format!("{base}{href}")),
        None => Package::summary(href, format!("{base}/{href}")),
    }
}
