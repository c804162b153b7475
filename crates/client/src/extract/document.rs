//! Package documentation page extraction.
//!
//! The pipeline runs in fixed, separately testable steps and stops at the first
//! failure:
//!
//! 1. Locate the header and body regions (both required).
//! 2. Read the title, overview and version text.
//! 3. Sanitize the body region.
//! 4. Serialize both regions, rewrite root-relative links, convert to Markdown.
//! 5. Assemble the `# Overview` / `# Documentation` document.

use godoc_core::{Error, Package};

use super::PageLayout;
use super::dom::PageAccess;
use super::links::rewrite_root_relative;
use super::markdown::MarkdownConverter;

pub const HEADER_REGION: &str = "header";
pub const BODY_REGION: &str = "body";

/// Extract a fully populated [`Package`] from a documentation page.
///
/// `url` is echoed into the result unchanged. On failure no partial package is returned.
pub fn extract_package<P: PageAccess>(
    page: &mut P, url: &str, base_url: &str, layout: &PageLayout, converter: &MarkdownConverter,
) -> Result<Package, Error> {
    let header = locate_region(page, &layout.header, HEADER_REGION)?;
    let body = locate_region(page, &layout.body, BODY_REGION)?;

    let name = page.text_of(page.first(&layout.title)?);
    let description = page.text_of(page.first(&layout.description)?);
    let version = page.text_of(page.first(&layout.version)?);

    sanitize(page, body, &layout.noise)?;

    let header_html = page.html_of(Some(header), HEADER_REGION)?;
    let body_html = page.html_of(Some(body), BODY_REGION)?;

    let header_markdown = render_fragment(&header_html, base_url, converter);
    let body_markdown = render_fragment(&body_html, base_url, converter);

    Ok(Package {
        name,
        description,
        url: url.to_string(),
        version,
        documentation: assemble_documentation(&header_markdown, &body_markdown),
    })
}

/// First element matching `selector`, or `RegionNotFound(region)`.
pub fn locate_region<P: PageAccess>(page: &P, selector: &str, region: &str) -> Result<P::Element, Error> {
    page.first(selector)?
        .ok_or_else(|| Error::RegionNotFound(region.to_string()))
}

/// Remove every noise subtree under `region`, in the order given.
pub fn sanitize<P: PageAccess>(page: &mut P, region: P::Element, noise: &[String]) -> Result<(), Error> {
    for selector in noise {
        let removed = page.remove_within(region, selector)?;
        if removed > 0 {
            tracing::debug!(selector = %selector, removed, "sanitized body region");
        }
    }
    Ok(())
}

/// Rewrite links in a serialized fragment and convert it to trimmed Markdown.
pub fn render_fragment(html: &str, base_url: &str, converter: &MarkdownConverter) -> String {
    converter
        .convert(&rewrite_root_relative(html, base_url))
        .trim()
        .to_string()
}

/// Join the two sections. Both headings are always present, even around empty content.
pub fn assemble_documentation(header_markdown: &str, body_markdown: &str) -> String {
    format!("# Overview\n\n{header_markdown}\n\n# Documentation\n\n{body_markdown}")
}
