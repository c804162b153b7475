//! URL canonicalization and site URL construction.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a URL string before fetching.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str() {
        let host = host.to_lowercase();
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Search page URL on the site: `<base>/search?q=<query>`.
pub fn search_url(base_url: &str, query: &str) -> Result<url::Url, UrlError> {
    let mut url = canonicalize(&format!("{}/search", base_url.trim_end_matches('/')))?;
    url.query_pairs_mut().append_pair("q", query);
    Ok(url)
}

/// Whether `url` points at the same scheme, host and port as `site`.
pub fn same_site(url: &url::Url, site: &url::Url) -> bool {
    url.scheme() == site.scheme()
        && url.host_str() == site.host_str()
        && url.port_or_known_default() == site.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_basic() {
        let url = canonicalize("https://pkg.go.dev/net/http").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("pkg.go.dev"));
        assert_eq!(url.path(), "/net/http");
    }

    #[test]
    fn test_canonicalize_default_scheme() {
        let url = canonicalize("pkg.go.dev/fmt").unwrap();
        assert_eq!(url.as_str(), "https://pkg.go.dev/fmt");
    }

    #[test]
    fn test_canonicalize_lowercase_host() {
        let url = canonicalize("https://PKG.GO.DEV/fmt").unwrap();
        assert_eq!(url.host_str(), Some("pkg.go.dev"));
    }

    #[test]
    fn test_canonicalize_remove_fragment() {
        let url = canonicalize("https://pkg.go.dev/net/http#Client").unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path(), "/net/http");
    }

    #[test]
    fn test_canonicalize_preserve_query() {
        let url = canonicalize("https://pkg.go.dev/net/http?tab=versions").unwrap();
        assert_eq!(url.query(), Some("tab=versions"));
    }

    #[test]
    fn test_canonicalize_unsupported_scheme() {
        let result = canonicalize("file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(matches!(canonicalize(""), Err(UrlError::Empty)));
        assert!(matches!(canonicalize("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = search_url("https://pkg.go.dev", "mcp go&x").unwrap();
        assert_eq!(url.as_str(), "https://pkg.go.dev/search?q=mcp+go%26x");
    }

    #[test]
    fn test_search_url_trailing_slash_base() {
        let url = search_url("https://pkg.go.dev/", "http").unwrap();
        assert_eq!(url.as_str(), "https://pkg.go.dev/search?q=http");
    }

    #[test]
    fn test_same_site() {
        let site = url::Url::parse("https://pkg.go.dev").unwrap();
        assert!(same_site(&canonicalize("pkg.go.dev/fmt").unwrap(), &site));
        assert!(same_site(&canonicalize("https://pkg.go.dev:443/fmt").unwrap(), &site));
        assert!(!same_site(&canonicalize("https://evil.example/fmt").unwrap(), &site));
        assert!(!same_site(&canonicalize("http://pkg.go.dev/fmt").unwrap(), &site));
    }
}
