//! Root-relative link rewriting for serialized HTML fragments.
//!
//! The rewrite is textual: every `href="/` becomes `href="<base>/`. It does not
//! parse attribute values, so the same byte sequence inside text content (a code
//! sample quoting an anchor, for instance) is rewritten too. Already absolute
//! hrefs never start with `/`, so rewriting twice is a no-op.

const ROOT_RELATIVE_HREF: &str = "href=\"/";

/// Rewrite root-relative hrefs in `html` against `base_url`.
pub fn rewrite_root_relative(html: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    html.replace(ROOT_RELATIVE_HREF, &format!("href=\"{base}/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://pkg.example";

    #[test]
    fn test_rewrite_root_relative() {
        let rewritten = rewrite_root_relative(r#"<a href="/pkg/foo">x</a>"#, BASE);
        assert_eq!(rewritten, r#"<a href="https://pkg.example/pkg/foo">x</a>"#);
    }

    #[test]
    fn test_rewrite_leaves_other_hrefs() {
        let html = r##"<a href="https://other.example/x">a</a><a href="#Client">b</a><a href="rel/path">c</a>"##;
        assert_eq!(rewrite_root_relative(html, BASE), html);
    }

    #[test]
    fn test_rewrite_every_occurrence() {
        let html = r#"<a href="/a">a</a> and <a href="/b">b</a>"#;
        assert_eq!(
            rewrite_root_relative(html, BASE),
            r#"<a href="https://pkg.example/a">a</a> and <a href="https://pkg.example/b">b</a>"#
        );
    }

    #[test]
    fn test_rewrite_twice_does_not_double_prefix() {
        let once = rewrite_root_relative(r#"<a href="/pkg/foo">x</a>"#, BASE);
        let twice = rewrite_root_relative(&once, BASE);
        assert_eq!(once, twice);
        assert!(!twice.contains("https://pkg.example/https://pkg.example"));
    }

    #[test]
    fn test_rewrite_trailing_slash_base() {
        let rewritten = rewrite_root_relative(r#"<a href="/io">io</a>"#, "https://pkg.example/");
        assert_eq!(rewritten, r#"<a href="https://pkg.example/io">io</a>"#);
    }

    #[test]
    fn test_rewrite_single_quoted_untouched() {
        let html = "<a href='/io'>io</a>";
        assert_eq!(rewrite_root_relative(html, BASE), html);
    }

    #[test]
    fn test_rewrite_matches_inside_text_content() {
        let html = r#"<code>fmt.Println(`href="/x"`)</code>"#;
        assert_eq!(rewrite_root_relative(html, BASE), r#"<code>fmt.Println(`href="https://pkg.example/x"`)</code>"#);
    }
}
