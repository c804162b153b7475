//! Selector-based access to a parsed HTML page.
//!
//! Extractors depend on the [`PageAccess`] capability rather than on a concrete
//! parser, so fixtures can be built from literal HTML strings and the parser can
//! be swapped without touching extraction rules.

use ego_tree::{NodeId, NodeRef};
use godoc_core::Error;
use scraper::{ElementRef, Html, Node, Selector};

use super::markdown::SKIPPED;

/// Narrow capability interface over a parsed page.
///
/// Element handles are plain `Copy` values so callers can hold them while
/// mutating the page through [`PageAccess::remove_within`].
pub trait PageAccess {
    /// Opaque handle to one element of the page.
    type Element: Copy;

    /// Every element matching `selector`, in document order.
    fn select(&self, selector: &str) -> Result<Vec<Self::Element>, Error>;

    /// Descendants of `scope` matching `selector`, in document order.
    fn select_within(&self, scope: Self::Element, selector: &str) -> Result<Vec<Self::Element>, Error>;

    /// Whitespace-collapsed visible text of the subtree, or `""` when the element is absent.
    ///
    /// Text inside scripts, styles and similar non-rendered elements is left out.
    fn text_of(&self, element: Option<Self::Element>) -> String;

    /// Value of attribute `name`, `None` when the attribute is absent.
    fn attr_of(&self, element: Self::Element, name: &str) -> Option<String>;

    /// Inner HTML of the element.
    ///
    /// An absent element fails with `RegionNotFound(region)`; an element that
    /// can no longer be serialized fails with `SerializationError`.
    fn html_of(&self, element: Option<Self::Element>, region: &str) -> Result<String, Error>;

    /// Delete every subtree matching `selector`. Returns how many were removed.
    fn remove(&mut self, selector: &str) -> Result<usize, Error>;

    /// Delete every subtree under `scope` matching `selector`. Returns how many were removed.
    fn remove_within(&mut self, scope: Self::Element, selector: &str) -> Result<usize, Error>;

    /// First element matching `selector`.
    fn first(&self, selector: &str) -> Result<Option<Self::Element>, Error> {
        Ok(self.select(selector)?.into_iter().next())
    }
}

/// A page parsed with `scraper`, owned by a single extraction call.
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Resolve a handle to an element that is still part of the document.
    fn attached(&self, id: NodeId) -> Option<ElementRef<'_>> {
        let node = self.html.tree.get(id)?;
        if !is_attached(node, self.html.tree.root().id()) {
            return None;
        }
        ElementRef::wrap(node)
    }

    fn detach_all(&mut self, ids: Vec<NodeId>) -> usize {
        let mut removed = 0;
        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
        removed
    }
}

impl PageAccess for HtmlPage {
    type Element = NodeId;

    fn select(&self, selector: &str) -> Result<Vec<NodeId>, Error> {
        let selector = parse_selector(selector)?;
        let root = self.html.tree.root().id();
        // The tree keeps detached subtrees as orphans; skip them.
        Ok(self
            .html
            .select(&selector)
            .filter(|el| is_attached(**el, root))
            .map(|el| el.id())
            .collect())
    }

    fn select_within(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, Error> {
        let selector = parse_selector(selector)?;
        Ok(match self.attached(scope) {
            Some(scope) => scope.select(&selector).map(|el| el.id()).collect(),
            None => Vec::new(),
        })
    }

    fn text_of(&self, element: Option<NodeId>) -> String {
        element
            .and_then(|id| self.attached(id))
            .map(|el| {
                let mut text = String::new();
                visible_text(*el, &mut text);
                text.split_whitespace().collect::<Vec<_>>().join(" ")
            })
            .unwrap_or_default()
    }

    fn attr_of(&self, element: NodeId, name: &str) -> Option<String> {
        self.attached(element)?.value().attr(name).map(str::to_string)
    }

    fn html_of(&self, element: Option<NodeId>, region: &str) -> Result<String, Error> {
        let id = element.ok_or_else(|| Error::RegionNotFound(region.to_string()))?;
        let el = self
            .attached(id)
            .ok_or_else(|| Error::SerializationError(format!("{region} is no longer part of the page")))?;
        Ok(el.inner_html())
    }

    fn remove(&mut self, selector: &str) -> Result<usize, Error> {
        let ids = self.select(selector)?;
        Ok(self.detach_all(ids))
    }

    fn remove_within(&mut self, scope: NodeId, selector: &str) -> Result<usize, Error> {
        let ids = self.select_within(scope, selector)?;
        Ok(self.detach_all(ids))
    }
}

fn parse_selector(selector: &str) -> Result<Selector, Error> {
    Selector::parse(selector).map_err(|e| Error::InvalidSelector(format!("{selector}: {e}")))
}

fn visible_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if !SKIPPED.contains(&el.name()) => visible_text(child, out),
            _ => {}
        }
    }
}

fn is_attached(node: NodeRef<'_, Node>, root: NodeId) -> bool {
    node.id() == root || node.ancestors().any(|ancestor| ancestor.id() == root)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
        <body>
            <h1>  net/http  </h1>
            <div class="content">
                <p id="first">Package <b>http</b> provides
                    HTTP client and server implementations.</p>
                <a href="/net/url" data-kind="ref">url</a>
                <a data-kind="ref">no href</a>
                <script>var x = 1;</script>
            </div>
            <footer><script>tracking()</script></footer>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_document_order() {
        let page = HtmlPage::parse(PAGE);
        let anchors = page.select("a[data-kind]").unwrap();
        assert_eq!(anchors.len(), 2);
        assert_eq!(page.text_of(Some(anchors[0])), "url");
        assert_eq!(page.text_of(Some(anchors[1])), "no href");
    }

    #[test]
    fn test_select_no_match_is_empty() {
        let page = HtmlPage::parse(PAGE);
        assert!(page.select(".missing").unwrap().is_empty());
        assert!(page.first(".missing").unwrap().is_none());
    }

    #[test]
    fn test_invalid_selector() {
        let page = HtmlPage::parse(PAGE);
        let result = page.select("a[");
        assert!(matches!(result, Err(Error::InvalidSelector(_))));
    }

    #[test]
    fn test_text_of_collapses_whitespace() {
        let page = HtmlPage::parse(PAGE);
        let h1 = page.first("h1").unwrap();
        assert_eq!(page.text_of(h1), "net/http");

        let p = page.first("#first").unwrap();
        assert_eq!(page.text_of(p), "Package http provides HTTP client and server implementations.");
    }

    #[test]
    fn test_text_of_skips_script_and_style() {
        let page = HtmlPage::parse(
            r#"<div id="d">Visible <script>hidden()</script><style>.x { color: red }</style><b>text</b></div>"#,
        );
        let div = page.first("#d").unwrap();
        assert_eq!(page.text_of(div), "Visible text");
    }

    #[test]
    fn test_text_of_absent_element() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(page.text_of(None), "");
    }

    #[test]
    fn test_attr_of() {
        let page = HtmlPage::parse(PAGE);
        let anchors = page.select("a[data-kind]").unwrap();
        assert_eq!(page.attr_of(anchors[0], "href").as_deref(), Some("/net/url"));
        assert_eq!(page.attr_of(anchors[1], "href"), None);
    }

    #[test]
    fn test_html_of_absent_is_region_not_found() {
        let page = HtmlPage::parse(PAGE);
        let result = page.html_of(None, "header");
        assert!(matches!(result, Err(Error::RegionNotFound(region)) if region == "header"));
    }

    #[test]
    fn test_html_of_inner_html() {
        let page = HtmlPage::parse("<div id=\"x\"><em>hi</em></div>");
        let div = page.first("#x").unwrap();
        assert_eq!(page.html_of(div, "x").unwrap(), "<em>hi</em>");
    }

    #[test]
    fn test_html_of_removed_element_is_serialization_error() {
        let mut page = HtmlPage::parse(PAGE);
        let content = page.first(".content").unwrap();
        page.remove(".content").unwrap();
        let result = page.html_of(content, "body");
        assert!(matches!(result, Err(Error::SerializationError(_))));
    }

    #[test]
    fn test_remove_within_scope_only() {
        let mut page = HtmlPage::parse(PAGE);
        let content = page.first(".content").unwrap().unwrap();

        let removed = page.remove_within(content, "script").unwrap();
        assert_eq!(removed, 1);

        assert!(!page.html_of(Some(content), "body").unwrap().contains("var x"));
        assert_eq!(page.select("script").unwrap().len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut page = HtmlPage::parse(PAGE);
        assert_eq!(page.remove("script").unwrap(), 2);
        assert_eq!(page.remove("script").unwrap(), 0);
        assert_eq!(page.remove(".never-there").unwrap(), 0);
    }

    #[test]
    fn test_removed_elements_are_not_selectable() {
        let mut page = HtmlPage::parse(PAGE);
        page.remove(".content").unwrap();
        assert!(page.select("a").unwrap().is_empty());
        assert_eq!(page.text_of(page.first("h1").unwrap()), "net/http");
    }
}
