//! HTML fragment to Markdown conversion.
//!
//! ### Rules
//! - Headings become ATX headings, paragraphs and containers become blocks separated by a blank line.
//! - Lists nest by indentation; `<pre>` becomes a fenced code block, `<code>` an inline code span.
//! - Emphasis uses the delimiters of the configured [`MarkdownStyle`].
//! - Text outside code is escaped, so `*T` or `a_b` in prose stays literal.
//! - Unknown elements render as their content. Scripts, styles and comments never reach the output.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

/// Elements whose content is never rendered.
pub(crate) const SKIPPED: &[&str] = &[
    "head", "script", "style", "noscript", "template", "link", "meta", "iframe", "input", "textarea", "svg",
];

/// Elements that start a new block.
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "details", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html",
    "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "tbody", "tfoot", "thead", "tr", "ul",
];

/// Fixed rendering style of the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownStyle {
    /// Delimiter around `<strong>`/`<b>` content.
    pub strong_delimiter: &'static str,
    /// Delimiter around `<em>`/`<i>` content.
    pub em_delimiter: &'static str,
    /// Marker for unordered list items.
    pub bullet_marker: char,
}

impl MarkdownStyle {
    pub const DEFAULT: Self = Self { strong_delimiter: "**", em_delimiter: "*", bullet_marker: '-' };
}

impl Default for MarkdownStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Stateless HTML to Markdown converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter {
    style: MarkdownStyle,
}

impl MarkdownConverter {
    pub const fn new(style: MarkdownStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &MarkdownStyle {
        &self.style
    }

    /// Convert an HTML fragment to trimmed Markdown.
    pub fn convert(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let mut blocks = Vec::new();
        self.render_blocks(*fragment.root_element(), &mut blocks);
        blocks.join("\n\n").trim().to_string()
    }

    /// Render the children of `node` as a sequence of blocks.
    ///
    /// Consecutive inline children are gathered into one paragraph.
    fn render_blocks(&self, node: NodeRef<'_, Node>, blocks: &mut Vec<String>) {
        let mut inline = String::new();

        for child in node.children() {
            match child.value() {
                Node::Text(text) => inline.push_str(&escape_text(&collapse_whitespace(text))),
                Node::Element(el) => {
                    let name = el.name();
                    if SKIPPED.contains(&name) {
                        continue;
                    }
                    if BLOCKS.contains(&name) {
                        flush_paragraph(&mut inline, blocks);
                        self.render_block_element(child, name, blocks);
                    } else {
                        self.render_inline_element(child, name, &mut inline);
                    }
                }
                _ => {}
            }
        }

        flush_paragraph(&mut inline, blocks);
    }

    fn render_block_element(&self, node: NodeRef<'_, Node>, name: &str, blocks: &mut Vec<String>) {
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                let text = tidy_inline(&self.inline_content(node)).replace('\n', " ");
                if !text.is_empty() {
                    blocks.push(format!("{} {}", "#".repeat(level), text));
                }
            }
            "ul" => self.render_list(node, false, blocks),
            "ol" => self.render_list(node, true, blocks),
            "pre" => blocks.push(render_code_block(node)),
            "blockquote" => {
                let mut inner = Vec::new();
                self.render_blocks(node, &mut inner);
                if !inner.is_empty() {
                    let quoted = inner
                        .join("\n\n")
                        .lines()
                        .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
                        .collect::<Vec<_>>()
                        .join("\n");
                    blocks.push(quoted);
                }
            }
            "hr" => blocks.push("---".to_string()),
            "table" => {
                if let Some(table) = self.render_table(node) {
                    blocks.push(table);
                }
            }
            _ => self.render_blocks(node, blocks),
        }
    }

    fn render_list(&self, node: NodeRef<'_, Node>, ordered: bool, blocks: &mut Vec<String>) {
        let mut index = ElementRef::wrap(node)
            .and_then(|el| el.value().attr("start"))
            .and_then(|start| start.trim().parse::<usize>().ok())
            .unwrap_or(1);

        let mut items = Vec::new();
        for child in node.children() {
            let Some(el) = ElementRef::wrap(child) else { continue };
            if SKIPPED.contains(&el.value().name()) {
                continue;
            }

            let marker = if ordered { format!("{index}.") } else { self.style.bullet_marker.to_string() };
            let mut item_blocks = Vec::new();
            self.render_blocks(child, &mut item_blocks);
            items.push(indent_item(&marker, &item_blocks.join("\n")));
            index += 1;
        }

        if !items.is_empty() {
            blocks.push(items.join("\n"));
        }
    }

    fn render_table(&self, node: NodeRef<'_, Node>) -> Option<String> {
        let rows: Vec<Vec<String>> = node
            .descendants()
            .filter(|n| n.value().as_element().is_some_and(|el| el.name() == "tr"))
            .map(|row| {
                row.children()
                    .filter(|cell| cell.value().as_element().is_some_and(|el| matches!(el.name(), "td" | "th")))
                    .map(|cell| tidy_inline(&self.inline_content(cell)).replace('\n', " ").replace('|', "\\|"))
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        let columns = rows.iter().map(Vec::len).max()?;
        let format_row = |cells: &[String]| {
            let mut padded = cells.to_vec();
            padded.resize(columns, String::new());
            format!("| {} |", padded.join(" | "))
        };

        let mut lines = vec![format_row(&rows[0]), format!("|{}", " --- |".repeat(columns))];
        lines.extend(rows[1..].iter().map(|row| format_row(row)));
        Some(lines.join("\n"))
    }

    fn render_inline_element(&self, node: NodeRef<'_, Node>, name: &str, out: &mut String) {
        match name {
            "br" => out.push('\n'),
            "strong" | "b" => wrap_emphasis(self.style.strong_delimiter, &self.inline_content(node), out),
            "em" | "i" => wrap_emphasis(self.style.em_delimiter, &self.inline_content(node), out),
            "code" | "kbd" | "samp" | "tt" => {
                let text = raw_text(node);
                out.push_str(&code_span(collapse_whitespace(&text).trim()));
            }
            "a" => {
                let content = self.inline_content(node);
                let label = tidy_inline(&content).replace('\n', " ");
                let el = ElementRef::wrap(node);
                let href = el.and_then(|el| el.value().attr("href")).map(str::trim).unwrap_or("");
                if href.is_empty() {
                    out.push_str(&content);
                } else if !label.is_empty() {
                    let href = href.replace(' ', "%20");
                    match el.and_then(|el| el.value().attr("title")) {
                        Some(title) => {
                            out.push_str(&format!("[{label}]({href} \"{}\")", title.replace('"', "\\\"")))
                        }
                        None => out.push_str(&format!("[{label}]({href})")),
                    }
                }
            }
            "img" => {
                if let Some(el) = ElementRef::wrap(node)
                    && let Some(src) = el.value().attr("src")
                {
                    let alt = el.value().attr("alt").unwrap_or("");
                    out.push_str(&format!("![{alt}]({src})"));
                }
            }
            _ if BLOCKS.contains(&name) => {
                out.push(' ');
                out.push_str(&self.inline_content(node));
                out.push(' ');
            }
            _ => out.push_str(&self.inline_content(node)),
        }
    }

    /// Render the children of `node` as inline Markdown.
    fn inline_content(&self, node: NodeRef<'_, Node>) -> String {
        let mut out = String::new();
        for child in node.children() {
            match child.value() {
                Node::Text(text) => out.push_str(&escape_text(&collapse_whitespace(text))),
                Node::Element(el) if !SKIPPED.contains(&el.name()) => {
                    self.render_inline_element(child, el.name(), &mut out)
                }
                _ => {}
            }
        }
        out
    }
}

fn flush_paragraph(inline: &mut String, blocks: &mut Vec<String>) {
    let paragraph = tidy_inline(inline);
    if !paragraph.is_empty() {
        blocks.push(paragraph.lines().map(escape_line_start).collect::<Vec<_>>().join("\n"));
    }
    inline.clear();
}

/// Backslash-escape characters that Markdown would read as inline syntax.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a leading heading, bullet or ordered-list marker so the line stays a paragraph line.
fn escape_line_start(line: &str) -> String {
    if line.starts_with(['#', '-', '+']) {
        return format!("\\{line}");
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && line[digits..].starts_with(['.', ')']) {
        return format!("{}\\{}", &line[..digits], &line[digits..]);
    }

    line.to_string()
}

/// Replace every whitespace run with a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Collapse spaces on each line and drop blank leading/trailing lines.
fn tidy_inline(text: &str) -> String {
    text.split('\n')
        .map(|line| line.split(' ').filter(|word| !word.is_empty()).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

fn wrap_emphasis(delimiter: &str, content: &str, out: &mut String) {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        out.push_str(content);
        return;
    }
    if content.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(delimiter);
    out.push_str(trimmed);
    out.push_str(delimiter);
    if content.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn raw_text(node: NodeRef<'_, Node>) -> String {
    node.descendants()
        .filter_map(|n| n.value().as_text().map(|text| &**text))
        .collect()
}

fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

fn code_span(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    let ticks = "`".repeat(longest_backtick_run(code) + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{ticks} {code} {ticks}")
    } else {
        format!("{ticks}{code}{ticks}")
    }
}

fn render_code_block(node: NodeRef<'_, Node>) -> String {
    let code = raw_text(node);
    let code = code.trim_matches('\n');
    let fence = "`".repeat(longest_backtick_run(code).max(2) + 1);
    format!("{fence}{}\n{code}\n{fence}", code_language(node).unwrap_or_default())
}

/// Language from a `language-*` or `lang-*` class on the block or its first `<code>`.
fn code_language(node: NodeRef<'_, Node>) -> Option<String> {
    let code_child = node
        .children()
        .find(|child| child.value().as_element().is_some_and(|el| el.name() == "code"));

    [Some(node), code_child]
        .into_iter()
        .flatten()
        .filter_map(|n| n.value().as_element())
        .flat_map(|el| el.classes())
        .find_map(|class| class.strip_prefix("language-").or_else(|| class.strip_prefix("lang-")))
        .map(str::to_string)
}

fn indent_item(marker: &str, body: &str) -> String {
    let indent = " ".repeat(marker.len() + 1);
    let mut lines = body.lines();
    let mut out = match lines.next() {
        Some(first) => format!("{marker} {first}"),
        None => marker.to_string(),
    };
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&indent);
            out.push_str(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(html: &str) -> String {
        MarkdownConverter::default().convert(html)
    }

    #[test]
    fn test_default_style() {
        let style = MarkdownStyle::default();
        assert_eq!(style.strong_delimiter, "**");
        assert_eq!(style.em_delimiter, "*");
        assert_eq!(MarkdownConverter::default().style(), &MarkdownStyle::DEFAULT);
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let md = convert("<h2>Overview</h2><p>Package   http\n provides clients.</p><p>Second.</p>");
        assert_eq!(md, "## Overview\n\nPackage http provides clients.\n\nSecond.");
    }

    #[test]
    fn test_emphasis_delimiters() {
        let md = convert("<p>a <strong>bold</strong> and <em>italic</em> and <b> spaced </b>word</p>");
        assert_eq!(md, "a **bold** and *italic* and **spaced** word");
    }

    #[test]
    fn test_custom_style() {
        let converter =
            MarkdownConverter::new(MarkdownStyle { strong_delimiter: "__", em_delimiter: "_", bullet_marker: '*' });
        assert_eq!(converter.convert("<p><b>x</b> <i>y</i></p><ul><li>z</li></ul>"), "__x__ _y_\n\n* z");
    }

    #[test]
    fn test_links_with_and_without_title() {
        let md = convert(
            r##"<p>See <a href="https://pkg.example/io">io</a> <a href="#Client" title="Go to Client">¶</a></p>"##,
        );
        assert_eq!(md, r##"See [io](https://pkg.example/io) [¶](#Client "Go to Client")"##);
    }

    #[test]
    fn test_link_without_href_keeps_text() {
        assert_eq!(convert("<p><a name=\"x\">anchor</a> text</p>"), "anchor text");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(convert("<p>Call <code>http.Get</code> now</p>"), "Call `http.Get` now");
        assert_eq!(convert("<p><code>a`b</code></p>"), "``a`b``");
    }

    #[test]
    fn test_code_block_preserves_whitespace() {
        let md = convert("<pre>func main() {\n\tfmt.Println(\"hi\")\n}\n</pre>");
        assert_eq!(md, "```\nfunc main() {\n\tfmt.Println(\"hi\")\n}\n```");
    }

    #[test]
    fn test_code_block_language_and_spans() {
        let md = convert(r#"<pre><code class="language-go">x := <span class="k">1</span></code></pre>"#);
        assert_eq!(md, "```go\nx := 1\n```");
    }

    #[test]
    fn test_code_block_containing_fence() {
        let md = convert("<pre>```\ninner\n```</pre>");
        assert!(md.starts_with("````\n"));
        assert!(md.ends_with("\n````"));
    }

    #[test]
    fn test_unordered_and_nested_lists() {
        let md = convert("<ul><li>one</li><li>two<ul><li>inner</li></ul></li></ul>");
        assert_eq!(md, "- one\n- two\n  - inner");
    }

    #[test]
    fn test_ordered_list_with_start() {
        let md = convert(r#"<ol start="3"><li>c</li><li>d</li></ol>"#);
        assert_eq!(md, "3. c\n4. d");
    }

    #[test]
    fn test_blockquote() {
        let md = convert("<blockquote><p>one</p><p>two</p></blockquote>");
        assert_eq!(md, "> one\n>\n> two");
    }

    #[test]
    fn test_table() {
        let md = convert("<table><tr><th>Path</th><th>Synopsis</th></tr><tr><td>cgi</td><td>a|b</td></tr></table>");
        assert_eq!(md, "| Path | Synopsis |\n| --- | --- |\n| cgi | a\\|b |");
    }

    #[test]
    fn test_line_break_and_rule() {
        assert_eq!(convert("<p>a<br>b</p><hr><p>c</p>"), "a\nb\n\n---\n\nc");
    }

    #[test]
    fn test_image() {
        assert_eq!(convert(r#"<p><img src="/logo.svg" alt="Go"></p>"#), "![Go](/logo.svg)");
    }

    #[test]
    fn test_scripts_styles_and_comments_dropped() {
        let md = convert("<div><script>alert(1)</script><style>p{}</style><!-- note --><p>kept</p></div>");
        assert_eq!(md, "kept");
    }

    #[test]
    fn test_unknown_elements_degrade_to_content() {
        let md = convert("<custom-widget><span>inner <blink>text</blink></span></custom-widget>");
        assert_eq!(md, "inner text");
    }

    #[test]
    fn test_malformed_html_does_not_fail() {
        let md = convert("<p>unclosed <b>bold <i>both</p><div>after");
        assert!(md.contains("unclosed"));
        assert!(md.contains("after"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), "");
        assert_eq!(convert("   \n  "), "");
    }

    #[test]
    fn test_deterministic() {
        let html = "<h3>T</h3><ul><li><a href=\"/x\">x</a></li></ul><pre>code</pre>";
        assert_eq!(convert(html), convert(html));
    }

    #[test]
    fn test_inline_wrapping_block_does_not_glue_words() {
        assert_eq!(convert("<a href=\"/x\"><div>one</div><div>two</div></a>"), "[one two](/x)");
    }

    #[test]
    fn test_pointer_types_stay_literal() {
        let md = convert("<p>Get returns a *Response and a *Request.</p>");
        assert_eq!(md, r"Get returns a \*Response and a \*Request.");
    }

    #[test]
    fn test_inline_syntax_in_text_is_escaped() {
        assert_eq!(convert("<p>max_bytes and min_bytes</p>"), r"max\_bytes and min\_bytes");
        assert_eq!(convert("<p>see [x](y)</p>"), r"see \[x\](y)");
        assert_eq!(convert("<p>func Map[K comparable, V any]()</p>"), r"func Map\[K comparable, V any\]()");
        assert_eq!(convert("<p>type List&lt;T any&gt;</p>"), r"type List\<T any\>");
        assert_eq!(convert(r"<p>C:\dir and `tick`</p>"), r"C:\\dir and \`tick\`");
    }

    #[test]
    fn test_code_is_not_escaped() {
        assert_eq!(convert("<p><code>*http.Request</code></p>"), "`*http.Request`");
        assert_eq!(convert("<pre>var x_y *T</pre>"), "```\nvar x_y *T\n```");
    }

    #[test]
    fn test_escaped_text_inside_markup() {
        let md = convert(r#"<p><a href="https://pkg.example/io">*Reader</a> is <b>a_b</b></p>"#);
        assert_eq!(md, r"[\*Reader](https://pkg.example/io) is **a\_b**");
    }

    #[test]
    fn test_block_start_markers_are_escaped() {
        assert_eq!(convert("<p># not a heading</p>"), r"\# not a heading");
        assert_eq!(convert("<p>- not a bullet</p>"), r"\- not a bullet");
        assert_eq!(convert("<p>+ not a bullet</p>"), r"\+ not a bullet");
        assert_eq!(convert("<p>1. not a list</p>"), r"1\. not a list");
        assert_eq!(convert("<p>2024) not a list</p>"), r"2024\) not a list");
        assert_eq!(convert("<p>first<br>- second</p>"), "first\n\\- second");
    }

    #[test]
    fn test_markers_mid_line_untouched() {
        assert_eq!(convert("<p>a - b + c # d 1. e</p>"), "a - b + c # d 1. e");
        assert_eq!(convert("<p>v1.22.0</p>"), "v1.22.0");
    }

    #[test]
    fn test_generated_markup_not_escaped_at_line_start() {
        assert_eq!(convert("<ul><li>1. item</li></ul>"), r"- 1\. item");
        assert_eq!(convert("<h2>Index</h2>"), "## Index");
    }

    #[test]
    fn test_indent_item_multiline() {
        assert_eq!(indent_item("10.", "first\n\nsecond"), "10. first\n\n    second");
        assert_eq!(indent_item("-", ""), "-");
    }
}
