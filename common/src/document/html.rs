//! Tokenizer and tree builder for the small HTML subset the editor accepts.
//!
//! This is not a general HTML parser. It understands start/end/self-closing
//! tags (quoted attribute values may contain `>`; the only attribute read is
//! the text alignment), comments,
//! text and the common character references. The tree builder mirrors the
//! handful of browser recovery rules that matter for email bodies: an end tag
//! closes everything opened after its matching start tag, stray end tags are
//! dropped, a new `<li>` closes the previous item and a block start closes an
//! open paragraph.

use super::Alignment;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*?)(/?)>"#)
        .expect("tag pattern is valid")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]+);").expect("entity pattern is valid")
});

static ALIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:text-align\s*:\s*|\balign\s*=\s*["']?)(left|center|right)"#)
        .expect("align pattern is valid")
});

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "wbr"];

/// Tags whose start implicitly ends an open `<p>`.
const PARAGRAPH_CLOSERS: &[&str] = &[
    "p", "ul", "ol", "div", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "table", "hr",
];

/// Formatting tags allowed between an open `<p>` and the block that closes it.
const INLINE_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "span", "a", "code", "s", "strike", "sub", "sup", "mark",
    "small", "font",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    Start {
        name: String,
        self_closing: bool,
        align: Option<Alignment>,
    },
    End { name: String },
}

/// A token plus the byte offset just past it in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element {
        name: String,
        align: Option<Alignment>,
        children: Vec<HtmlNode>,
    },
    Text(String),
}

impl HtmlNode {
    /// Concatenated text of the node and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            HtmlNode::Text(text) => out.push_str(text),
            HtmlNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Splits `html` into tokens. Tag names are lower-cased, text is
/// entity-decoded and comments are dropped.
pub fn tokenize(html: &str) -> Vec<Spanned> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in TAG_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            tokens.push(Spanned {
                token: Token::Text(decode_entities(&html[last..whole.start()])),
                end: whole.start(),
            });
        }
        last = whole.end();

        // Comments match without a name group.
        let Some(name) = caps.get(2) else { continue };
        let name = name.as_str().to_ascii_lowercase();
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let token = if closing {
            Token::End { name }
        } else {
            let self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty())
                || VOID_TAGS.contains(&name.as_str());
            let align = caps.get(3).and_then(|attrs| parse_alignment(attrs.as_str()));
            Token::Start {
                name,
                self_closing,
                align,
            }
        };
        tokens.push(Spanned { token, end: whole.end() });
    }

    if last < html.len() {
        tokens.push(Spanned {
            token: Token::Text(decode_entities(&html[last..])),
            end: html.len(),
        });
    }
    tokens
}

/// Reads `text-align` from a style attribute or the legacy `align`
/// attribute.
fn parse_alignment(attrs: &str) -> Option<Alignment> {
    let caps = ALIGN_RE.captures(attrs)?;
    match caps[1].to_ascii_lowercase().as_str() {
        "center" => Some(Alignment::Center),
        "right" => Some(Alignment::Right),
        _ => Some(Alignment::Left),
    }
}

/// Replaces character references with the characters they stand for.
/// Unknown named references are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body
                .strip_prefix("#x")
                .or_else(|| body.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match body {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Escapes text for placement between tags.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

struct OpenElement {
    name: String,
    align: Option<Alignment>,
    children: Vec<HtmlNode>,
}

/// Builds a node tree from tokens, applying the recovery rules described in
/// the module docs.
#[derive(Default)]
pub struct TreeBuilder {
    roots: Vec<HtmlNode>,
    open: Vec<OpenElement>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn feed(&mut self, token: Token) {
        match token {
            Token::Text(text) => {
                if !text.is_empty() {
                    self.append(HtmlNode::Text(text));
                }
            }
            Token::Start {
                name,
                self_closing,
                align,
            } => {
                if let Some(idx) = self.implicitly_closed_by(&name) {
                    self.close_down_to(idx);
                }
                if self_closing {
                    self.append(HtmlNode::Element {
                        name,
                        align,
                        children: Vec::new(),
                    });
                } else {
                    self.open.push(OpenElement {
                        name,
                        align,
                        children: Vec::new(),
                    });
                }
            }
            Token::End { name } => {
                if let Some(idx) = self.open.iter().rposition(|e| e.name == name) {
                    self.close_down_to(idx);
                }
            }
        }
    }

    /// Closes every open element and returns the top-level nodes.
    pub fn finish(mut self) -> Vec<HtmlNode> {
        self.close_down_to(0);
        self.roots
    }

    fn append(&mut self, node: HtmlNode) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn close_down_to(&mut self, idx: usize) {
        while self.open.len() > idx {
            let Some(element) = self.open.pop() else { break };
            self.append(HtmlNode::Element {
                name: element.name,
                align: element.align,
                children: element.children,
            });
        }
    }

    fn implicitly_closed_by(&self, name: &str) -> Option<usize> {
        if name == "li" {
            // Previous item of the same list.
            for (idx, element) in self.open.iter().enumerate().rev() {
                match element.name.as_str() {
                    "li" => return Some(idx),
                    "ul" | "ol" => return None,
                    _ => {}
                }
            }
            return None;
        }
        if PARAGRAPH_CLOSERS.contains(&name) {
            for (idx, element) in self.open.iter().enumerate().rev() {
                if element.name == "p" {
                    return Some(idx);
                }
                if !INLINE_TAGS.contains(&element.name.as_str()) {
                    return None;
                }
            }
        }
        None
    }
}

/// Parses an HTML fragment into its top-level nodes.
pub fn parse_fragment(html: &str) -> Vec<HtmlNode> {
    let mut builder = TreeBuilder::new();
    for spanned in tokenize(html) {
        builder.feed(spanned.token);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, children: Vec<HtmlNode>) -> HtmlNode {
        HtmlNode::Element {
            name: name.into(),
            align: None,
            children,
        }
    }

    fn text(t: &str) -> HtmlNode {
        HtmlNode::Text(t.into())
    }

    #[test]
    fn tokenizes_tags_text_and_comments() {
        let tokens: Vec<Token> = tokenize(r#"<P class="x">a<!-- c --><br/>b</p>"#)
            .into_iter()
            .map(|s| s.token)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Start { name: "p".into(), self_closing: false, align: None },
                Token::Text("a".into()),
                Token::Start { name: "br".into(), self_closing: true, align: None },
                Token::Text("b".into()),
                Token::End { name: "p".into() },
            ]
        );
    }

    #[test]
    fn quoted_attribute_may_contain_closing_tag_text() {
        let tokens = tokenize(r#"<span title="</p>">x</span>"#);
        assert!(!tokens
            .iter()
            .any(|s| s.token == Token::End { name: "p".into() }));
    }

    #[test]
    fn spans_point_past_each_token() {
        let html = "<p>Hi</p>rest";
        let ends: Vec<usize> = tokenize(html).into_iter().map(|s| s.end).collect();
        assert_eq!(ends, vec![3, 5, 9, 13]);
    }

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt; &#39;d&#x27; &bogus;"), "a & b <c> 'd' &bogus;");
    }

    #[test]
    fn stray_end_tags_are_ignored_and_open_tags_closed() {
        let nodes = parse_fragment("</b><p>one<strong>two");
        assert_eq!(
            nodes,
            vec![element("p", vec![text("one"), element("strong", vec![text("two")])])]
        );
    }

    #[test]
    fn list_items_and_paragraphs_close_implicitly() {
        let nodes = parse_fragment("<p>intro<ul><li>a<li>b</ul>");
        assert_eq!(
            nodes,
            vec![
                element("p", vec![text("intro")]),
                element(
                    "ul",
                    vec![element("li", vec![text("a")]), element("li", vec![text("b")])]
                ),
            ]
        );
    }

    #[test]
    fn alignment_is_read_from_style_or_align_attribute() {
        let nodes = parse_fragment(
            r#"<p style="text-align: center;">a</p><p align="RIGHT">b</p><p class="x">c</p>"#,
        );
        let aligns: Vec<Option<Alignment>> = nodes
            .iter()
            .map(|node| match node {
                HtmlNode::Element { align, .. } => *align,
                HtmlNode::Text(_) => None,
            })
            .collect();
        assert_eq!(aligns, vec![Some(Alignment::Center), Some(Alignment::Right), None]);
    }

    #[test]
    fn text_content_flattens_descendants() {
        let nodes = parse_fragment("<h1>Big <em>news</em></h1>");
        assert_eq!(nodes[0].text_content(), "Big news");
    }
}
