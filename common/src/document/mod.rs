//! The editor document: an ordered list of paragraphs and lists holding
//! formatted text runs.
//!
//! The document is the source of truth for the editor; HTML is only its
//! serialized form. `to_html` feeds the preview and the send payload,
//! `from_html` ingests templates, browser edits and generated text through the
//! trusted tag subset in [`html`].

pub mod generation;
pub mod html;
pub mod stream;

use html::{HtmlNode, escape_text, parse_fragment};

/// Tags that become plain text runs when found outside a paragraph, rather
/// than a paragraph of their own.
const LOOSE_INLINE_TAGS: &[&str] = &["span", "a", "code", "sub", "sup", "mark", "small", "font"];

/// Tags that set a text format.
const FORMAT_TAGS: &[&str] = &["strong", "b", "em", "i", "u", "s", "strike", "del"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    fn css(self) -> Option<&'static str> {
        match self {
            Alignment::Left => None,
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        }
    }
}

/// A run of text sharing one format.
#[derive(Debug, Clone, PartialEq)]
pub struct Inline {
    pub text: String,
    pub format: TextFormat,
}

impl Inline {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::default(),
        }
    }

    fn write_html(&self, out: &mut String) {
        let f = self.format;
        if f.bold {
            out.push_str("<strong>");
        }
        if f.italic {
            out.push_str("<em>");
        }
        if f.underline {
            out.push_str("<u>");
        }
        if f.strikethrough {
            out.push_str("<s>");
        }
        out.push_str(&escape_text(&self.text));
        if f.strikethrough {
            out.push_str("</s>");
        }
        if f.underline {
            out.push_str("</u>");
        }
        if f.italic {
            out.push_str("</em>");
        }
        if f.bold {
            out.push_str("</strong>");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem(pub Vec<Inline>);

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph { align: Alignment, inlines: Vec<Inline> },
    List { kind: ListKind, items: Vec<ListItem> },
}

impl Block {
    /// A left-aligned paragraph.
    pub fn paragraph(inlines: Vec<Inline>) -> Self {
        Block::Paragraph {
            align: Alignment::Left,
            inlines,
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Block::Paragraph { inlines, .. } => inlines.iter().all(|i| i.text.trim().is_empty()),
            Block::List { .. } => false,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Block::Paragraph { align, inlines } => {
                match align.css() {
                    Some(value) => {
                        out.push_str(r#"<p style="text-align: "#);
                        out.push_str(value);
                        out.push_str(r#";">"#);
                    }
                    None => out.push_str("<p>"),
                }
                if inlines.is_empty() {
                    out.push_str("<br>");
                }
                for inline in inlines {
                    inline.write_html(out);
                }
                out.push_str("</p>");
            }
            Block::List { kind, items } => {
                let tag = match kind {
                    ListKind::Bullet => "ul",
                    ListKind::Number => "ol",
                };
                out.push('<');
                out.push_str(tag);
                out.push('>');
                for ListItem(inlines) in items {
                    out.push_str("<li>");
                    for inline in inlines {
                        inline.write_html(out);
                    }
                    out.push_str("</li>");
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_html(html: &str) -> Self {
        Self {
            blocks: blocks_from_html(html),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// True when there is nothing to show: no blocks, or only blank
    /// paragraphs (an emptied editable area still holds `<p><br></p>`).
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_blank)
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn append(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.extend(blocks);
    }

    /// Appends plain text to the last paragraph, opening a new paragraph when
    /// the document ends with a list or is empty.
    pub fn append_text(&mut self, text: &str) {
        match self.blocks.last_mut() {
            Some(Block::Paragraph { inlines, .. }) => push_inline(inlines, Inline::plain(text)),
            _ => self.blocks.push(Block::paragraph(vec![Inline::plain(text)])),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            block.write_html(&mut out);
        }
        out
    }
}

/// Parses `html` with the trusted tag subset and converts it to blocks.
pub fn blocks_from_html(html: &str) -> Vec<Block> {
    blocks_from_nodes(&parse_fragment(html))
}

/// Converts top-level nodes to blocks. Inline content found between blocks is
/// gathered into a paragraph; whitespace-only runs are dropped.
pub fn blocks_from_nodes(nodes: &[HtmlNode]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending: Vec<Inline> = Vec::new();

    for node in nodes {
        match node {
            HtmlNode::Text(text) => push_inline(&mut pending, Inline::plain(text.as_str())),
            HtmlNode::Element {
                name,
                align,
                children,
            } => match name.as_str() {
                // Browsers wrap new lines of an editable area in `div`.
                "p" | "div" => {
                    flush_pending(&mut blocks, &mut pending);
                    blocks.push(paragraph(align.unwrap_or_default(), children));
                }
                "ul" => {
                    flush_pending(&mut blocks, &mut pending);
                    blocks.push(list(ListKind::Bullet, children));
                }
                "ol" => {
                    flush_pending(&mut blocks, &mut pending);
                    blocks.push(list(ListKind::Number, children));
                }
                tag if FORMAT_TAGS.contains(&tag) => {
                    collect_inlines(std::slice::from_ref(node), TextFormat::default(), &mut pending);
                }
                "br" => flush_pending(&mut blocks, &mut pending),
                "li" => {
                    flush_pending(&mut blocks, &mut pending);
                    blocks.push(paragraph(align.unwrap_or_default(), children));
                }
                tag if LOOSE_INLINE_TAGS.contains(&tag) => {
                    push_inline(&mut pending, Inline::plain(node.text_content()));
                }
                _ => {
                    flush_pending(&mut blocks, &mut pending);
                    let text = node.text_content();
                    if !text.trim().is_empty() {
                        blocks.push(Block::paragraph(vec![Inline::plain(text)]));
                    }
                }
            },
        }
    }
    flush_pending(&mut blocks, &mut pending);
    blocks
}

fn flush_pending(blocks: &mut Vec<Block>, pending: &mut Vec<Inline>) {
    if pending.iter().any(|i| !i.text.trim().is_empty()) {
        blocks.push(Block::paragraph(std::mem::take(pending)));
    } else {
        pending.clear();
    }
}

fn paragraph(align: Alignment, children: &[HtmlNode]) -> Block {
    let mut inlines = Vec::new();
    collect_inlines(children, TextFormat::default(), &mut inlines);
    Block::Paragraph { align, inlines }
}

fn list(kind: ListKind, children: &[HtmlNode]) -> Block {
    let items = children
        .iter()
        .filter_map(|child| match child {
            HtmlNode::Element { name, children, .. } if name == "li" => {
                let mut inlines = Vec::new();
                collect_inlines(children, TextFormat::default(), &mut inlines);
                Some(ListItem(inlines))
            }
            HtmlNode::Element { .. } => {
                let text = child.text_content();
                let inlines = if text.is_empty() {
                    Vec::new()
                } else {
                    vec![Inline::plain(text)]
                };
                Some(ListItem(inlines))
            }
            HtmlNode::Text(_) => None,
        })
        .collect();
    Block::List { kind, items }
}

fn collect_inlines(nodes: &[HtmlNode], format: TextFormat, out: &mut Vec<Inline>) {
    for node in nodes {
        match node {
            HtmlNode::Text(text) => push_inline(
                out,
                Inline {
                    text: text.clone(),
                    format,
                },
            ),
            HtmlNode::Element { name, children, .. } => match name.as_str() {
                "strong" | "b" => collect_inlines(children, TextFormat { bold: true, ..format }, out),
                "em" | "i" => collect_inlines(children, TextFormat { italic: true, ..format }, out),
                "u" => collect_inlines(children, TextFormat { underline: true, ..format }, out),
                "s" | "strike" | "del" => collect_inlines(
                    children,
                    TextFormat {
                        strikethrough: true,
                        ..format
                    },
                    out,
                ),
                "br" => {}
                _ => push_inline(out, Inline::plain(node.text_content())),
            },
        }
    }
}

/// Pushes a run, merging it into the previous one when formats match.
fn push_inline(out: &mut Vec<Inline>, inline: Inline) {
    if inline.text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.format == inline.format => last.text.push_str(&inline.text),
        _ => out.push(inline),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::template::message_templates;

    fn bold(text: &str) -> Inline {
        Inline {
            text: text.into(),
            format: TextFormat {
                bold: true,
                ..TextFormat::default()
            },
        }
    }

    #[test]
    fn converts_paragraphs_lists_and_emphasis() {
        let doc = Document::from_html(
            "<p>Hi <strong>Ann</strong>, <em><u>thanks</u></em></p>\n  <ol><li>one</li><li><b>two</b></li></ol>",
        );
        assert_eq!(
            doc.blocks(),
            &[
                Block::paragraph(vec![
                    Inline::plain("Hi "),
                    bold("Ann"),
                    Inline::plain(", "),
                    Inline {
                        text: "thanks".into(),
                        format: TextFormat {
                            italic: true,
                            underline: true,
                            ..TextFormat::default()
                        },
                    },
                ]),
                Block::List {
                    kind: ListKind::Number,
                    items: vec![ListItem(vec![Inline::plain("one")]), ListItem(vec![bold("two")])],
                },
            ]
        );
    }

    #[test]
    fn unknown_tags_degrade_to_their_text() {
        let doc = Document::from_html("<h1>Big <em>news</em></h1><p>See <a href=\"#\">this <b>link</b></a></p>");
        assert_eq!(
            doc.blocks(),
            &[
                Block::paragraph(vec![Inline::plain("Big news")]),
                Block::paragraph(vec![Inline::plain("See this link")]),
            ]
        );
    }

    #[test]
    fn loose_top_level_text_is_wrapped_and_whitespace_dropped() {
        let doc = Document::from_html("  \n Hello <b>there</b>\n<p>x</p>  ");
        assert_eq!(
            doc.blocks(),
            &[
                Block::paragraph(vec![Inline::plain("  \n Hello "), bold("there"), Inline::plain("\n")]),
                Block::paragraph(vec![Inline::plain("x")]),
            ]
        );
    }

    #[test]
    fn non_item_list_children_become_text_items() {
        let doc = Document::from_html("<ul> <li>a</li> <div>b <i>c</i></div> </ul>");
        assert_eq!(
            doc.blocks(),
            &[Block::List {
                kind: ListKind::Bullet,
                items: vec![
                    ListItem(vec![Inline::plain("a")]),
                    ListItem(vec![Inline::plain("b c")]),
                ],
            }]
        );
    }

    #[test]
    fn html_round_trips_through_the_document() {
        let source = "<p>Tom &amp; Jerry <strong><em>say</em></strong> &lt;hi&gt;</p><ul><li>{{orderedItems}}</li></ul><p><br></p>";
        let doc = Document::from_html(source);
        assert_eq!(doc.to_html(), source);
        assert_eq!(Document::from_html(&doc.to_html()), doc);
    }

    #[test]
    fn templates_parse_into_paragraphs_and_lists() {
        for template in message_templates() {
            let doc = Document::from_html(&template.content);
            assert!(!doc.is_empty(), "{} parsed empty", template.name);
            assert!(doc.to_html().contains("{{restaurantName}}"));
        }
        let feedback = Document::from_html(&message_templates()[0].content);
        assert_eq!(feedback.blocks().len(), 8);
        assert!(matches!(feedback.blocks()[3], Block::List { kind: ListKind::Bullet, ref items } if items.len() == 3));
    }

    #[test]
    fn blank_paragraphs_count_as_empty() {
        let mut doc = Document::from_html("<p><br></p>");
        assert!(doc.is_empty());
        doc.append_text("{{customerName}}");
        assert_eq!(doc.to_html(), "<p>{{customerName}}</p>");
        assert!(!doc.is_empty());
        doc.clear();
        assert!(doc.blocks().is_empty());
    }

    #[test]
    fn browser_line_divs_keep_formatting_and_blank_lines() {
        let doc = Document::from_html("Hello<div><b>second</b> line</div><div><br></div>");
        assert_eq!(
            doc.blocks(),
            &[
                Block::paragraph(vec![Inline::plain("Hello")]),
                Block::paragraph(vec![bold("second"), Inline::plain(" line")]),
                Block::paragraph(Vec::new()),
            ]
        );
        assert_eq!(
            doc.to_html(),
            "<p>Hello</p><p><strong>second</strong> line</p><p><br></p>"
        );
    }

    #[test]
    fn strikethrough_and_alignment_survive_a_round_trip() {
        let doc = Document::from_html(
            r#"<p style="text-align: center;">Hi <strike>old</strike></p><div align="right">x</div><p style="text-align: left;">y</p>"#,
        );
        let struck = Inline {
            text: "old".into(),
            format: TextFormat {
                strikethrough: true,
                ..TextFormat::default()
            },
        };
        assert_eq!(
            doc.blocks(),
            &[
                Block::Paragraph {
                    align: Alignment::Center,
                    inlines: vec![Inline::plain("Hi "), struck],
                },
                Block::Paragraph {
                    align: Alignment::Right,
                    inlines: vec![Inline::plain("x")],
                },
                Block::paragraph(vec![Inline::plain("y")]),
            ]
        );
        assert_eq!(
            doc.to_html(),
            r#"<p style="text-align: center;">Hi <s>old</s></p><p style="text-align: right;">x</p><p>y</p>"#
        );
        assert_eq!(Document::from_html(&doc.to_html()), doc);
    }

    #[test]
    fn append_text_opens_paragraph_after_list() {
        let mut doc = Document::from_html("<ul><li>a</li></ul>");
        doc.append_text("b");
        assert_eq!(doc.to_html(), "<ul><li>a</li></ul><p>b</p>");
    }
}
