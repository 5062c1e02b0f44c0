//! Tree-sitter backed Markdown parsing.
//!
//! The block grammar from tree-sitter-md gives us heading and HTML block positions; the inline
//! text of each heading is flattened to plain text with pulldown-cmark, which already knows how
//! emphasis, code spans, links and escapes reduce to text. The dialect knobs in [`ParseOptions`]
//! that the `CommonMark` grammar cannot express directly are applied as adjustments to the
//! located headings.

use crate::anchor::AnchorGenerator;
use crate::document::{CommentBlock, Document, RawHeading};
use crate::formats::Format;
use crate::options::Variant;
use crate::{Error, Result};
use pulldown_cmark::Event;
use regex::Regex;
use std::sync::LazyLock;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Query, QueryCursor};

static HASH_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})([^#\s].*?)\s*$").expect("heading pattern is a valid regex")
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Dialect settings forwarded to the parser. `None` keeps the `CommonMark` behaviour.
pub struct ParseOptions {
    /// Dialect profile.
    pub variant: Variant,
    /// Require a space after the `#` run; `Some(false)` also accepts `#Heading`.
    pub require_space: Option<bool>,
    /// Keep runs of dashes in anchor ids.
    pub duped_dashes: Option<bool>,
    /// Suffix repeated anchor ids.
    pub resolve_dupes: Option<bool>,
    /// Characters turned into dashes in anchor ids.
    pub dash_chars: Option<String>,
    /// Characters kept verbatim in anchor ids.
    pub allowed_chars: Option<String>,
    /// `Some(false)` rejects headings indented by any amount.
    pub allow_leading_space: Option<bool>,
    /// Minimum setext underline length.
    pub setext_marker_length: Option<usize>,
    /// `Some(false)` rejects a bare `##` with nothing after the marker.
    pub empty_heading_without_space: Option<bool>,
    /// `Some(false)` rejects headings directly after a list item's paragraph.
    pub heading_interrupts_item_paragraph: Option<bool>,
}

/// Compiled grammar and queries for one format.
pub struct MarkdownParser {
    language: Language,
    heading_query: Query,
    comment_query: Query,
    paragraph_query: Query,
}

impl MarkdownParser {
    /// Compile the queries of `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query does not match the format's grammar.
    pub fn new(format: &dyn Format) -> Result<Self> {
        let language = format.language();
        let compile = |source: &str| {
            Query::new(&language, source).map_err(|e| Error::Parser(e.to_string()))
        };
        Ok(Self {
            heading_query: compile(format.heading_query())?,
            comment_query: compile(format.comment_query())?,
            paragraph_query: compile(format.paragraph_query())?,
            language,
        })
    }

    /// Parse `text` into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or tree-sitter gives up on the input.
    pub fn parse(&self, text: &str, options: &ParseOptions) -> Result<Document> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| Error::Parser(e.to_string()))?;
        let tree = parser
            .parse(text, None)
            .ok_or_else(|| Error::Parser("tree-sitter returned no tree".to_string()))?;
        let root = tree.root_node();

        let comment_blocks = captures(&self.comment_query, root, text)
            .into_iter()
            .filter(|node| text[node.byte_range()].trim_start().starts_with("<!--"))
            .map(|node| CommentBlock {
                range: node.byte_range(),
            })
            .collect();

        let mut headings: Vec<RawHeading> = captures(&self.heading_query, root, text)
            .into_iter()
            .filter_map(|node| heading(node, text, options))
            .filter(|heading| {
                options.allow_leading_space != Some(false)
                    || !starts_indented(text, heading.start)
            })
            .collect();

        if options.require_space == Some(false) {
            for node in captures(&self.paragraph_query, root, text) {
                if node.parent().is_some_and(|p| p.kind() == "setext_heading") {
                    continue;
                }
                headings.extend(unspaced_headings(node, text));
            }
            headings.sort_by_key(|heading| heading.start);
        }

        tracing::debug!(
            headings = headings.len(),
            variant = %options.variant,
            "parsed markdown document"
        );

        Ok(Document::new(
            text.to_string(),
            comment_blocks,
            headings,
            AnchorGenerator::from_options(options),
        ))
    }
}

/// Nodes captured by `query`, in document order.
fn captures<'tree>(query: &Query, root: Node<'tree>, text: &str) -> Vec<Node<'tree>> {
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, text.as_bytes());
    let mut nodes = Vec::new();
    while let Some(found) = matches.next() {
        nodes.extend(found.captures.iter().map(|capture| capture.node));
    }
    nodes.sort_by_key(Node::start_byte);
    nodes.dedup_by_key(|node| node.id());
    nodes
}

fn heading(node: Node<'_>, text: &str, options: &ParseOptions) -> Option<RawHeading> {
    match node.kind() {
        "atx_heading" => atx_heading(node, text, options),
        "setext_heading" => setext_heading(node, text, options),
        _ => None,
    }
}

fn atx_heading(node: Node<'_>, text: &str, options: &ParseOptions) -> Option<RawHeading> {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();

    let marker = children.iter().find(|child| {
        child.kind().starts_with("atx_h") && child.kind().ends_with("_marker")
    })?;
    let level = marker.kind().as_bytes().get(5).map(|digit| digit - b'0')?;
    let content = node
        .child_by_field_name("heading_content")
        .or_else(|| children.iter().copied().find(|child| child.kind() == "inline"));

    if content.is_none() && options.empty_heading_without_space == Some(false) {
        let after = &text[marker.end_byte()..];
        if !after.starts_with([' ', '\t']) {
            return None;
        }
    }

    if options.heading_interrupts_item_paragraph == Some(false) && follows_item_paragraph(node) {
        return None;
    }

    Some(RawHeading {
        level,
        start: node.start_byte(),
        text: content.map_or_else(String::new, |inline| plain_text(&text[inline.byte_range()])),
    })
}

/// Whether `heading` directly follows a paragraph inside a list item.
///
/// The grammar wraps each heading in a `section`, so the paragraph is a sibling of the
/// outermost section that the heading opens.
fn follows_item_paragraph(heading: Node<'_>) -> bool {
    let mut current = heading;
    loop {
        if let Some(previous) = current.prev_named_sibling() {
            return previous.kind() == "paragraph" && in_list_item(current);
        }
        match current.parent() {
            Some(parent) if parent.kind() == "section" => current = parent,
            _ => return false,
        }
    }
}

fn in_list_item(node: Node<'_>) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.kind() == "list_item" {
            return true;
        }
        current = parent.parent();
    }
    false
}

fn setext_heading(node: Node<'_>, text: &str, options: &ParseOptions) -> Option<RawHeading> {
    let mut cursor = node.walk();
    let mut level = None;
    let mut content = None;

    for child in node.children(&mut cursor) {
        match child.kind() {
            "setext_h1_underline" | "setext_h2_underline" => {
                let underline = text[child.byte_range()].trim();
                if options
                    .setext_marker_length
                    .is_some_and(|min| underline.chars().count() < min)
                {
                    return None;
                }
                level = Some(if child.kind() == "setext_h1_underline" { 1 } else { 2 });
            }
            "paragraph" => content = Some(child),
            _ => {}
        }
    }

    Some(RawHeading {
        level: level?,
        start: node.start_byte(),
        text: content.map_or_else(String::new, |paragraph| {
            plain_text(&text[paragraph.byte_range()])
        }),
    })
}

/// `#Heading` lines inside a paragraph, for dialects that do not require the space.
fn unspaced_headings(paragraph: Node<'_>, text: &str) -> Vec<RawHeading> {
    let mut offset = paragraph.start_byte();
    let mut found = Vec::new();
    for line in text[paragraph.byte_range()].split_inclusive('\n') {
        if let Some(parts) = HASH_HEADING.captures(line) {
            let level = u8::try_from(parts[1].len()).unwrap_or(1);
            found.push(RawHeading {
                level,
                start: offset,
                text: plain_text(&parts[2]),
            });
        }
        offset += line.len();
    }
    found
}

fn starts_indented(text: &str, offset: usize) -> bool {
    let line_start = text[..offset].rfind('\n').map_or(0, |index| index + 1);
    text[line_start..].starts_with([' ', '\t'])
}

/// Inline Markdown reduced to its text, the way a renderer would show it without formatting.
#[must_use]
pub fn plain_text(inline: &str) -> String {
    let joined = inline.lines().map(str::trim).collect::<Vec<_>>().join(" ");
    // Parse as a heading so list markers, quotes and the like stay literal text.
    let source = format!("# {joined}");
    let mut text = String::new();
    for event in pulldown_cmark::Parser::new(&source) {
        match event {
            Event::Text(fragment) | Event::Code(fragment) => text.push_str(&fragment),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests;
