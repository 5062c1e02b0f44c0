//! Marker tag discovery and pairing.
//!
//! A marker is an HTML comment that starts a line, like `<!-- toc levels=1-2 -->` or
//! `<!-- /toc -->`. Only comments inside HTML blocks count, so markers quoted in code blocks
//! or written inline in a paragraph are left alone.

use crate::document::Document;
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--+\s*(.*?)\s*--+>").expect("comment pattern is a valid regex"));

static CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(/?)(\S*)\s*(.*)$").expect("tag pattern is a valid regex"));

#[derive(Clone, Debug, PartialEq, Eq)]
/// One marker comment.
pub struct Tag {
    /// Index of the enclosing block in [`Document::comment_blocks`].
    pub block: usize,
    /// Tag name, e.g. `toc`.
    pub name: String,
    /// Whether this is a closing `/name` marker.
    pub is_end: bool,
    /// Raw inline arguments following the name.
    pub args: String,
    /// Byte offset of `<!--`.
    pub start: usize,
    /// Byte offset just past `-->`.
    pub end: usize,
    /// 1-based line of the comment.
    pub line: usize,
}

impl Tag {
    #[must_use]
    /// Whether this is an opening marker.
    pub fn is_start(&self) -> bool {
        !self.is_end
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An opening marker with its matching closing marker.
pub struct TagPair {
    /// Opening marker.
    pub start: Tag,
    /// Closing marker.
    pub end: Tag,
}

impl TagPair {
    /// Check that the opening marker ends before the closing marker begins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TagBounds`] when the markers overlap.
    pub fn check_bounds(&self) -> Result<()> {
        if self.start.end > self.end.start {
            return Err(Error::TagBounds {
                start_end: self.start.end,
                end_start: self.end.start,
            });
        }
        Ok(())
    }
}

/// Every marker named `name`, in document order.
#[must_use]
pub fn collect_tags(document: &Document, name: &str) -> Vec<Tag> {
    let text = document.text();
    let mut tags = Vec::new();

    for (index, block) in document.comment_blocks().iter().enumerate() {
        let block_text = &text[block.range.clone()];
        for found in COMMENT.captures_iter(block_text) {
            let Some(whole) = found.get(0) else {
                continue;
            };
            let start = block.range.start + whole.start();
            if start != 0 && !text[..start].ends_with('\n') {
                continue;
            }
            let Some(parts) = CONTENT.captures(&found[1]) else {
                continue;
            };
            if &parts[2] != name {
                continue;
            }
            tags.push(Tag {
                block: index,
                name: parts[2].to_string(),
                is_end: !parts[1].is_empty(),
                args: parts[3].to_string(),
                start,
                end: block.range.start + whole.end(),
                line: document.line_of(start),
            });
        }
    }

    tags
}

/// Pair up the markers named `name`.
///
/// # Errors
///
/// Returns [`Error::Tags`] when an opening marker is nested in another, a closing marker has no
/// opening marker, or the last opening marker is never closed. No pairs are returned then.
pub fn scan_tags(document: &Document, name: &str) -> Result<Vec<TagPair>> {
    let mut pairs = Vec::new();
    let mut open: Option<Tag> = None;

    for tag in collect_tags(document, name) {
        if tag.is_start() {
            if let Some(previous) = &open {
                return Err(Error::Tags(format!(
                    "Opening {name} tag found on line {} while previous {name} tag (on line {}) wasn't closed yet",
                    tag.line, previous.line
                )));
            }
            open = Some(tag);
        } else {
            let Some(start) = open.take() else {
                return Err(Error::Tags(format!(
                    "Closing {name} tag on line {} does not have a corresponding opening tag",
                    tag.line
                )));
            };
            pairs.push(TagPair { start, end: tag });
        }
    }

    if let Some(start) = open {
        return Err(Error::Tags(format!(
            "Opening {name} tag on line {} does not have a corresponding closing tag",
            start.line
        )));
    }

    tracing::debug!(tag = name, pairs = pairs.len(), "paired marker tags");
    Ok(pairs)
}

#[cfg(test)]
#[path = "tests/tags.rs"]
mod tests;
