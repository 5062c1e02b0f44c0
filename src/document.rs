//! Parsed Markdown document as seen by the TOC engine.
//!
//! A document carries its source text, the byte ranges of its HTML blocks (where marker comments
//! live) and its headings. Anchor ids depend on every heading that precedes them, so they are
//! assigned in one pass the first time the headings are asked for and cached after that.

use crate::anchor::AnchorGenerator;
use std::cell::OnceCell;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading with its generated anchor.
pub struct Heading {
    /// Nesting level, 1 to 6.
    pub level: u8,
    /// Byte offset where the heading starts.
    pub start: usize,
    /// Unique anchor id, without the leading `#`.
    pub anchor: String,
    /// Inline text with all formatting removed.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading as located by the parser, before anchors are assigned.
pub struct RawHeading {
    /// Nesting level, 1 to 6.
    pub level: u8,
    /// Byte offset where the heading starts.
    pub start: usize,
    /// Inline text with all formatting removed.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An HTML block that may hold marker comments.
pub struct CommentBlock {
    /// Byte range of the block in the document.
    pub range: Range<usize>,
}

#[derive(Debug)]
/// Immutable parsed document.
pub struct Document {
    text: String,
    comment_blocks: Vec<CommentBlock>,
    raw_headings: Vec<RawHeading>,
    anchors: AnchorGenerator,
    headings: OnceCell<Vec<Heading>>,
    line_starts: Vec<usize>,
}

impl Document {
    #[must_use]
    /// Assemble a document from parser output. Headings and blocks must be in document order.
    pub fn new(
        text: String,
        comment_blocks: Vec<CommentBlock>,
        raw_headings: Vec<RawHeading>,
        anchors: AnchorGenerator,
    ) -> Self {
        let line_starts = line_starts(&text);
        Self {
            text,
            comment_blocks,
            raw_headings,
            anchors,
            headings: OnceCell::new(),
            line_starts,
        }
    }

    #[must_use]
    /// Assemble a document whose headings already carry anchors.
    ///
    /// Lets hosts plug in a different Markdown parser, and tests build documents by hand.
    pub fn from_parts(
        text: String,
        comment_blocks: Vec<CommentBlock>,
        headings: Vec<Heading>,
    ) -> Self {
        let line_starts = line_starts(&text);
        Self {
            text,
            comment_blocks,
            raw_headings: Vec::new(),
            anchors: AnchorGenerator::default(),
            headings: OnceCell::from(headings),
            line_starts,
        }
    }

    #[must_use]
    /// Full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    /// HTML blocks in document order.
    pub fn comment_blocks(&self) -> &[CommentBlock] {
        &self.comment_blocks
    }

    #[must_use]
    /// Headings in document order, with anchors assigned on first use.
    pub fn headings(&self) -> &[Heading] {
        self.headings
            .get_or_init(|| self.anchors.assign(&self.raw_headings))
    }

    #[must_use]
    /// 1-based line number of the byte at `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(index, _)| index + 1))
        .collect()
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
