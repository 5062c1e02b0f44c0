//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for ATX (`#`) and setext (underlined) headings and
//! for the HTML blocks that hold TOC marker comments.

use crate::formats::Format;

/// Tree-sitter queries for Markdown block structure.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading)] @heading"
    }

    fn comment_query(&self) -> &'static str {
        "(html_block) @block"
    }

    fn paragraph_query(&self) -> &'static str {
        "(paragraph) @paragraph"
    }
}
