//! Splicing rendered TOCs between their markers.
//!
//! Every marker pair is planned against the untouched source text: pairs are visited from the
//! last to the first, each one yields at most one edit, and the edits are applied to a fresh
//! buffer at the end. Source offsets therefore stay valid for the whole pass.

use crate::document::Document;
use crate::inline::parse_tag_args;
use crate::options::Options;
use crate::render::render;
use crate::select::select_headings;
use crate::tags::{scan_tags, TagPair};
use crate::Result;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static LIST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:-|\d+\.)\s.*$").expect("list line pattern is a valid regex")
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Result of a successful pass over a document.
pub struct TocOutcome {
    /// Full document text with every TOC brought up to date.
    pub text: String,
    /// Per-tag problems, in marker order.
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A replacement of one span of the source text.
struct Edit {
    span: Range<usize>,
    replacement: String,
}

/// Byte range strictly between a pair's markers.
///
/// The range opens after the line break ending the opening marker's line, so whatever follows
/// the opening comment on that line is kept.
#[must_use]
pub fn content_span(text: &str, pair: &TagPair) -> Range<usize> {
    let between = &text[pair.start.end..pair.end.start];
    let start = between
        .find('\n')
        .map_or(pair.start.end, |index| pair.start.end + index + 1);
    start..pair.end.start
}

/// Whether `content` could be a TOC: every non-blank line is a list item.
#[must_use]
pub fn looks_like_toc(content: &str) -> bool {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .all(|line| LIST_LINE.is_match(line))
}

/// Bring every TOC in `document` up to date.
///
/// With `check_current_content`, pairs whose current content is not list-like are left alone
/// and reported as warnings. Bad inline options are warnings too.
///
/// # Errors
///
/// Returns [`crate::Error::Tags`] when the markers are unbalanced and
/// [`crate::Error::TagBounds`] when a pair's markers overlap. No text is produced then.
pub fn insert_tocs(
    document: &Document,
    options: &Options,
    check_current_content: bool,
) -> Result<TocOutcome> {
    let tag = options.tag();
    let text = document.text();
    let pairs = scan_tags(document, tag)?;

    if pairs.is_empty() {
        return Ok(TocOutcome {
            text: text.to_string(),
            warnings: Vec::new(),
        });
    }

    let mut edits = Vec::with_capacity(pairs.len());
    let mut pair_warnings: Vec<Vec<String>> = Vec::with_capacity(pairs.len());

    for pair in pairs.iter().rev() {
        pair.check_bounds()?;
        let span = content_span(text, pair);

        if check_current_content && !looks_like_toc(&text[span.clone()]) {
            tracing::debug!(line = pair.start.line, "content between markers is not a list");
            pair_warnings.push(vec![format!(
                "It doesn't look like the current content between the {tag} tags on line {} and \
                 line {} is a toc. Not making changes here, just in case.",
                pair.start.line, pair.end.line
            )]);
            continue;
        }

        let (tag_options, warnings) = parse_tag_args(options, &pair.start.args);
        pair_warnings.push(
            warnings
                .into_iter()
                .map(|warning| format!("line {}: {warning}", pair.start.line))
                .collect(),
        );

        let headings = select_headings(document.headings(), &tag_options, pair);
        tracing::debug!(
            line = pair.start.line,
            headings = headings.len(),
            style = %tag_options.style(),
            mode = %tag_options.mode(),
            "rendering toc"
        );
        edits.push(Edit {
            span,
            replacement: render(&headings, &tag_options),
        });
    }

    edits.reverse();
    pair_warnings.reverse();

    Ok(TocOutcome {
        text: apply(text, &edits),
        warnings: pair_warnings.into_iter().flatten().collect(),
    })
}

/// Apply non-overlapping edits, sorted by position, to a copy of `text`.
fn apply(text: &str, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        out.push_str(&text[cursor..edit.span.start]);
        out.push_str(&edit.replacement);
        cursor = edit.span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
#[path = "tests/splice.rs"]
mod tests;
