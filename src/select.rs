//! Choosing which headings a TOC lists.

use crate::document::Heading;
use crate::options::Options;
use crate::tags::TagPair;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The section around a tag pair, for local mode.
pub struct Section<'a> {
    /// Last heading before the opening marker.
    pub start: &'a Heading,
    /// First heading after the closing marker at the same or a higher level, if any.
    pub end: Option<&'a Heading>,
}

/// Find the section that encloses `pair`.
///
/// Returns `None` when no heading precedes the opening marker.
#[must_use]
pub fn enclosing_section<'a>(headings: &'a [Heading], pair: &TagPair) -> Option<Section<'a>> {
    let start = headings
        .iter()
        .rev()
        .find(|heading| heading.start < pair.start.start)?;
    let end = headings
        .iter()
        .skip_while(|heading| heading.start < pair.end.start)
        .find(|heading| heading.level <= start.level);
    Some(Section { start, end })
}

/// Headings listed by the TOC between `pair`, in document order.
#[must_use]
pub fn select_headings<'a>(
    headings: &'a [Heading],
    options: &Options,
    pair: &TagPair,
) -> Vec<&'a Heading> {
    let levels = options.levels();
    let section = if options.is_local() {
        match enclosing_section(headings, pair) {
            Some(section) => Some(section),
            None => return Vec::new(),
        }
    } else {
        None
    };

    headings
        .iter()
        .filter(|heading| levels.contains(heading.level))
        .filter(|heading| options.is_full() || heading.start > pair.end.start)
        .filter(|heading| {
            section.is_none_or(|section| {
                heading.start > section.start.start
                    && section.end.is_none_or(|end| heading.start < end.start)
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/select.rs"]
mod tests;
