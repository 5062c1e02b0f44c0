//! Rendering selected headings as a Markdown list.
//!
//! Item text is built first (link or plain text, emoji stripping, bold), then ordered for the
//! sorted and reversed styles, then laid out. Only the hierarchy style nests items; every other
//! style renders a single flat level, so sorting never has to reconcile with nesting.

use crate::document::Heading;
use crate::options::{Options, Style, MAX_LEVEL};
use regex::Regex;
use std::sync::LazyLock;

/// Indentation added per nesting step.
pub const INDENT: &str = "  ";

static EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[\w+-]+:").expect("emoji pattern is a valid regex"));

static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("space pattern is a valid regex"));

/// Strip `:shortcode:` emojis and collapse the space runs left behind.
#[must_use]
pub fn remove_emojis(text: &str) -> String {
    let stripped = EMOJI.replace_all(text, "");
    SPACES.replace_all(&stripped, " ").into_owned()
}

/// Display text for each heading, in the order the list shows them.
#[must_use]
pub fn item_texts(headings: &[&Heading], options: &Options) -> Vec<String> {
    let style = options.style();
    let mut texts: Vec<String> = headings
        .iter()
        .map(|heading| {
            let mut text = if options.plain() {
                heading.text.clone()
            } else {
                format!("[{}](#{})", heading.text, heading.anchor)
            };
            if options.remove_emojis() {
                text = remove_emojis(&text);
            }
            if options.bold() {
                text = format!("__{text}__");
            }
            text
        })
        .collect();

    if style.is_sorted() {
        texts.sort();
    }
    if style.is_reversed() {
        texts.reverse();
    }
    texts
}

/// Lay out `texts` as a list, nesting by the levels of `headings` for the hierarchy style.
///
/// The shallowest level present sits at the left margin even when the first heading is deeper.
/// Numbered lists keep one counter per level; leaving a level resets its counter.
#[must_use]
pub fn render_toc(headings: &[&Heading], texts: &[String], options: &Options) -> String {
    let hierarchy = options.style() == Style::Hierarchy;
    let numbered = options.numbered();
    let depth = usize::from(MAX_LEVEL) + 1;

    let mut numbers = vec![0_usize; depth];
    let mut opened = vec![false; depth];
    let mut indent = 0_usize;
    let mut last_level: Option<usize> = None;
    let mut out = String::new();

    if hierarchy {
        if let (Some(first), Some(min)) = (
            headings.first(),
            headings.iter().map(|heading| heading.level).min(),
        ) {
            indent = usize::from(first.level - min);
        }
    }

    for (heading, text) in headings.iter().zip(texts) {
        let level = if hierarchy {
            usize::from(heading.level).min(depth - 1)
        } else {
            1
        };

        if let Some(last) = last_level {
            if last < level {
                for deeper in last + 1..=level {
                    opened[deeper] = false;
                    indent += 1;
                }
            } else {
                for exited in (level + 1..=last).rev() {
                    if opened[exited] {
                        numbers[exited] = 0;
                    }
                    indent = indent.saturating_sub(1);
                }
            }
        }

        opened[level] = true;
        out.push_str(&INDENT.repeat(indent));
        if numbered {
            numbers[level] += 1;
            out.push_str(&numbers[level].to_string());
            out.push_str(". ");
        } else {
            out.push_str("- ");
        }
        out.push_str(text);
        out.push('\n');

        last_level = Some(level);
    }

    out
}

/// Render `headings` into the text placed between a pair of markers.
#[must_use]
pub fn render(headings: &[&Heading], options: &Options) -> String {
    let texts = item_texts(headings, options);
    render_toc(headings, &texts, options)
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
