//! Layered TOC options.
//!
//! Options are resolved through a finite chain of layers: built-in defaults at the root, then
//! project, document and output-file layers, and finally the overlay parsed from a start tag.
//! Every field of an [`OptionLayer`] is optional; a getter on [`Options`] walks the chain from the
//! innermost layer outwards and returns the first value it finds, falling back to the default.

use crate::parser::ParseOptions;
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Marker tag name used when no layer sets one.
pub const TOC_TAG: &str = "toc";

/// Highest heading level Markdown knows about.
pub const MAX_LEVEL: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Order and shape of the rendered list.
pub enum Style {
    /// Nested by heading level, in document order.
    #[default]
    Hierarchy,
    /// One level, in document order.
    Flat,
    /// One level, in reverse document order.
    Reversed,
    /// One level, sorted ascending by rendered text.
    Increasing,
    /// One level, sorted descending by rendered text.
    Decreasing,
}

impl Style {
    /// Every style, in the order they are listed to users.
    pub const ALL: [Style; 5] = [
        Style::Hierarchy,
        Style::Flat,
        Style::Reversed,
        Style::Increasing,
        Style::Decreasing,
    ];

    #[must_use]
    /// Name accepted in tags and configuration.
    pub fn name(self) -> &'static str {
        match self {
            Style::Hierarchy => "hierarchy",
            Style::Flat => "flat",
            Style::Reversed => "reversed",
            Style::Increasing => "increasing",
            Style::Decreasing => "decreasing",
        }
    }

    #[must_use]
    /// Whether items are sorted by their rendered text.
    pub fn is_sorted(self) -> bool {
        matches!(self, Style::Increasing | Style::Decreasing)
    }

    #[must_use]
    /// Whether the final item order is reversed.
    pub fn is_reversed(self) -> bool {
        matches!(self, Style::Reversed | Style::Decreasing)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Which headings are in scope for a tag pair.
pub enum Mode {
    /// Headings after the end tag.
    #[default]
    Normal,
    /// Every heading in the document.
    Full,
    /// Headings after the end tag within the section enclosing the tags.
    Local,
}

impl Mode {
    /// Every mode, in the order they are listed to users.
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Full, Mode::Local];

    #[must_use]
    /// Name accepted in tags and configuration.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Full => "full",
            Mode::Local => "local",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Markdown dialect profile handed to the parser.
pub enum Variant {
    /// Current `CommonMark`.
    Commonmark,
    /// `CommonMark` 0.26.
    Commonmark26,
    /// `CommonMark` 0.27.
    Commonmark27,
    /// `CommonMark` 0.28.
    Commonmark28,
    /// Kramdown.
    Kramdown,
    /// Original Markdown.
    Markdown,
    /// GitHub documentation renderer.
    GitHubDoc,
    /// GitHub flavoured Markdown.
    #[default]
    GitHub,
    /// `MultiMarkdown`.
    MultiMarkdown,
    /// Pegdown.
    Pegdown,
    /// Pegdown in strict mode.
    PegdownStrict,
    /// GitLab flavoured Markdown.
    GitLab,
}

impl Variant {
    /// Every variant.
    pub const ALL: [Variant; 12] = [
        Variant::Commonmark,
        Variant::Commonmark26,
        Variant::Commonmark27,
        Variant::Commonmark28,
        Variant::Kramdown,
        Variant::Markdown,
        Variant::GitHubDoc,
        Variant::GitHub,
        Variant::MultiMarkdown,
        Variant::Pegdown,
        Variant::PegdownStrict,
        Variant::GitLab,
    ];

    #[must_use]
    /// Name accepted in configuration (matched case-insensitively).
    pub fn name(self) -> &'static str {
        match self {
            Variant::Commonmark => "Commonmark",
            Variant::Commonmark26 => "Commonmark26",
            Variant::Commonmark27 => "Commonmark27",
            Variant::Commonmark28 => "Commonmark28",
            Variant::Kramdown => "Kramdown",
            Variant::Markdown => "Markdown",
            Variant::GitHubDoc => "GitHubDoc",
            Variant::GitHub => "GitHub",
            Variant::MultiMarkdown => "MultiMarkdown",
            Variant::Pegdown => "Pegdown",
            Variant::PegdownStrict => "PegdownStrict",
            Variant::GitLab => "GitLab",
        }
    }

    #[must_use]
    /// Whether anchor ids collapse runs of dashes unless told otherwise.
    pub fn collapses_dashes(self) -> bool {
        self == Variant::GitLab
    }
}

/// Quote each name and join them for "valid values are" messages.
pub(crate) fn quoted_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Style::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| {
                Error::Config(format!(
                    "invalid style '{s}'. Valid values are: {}",
                    quoted_list(Style::ALL.map(Style::name))
                ))
            })
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| {
                Error::Config(format!(
                    "invalid mode '{s}'. Valid values are: {}",
                    quoted_list(Mode::ALL.map(Mode::name))
                ))
            })
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::Config(format!(
                    "invalid variant '{s}'. Valid values are: {}",
                    quoted_list(Variant::ALL.map(Variant::name))
                ))
            })
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Set of heading levels included in a TOC.
///
/// Written as a comma-separated list of single levels and inclusive ranges, e.g. `1-3,5`.
pub struct Levels(BTreeSet<u8>);

impl Levels {
    #[must_use]
    /// Whether headings of `level` are included.
    pub fn contains(&self, level: u8) -> bool {
        self.0.contains(&level)
    }

    #[must_use]
    /// Included levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// Parse a level specification such as `1-3,4`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Levels`] when an item is empty, not a level between 1 and 6, or a range
    /// whose bounds are reversed.
    pub fn parse(spec: &str) -> Result<Self> {
        parse_levels(spec).map(Levels).map_err(|reason| Error::Levels {
            spec: spec.to_string(),
            reason,
        })
    }
}

impl Default for Levels {
    fn default() -> Self {
        Levels(BTreeSet::from([1, 2, 3]))
    }
}

impl<'a> IntoIterator for &'a Levels {
    type Item = u8;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl FromIterator<u8> for Levels {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Levels(iter.into_iter().collect())
    }
}

impl FromStr for Levels {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Levels::parse(s)
    }
}

impl fmt::Display for Levels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.iter().map(|level| level.to_string()).collect();
        f.write_str(&items.join(","))
    }
}

/// Parse a level specification into its set of levels, or a human-readable reason.
pub(crate) fn parse_levels(spec: &str) -> std::result::Result<BTreeSet<u8>, String> {
    let mut levels = BTreeSet::new();
    for item in spec.split(',') {
        let item = item.trim();
        if item.is_empty() {
            return Err(format!("Empty level in '{spec}'"));
        }
        if let Some((low, high)) = item.split_once('-') {
            let low = parse_level(low.trim())?;
            let high = parse_level(high.trim())?;
            if low > high {
                return Err(format!(
                    "Level range '{item}' is reversed, the lower level comes first"
                ));
            }
            levels.extend(low..=high);
        } else {
            levels.insert(parse_level(item)?);
        }
    }
    Ok(levels)
}

fn parse_level(text: &str) -> std::result::Result<u8, String> {
    match text.parse::<u8>() {
        Ok(level) if (1..=MAX_LEVEL).contains(&level) => Ok(level),
        _ => Err(format!(
            "'{text}' is not a valid level, levels run from 1 to {MAX_LEVEL}"
        )),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// One layer of options. Unset fields defer to the enclosing layer.
pub struct OptionLayer {
    /// Name of the marker tag.
    pub tag: Option<String>,
    /// Markdown dialect for the parser.
    pub variant: Option<Variant>,
    /// List style.
    pub style: Option<Style>,
    /// Heading scope.
    pub mode: Option<Mode>,
    /// Included heading levels.
    pub levels: Option<Levels>,
    /// Wrap items in bold markup.
    pub bold: Option<bool>,
    /// Number items instead of bulleting them.
    pub numbered: Option<bool>,
    /// Plain heading text instead of anchor links.
    pub plain: Option<bool>,
    /// Strip `:shortcode:` emojis from item text.
    pub remove_emojis: Option<bool>,
    /// Require a space after the `#` run of an ATX heading.
    pub require_space: Option<bool>,
    /// Keep runs of dashes in anchor ids.
    pub duped_dashes: Option<bool>,
    /// Suffix repeated anchor ids with a counter.
    pub resolve_dupes: Option<bool>,
    /// Characters that become dashes in anchor ids.
    pub dash_chars: Option<String>,
    /// Non-alphanumeric characters kept verbatim in anchor ids.
    pub allowed_chars: Option<String>,
    /// Recognise headings indented by up to three spaces.
    pub allow_leading_space: Option<bool>,
    /// Minimum underline length of a setext heading.
    pub setext_marker_length: Option<usize>,
    /// Recognise a bare `##` as an empty heading.
    pub empty_heading_without_space: Option<bool>,
    /// Let a heading interrupt the paragraph of a list item.
    pub heading_interrupts_item_paragraph: Option<bool>,
}

#[derive(Clone, Debug, Default)]
/// A resolved chain of option layers, outermost first.
pub struct Options {
    layers: Vec<OptionLayer>,
}

impl Options {
    #[must_use]
    /// The root of every chain: built-in defaults only.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// A child chain with `layer` taking precedence over everything in `self`.
    pub fn with_layer(&self, layer: OptionLayer) -> Self {
        let mut layers = self.layers.clone();
        layers.push(layer);
        Self { layers }
    }

    #[must_use]
    /// Number of layers above the built-in defaults.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    fn find<T>(&self, field: impl Fn(&OptionLayer) -> Option<T>) -> Option<T> {
        self.layers.iter().rev().find_map(field)
    }

    #[must_use]
    /// Marker tag name.
    pub fn tag(&self) -> &str {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.tag.as_deref())
            .unwrap_or(TOC_TAG)
    }

    #[must_use]
    /// Markdown dialect.
    pub fn variant(&self) -> Variant {
        self.find(|layer| layer.variant).unwrap_or_default()
    }

    #[must_use]
    /// List style.
    pub fn style(&self) -> Style {
        self.find(|layer| layer.style).unwrap_or_default()
    }

    #[must_use]
    /// Heading scope.
    pub fn mode(&self) -> Mode {
        self.find(|layer| layer.mode).unwrap_or_default()
    }

    #[must_use]
    /// Included heading levels.
    pub fn levels(&self) -> Levels {
        self.find(|layer| layer.levels.clone()).unwrap_or_default()
    }

    #[must_use]
    /// Whether items are bold.
    pub fn bold(&self) -> bool {
        self.find(|layer| layer.bold).unwrap_or(true)
    }

    #[must_use]
    /// Whether items are numbered.
    pub fn numbered(&self) -> bool {
        self.find(|layer| layer.numbered).unwrap_or(false)
    }

    #[must_use]
    /// Whether items are plain text rather than links.
    pub fn plain(&self) -> bool {
        self.find(|layer| layer.plain).unwrap_or(false)
    }

    #[must_use]
    /// Whether emoji shortcodes are stripped.
    pub fn remove_emojis(&self) -> bool {
        self.find(|layer| layer.remove_emojis).unwrap_or(false)
    }

    #[must_use]
    /// Whether the chain selects the whole document.
    pub fn is_full(&self) -> bool {
        self.mode() == Mode::Full
    }

    #[must_use]
    /// Whether the chain selects the enclosing section only.
    pub fn is_local(&self) -> bool {
        self.mode() == Mode::Local
    }

    #[must_use]
    /// Dialect settings forwarded to the Markdown parser. Unset knobs keep the parser's defaults.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            variant: self.variant(),
            require_space: self.find(|layer| layer.require_space),
            duped_dashes: self.find(|layer| layer.duped_dashes),
            resolve_dupes: self.find(|layer| layer.resolve_dupes),
            dash_chars: self.find(|layer| layer.dash_chars.clone()),
            allowed_chars: self.find(|layer| layer.allowed_chars.clone()),
            allow_leading_space: self.find(|layer| layer.allow_leading_space),
            setext_marker_length: self.find(|layer| layer.setext_marker_length),
            empty_heading_without_space: self.find(|layer| layer.empty_heading_without_space),
            heading_interrupts_item_paragraph: self
                .find(|layer| layer.heading_interrupts_item_paragraph),
        }
    }
}

#[cfg(test)]
#[path = "tests/options.rs"]
mod tests;
