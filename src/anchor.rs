//! GitHub-style anchor ids for headings.

use crate::document::{Heading, RawHeading};
use crate::parser::ParseOptions;
use std::collections::{HashMap, HashSet};

/// Characters turned into dashes when no layer overrides them.
pub const DEFAULT_DASH_CHARS: &str = " -_";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Turns heading text into unique link targets.
pub struct AnchorGenerator {
    /// Characters replaced by `-`.
    pub dash_chars: String,
    /// Non-alphanumeric characters kept as they are. Checked before `dash_chars`.
    pub allowed_chars: String,
    /// Keep consecutive dashes instead of collapsing them into one.
    pub duped_dashes: bool,
    /// Append `-1`, `-2`, ... to ids already taken.
    pub resolve_dupes: bool,
}

impl Default for AnchorGenerator {
    fn default() -> Self {
        Self {
            dash_chars: DEFAULT_DASH_CHARS.to_string(),
            allowed_chars: String::new(),
            duped_dashes: true,
            resolve_dupes: true,
        }
    }
}

impl AnchorGenerator {
    #[must_use]
    /// Generator configured from the dialect settings.
    pub fn from_options(options: &ParseOptions) -> Self {
        let defaults = Self::default();
        Self {
            dash_chars: options.dash_chars.clone().unwrap_or(defaults.dash_chars),
            allowed_chars: options
                .allowed_chars
                .clone()
                .unwrap_or(defaults.allowed_chars),
            duped_dashes: options
                .duped_dashes
                .unwrap_or(!options.variant.collapses_dashes()),
            resolve_dupes: options.resolve_dupes.unwrap_or(defaults.resolve_dupes),
        }
    }

    #[must_use]
    /// Base id for `text`, before duplicates are resolved.
    pub fn slug(&self, text: &str) -> String {
        let mut id = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_alphabetic() {
                id.extend(c.to_lowercase());
            } else if c.is_numeric() || self.allowed_chars.contains(c) {
                id.push(c);
            } else if self.dash_chars.contains(c) && (self.duped_dashes || !id.ends_with('-')) {
                id.push('-');
            }
        }
        id
    }

    #[must_use]
    /// Assign anchors to headings in document order.
    ///
    /// Empty ids are never suffixed: a heading without text links to `#`.
    pub fn assign(&self, headings: &[RawHeading]) -> Vec<Heading> {
        let mut taken: HashSet<String> = HashSet::new();
        let mut counters: HashMap<String, usize> = HashMap::new();

        headings
            .iter()
            .map(|raw| {
                let base = self.slug(&raw.text);
                let anchor = if self.resolve_dupes && !base.is_empty() {
                    let mut anchor = base.clone();
                    if taken.contains(&anchor) {
                        let counter = counters.entry(base.clone()).or_default();
                        loop {
                            *counter += 1;
                            anchor = format!("{base}-{counter}");
                            if !taken.contains(&anchor) {
                                break;
                            }
                        }
                    }
                    taken.insert(anchor.clone());
                    anchor
                } else {
                    base
                };

                Heading {
                    level: raw.level,
                    start: raw.start,
                    anchor,
                    text: raw.text.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/anchor.rs"]
mod tests;
