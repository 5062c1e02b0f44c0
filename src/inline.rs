//! Inline arguments of an opening marker, e.g. `<!-- toc style=flat levels=1-2 -->`.
//!
//! Bad arguments never fail the run. Each problem becomes a warning and the option keeps the
//! value inherited from the enclosing layers.

use crate::options::{parse_levels, quoted_list, Levels, Mode, OptionLayer, Options, Style};
use regex::Regex;
use std::sync::LazyLock;

static ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b([^\s=]+)\s*(?:=\s*(["'][^"']*["']|\S+))?"#)
        .expect("argument pattern is a valid regex")
});

/// Overlay the arguments in `args` on `base`.
///
/// Returns the child chain together with one warning per rejected argument.
#[must_use]
pub fn parse_tag_args(base: &Options, args: &str) -> (Options, Vec<String>) {
    let (layer, warnings) = parse_overlay(args, base.tag());
    (base.with_layer(layer), warnings)
}

/// Parse `args` into a standalone layer. `tag` is only used in warning text.
#[must_use]
pub fn parse_overlay(args: &str, tag: &str) -> (OptionLayer, Vec<String>) {
    let mut layer = OptionLayer::default();
    let mut warnings = Vec::new();

    for found in ARGUMENT.captures_iter(args) {
        let key = &found[1];
        let value = found.get(2).map_or("", |value| {
            value
                .as_str()
                .trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
        });

        match key {
            "style" => layer.style = choice(key, value, &Style::ALL, Style::name, &mut warnings),
            "mode" => layer.mode = choice(key, value, &Mode::ALL, Mode::name, &mut warnings),
            "numbered" => layer.numbered = boolean(key, value, &mut warnings),
            "plain" => layer.plain = boolean(key, value, &mut warnings),
            "bold" => layer.bold = boolean(key, value, &mut warnings),
            "levels" => layer.levels = levels(value, &mut warnings),
            "variant" => warnings.push(format!(
                "The option 'variant' can only be specified in the configuration, not in the '{tag}' tag"
            )),
            _ => warnings.push(format!("Unknown option: '{key}'")),
        }
    }

    (layer, warnings)
}

fn choice<T: Copy>(
    key: &str,
    value: &str,
    all: &[T],
    name: fn(T) -> &'static str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    if let Some(found) = all.iter().copied().find(|item| name(*item) == value) {
        return Some(found);
    }
    let problem = if value.trim().is_empty() {
        format!("Missing argument for parameter {key}")
    } else {
        format!("Invalid argument for parameter {key}: '{value}'")
    };
    warnings.push(format!(
        "{problem}. Valid arguments are: {}.",
        quoted_list(all.iter().map(|item| name(*item)))
    ));
    None
}

fn boolean(key: &str, value: &str, warnings: &mut Vec<String>) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        warnings.push(if value.trim().is_empty() {
            format!("No value specified for option '{key}'")
        } else {
            format!("Option '{key}' should be 'true' or 'false'")
        });
        None
    }
}

fn levels(value: &str, warnings: &mut Vec<String>) -> Option<Levels> {
    if value.trim().is_empty() {
        warnings.push("Missing argument for parameter levels".to_string());
        return None;
    }
    match parse_levels(value) {
        Ok(levels) => Some(levels.into_iter().collect()),
        Err(reason) => {
            warnings.push(reason);
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/inline.rs"]
mod tests;
