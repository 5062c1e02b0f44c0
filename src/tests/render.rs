use super::{item_texts, remove_emojis, render};
use crate::document::Heading;
use crate::options::{OptionLayer, Options, Style};

fn heading(level: u8, text: &str) -> Heading {
    Heading {
        level,
        start: 0,
        anchor: text.to_lowercase().replace(' ', "-"),
        text: text.to_string(),
    }
}

fn plain(layer: OptionLayer) -> Options {
    Options::new().with_layer(OptionLayer {
        plain: Some(true),
        bold: Some(false),
        ..layer
    })
}

fn render_all(headings: &[Heading], options: &Options) -> String {
    let refs: Vec<&Heading> = headings.iter().collect();
    render(&refs, options)
}

#[test]
fn test_default_items_are_bold_links() {
    let headings = vec![heading(1, "Intro"), heading(2, "Getting started")];

    assert_eq!(
        render_all(&headings, &Options::new()),
        "- __[Intro](#intro)__\n  - __[Getting started](#getting-started)__\n"
    );
}

#[test]
fn test_numbered_counters_reset_when_leaving_a_level() {
    let headings = vec![
        heading(1, "A"),
        heading(2, "B"),
        heading(1, "C"),
        heading(2, "D"),
        heading(2, "E"),
    ];
    let options = plain(OptionLayer {
        numbered: Some(true),
        ..OptionLayer::default()
    });

    assert_eq!(
        render_all(&headings, &options),
        "1. A\n  1. B\n2. C\n  1. D\n  2. E\n"
    );
}

#[test]
fn test_skipped_levels_indent_per_level() {
    let headings = vec![heading(1, "Top"), heading(3, "Deep"), heading(1, "Next")];
    let options = plain(OptionLayer::default());

    assert_eq!(render_all(&headings, &options), "- Top\n    - Deep\n- Next\n");
}

#[test]
fn test_shallowest_level_starts_at_margin() {
    let headings = vec![heading(3, "Late start"), heading(2, "Parent")];
    let options = plain(OptionLayer::default());

    assert_eq!(render_all(&headings, &options), "  - Late start\n- Parent\n");
}

#[test]
fn test_increasing_sorts_flat() {
    let headings = vec![heading(2, "Banana"), heading(1, "Apple"), heading(3, "Cherry")];
    let options = plain(OptionLayer {
        style: Some(Style::Increasing),
        ..OptionLayer::default()
    });

    assert_eq!(render_all(&headings, &options), "- Apple\n- Banana\n- Cherry\n");
}

#[test]
fn test_decreasing_and_reversed() {
    let headings = vec![heading(1, "Banana"), heading(2, "Apple"), heading(1, "Cherry")];

    let decreasing = plain(OptionLayer {
        style: Some(Style::Decreasing),
        numbered: Some(true),
        ..OptionLayer::default()
    });
    assert_eq!(
        render_all(&headings, &decreasing),
        "1. Cherry\n2. Banana\n3. Apple\n"
    );

    let reversed = plain(OptionLayer {
        style: Some(Style::Reversed),
        ..OptionLayer::default()
    });
    assert_eq!(
        render_all(&headings, &reversed),
        "- Cherry\n- Apple\n- Banana\n"
    );
}

#[test]
fn test_flat_ignores_levels() {
    let headings = vec![heading(2, "One"), heading(4, "Two")];
    let options = plain(OptionLayer {
        style: Some(Style::Flat),
        ..OptionLayer::default()
    });

    assert_eq!(render_all(&headings, &options), "- One\n- Two\n");
}

#[test]
fn test_emoji_shortcodes_removed() {
    assert_eq!(remove_emojis("Intro :tada: now"), "Intro now");
    assert_eq!(remove_emojis(":rocket: Launch"), " Launch");
    assert_eq!(remove_emojis("No emoji"), "No emoji");

    let headings = vec![Heading {
        anchor: "ship-it-1".to_string(),
        ..heading(1, "Ship it :+1:")
    }];
    let refs: Vec<&Heading> = headings.iter().collect();
    let options = Options::new().with_layer(OptionLayer {
        remove_emojis: Some(true),
        bold: Some(false),
        ..OptionLayer::default()
    });
    assert_eq!(item_texts(&refs, &options), vec!["[Ship it ](#ship-it-1)"]);
}

#[test]
fn test_no_headings_renders_nothing() {
    assert_eq!(render_all(&[], &Options::new()), "");
}
