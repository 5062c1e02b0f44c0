use super::{insert_tocs, looks_like_toc, TocOutcome};
use crate::document::{CommentBlock, Document, Heading};
use crate::options::{OptionLayer, Options};
use crate::{insert_tocs_in_text, Error};

/// Lines opening with `<!--` are HTML blocks, lines opening with `#` are headings.
fn document(text: &str) -> Document {
    let mut blocks = Vec::new();
    let mut headings = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed.starts_with("<!--") {
            blocks.push(CommentBlock {
                range: offset..offset + trimmed.len(),
            });
        } else if trimmed.starts_with('#') {
            let title = trimmed.trim_start_matches('#');
            let name = title.trim().to_string();
            headings.push(Heading {
                level: u8::try_from(trimmed.len() - title.len()).unwrap(),
                start: offset,
                anchor: name.to_lowercase().replace(' ', "-"),
                text: name,
            });
        }
        offset += line.len();
    }
    Document::from_parts(text.to_string(), blocks, headings)
}

fn plain() -> Options {
    Options::new().with_layer(OptionLayer {
        plain: Some(true),
        bold: Some(false),
        ..OptionLayer::default()
    })
}

fn run(text: &str, options: &Options, check: bool) -> TocOutcome {
    insert_tocs(&document(text), options, check).unwrap()
}

#[test]
fn test_no_markers_is_a_no_op() {
    let text = "# Title\n\nJust text.\n";
    let outcome = run(text, &Options::new(), true);

    assert_eq!(outcome.text, text);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_default_toc_is_inserted() {
    let text = "# Title\n<!-- toc -->\n<!-- /toc -->\n## Intro\n### Details\n## Usage\n";
    let outcome = run(text, &Options::new(), true);

    assert_eq!(
        outcome.text,
        "# Title\n<!-- toc -->\n\
         - __[Intro](#intro)__\n  - __[Details](#details)__\n- __[Usage](#usage)__\n\
         <!-- /toc -->\n## Intro\n### Details\n## Usage\n"
    );
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_stale_toc_is_replaced() {
    let text = "<!-- toc -->\n- Old entry\n  - Another\n<!-- /toc -->\n# Fresh\n";
    let outcome = run(text, &plain(), true);

    assert_eq!(outcome.text, "<!-- toc -->\n- Fresh\n<!-- /toc -->\n# Fresh\n");
}

#[test]
fn test_text_after_opening_marker_is_kept() {
    let text = "<!-- toc --> keep me\n<!-- /toc -->\n# A\n";
    let outcome = run(text, &plain(), false);

    assert_eq!(outcome.text, "<!-- toc --> keep me\n- A\n<!-- /toc -->\n# A\n");
}

#[test]
fn test_empty_selection_clears_content() {
    let text = "# Only before\n<!-- toc -->\n- stale\n<!-- /toc -->\n";
    let outcome = run(text, &plain(), true);

    assert_eq!(outcome.text, "# Only before\n<!-- toc -->\n<!-- /toc -->\n");
}

#[test]
fn test_structural_errors_produce_no_text() {
    let nested = insert_tocs(
        &document("<!-- toc -->\n<!-- toc -->\n<!-- /toc -->"),
        &Options::new(),
        false,
    );
    match nested {
        Err(Error::Tags(message)) => assert_eq!(
            message,
            "Opening toc tag found on line 2 while previous toc tag (on line 1) wasn't closed yet"
        ),
        other => panic!("expected a tag error, got {other:?}"),
    }

    let unclosed = insert_tocs(&document("<!-- toc -->\n# A\n"), &Options::new(), false);
    assert!(unclosed
        .unwrap_err()
        .to_string()
        .contains("does not have a corresponding closing tag"));
}

#[test]
fn test_prose_between_markers_is_kept() {
    let text = "<!-- toc -->\nSome prose.\n<!-- /toc -->\n# A\n";

    let checked = run(text, &plain(), true);
    assert_eq!(checked.text, text);
    assert_eq!(
        checked.warnings,
        vec![
            "It doesn't look like the current content between the toc tags on line 1 and line 3 \
             is a toc. Not making changes here, just in case."
                .to_string()
        ]
    );

    let unchecked = run(text, &plain(), false);
    assert_eq!(unchecked.text, "<!-- toc -->\n- A\n<!-- /toc -->\n# A\n");
    assert!(unchecked.warnings.is_empty());
}

#[test]
fn test_list_heuristic() {
    assert!(looks_like_toc(""));
    assert!(looks_like_toc("\n  \n"));
    assert!(looks_like_toc("- a\n  - b\n\n1. c\n  12. d\n"));
    assert!(!looks_like_toc("- a\nprose\n"));
    assert!(!looks_like_toc("-no space\n"));
    assert!(!looks_like_toc("* star\n"));
}

#[test]
fn test_inline_options_apply_to_their_pair_only() {
    let text = "<!-- toc levels=1-2 -->\n<!-- /toc -->\n# A\n## B\n### C\n\
                <!-- toc -->\n<!-- /toc -->\n# D\n## E\n### F\n";
    let outcome = run(text, &plain(), true);

    assert_eq!(
        outcome.text,
        "<!-- toc levels=1-2 -->\n- A\n  - B\n- D\n  - E\n<!-- /toc -->\n# A\n## B\n### C\n\
         <!-- toc -->\n- D\n  - E\n    - F\n<!-- /toc -->\n# D\n## E\n### F\n"
    );
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_inline_warnings_carry_line_numbers_in_marker_order() {
    let text = "<!-- toc bold=maybe -->\n<!-- /toc -->\n<!-- toc foo=1 -->\n<!-- /toc -->\n";
    let outcome = run(text, &Options::new(), true);

    assert_eq!(
        outcome.warnings,
        vec![
            "line 1: Option 'bold' should be 'true' or 'false'".to_string(),
            "line 3: Unknown option: 'foo'".to_string(),
        ]
    );
}

#[test]
fn test_custom_tag_name() {
    let text = "<!-- toc -->\nhand written\n<!-- /toc -->\n<!-- foobar -->\n<!-- /foobar -->\n# A\n";
    let options = plain().with_layer(OptionLayer {
        tag: Some("foobar".to_string()),
        ..OptionLayer::default()
    });
    let outcome = run(text, &options, true);

    assert_eq!(
        outcome.text,
        "<!-- toc -->\nhand written\n<!-- /toc -->\n<!-- foobar -->\n- A\n<!-- /foobar -->\n# A\n"
    );
}

#[test]
fn test_parsed_document_round_trip_is_stable() {
    let source = "# Title\n\n<!-- toc -->\n<!-- /toc -->\n\n## Intro\n\nText.\n\n\
                  ### Details\n\n## Usage\n\n## Intro\n";
    let options = Options::new();

    let first = insert_tocs_in_text(source, &options, true).unwrap();
    assert!(first.warnings.is_empty());
    assert!(first.text.contains(
        "<!-- toc -->\n- __[Intro](#intro)__\n  - __[Details](#details)__\n\
         - __[Usage](#usage)__\n- __[Intro](#intro-1)__\n<!-- /toc -->\n"
    ));

    let second = insert_tocs_in_text(&first.text, &options, true).unwrap();
    assert_eq!(second.text, first.text);
    assert!(second.warnings.is_empty());
}

#[test]
fn test_parsed_document_sorted_and_numbered() {
    let source = "<!-- toc style=increasing -->\n<!-- /toc -->\n\n# Banana\n\n## Apple\n\n\
                  <!-- toc numbered=true style=hierarchy -->\n<!-- /toc -->\n\n# Cherry\n\n## Date\n\n# Elder\n";
    let outcome = insert_tocs_in_text(source, &plain(), true).unwrap();

    assert!(outcome.text.starts_with(
        "<!-- toc style=increasing -->\n- Apple\n- Banana\n- Cherry\n- Date\n- Elder\n<!-- /toc -->\n"
    ));
    assert!(outcome.text.contains(
        "<!-- toc numbered=true style=hierarchy -->\n1. Cherry\n  1. Date\n2. Elder\n<!-- /toc -->\n"
    ));
}

#[test]
fn test_parsed_document_structural_error() {
    let outcome = insert_tocs_in_text("<!-- toc -->\n<!-- toc -->\n<!-- /toc -->", &Options::new(), false);

    assert!(outcome.unwrap_err().to_string().contains(
        "Opening toc tag found on line 2 while previous toc tag (on line 1) wasn't closed yet"
    ));
}
