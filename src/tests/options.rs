use super::{Levels, Mode, OptionLayer, Options, Style, Variant, TOC_TAG};
use crate::Error;

#[test]
fn test_root_defaults() {
    let options = Options::new();

    assert_eq!(options.tag(), TOC_TAG);
    assert_eq!(options.variant(), Variant::GitHub);
    assert_eq!(options.style(), Style::Hierarchy);
    assert_eq!(options.mode(), Mode::Normal);
    assert_eq!(options.levels(), Levels::default());
    assert!(options.bold());
    assert!(!options.numbered());
    assert!(!options.plain());
    assert!(!options.remove_emojis());
    assert_eq!(options.depth(), 0);
}

#[test]
fn test_innermost_layer_wins() {
    let project = Options::new().with_layer(OptionLayer {
        style: Some(Style::Flat),
        bold: Some(false),
        ..OptionLayer::default()
    });
    let document = project.with_layer(OptionLayer {
        style: Some(Style::Decreasing),
        ..OptionLayer::default()
    });

    assert_eq!(document.style(), Style::Decreasing);
    assert!(!document.bold(), "unset field should come from the parent");
    assert_eq!(project.style(), Style::Flat, "parent must be untouched");
    assert_eq!(document.depth(), 2);
}

#[test]
fn test_parse_options_forward_only_set_knobs() {
    let options = Options::new().with_layer(OptionLayer {
        variant: Some(Variant::GitLab),
        setext_marker_length: Some(3),
        dash_chars: Some("-".to_string()),
        ..OptionLayer::default()
    });

    let parse = options.parse_options();
    assert_eq!(parse.variant, Variant::GitLab);
    assert_eq!(parse.setext_marker_length, Some(3));
    assert_eq!(parse.dash_chars.as_deref(), Some("-"));
    assert_eq!(parse.require_space, None);
    assert_eq!(parse.resolve_dupes, None);
}

#[test]
fn test_levels_ranges_and_singles() {
    let levels = Levels::parse("1-3,5").unwrap();
    assert_eq!(levels.iter().collect::<Vec<_>>(), vec![1, 2, 3, 5]);
    assert_eq!(levels.to_string(), "1,2,3,5");

    let levels: Levels = " 2 , 4-4 ".parse().unwrap();
    assert_eq!(levels.iter().collect::<Vec<_>>(), vec![2, 4]);
}

#[test]
fn test_levels_rejects_bad_input() {
    for spec in ["", "0", "7", "1-", "3-1", "a", "1,,2"] {
        match Levels::parse(spec) {
            Err(Error::Levels { spec: reported, .. }) => assert_eq!(reported, spec),
            other => panic!("expected a level error for {spec:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_enum_names_round_trip() {
    for style in Style::ALL {
        assert_eq!(style.name().parse::<Style>().unwrap(), style);
    }
    for mode in Mode::ALL {
        assert_eq!(mode.name().parse::<Mode>().unwrap(), mode);
    }
    assert_eq!("gitlab".parse::<Variant>().unwrap(), Variant::GitLab);
    assert!("sideways".parse::<Style>().is_err());
}
