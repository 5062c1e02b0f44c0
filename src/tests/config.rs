use super::{layer, Config, CONFIG_FILE};
use crate::options::{Levels, Mode, OptionLayer, Style, Variant};
use crate::Error;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = r#"
[options]
style = "flat"
levels = "1-3,5"
variant = "GitLab"

[[docs]]
path = "README.md"
[docs.options]
numbered = true

[[docs.outputs]]
path = "docs/README.md"
[docs.outputs.options]
bold = false
mode = "full"

[[docs]]
path = "CHANGELOG.md"
"#;

#[test]
fn test_full_shape() {
    let config = Config::from_toml(SAMPLE).unwrap();

    let project = config.project_layer().unwrap();
    assert_eq!(project.style, Some(Style::Flat));
    assert_eq!(project.levels, Some([1, 2, 3, 5].into_iter().collect::<Levels>()));
    assert_eq!(project.variant, Some(Variant::GitLab));
    assert_eq!(project.bold, None);

    assert_eq!(config.docs.len(), 2);
    let readme = &config.docs[0];
    assert_eq!(readme.path, "README.md");
    assert_eq!(layer(readme.options.as_ref()).unwrap().numbered, Some(true));
    assert_eq!(readme.outputs.len(), 1);

    let output = &readme.outputs[0];
    assert_eq!(output.path, "docs/README.md");
    let output_layer = layer(output.options.as_ref()).unwrap();
    assert_eq!(output_layer.bold, Some(false));
    assert_eq!(output_layer.mode, Some(Mode::Full));

    let changelog = &config.docs[1];
    assert!(changelog.options.is_none());
    assert!(changelog.outputs.is_empty());
}

#[test]
fn test_empty_file_is_default() {
    let config = Config::from_toml("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.project_layer().unwrap(), OptionLayer::default());
}

#[test]
fn test_invalid_values_are_errors() {
    let style = Config::from_toml("[options]\nstyle = \"sideways\"\n").unwrap();
    assert!(matches!(style.project_layer(), Err(Error::Config(_))));

    let levels = Config::from_toml("[options]\nlevels = \"3-1\"\n").unwrap();
    match levels.project_layer() {
        Err(Error::Config(message)) => assert!(message.contains("reversed"), "{message}"),
        other => panic!("expected a config error, got {other:?}"),
    }

    let variant = Config::from_toml("[options]\nvariant = \"Markdown2000\"\n").unwrap();
    assert!(matches!(variant.project_layer(), Err(Error::Config(_))));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, SAMPLE).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.docs[1].input(), std::path::PathBuf::from("CHANGELOG.md"));

    let explicit = Config::discover(Some(&path)).unwrap();
    assert_eq!(explicit, config);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(matches!(Config::load(&missing), Err(Error::Config(_))));
}
