//! Project configuration from tocme.toml.
//!
//! The file holds a project-wide `[options]` table and a list of `[[docs]]`, each optionally
//! with its own options and a list of output files. Every options table becomes one
//! [`OptionLayer`] in the chain that is finally consulted per marker tag.

use crate::options::{Levels, OptionLayer};
use crate::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "tocme.toml";

#[derive(Facet, Clone, Debug, Default, PartialEq)]
/// Contents of tocme.toml.
pub struct Config {
    #[facet(default)]
    /// Project-wide options.
    pub options: Option<OptionsConfig>,
    #[facet(default)]
    /// Documents handled when no paths are given on the command line.
    pub docs: Vec<DocConfig>,
}

#[derive(Facet, Clone, Debug, Default, PartialEq)]
/// A document and where its result goes.
pub struct DocConfig {
    /// Input document, relative to the working directory.
    pub path: String,
    #[facet(default)]
    /// Options for this document.
    pub options: Option<OptionsConfig>,
    #[facet(default)]
    /// Output files. Without any, the document is rewritten in place.
    pub outputs: Vec<OutputConfig>,
}

#[derive(Facet, Clone, Debug, Default, PartialEq)]
/// One output file of a document.
pub struct OutputConfig {
    /// Output path, relative to the working directory.
    pub path: String,
    #[facet(default)]
    /// Options for this output only.
    pub options: Option<OptionsConfig>,
}

#[derive(Facet, Clone, Debug, Default, PartialEq)]
/// An options table as written in the file. Enumerations and levels are kept as text until
/// [`OptionsConfig::to_layer`] validates them.
pub struct OptionsConfig {
    #[facet(default)]
    /// Marker tag name.
    pub tag: Option<String>,
    #[facet(default)]
    /// Markdown dialect.
    pub variant: Option<String>,
    #[facet(default)]
    /// List style.
    pub style: Option<String>,
    #[facet(default)]
    /// Heading scope.
    pub mode: Option<String>,
    #[facet(default)]
    /// Level specification such as `1-3,5`.
    pub levels: Option<String>,
    #[facet(default)]
    /// Bold items.
    pub bold: Option<bool>,
    #[facet(default)]
    /// Numbered items.
    pub numbered: Option<bool>,
    #[facet(default)]
    /// Plain text items.
    pub plain: Option<bool>,
    #[facet(default)]
    /// Strip emoji shortcodes.
    pub remove_emojis: Option<bool>,
    #[facet(default)]
    /// Require a space after `#`.
    pub require_space: Option<bool>,
    #[facet(default)]
    /// Keep runs of dashes in anchors.
    pub duped_dashes: Option<bool>,
    #[facet(default)]
    /// Suffix repeated anchors.
    pub resolve_dupes: Option<bool>,
    #[facet(default)]
    /// Characters turned into dashes in anchors.
    pub dash_chars: Option<String>,
    #[facet(default)]
    /// Characters kept in anchors.
    pub allowed_chars: Option<String>,
    #[facet(default)]
    /// Accept indented headings.
    pub allow_leading_space: Option<bool>,
    #[facet(default)]
    /// Minimum setext underline length.
    pub setext_marker_length: Option<usize>,
    #[facet(default)]
    /// Accept a bare `##`.
    pub empty_heading_without_space: Option<bool>,
    #[facet(default)]
    /// Let headings interrupt list item paragraphs.
    pub heading_interrupts_item_paragraph: Option<bool>,
}

impl OptionsConfig {
    /// Validate the table into an option layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unknown style, mode or variant, or a bad level
    /// specification.
    pub fn to_layer(&self) -> Result<OptionLayer> {
        Ok(OptionLayer {
            tag: self.tag.clone(),
            variant: self.variant.as_deref().map(str::parse).transpose()?,
            style: self.style.as_deref().map(str::parse).transpose()?,
            mode: self.mode.as_deref().map(str::parse).transpose()?,
            levels: self
                .levels
                .as_deref()
                .map(Levels::parse)
                .transpose()
                .map_err(|e| Error::Config(e.to_string()))?,
            bold: self.bold,
            numbered: self.numbered,
            plain: self.plain,
            remove_emojis: self.remove_emojis,
            require_space: self.require_space,
            duped_dashes: self.duped_dashes,
            resolve_dupes: self.resolve_dupes,
            dash_chars: self.dash_chars.clone(),
            allowed_chars: self.allowed_chars.clone(),
            allow_leading_space: self.allow_leading_space,
            setext_marker_length: self.setext_marker_length,
            empty_heading_without_space: self.empty_heading_without_space,
            heading_interrupts_item_paragraph: self.heading_interrupts_item_paragraph,
        })
    }
}

/// Layer for an optional table; a missing table sets nothing.
///
/// # Errors
///
/// Returns [`Error::Config`] when the table holds an invalid value.
pub fn layer(options: Option<&OptionsConfig>) -> Result<OptionLayer> {
    options.map_or_else(|| Ok(OptionLayer::default()), OptionsConfig::to_layer)
}

impl DocConfig {
    #[must_use]
    /// Input path of the document.
    pub fn input(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid TOML of the expected shape.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!(path = %path.display(), docs = config.docs.len(), "loaded configuration");
        Ok(config)
    }

    /// Load `path` when given, else tocme.toml if the working directory has one, else defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a configuration file exists but cannot be read or parsed.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).is_file() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// The project-wide option layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the `[options]` table holds an invalid value.
    pub fn project_layer(&self) -> Result<OptionLayer> {
        layer(self.options.as_ref())
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
