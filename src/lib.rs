//! tocme: keep generated tables of contents up to date inside Markdown documents.
//!
//! A table of contents lives between a pair of marker comments:
//!
//! ```text
//! <!-- toc levels=1-2 -->
//! - __[Introduction](#introduction)__
//! <!-- /toc -->
//! ```
//!
//! The engine locates the marker pairs, collects the document's headings, renders the list and
//! splices it between the markers, leaving everything else in the document byte-for-byte intact.
//! Parsing is delegated to tree-sitter (see [`parser`]), configuration arrives as a layered
//! [`options::Options`] chain, and [`splice::insert_tocs`] ties the pieces together.
#![allow(clippy::multiple_crate_versions)]

pub mod anchor;
pub mod config;
pub mod document;
pub mod formats;
pub mod inline;
pub mod options;
pub mod parser;
pub mod render;
pub mod select;
pub mod splice;
pub mod tags;
pub mod tasks;

pub use document::{CommentBlock, Document, Heading};
pub use options::{Levels, Mode, OptionLayer, Options, Style, Variant};
pub use splice::{insert_tocs, TocOutcome};

/// Error type for tocme operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Marker tags are unbalanced or nested.
    #[error("{0}")]
    Tags(String),

    /// A start tag ends after its end tag begins. Unreachable with a correct scan.
    #[error("start tag ending at byte {start_end} overlaps end tag starting at byte {end_start}")]
    TagBounds {
        /// Byte offset just past the start tag.
        start_end: usize,
        /// Byte offset of the end tag.
        end_start: usize,
    },

    /// A level range supplied by the host could not be parsed.
    #[error("Invalid level specification: '{spec}': {reason}")]
    Levels {
        /// The offending specification.
        spec: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The project configuration is unreadable or holds an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The Markdown parser could not be set up or gave up on the input.
    #[error("parser error: {0}")]
    Parser(String),

    /// Reading or writing a document failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for tocme operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse `text` with the tree-sitter Markdown parser and insert its tables of contents.
///
/// This is the one-call entry point for hosts holding raw text: the dialect knobs in `options`
/// are forwarded to the parser and the same chain drives rendering.
///
/// # Errors
///
/// Returns an error if the parser cannot be initialised or the marker tags are malformed.
pub fn insert_tocs_in_text(
    text: &str,
    options: &Options,
    check_current_content: bool,
) -> Result<TocOutcome> {
    let parser = parser::MarkdownParser::new(&formats::markdown::MarkdownFormat)?;
    let document = parser.parse(text, &options.parse_options())?;
    insert_tocs(&document, options, check_current_content)
}
