//! Format trait and implementations for the documents tocme understands.
//!
//! A format names the tree-sitter grammar for a document type together with the queries that
//! locate its headings and the raw HTML blocks marker comments live in.

pub mod markdown;

/// Grammar and queries for one document type.
pub trait Format {
    /// Tree-sitter language for the block structure of the document.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every heading node as `@heading`.
    fn heading_query(&self) -> &str;
    /// Query capturing every HTML block as `@block`.
    fn comment_query(&self) -> &str;
    /// Query capturing every paragraph as `@paragraph`.
    fn paragraph_query(&self) -> &str;
}
