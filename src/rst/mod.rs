//! reStructuredText to HTML for book chapters.
//!
//! Covers the subset of reStructuredText the book is written in: titled
//! sections, paragraphs, bold, bullet and enumerated lists, inline literals,
//! hyperlink references, the `figure`, `code-block` and `math` directives and
//! the `math` role.
//!
//! ```text
//! source ──block::parse──▶ ast::Node ──html::render──▶ HTML string
//! ```
//!
//! Both halves are pure. Parsing never fails; constructs the printer does
//! not handle come back as [`RstError::Unsupported`].

pub mod ast;
pub mod block;
pub mod html;
pub mod inline;

use thiserror::Error;

pub use ast::Node;
pub use html::escape_html;

#[derive(Error, Debug)]
pub enum RstError {
    #[error("{file}: unsupported {kind}: {node}")]
    Unsupported {
        file: String,
        kind: &'static str,
        node: String,
    },
}

/// Parse a document.
pub fn parse(source: &str) -> Node {
    block::parse(source)
}

/// Convert a document to HTML. `name` labels the source in errors.
pub fn to_html(source: &str, name: &str) -> Result<String, RstError> {
    html::render(&parse(source), name)
}
