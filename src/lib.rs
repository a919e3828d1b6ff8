//! # gtoi-build
//!
//! Build tooling for the gtoi graph-theory book: a Persian textbook written
//! in reStructuredText and a problem set written as one YAML file per
//! problem. The directory tree is the data source. Nested directories under
//! `problems/` are sections, and the path of a file is its hierarchy id
//! (`problems/2/10/1.yaml` is problem `2.10.1`).
//!
//! # Stages
//!
//! ```text
//! problems      problems/**/*.yaml  →  problems/_build/*.html
//! book          text/book/**/*.rst  →  _build/allOfBook.html
//! wiki          text/book/**/*.rst  →  _build/opedia/**/*.txt
//! statistics    problems + book     →  _build/statistics.html
//! contributors  contributors.yaml   →  _build/contributors.html
//! ```
//!
//! Every stage reads from disk, transforms in memory and writes. There is no
//! manifest or cache between stages; each one is cheap enough to rerun.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Discovers and loads problem files, book parts and contributors |
//! | [`ident`] | Hierarchy ids: derivation from paths, parents, ordering |
//! | [`hierarchy`] | Builds the section tree with rolled-up problem counts |
//! | [`pages`] | Renders problem, section and index pages |
//! | [`rst`] | reStructuredText parser and HTML printer for book parts |
//! | [`wiki`] | Line-based export of book parts to wiki markup |
//! | [`book`] | The combined single-document book |
//! | [`statistics`] | Progress dashboard |
//! | [`contributors`] | Contributors table and charts |
//! | [`layout`] | Page chrome shared by the generated pages |
//! | [`generate`] | Stage pipelines: read, render, write |
//! | [`config`] | `gtoi.toml` loading, merging and validation |
//! | [`types`] | Records, totals and input file schemas |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Deferred Rendering
//!
//! The hierarchy is built first and pages are rendered afterwards, in the
//! order the builder visited them. A section can gain children after it was
//! visited (a sibling leaf further down the input), so rendering on visit
//! would print stale child lists.
//!
//! ## Fail Fast
//!
//! A malformed YAML file or a construct the RST printer does not support
//! stops the build with the file name. A half-built book is worse than no
//! build.

pub mod book;
pub mod config;
pub mod contributors;
pub mod generate;
pub mod hierarchy;
pub mod ident;
pub mod layout;
pub mod output;
pub mod pages;
pub mod rst;
pub mod scan;
pub mod statistics;
pub mod types;
pub mod wiki;

#[cfg(test)]
pub(crate) mod test_helpers;
