//! Source discovery and loading.
//!
//! Walks the project tree and loads every source the build needs:
//!
//! ```text
//! project/
//! ├── gtoi.toml                 # Optional build config
//! ├── contributors.yaml         # Contributor list
//! ├── problems/
//! │   ├── 1/
//! │   │   ├── 1.yaml            # Problem 1.1
//! │   │   ├── 2.yaml            # Problem 1.2
//! │   │   └── extra.yaml        # External links under section 1
//! │   ├── 2/
//! │   │   └── 3/
//! │   │       └── 1.yaml        # Problem 2.3.1
//! │   └── _build/               # Output, never scanned
//! └── text/book/
//!     ├── index.rst             # Sphinx toctree, skipped
//!     └── 1/
//!         ├── index.rst
//!         └── 1-intro.rst       # Book part
//! ```
//!
//! Files are discovered with [`walkdir`] and sorted by path, then read and
//! parsed in parallel on the rayon pool. Any read or parse failure aborts the
//! stage with the offending path.

use crate::ident;
use crate::types::{BookPart, Contributor, ExtraLink, Problem, Record};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Cannot derive problem id for {0}")]
    BadId(PathBuf),
}

/// Chapter files named like this are Sphinx tables of contents.
const BOOK_INDEX_FILE: &str = "index.rst";

/// Find all files under `root` with the given extension, sorted by path.
///
/// Directories named in `skip` are not descended into. A missing root yields
/// an empty list.
pub fn discover(root: &Path, extension: &str, skip: &[&Path]) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !skip.iter().any(|s| e.path() == *s));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn read_text(path: &Path) -> Result<String, ScanError> {
    fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_yaml<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T, ScanError> {
    serde_yaml::from_str(text).map_err(|source| ScanError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load one problem-tree leaf. The id suffix decides the payload shape.
pub fn load_record(root: &Path, path: &Path) -> Result<Record, ScanError> {
    let id = ident::id_from_path(root, path).ok_or_else(|| ScanError::BadId(path.to_path_buf()))?;
    let text = read_text(path)?;
    if ident::is_extra(&id) {
        let links: Vec<ExtraLink> = parse_yaml(path, &text)?;
        Ok(Record::extra(id, links))
    } else {
        let problem: Problem = parse_yaml(path, &text)?;
        Ok(Record::problem(id, problem))
    }
}

/// Load every problem under `root`, skipping the `output` directory.
pub fn scan_problems(root: &Path, output: &Path) -> Result<Vec<Record>, ScanError> {
    let files = discover(root, "yaml", &[output])?;
    files.par_iter().map(|path| load_record(root, path)).collect()
}

/// Whether a book file is a table of contents rather than a part.
pub fn is_book_index(path: &Path) -> bool {
    path.file_name().map(|n| n == BOOK_INDEX_FILE).unwrap_or(false)
}

/// Load every book part under `root` (all `.rst` files except `index.rst`).
pub fn scan_book(root: &Path) -> Result<Vec<BookPart>, ScanError> {
    let files: Vec<PathBuf> = discover(root, "rst", &[])?
        .into_iter()
        .filter(|p| !is_book_index(p))
        .collect();
    files
        .par_iter()
        .map(|path| {
            let text = read_text(path)?;
            let rel_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            Ok(BookPart { rel_path, text })
        })
        .collect()
}

/// Load `contributors.yaml`. A missing file means no contributors.
pub fn load_contributors(path: &Path) -> Result<Vec<Contributor>, ScanError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = read_text(path)?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_yaml(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::RecordData;

    #[test]
    fn scan_finds_all_problem_files() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let records = scan_problems(&paths.problems, &paths.problems_output).unwrap();
        assert_eq!(
            record_ids(&records),
            vec!["1.1", "1.2", "1.extra", "2.1.1", "2.1.2", "2.10.1", "2.9.1"]
        );
    }

    #[test]
    fn scan_skips_output_directory() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        fs::create_dir_all(&paths.problems_output).unwrap();
        fs::write(paths.problems_output.join("stale.yaml"), "text: old").unwrap();
        let records = scan_problems(&paths.problems, &paths.problems_output).unwrap();
        assert!(records.iter().all(|r| !r.id.contains("stale")));
    }

    #[test]
    fn extra_files_load_links() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let records = scan_problems(&paths.problems, &paths.problems_output).unwrap();
        let extra = find_record(&records, "1.extra");
        match &extra.data {
            RecordData::Extra(links) => {
                assert_eq!(links.len(), 4);
                assert_eq!(links[0].name, "Graph Connectivity");
            }
            other => panic!("expected extra links, got {other:?}"),
        }
    }

    #[test]
    fn problem_files_load_fields() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let records = scan_problems(&paths.problems, &paths.problems_output).unwrap();
        let problem = find_problem(&records, "1.1");
        assert!(problem.text.contains("درخت"));
        assert!(problem.solution.is_some());
        assert_eq!(problem.source.as_deref(), Some("المپیاد ۱۳۹۸"));
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let bad = paths.problems.join("3.yaml");
        fs::write(&bad, "text: [unclosed").unwrap();
        let err = scan_problems(&paths.problems, &paths.problems_output).unwrap_err();
        assert!(err.to_string().contains("3.yaml"), "{err}");
    }

    #[test]
    fn missing_problems_dir_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let records = scan_problems(&tmp.path().join("problems"), &tmp.path().join("out")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn book_skips_index_files() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let parts = scan_book(&paths.book).unwrap();
        let names: Vec<&str> = parts.iter().map(|p| p.rel_path.as_str()).collect();
        assert_eq!(names, vec!["1/1-intro.rst", "1/2-trees.rst", "2/1-matching.rst"]);
    }

    #[test]
    fn contributors_load() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let people = load_contributors(&paths.contributors).unwrap();
        assert_eq!(people.len(), 3);
        assert_eq!(people[0].text, 420);
    }

    #[test]
    fn missing_contributors_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let people = load_contributors(&tmp.path().join("contributors.yaml")).unwrap();
        assert!(people.is_empty());
    }
}
