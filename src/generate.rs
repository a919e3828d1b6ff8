//! Build stages: read sources, render, write outputs.
//!
//! Each stage is a short linear pipeline. Reads and writes fan out on the
//! rayon pool; everything in between runs on one thread.
//!
//! ## Output Structure
//!
//! ```text
//! <root>/
//! ├── problems/_build/           # removed and recreated by every run
//! │   ├── index.html             # root index
//! │   ├── 1.html                 # section pages
//! │   ├── 1.1.html               # problem pages
//! │   └── ...
//! └── _build/
//!     ├── allOfBook.html         # whole book for the PDF edition
//!     ├── statistics.html
//!     ├── contributors.html
//!     └── opedia/                # wiki export, one .txt per part
//!         └── 1/1-intro.txt
//! ```
//!
//! Stages return small reports describing what they wrote; printing them is
//! the job of [`crate::output`].

use crate::book;
use crate::config::{BuildConfig, ConfigError, ProjectPaths, SiteInfo, StatisticsConfig};
use crate::contributors;
use crate::hierarchy::PageKind;
use crate::pages::{self, RenderedPage};
use crate::rst::RstError;
use crate::scan::{self, ScanError};
use crate::statistics::{self, Statistics};
use crate::types::Totals;
use crate::wiki;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BOOK_FILE: &str = "allOfBook.html";
pub const STATISTICS_FILE: &str = "statistics.html";
pub const CONTRIBUTORS_FILE: &str = "contributors.html";
pub const WIKI_DIR: &str = "opedia";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Rst(#[from] RstError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Reports
// ============================================================================

/// One written problem-set page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub id: String,
    pub kind: PageKind,
    pub totals: Totals,
    pub file: String,
}

impl From<&RenderedPage> for PageSummary {
    fn from(page: &RenderedPage) -> Self {
        Self {
            id: page.id.clone(),
            kind: page.kind,
            totals: page.totals,
            file: page.file_name(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProblemsReport {
    pub output_dir: PathBuf,
    /// In worklist order.
    pub pages: Vec<PageSummary>,
}

#[derive(Debug, Clone)]
pub struct BookReport {
    pub path: PathBuf,
    pub parts: usize,
}

#[derive(Debug, Clone)]
pub struct WikiReport {
    pub output_dir: PathBuf,
    /// Paths relative to `output_dir`, sorted.
    pub files: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StatisticsReport {
    pub path: PathBuf,
    pub stats: Statistics,
}

#[derive(Debug, Clone)]
pub struct ContributorsReport {
    pub path: PathBuf,
    pub contributors: usize,
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub problems: ProblemsReport,
    pub book: BookReport,
    pub wiki: WikiReport,
    pub statistics: StatisticsReport,
    pub contributors: ContributorsReport,
}

/// A stage of [`build_all`] that just finished, handed to the caller before
/// the next stage starts.
#[derive(Debug, Clone, Copy)]
pub enum StageDone<'a> {
    Problems(&'a ProblemsReport),
    Book(&'a BookReport),
    Wiki(&'a WikiReport),
    Statistics(&'a StatisticsReport),
    Contributors(&'a ContributorsReport),
}

impl StageDone<'_> {
    /// Position in the build, starting at 1.
    pub fn number(&self) -> usize {
        match self {
            Self::Problems(_) => 1,
            Self::Book(_) => 2,
            Self::Wiki(_) => 3,
            Self::Statistics(_) => 4,
            Self::Contributors(_) => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Problems(_) => "Problems",
            Self::Book(_) => "Book",
            Self::Wiki(_) => "Wiki export",
            Self::Statistics(_) => "Statistics",
            Self::Contributors(_) => "Contributors",
        }
    }
}

/// What a dry run loaded and converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub records: usize,
    pub pages: usize,
    pub parts: usize,
    pub contributors: usize,
}

// ============================================================================
// Writing
// ============================================================================

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write many files in parallel. No ordering between writes.
fn write_all(files: &[(PathBuf, String)]) -> Result<(), GenerateError> {
    files
        .par_iter()
        .map(|(path, contents)| write_file(path, contents))
        .collect()
}

/// Remove and recreate a directory so no stale output survives.
fn reset_dir(dir: &Path) -> Result<(), GenerateError> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

// ============================================================================
// Stages
// ============================================================================

/// Problem-set pages into `problems_output`.
pub fn generate_problems(paths: &ProjectPaths) -> Result<ProblemsReport, GenerateError> {
    let records = scan::scan_problems(&paths.problems, &paths.problems_output)?;
    let pages = pages::generate_htmls(&records);

    reset_dir(&paths.problems_output)?;
    let files: Vec<(PathBuf, String)> = pages
        .iter()
        .map(|p| (paths.problems_output.join(p.file_name()), p.html.clone()))
        .collect();
    write_all(&files)?;

    Ok(ProblemsReport {
        output_dir: paths.problems_output.clone(),
        pages: pages.iter().map(PageSummary::from).collect(),
    })
}

/// The combined book document.
pub fn generate_book(paths: &ProjectPaths, site: &SiteInfo) -> Result<BookReport, GenerateError> {
    let parts = scan::scan_book(&paths.book)?;
    let html = book::render(&parts, site)?;
    let path = paths.build.join(BOOK_FILE);
    write_file(&path, &html)?;
    Ok(BookReport {
        path,
        parts: parts.len(),
    })
}

/// Wiki path for a part: same relative path, `.txt` instead of `.rst`.
pub fn wiki_file_name(rel_path: &str) -> String {
    match rel_path.strip_suffix(".rst") {
        Some(stem) => format!("{stem}.txt"),
        None => format!("{rel_path}.txt"),
    }
}

/// One wiki file per book part under `build/opedia/`.
pub fn export_wiki(paths: &ProjectPaths, site: &SiteInfo) -> Result<WikiReport, GenerateError> {
    let parts = scan::scan_book(&paths.book)?;
    let output_dir = paths.build.join(WIKI_DIR);
    let mut files = Vec::with_capacity(parts.len());
    let mut writes = Vec::with_capacity(parts.len());
    for part in &parts {
        let name = wiki_file_name(&part.rel_path);
        writes.push((
            output_dir.join(&name),
            wiki::to_wiki(&part.text, &site.wiki_namespace),
        ));
        files.push(name);
    }
    write_all(&writes)?;
    Ok(WikiReport { output_dir, files })
}

/// The progress dashboard.
pub fn generate_statistics(
    paths: &ProjectPaths,
    config: &StatisticsConfig,
) -> Result<StatisticsReport, GenerateError> {
    let records = scan::scan_problems(&paths.problems, &paths.problems_output)?;
    let parts = scan::scan_book(&paths.book)?;
    let stats = statistics::compute(&records, &parts, config);
    let path = paths.build.join(STATISTICS_FILE);
    write_file(&path, &statistics::render(&stats, config))?;
    Ok(StatisticsReport { path, stats })
}

/// The contributors page.
pub fn generate_contributors(paths: &ProjectPaths) -> Result<ContributorsReport, GenerateError> {
    let people = scan::load_contributors(&paths.contributors)?;
    let html = contributors::render(&people)?;
    let path = paths.build.join(CONTRIBUTORS_FILE);
    write_file(&path, &html)?;
    Ok(ContributorsReport {
        path,
        contributors: people.len(),
    })
}

/// Every stage, in order. The first failure stops the build.
///
/// `on_stage` sees each report as soon as its stage is done, so progress can
/// be printed while later stages run.
pub fn build_all(
    root: &Path,
    config: &BuildConfig,
    mut on_stage: impl FnMut(StageDone<'_>),
) -> Result<BuildReport, GenerateError> {
    let paths = config.paths.resolve(root);

    let problems = generate_problems(&paths)?;
    on_stage(StageDone::Problems(&problems));

    let book = generate_book(&paths, &config.site)?;
    on_stage(StageDone::Book(&book));

    let wiki = export_wiki(&paths, &config.site)?;
    on_stage(StageDone::Wiki(&wiki));

    let statistics = generate_statistics(&paths, &config.statistics)?;
    on_stage(StageDone::Statistics(&statistics));

    let contributors = generate_contributors(&paths)?;
    on_stage(StageDone::Contributors(&contributors));

    Ok(BuildReport {
        problems,
        book,
        wiki,
        statistics,
        contributors,
    })
}

/// Load and convert everything without writing anything.
pub fn check(root: &Path, config: &BuildConfig) -> Result<CheckReport, GenerateError> {
    let paths = config.paths.resolve(root);
    let records = scan::scan_problems(&paths.problems, &paths.problems_output)?;
    let pages = pages::generate_htmls(&records);
    let parts = scan::scan_book(&paths.book)?;
    book::convert_parts(&parts)?;
    let people = scan::load_contributors(&paths.contributors)?;
    contributors::render(&people)?;
    Ok(CheckReport {
        records: records.len(),
        pages: pages.len(),
        parts: parts.len(),
        contributors: people.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn wiki_file_names() {
        assert_eq!(wiki_file_name("1/1-intro.rst"), "1/1-intro.txt");
        assert_eq!(wiki_file_name("notes"), "notes.txt");
    }

    #[test]
    fn problems_stage_writes_every_page() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let report = generate_problems(&paths).unwrap();

        let files: Vec<&str> = report.pages.iter().map(|p| p.file.as_str()).collect();
        for expected in ["index.html", "1.html", "1.1.html", "1.extra.html", "2.html", "2.1.html"] {
            assert!(files.contains(&expected), "missing {expected} in {files:?}");
            assert!(paths.problems_output.join(expected).is_file());
        }
        assert_eq!(report.pages.len(), 13);
    }

    #[test]
    fn problems_stage_clears_stale_output() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        fs::create_dir_all(&paths.problems_output).unwrap();
        let stale = paths.problems_output.join("99.html");
        fs::write(&stale, "old").unwrap();
        generate_problems(&paths).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn root_index_totals() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let report = generate_problems(&paths).unwrap();
        let root = report.pages.iter().find(|p| p.id.is_empty()).unwrap();
        assert_eq!(root.kind, PageKind::Index);
        assert_eq!(root.totals, Totals { count: 6, count_code: 4 });
    }

    #[test]
    fn wiki_stage_mirrors_book_tree() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let report = export_wiki(&paths, &SiteInfo::default()).unwrap();
        assert_eq!(
            report.files,
            vec!["1/1-intro.txt", "1/2-trees.txt", "2/1-matching.txt"]
        );
        let intro = fs::read_to_string(report.output_dir.join("1/1-intro.txt")).unwrap();
        assert!(intro.starts_with("====== "));
    }

    #[test]
    fn statistics_stage_counts_fixtures() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let report = generate_statistics(&paths, &StatisticsConfig::default()).unwrap();
        assert_eq!(report.stats.problem_count, 6);
        assert_eq!(report.stats.foreign_problem_count, 4);
        assert_eq!(report.stats.part_count, 3);
        assert_eq!(report.stats.complete_part_count, 2);
        assert!(report.path.ends_with("_build/statistics.html"));
        assert!(report.path.is_file());
    }

    #[test]
    fn book_stage_writes_one_file() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let report = generate_book(&paths, &SiteInfo::default()).unwrap();
        assert_eq!(report.parts, 3);
        let html = fs::read_to_string(&report.path).unwrap();
        assert!(html.contains("<h1>"));
    }

    #[test]
    fn contributors_stage() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        let report = generate_contributors(&paths).unwrap();
        assert_eq!(report.contributors, 3);
        assert!(report.path.is_file());
    }

    #[test]
    fn check_writes_nothing() {
        let tmp = setup_fixtures();
        let config = BuildConfig::default();
        let report = check(tmp.path(), &config).unwrap();
        assert_eq!(report.records, 7);
        assert_eq!(report.pages, 13);
        assert_eq!(report.parts, 3);
        assert_eq!(report.contributors, 3);
        assert!(!tmp.path().join("_build").exists());
        assert!(!tmp.path().join("problems/_build").exists());
    }

    #[test]
    fn unsupported_markup_fails_the_book() {
        let tmp = setup_fixtures();
        let paths = project_paths(tmp.path());
        fs::write(paths.book.join("2/9-broken.rst"), ".. toctree::\n").unwrap();
        let err = generate_book(&paths, &SiteInfo::default()).unwrap_err();
        assert!(err.to_string().contains("2/9-broken.rst"), "{err}");
    }
}
