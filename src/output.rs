//! CLI output formatting for all build stages.
//!
//! Output is a content inventory: each problem page is listed by its
//! hierarchy id and kind, with the file it was written to as secondary
//! context. Single-file stages print one line naming the output.
//!
//! # Output Format
//!
//! ## Problems
//!
//! ```text
//! problem  1.1 → 1.1.html
//! problem  1.extra → 1.extra.html
//! section  1 (2 problems, 4 links) → 1.html
//! index    (root) (6 problems, 4 links) → index.html
//!
//! Generated 13 pages in problems/_build
//! ```
//!
//! ## Wiki
//!
//! ```text
//! 1/1-intro.txt
//! 1/2-trees.txt
//!
//! Exported 2 parts to _build/opedia
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::generate::{
    BookReport, BuildReport, CheckReport, ContributorsReport, PageSummary, ProblemsReport,
    StageDone, StatisticsReport, WikiReport,
};
use crate::hierarchy::PageKind;
use crate::types::Totals;

// ============================================================================
// Shared display helpers
// ============================================================================

fn display_id(id: &str) -> &str {
    if id.is_empty() { "(root)" } else { id }
}

/// `(6 problems, 4 links)`; links are omitted when there are none.
fn totals_detail(totals: Totals) -> String {
    if totals.count_code > 0 {
        format!("({} problems, {} links)", totals.count, totals.count_code)
    } else {
        format!("({} problems)", totals.count)
    }
}

fn page_line(page: &PageSummary) -> String {
    let label = format!("{:<8}", page.kind.label());
    match page.kind {
        PageKind::Problem => format!("{label} {} → {}", display_id(&page.id), page.file),
        PageKind::Section | PageKind::Index => format!(
            "{label} {} {} → {}",
            display_id(&page.id),
            totals_detail(page.totals),
            page.file
        ),
    }
}

// ============================================================================
// Stage output
// ============================================================================

pub fn format_problems_output(report: &ProblemsReport) -> Vec<String> {
    let mut lines: Vec<String> = report.pages.iter().map(page_line).collect();
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages in {}",
        report.pages.len(),
        report.output_dir.display()
    ));
    lines
}

pub fn print_problems_output(report: &ProblemsReport) {
    for line in format_problems_output(report) {
        println!("{}", line);
    }
}

pub fn format_book_output(report: &BookReport) -> Vec<String> {
    vec![format!(
        "Combined {} parts → {}",
        report.parts,
        report.path.display()
    )]
}

pub fn print_book_output(report: &BookReport) {
    for line in format_book_output(report) {
        println!("{}", line);
    }
}

pub fn format_wiki_output(report: &WikiReport) -> Vec<String> {
    let mut lines = report.files.clone();
    lines.push(String::new());
    lines.push(format!(
        "Exported {} parts to {}",
        report.files.len(),
        report.output_dir.display()
    ));
    lines
}

pub fn print_wiki_output(report: &WikiReport) {
    for line in format_wiki_output(report) {
        println!("{}", line);
    }
}

pub fn format_statistics_output(report: &StatisticsReport) -> Vec<String> {
    let s = &report.stats;
    vec![
        format!(
            "{} problems, {} links, {}/{} parts complete ({}%), {} lines",
            s.problem_count,
            s.foreign_problem_count,
            s.complete_part_count,
            s.part_count,
            s.fine_percent(),
            s.part_lines
        ),
        format!("Wrote {}", report.path.display()),
    ]
}

pub fn print_statistics_output(report: &StatisticsReport) {
    for line in format_statistics_output(report) {
        println!("{}", line);
    }
}

pub fn format_contributors_output(report: &ContributorsReport) -> Vec<String> {
    vec![format!(
        "{} contributors → {}",
        report.contributors,
        report.path.display()
    )]
}

pub fn print_contributors_output(report: &ContributorsReport) {
    for line in format_contributors_output(report) {
        println!("{}", line);
    }
}

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    vec![
        format!("{} problem files → {} pages", report.records, report.pages),
        format!("{} book parts converted", report.parts),
        format!("{} contributors", report.contributors),
    ]
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

/// `==> Stage N: Name` banner followed by the stage's own output.
pub fn format_stage_output(stage: StageDone<'_>) -> Vec<String> {
    let mut lines = vec![format!("==> Stage {}: {}", stage.number(), stage.name())];
    lines.extend(match stage {
        StageDone::Problems(report) => format_problems_output(report),
        StageDone::Book(report) => format_book_output(report),
        StageDone::Wiki(report) => format_wiki_output(report),
        StageDone::Statistics(report) => format_statistics_output(report),
        StageDone::Contributors(report) => format_contributors_output(report),
    });
    lines
}

pub fn print_stage_output(stage: StageDone<'_>) {
    for line in format_stage_output(stage) {
        println!("{}", line);
    }
}

/// One-line summary after a full build.
pub fn format_build_summary(report: &BuildReport) -> String {
    format!(
        "Built {} problem pages, {} book parts, {} wiki files, {} contributors",
        report.problems.pages.len(),
        report.book.parts,
        report.wiki.files.len(),
        report.contributors.contributors
    )
}
