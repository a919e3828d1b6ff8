//! Records loaded from the source tree and shared by every stage.

use serde::{Deserialize, Serialize};

/// Body of a problem file (`problems/**/<n>.yaml`).
///
/// `text`, `solution` and `hint` are markdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Category label, e.g. `"ترکیبیات"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat: Option<String>,
    /// Citation, e.g. the olympiad and year the problem comes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One external link inside an `extra.yaml` group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraLink {
    pub name: String,
    pub link: String,
}

/// Payload of a problem-tree leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordData {
    Problem(Problem),
    /// Links to problems hosted elsewhere (usually programming judges).
    Extra(Vec<ExtraLink>),
}

/// A leaf of the problem tree, keyed by its hierarchy id.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub data: RecordData,
}

impl Record {
    pub fn problem(id: impl Into<String>, problem: Problem) -> Self {
        Self {
            id: id.into(),
            data: RecordData::Problem(problem),
        }
    }

    pub fn extra(id: impl Into<String>, links: Vec<ExtraLink>) -> Self {
        Self {
            id: id.into(),
            data: RecordData::Extra(links),
        }
    }

    /// Contribution of this leaf to its ancestors as `(count, count_code)`.
    pub fn totals(&self) -> Totals {
        match &self.data {
            RecordData::Problem(_) => Totals { count: 1, count_code: 0 },
            RecordData::Extra(links) => Totals {
                count: 0,
                count_code: links.len(),
            },
        }
    }
}

/// Rolled-up problem counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Problems written out in full.
    pub count: usize,
    /// Links to external (programming) problems.
    pub count_code: usize,
}

impl std::ops::AddAssign for Totals {
    fn add_assign(&mut self, rhs: Self) {
        self.count += rhs.count;
        self.count_code += rhs.count_code;
    }
}

/// A chapter of the book, one `.rst` file.
#[derive(Debug, Clone, PartialEq)]
pub struct BookPart {
    /// Path relative to the book root, with `/` separators.
    pub rel_path: String,
    pub text: String,
}

/// An entry of `contributors.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contributor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    /// Lines of the book written or fixed.
    #[serde(default)]
    pub text: u32,
    /// Problems added.
    #[serde(default)]
    pub problems: u32,
}
