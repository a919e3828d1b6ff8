//! Hierarchy identifiers derived from problem file paths.
//!
//! Every problem lives at a path under the problems root; its identifier is
//! that path with separators replaced by dots and the extension dropped:
//!
//! ```text
//! problems/2/3/1.yaml      → "2.3.1"
//! problems/2/3/extra.yaml  → "2.3.extra"
//! problems/7.yaml          → "7"
//! ```
//!
//! The parent of an id is the id with its last segment removed. Ids without
//! a dot hang off the root, whose id is the empty string.
//!
//! ## Ordering
//!
//! Ids order segment by segment using the numeric value of each segment, so
//! `2.9` sorts before `2.10`. A strict prefix sorts first. Segments that are
//! not numbers (like `extra`) sort after numeric ones and compare as text.

use std::cmp::Ordering;
use std::path::Path;

/// Id of the root of the hierarchy.
pub const ROOT_ID: &str = "";

/// Suffix marking a group of external links rather than a problem.
pub const EXTRA_SUFFIX: &str = "extra";

/// Derive a hierarchy id from a file path relative to the problems root.
///
/// Returns `None` if `path` is not under `root`.
pub fn id_from_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.with_extension("");
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("."))
}

/// Parent id: the id with its last dot-segment removed.
///
/// Returns `None` for the root, which has no parent.
pub fn parent_id(id: &str) -> Option<&str> {
    if id == ROOT_ID {
        return None;
    }
    Some(id.rfind('.').map(|pos| &id[..pos]).unwrap_or(ROOT_ID))
}

/// Whether an id names a group of external links.
pub fn is_extra(id: &str) -> bool {
    id.ends_with(EXTRA_SUFFIX)
}

/// Output file name for the page of an id.
pub fn page_file_name(id: &str) -> String {
    if id == ROOT_ID {
        "index.html".to_string()
    } else {
        format!("{id}.html")
    }
}

/// Compare two ids segment-wise by numeric value.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_segments(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn segments(id: &str) -> impl Iterator<Item = &str> {
    id.split('.').filter(|s| !s.is_empty())
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
