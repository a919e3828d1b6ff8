//! Shared test utilities.
//!
//! `setup_fixtures` gives each test its own copy of the sample project in
//! `fixtures/site/`, laid out like the real repository:
//!
//! ```text
//! site/
//! ├── contributors.yaml
//! ├── problems/
//! │   ├── 1/{1,2,extra}.yaml
//! │   └── 2/{1/1,1/2,9/1,10/1}.yaml
//! └── text/book/
//!     ├── index.rst
//!     ├── 1/{index,1-intro,2-trees}.rst
//!     └── 2/1-matching.rst
//! ```
//!
//! Lookups panic with the available options on a miss.

use std::path::Path;
use tempfile::TempDir;

use crate::config::{PathsConfig, ProjectPaths};
use crate::types::{Problem, Record, RecordData};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Default project layout rooted at `root`.
pub fn project_paths(root: &Path) -> ProjectPaths {
    PathsConfig::default().resolve(root)
}

// =========================================================================
// Record lookups
// =========================================================================

/// All record ids in scan order.
pub fn record_ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Find a record by id. Panics if not found.
pub fn find_record<'a>(records: &'a [Record], id: &str) -> &'a Record {
    records.iter().find(|r| r.id == id).unwrap_or_else(|| {
        let ids = record_ids(records);
        panic!("record '{id}' not found. Available: {ids:?}")
    })
}

/// Find a problem by id. Panics if not found or if it is an extra group.
pub fn find_problem<'a>(records: &'a [Record], id: &str) -> &'a Problem {
    match &find_record(records, id).data {
        RecordData::Problem(problem) => problem,
        RecordData::Extra(_) => panic!("record '{id}' is an extra group, not a problem"),
    }
}
