//! Build configuration.
//!
//! Handles loading, validating, and merging `gtoi.toml`. The file is
//! optional: stock defaults describe the standard repository layout, and a
//! user file at the project root overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! problems = "problems"                 # Problem YAML tree
//! problems_output = "problems/_build"   # Problem pages (wiped on every build)
//! book = "text/book"                    # Book chapters (.rst)
//! contributors = "contributors.yaml"
//! build = "_build"                      # Single-file outputs and wiki export
//!
//! [site]
//! title = "کتاب گراف برای المپیاد کامپیوتر"
//! url = "https://gtoi.shaazzz.ir/"
//! wiki_namespace = "آموزش:gtoi"
//!
//! [statistics]
//! chapters = 14
//! min_complete_lines = 15
//! incomplete_marker = "not yet"
//! start_timestamp_ms = 1583008200000
//!
//! [processing]
//! max_processes = 4   # omit for auto = CPU cores
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file at the project root.
pub const CONFIG_FILE: &str = "gtoi.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `gtoi.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Where sources live and outputs go, relative to the project root.
    pub paths: PathsConfig,
    /// Text baked into page templates.
    pub site: SiteInfo,
    /// Progress dashboard settings.
    pub statistics: StatisticsConfig,
    /// Parallel I/O settings.
    pub processing: ProcessingConfig,
}

impl BuildConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.paths;
        for (key, value) in [
            ("paths.problems", &p.problems),
            ("paths.problems_output", &p.problems_output),
            ("paths.book", &p.book),
            ("paths.contributors", &p.contributors),
            ("paths.build", &p.build),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        // problems_output is deleted and recreated on every build.
        let output = relative_inside_root(&p.problems_output).ok_or_else(|| {
            ConfigError::Validation(format!(
                "paths.problems_output must be a directory inside the project root, got {:?}",
                p.problems_output
            ))
        })?;
        for (key, value) in [
            ("paths.problems", &p.problems),
            ("paths.book", &p.book),
            ("paths.contributors", &p.contributors),
            ("paths.build", &p.build),
        ] {
            let protected = normalize(value);
            if protected.starts_with(&output) {
                return Err(ConfigError::Validation(format!(
                    "paths.problems_output ({}) would delete {key} ({value})",
                    p.problems_output
                )));
            }
        }
        if self.statistics.chapters == 0 {
            return Err(ConfigError::Validation(
                "statistics.chapters must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Drop `.` components so `./problems` and `problems` compare equal.
fn normalize(path: &str) -> PathBuf {
    Path::new(path)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// A non-empty relative path that does not climb out of the root.
fn relative_inside_root(path: &str) -> Option<PathBuf> {
    let normalized = normalize(path);
    let inside = normalized
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    (inside && normalized.components().next().is_some()).then_some(normalized)
}

/// Source and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub problems: String,
    pub problems_output: String,
    pub book: String,
    pub contributors: String,
    pub build: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            problems: "problems".to_string(),
            problems_output: "problems/_build".to_string(),
            book: "text/book".to_string(),
            contributors: "contributors.yaml".to_string(),
            build: "_build".to_string(),
        }
    }
}

/// Paths resolved against a project root.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub problems: PathBuf,
    pub problems_output: PathBuf,
    pub book: PathBuf,
    pub contributors: PathBuf,
    pub build: PathBuf,
}

impl PathsConfig {
    pub fn resolve(&self, root: &Path) -> ProjectPaths {
        ProjectPaths {
            problems: root.join(&self.problems),
            problems_output: root.join(&self.problems_output),
            book: root.join(&self.book),
            contributors: root.join(&self.contributors),
            build: root.join(&self.build),
        }
    }
}

/// Site-wide strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Book title, used in the combined book document.
    pub title: String,
    /// Public URL of the online edition.
    pub url: String,
    /// Wiki namespace prefix for exported figure references.
    pub wiki_namespace: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "کتاب گراف برای المپیاد کامپیوتر".to_string(),
            url: "https://gtoi.shaazzz.ir/".to_string(),
            wiki_namespace: "آموزش:gtoi".to_string(),
        }
    }
}

/// Book progress settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatisticsConfig {
    /// Chapter count quoted in the dashboard text.
    pub chapters: u32,
    /// A part needs strictly more lines than this to count as complete.
    pub min_complete_lines: usize,
    /// A part whose trimmed text ends with this marker is incomplete.
    pub incomplete_marker: String,
    /// When writing started, as a Unix timestamp in milliseconds.
    pub start_timestamp_ms: u64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            chapters: 14,
            min_complete_lines: 15,
            incomplete_marker: "not yet".to_string(),
            start_timestamp_ms: 1_583_008_200_000,
        }
    }
}

/// Parallel I/O settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel reader/writer threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BuildConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `gtoi.toml` from the project root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BuildConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for a project root: stock defaults overlaid with `gtoi.toml`.
pub fn load_config(root: &Path) -> Result<BuildConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `gtoi.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gtoi-build configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the directory
# holding this file.

[paths]
# Problem definitions: one YAML file per problem, nested directories form
# sections. `1/2/3.yaml` becomes problem 1.2.3. A file named `extra.yaml`
# holds a list of {name, link} entries pointing at external problems.
problems = "problems"
# Problem pages are written here. The directory is deleted and recreated
# on every build.
problems_output = "problems/_build"
# Book chapters in reStructuredText. `index.rst` files are skipped.
book = "text/book"
# List of {name, github, text, problems} entries.
contributors = "contributors.yaml"
# statistics.html, contributors.html, allOfBook.html and the opedia/ wiki
# export are written here.
build = "_build"

[site]
title = "کتاب گراف برای المپیاد کامپیوتر"
url = "https://gtoi.shaazzz.ir/"
# Namespace used for figure references in the wiki export.
wiki_namespace = "آموزش:gtoi"

[statistics]
# Chapter count quoted on the dashboard.
chapters = 14
# A part needs more lines than this to count as complete.
min_complete_lines = 15
# A part whose text ends with this marker is still incomplete.
incomplete_marker = "not yet"
# Day zero of the writing effort (Unix time in milliseconds).
start_timestamp_ms = 1583008200000

[processing]
# Maximum parallel file readers/writers (omit for auto = CPU cores).
# max_processes = 4
"##
}
