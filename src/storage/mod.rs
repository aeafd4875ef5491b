//! Local summary storage: reads `<root>/summaries/<date>/<category>.md`.
//!
//! The tree is rebuilt from disk on every call; nothing is cached between
//! render passes.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

/// Extension that marks a file as a summary.
const SUMMARY_EXTENSION: &str = ".md";

/// Date key → category key → markdown text.
///
/// Map ordering is an implementation detail; presentation code sorts keys
/// itself.
pub type SummaryTree = BTreeMap<String, BTreeMap<String, String>>;

/// Directory holding the date folders for a storage root.
pub fn summaries_dir(storage_root: &Path) -> PathBuf {
    storage_root.join("summaries")
}

/// Load every summary under `root` (the `summaries` directory itself).
///
/// A missing `root` yields an empty tree. Each immediate subdirectory is a
/// date key; every `*.md` file inside it becomes one category. Any read
/// failure, including a file that is not valid UTF-8, is returned as an
/// error.
pub fn load_local_summaries(root: &Path) -> Result<SummaryTree> {
    let mut tree = SummaryTree::new();

    if !root.exists() {
        return Ok(tree);
    }

    let dates = fs::read_dir(root)
        .with_context(|| format!("failed to list summaries in {}", root.display()))?;

    for date_entry in dates {
        let date_entry = date_entry
            .with_context(|| format!("failed to read entry in {}", root.display()))?;
        let date_path = date_entry.path();
        if !date_path.is_dir() {
            continue;
        }

        let date = date_entry.file_name().to_string_lossy().into_owned();
        let categories = tree.entry(date).or_default();

        let files = fs::read_dir(&date_path)
            .with_context(|| format!("failed to list {}", date_path.display()))?;
        for file_entry in files {
            let file_entry = file_entry
                .with_context(|| format!("failed to read entry in {}", date_path.display()))?;
            let file_name = file_entry.file_name().to_string_lossy().into_owned();
            let Some(category) = category_from_file_name(&file_name) else {
                continue;
            };

            let file_path = file_entry.path();
            let content = fs::read_to_string(&file_path)
                .with_context(|| format!("failed to read summary {}", file_path.display()))?;
            categories.insert(category, content);
        }
    }

    Ok(tree)
}

/// Derive a category key from a summary file name.
///
/// `monthly_report.md` → `monthly report`. Returns `None` for files without
/// the markdown extension. Only the trailing extension is removed, so an
/// inner `.md` stays: `a.md_notes.md` → `a.md notes`, not `a notes`.
pub fn category_from_file_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(SUMMARY_EXTENSION)?;
    Some(stem.replace('_', " "))
}

/// Date keys sorted descending (lexicographic).
pub fn dates_descending(tree: &SummaryTree) -> Vec<String> {
    let mut dates: Vec<String> = tree.keys().cloned().collect();
    dates.sort_by(|a, b| b.cmp(a));
    dates
}

/// Total number of (date, category) pairs.
pub fn total_summaries(tree: &SummaryTree) -> usize {
    tree.values().map(BTreeMap::len).sum()
}

/// Lexicographic maximum date key.
///
/// Only a chronological maximum when folder names are zero-padded ISO dates.
pub fn latest_date(tree: &SummaryTree) -> Option<&str> {
    tree.keys().max().map(String::as_str)
}

// ---------------------------------------------------------------------------
// Local index
// ---------------------------------------------------------------------------

/// Index of a storage tree, shaped like the platform's `/storage/index`
/// response so either can be displayed the same way.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageIndex {
    pub last_updated: String,
    pub available_dates: Vec<String>,
    pub total_dates: usize,
    pub total_summaries: usize,
    pub categories: Vec<String>,
    pub storage_structure: StorageStructure,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageStructure {
    pub summaries: String,
}

/// Build the index for an already loaded tree.
pub fn build_local_index(tree: &SummaryTree) -> StorageIndex {
    let categories: BTreeSet<&String> = tree.values().flat_map(BTreeMap::keys).collect();

    StorageIndex {
        last_updated: Utc::now().to_rfc3339(),
        available_dates: dates_descending(tree),
        total_dates: tree.len(),
        total_summaries: total_summaries(tree),
        categories: categories.into_iter().cloned().collect(),
        storage_structure: StorageStructure {
            summaries: "storage/summaries/YYYY-MM-DD/category.md".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
