//! Analytics reporter: flat summary rows and their aggregates.
//!
//! Derives one [`SummaryRow`] per (date, category) pair and provides:
//! - **Category counts**: rows per category (bar chart)
//! - **Daily counts**: rows per date, sorted by date key (line chart)
//! - **Category stats**: word totals and means per category

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::storage::SummaryTree;

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One summary flattened out of the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub date: String,
    pub category: String,
    /// Character count (Unicode scalar values, not bytes).
    pub content_length: usize,
    /// Whitespace-delimited token count.
    pub word_count: usize,
}

/// Flatten the tree into rows.
pub fn summary_rows(tree: &SummaryTree) -> Vec<SummaryRow> {
    tree.iter()
        .flat_map(|(date, categories)| {
            categories.iter().map(move |(category, content)| SummaryRow {
                date: date.clone(),
                category: category.clone(),
                content_length: content.chars().count(),
                word_count: content.split_whitespace().count(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Rows per category, most frequent first; ties broken by category name.
pub fn category_counts(rows: &[SummaryRow]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(&row.category).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Rows per date, ascending by date key.
pub fn daily_counts(rows: &[SummaryRow]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(&row.date).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| (date.to_string(), count))
        .collect()
}

// ---------------------------------------------------------------------------
// Per-category stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub summaries: usize,
    pub total_words: usize,
    pub avg_words: f64,
    pub avg_length: f64,
}

/// Word and length statistics per category, sorted by category name.
pub fn category_stats(rows: &[SummaryRow]) -> Vec<CategoryStat> {
    let mut groups: BTreeMap<&str, Vec<&SummaryRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(&row.category).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(category, group)| {
            let summaries = group.len();
            let total_words: usize = group.iter().map(|r| r.word_count).sum();
            let total_length: usize = group.iter().map(|r| r.content_length).sum();

            CategoryStat {
                category: category.to_string(),
                summaries,
                total_words,
                avg_words: total_words as f64 / summaries as f64,
                avg_length: total_length as f64 / summaries as f64,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
