//! Local View: summaries read straight from the storage tree.

use crate::page::{Metric, Page, Tab, Widget};
use crate::storage::{self, SummaryTree};

use super::resolve_selection;

pub const METRIC_TOTAL_DAYS: &str = "Total days";
pub const METRIC_TOTAL_SUMMARIES: &str = "Total summaries";
pub const METRIC_LATEST_DATE: &str = "Latest date";

/// Render the local view for an already loaded tree.
///
/// An empty tree renders only a warning. Otherwise: a date selector (dates
/// descending), one tab per category of the selected date, and three metrics
/// computed over the whole tree.
pub fn render(tree: &SummaryTree, selected: Option<&str>) -> Page {
    let mut page = Page::new();
    page.header("Local storage");

    if tree.is_empty() {
        page.warning(
            "No local summaries found. Make sure the platform has run and generated summaries.",
        );
        return page;
    }

    let dates = storage::dates_descending(tree);
    let selected = resolve_selection(&dates, selected);
    page.push(Widget::Select {
        label: "Date".to_string(),
        options: dates,
        selected: selected.clone(),
    });

    if let Some(date) = selected
        && let Some(categories) = tree.get(&date)
    {
        page.subheader(format!("📅 {date} market summaries"));
        if categories.is_empty() {
            page.info("No summaries available for this date");
        } else {
            let tabs = categories
                .iter()
                .map(|(category, content)| Tab {
                    label: category.clone(),
                    markdown: content.clone(),
                })
                .collect();
            page.push(Widget::Tabs { tabs });
        }
    }

    page.subheader("📈 Statistics");
    page.push(Widget::Metrics {
        metrics: metrics(tree),
    });

    page
}

/// Day count, summary count, and the lexicographically latest date key.
pub fn metrics(tree: &SummaryTree) -> Vec<Metric> {
    let mut metrics = vec![
        Metric {
            label: METRIC_TOTAL_DAYS.to_string(),
            value: tree.len().to_string(),
        },
        Metric {
            label: METRIC_TOTAL_SUMMARIES.to_string(),
            value: storage::total_summaries(tree).to_string(),
        },
    ];
    if let Some(latest) = storage::latest_date(tree) {
        metrics.push(Metric {
            label: METRIC_LATEST_DATE.to_string(),
            value: latest.to_string(),
        });
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Level;

    fn tree(entries: &[(&str, &str, &str)]) -> SummaryTree {
        let mut tree = SummaryTree::new();
        for (date, category, content) in entries {
            tree.entry(date.to_string())
                .or_default()
                .insert(category.to_string(), content.to_string());
        }
        tree
    }

    #[test]
    fn empty_tree_warns_without_selector() {
        let page = render(&SummaryTree::new(), None);
        assert_eq!(page.notices(Level::Warning).len(), 1);
        assert!(!page.has_select());
        assert_eq!(page.metric(METRIC_TOTAL_DAYS), None);
    }

    #[test]
    fn defaults_to_newest_date() {
        let tree = tree(&[
            ("2024-01-01", "market", "old"),
            ("2024-01-02", "market", "new"),
        ]);
        let page = render(&tree, None);
        let (options, selected) = page.select().unwrap();
        assert_eq!(options, ["2024-01-02", "2024-01-01"]);
        assert_eq!(selected, Some("2024-01-02"));

        let tabs = page
            .widgets
            .iter()
            .find_map(|w| match w {
                Widget::Tabs { tabs } => Some(tabs),
                _ => None,
            })
            .unwrap();
        assert_eq!(tabs[0].markdown, "new");
    }

    #[test]
    fn honours_selected_date() {
        let tree = tree(&[
            ("2024-01-01", "market", "old"),
            ("2024-01-02", "market", "new"),
        ]);
        let page = render(&tree, Some("2024-01-01"));
        assert_eq!(page.select().unwrap().1, Some("2024-01-01"));
    }

    #[test]
    fn date_without_categories_shows_info() {
        let mut tree = tree(&[("2024-01-01", "market", "x")]);
        tree.insert("2024-01-05".to_string(), Default::default());

        let page = render(&tree, None);
        assert_eq!(
            page.notices(Level::Info),
            vec!["No summaries available for this date"]
        );
        assert_eq!(page.metric(METRIC_TOTAL_DAYS), Some("2"));
        assert_eq!(page.metric(METRIC_TOTAL_SUMMARIES), Some("1"));
    }

    #[test]
    fn metrics_cover_whole_tree() {
        let tree = tree(&[
            ("2024-01-01", "market", "a"),
            ("2024-01-01", "crypto", "b"),
            ("2024-01-02", "market", "c"),
        ]);
        let page = render(&tree, Some("2024-01-01"));
        assert_eq!(page.metric(METRIC_TOTAL_DAYS), Some("2"));
        assert_eq!(page.metric(METRIC_TOTAL_SUMMARIES), Some("3"));
        assert_eq!(page.metric(METRIC_LATEST_DATE), Some("2024-01-02"));
    }
}
