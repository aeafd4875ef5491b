//! Analysis Panel: aggregate charts over the local tree.

use crate::analytics::reporter;
use crate::page::{ChartPoint, Page, Widget};
use crate::storage::SummaryTree;

pub fn render(tree: &SummaryTree) -> Page {
    let mut page = Page::new();
    page.header("📊 Analysis dashboard");

    if tree.is_empty() {
        page.warning("No data available for analysis");
        return page;
    }

    let rows = reporter::summary_rows(tree);

    page.push(Widget::BarChart {
        title: "Summaries per category".to_string(),
        points: to_points(reporter::category_counts(&rows)),
    });
    page.push(Widget::LineChart {
        title: "Summaries per day".to_string(),
        points: to_points(reporter::daily_counts(&rows)),
    });

    page
}

fn to_points(counts: Vec<(String, usize)>) -> Vec<ChartPoint> {
    counts
        .into_iter()
        .map(|(label, value)| ChartPoint { label, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Level;

    #[test]
    fn empty_tree_warns() {
        let page = render(&SummaryTree::new());
        assert_eq!(page.notices(Level::Warning).len(), 1);
        assert!(
            !page
                .widgets
                .iter()
                .any(|w| matches!(w, Widget::BarChart { .. }))
        );
    }

    #[test]
    fn charts_count_rows() {
        let mut tree = SummaryTree::new();
        tree.entry("2024-01-01".into())
            .or_default()
            .insert("market".into(), "a b".into());
        tree.entry("2024-01-02".into())
            .or_default()
            .insert("market".into(), "c".into());
        tree.entry("2024-01-02".into())
            .or_default()
            .insert("crypto".into(), "d".into());

        let page = render(&tree);
        let charts: Vec<&Vec<ChartPoint>> = page
            .widgets
            .iter()
            .filter_map(|w| match w {
                Widget::BarChart { points, .. } | Widget::LineChart { points, .. } => Some(points),
                _ => None,
            })
            .collect();

        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0][0].label, "market");
        assert_eq!(charts[0][0].value, 2);
        assert_eq!(charts[1][1].label, "2024-01-02");
        assert_eq!(charts[1][1].value, 2);
    }
}
