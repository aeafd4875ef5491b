//! Remote View: summaries served by the platform API.

use crate::page::{Page, Widget};
use crate::remote::ApiClient;

use super::{reported, resolve_selection};

/// Render the remote view.
///
/// Lists dates from `/storage/summaries`, then shows one expander per
/// category from `/storage/summaries/{date}` for the selected date. When
/// `category` is set, only that category is fetched, via
/// `/storage/summaries/{date}/{category}`.
pub fn render(client: &ApiClient, selected: Option<&str>, category: Option<&str>) -> Page {
    let mut page = Page::new();
    page.header("API data");

    let listing = reported(&mut page, client.list_dates());
    let Some(dates) = listing.and_then(|l| l.available_dates) else {
        page.error("Could not reach the API or read its data");
        return page;
    };

    if dates.is_empty() {
        page.info("The API has no summaries yet");
        return page;
    }

    let selected = resolve_selection(&dates, selected);
    page.push(Widget::Select {
        label: "Date".to_string(),
        options: dates,
        selected: selected.clone(),
    });

    let Some(date) = selected else {
        return page;
    };

    match category {
        Some(category) => {
            if let Some(summary) = reported(&mut page, client.summary(&date, category)) {
                page.subheader(format!("📅 {date} API data"));
                page.push(Widget::Expander {
                    label: format!("📋 {}", summary.category.as_deref().unwrap_or(category)),
                    markdown: summary.content,
                });
            }
        }
        None => {
            let summaries = reported(&mut page, client.summaries_for(&date)).unwrap_or_default();
            if !summaries.is_empty() {
                page.subheader(format!("📅 {date} API data"));
                for summary in summaries {
                    page.push(Widget::Expander {
                        label: format!("📋 {}", summary.category),
                        markdown: summary.content,
                    });
                }
            }
        }
    }

    page
}
