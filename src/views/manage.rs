//! Management View: export and cleanup actions plus the storage index.

use serde::Serialize;
use serde_json::Value;

use crate::page::{ButtonAction, Page, Widget};
use crate::remote::{ApiClient, ApiError};

use super::reported;

/// Smallest accepted retention value.
pub const MIN_DAYS_TO_KEEP: u32 = 1;

/// Result of the most recent maintenance action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Exported { response: Value },
    ExportFailed { message: String },
    CleanedUp { days_to_keep: u32 },
    CleanupFailed { message: String },
}

/// Trigger an export and describe the outcome.
pub fn run_export(client: &ApiClient) -> ActionOutcome {
    match client.export() {
        Ok(response) => ActionOutcome::Exported { response },
        Err(e) => ActionOutcome::ExportFailed {
            message: failure_message("Export", &e),
        },
    }
}

/// Trigger a cleanup keeping the last `days_to_keep` days.
pub fn run_cleanup(client: &ApiClient, days_to_keep: u32) -> ActionOutcome {
    let days_to_keep = days_to_keep.max(MIN_DAYS_TO_KEEP);
    match client.cleanup(days_to_keep) {
        Ok(()) => ActionOutcome::CleanedUp { days_to_keep },
        Err(e) => ActionOutcome::CleanupFailed {
            message: failure_message("Cleanup", &e),
        },
    }
}

fn failure_message(action: &str, error: &ApiError) -> String {
    match error {
        ApiError::Status { status, .. } => format!("{action} failed (HTTP {status})"),
        ApiError::Transport { .. } => format!("{action} request failed: {error}"),
        ApiError::Decode { .. } => format!("{action} failed: {error}"),
    }
}

/// Render both action panels and the remote storage index.
///
/// `outcome` is shown under the panel of the action that produced it. The
/// index is fetched on every render.
pub fn render(client: &ApiClient, days_to_keep: u32, outcome: Option<&ActionOutcome>) -> Page {
    let mut page = Page::new();
    page.header("Storage management");

    page.subheader("Export dashboard data");
    page.push(Widget::Button {
        label: "Export data".to_string(),
        action: ButtonAction::Export,
    });
    match outcome {
        Some(ActionOutcome::Exported { response }) => {
            page.success("Export completed");
            page.json(response.clone());
        }
        Some(ActionOutcome::ExportFailed { message }) => page.error(message.clone()),
        _ => {}
    }

    page.subheader("Clean up old data");
    page.push(Widget::NumberInput {
        label: "Days to keep".to_string(),
        min: MIN_DAYS_TO_KEEP,
        value: days_to_keep.max(MIN_DAYS_TO_KEEP),
    });
    page.push(Widget::Button {
        label: "Clean up".to_string(),
        action: ButtonAction::Cleanup,
    });
    match outcome {
        Some(ActionOutcome::CleanedUp { days_to_keep }) => {
            page.success(format!("Removed data older than {days_to_keep} days"));
        }
        Some(ActionOutcome::CleanupFailed { message }) => page.error(message.clone()),
        _ => {}
    }

    page.subheader("Storage index");
    if let Some(index) = reported(&mut page, client.storage_index()) {
        page.json(index);
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_by_kind() {
        let status = ApiError::Status {
            url: "u".into(),
            status: 500,
        };
        assert_eq!(failure_message("Export", &status), "Export failed (HTTP 500)");

        let transport = ApiError::Transport {
            url: "u".into(),
            message: "connection refused".into(),
        };
        assert!(failure_message("Cleanup", &transport).starts_with("Cleanup request failed:"));
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(ActionOutcome::CleanedUp { days_to_keep: 7 }).unwrap();
        assert_eq!(json["outcome"], "cleaned_up");
        assert_eq!(json["days_to_keep"], 7);
    }
}
