/// Decoded response records for the research-platform storage API.
///
/// Required fields are plain fields: a response missing one fails to decode
/// with a typed error instead of surfacing later as a missing-key fault.
use serde::{Deserialize, Serialize};

/// Body of `GET /storage/summaries`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateListing {
    /// `None` when the server omitted the field entirely.
    #[serde(rename = "availableDates", default)]
    pub available_dates: Option<Vec<String>>,
}

/// One element of `GET /storage/summaries/{date}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSummary {
    pub category: String,
    pub content: String,
}

/// Body of `GET /storage/summaries/{date}/{category}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SingleSummary {
    pub content: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Request body for `POST /storage/cleanup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanupRequest {
    #[serde(rename = "daysToKeep")]
    pub days_to_keep: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_body_shape() {
        let body = serde_json::to_string(&CleanupRequest { days_to_keep: 7 }).unwrap();
        assert_eq!(body, r#"{"daysToKeep":7}"#);
    }

    #[test]
    fn date_listing_distinguishes_absent_and_empty() {
        let absent: DateListing = serde_json::from_str(r#"{"error":"x"}"#).unwrap();
        assert_eq!(absent.available_dates, None);

        let empty: DateListing = serde_json::from_str(r#"{"availableDates":[]}"#).unwrap();
        assert_eq!(empty.available_dates, Some(Vec::new()));
    }

    #[test]
    fn remote_summary_requires_both_fields() {
        let ok: RemoteSummary =
            serde_json::from_str(r##"{"category":"market","content":"# up","filepath":"x"}"##)
                .unwrap();
        assert_eq!(ok.category, "market");

        let missing = serde_json::from_str::<RemoteSummary>(r##"{"content":"# up"}"##);
        assert!(missing.is_err());
    }
}
