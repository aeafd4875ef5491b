//! Dashboard views.
//!
//! Each view is a function from its inputs (a loaded tree, an API client,
//! widget values) to a [`Page`]. Views keep no state between calls.

pub mod analysis;
pub mod local;
pub mod manage;
pub mod remote;

use crate::page::Page;
use crate::remote::ApiError;

/// Unwrap an API result, reporting a failure on the page.
///
/// `None` means "no data, already shown to the user"; callers render
/// whatever degraded content is left.
pub fn reported<T>(page: &mut Page, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            page.error(format!("API request failed: {e}"));
            None
        }
    }
}

/// Resolve a selector value: the requested option if it exists, else the
/// first option.
pub(crate) fn resolve_selection(options: &[String], requested: Option<&str>) -> Option<String> {
    requested
        .and_then(|r| options.iter().find(|o| o.as_str() == r))
        .or_else(|| options.first())
        .cloned()
}
