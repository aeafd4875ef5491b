//! Aggregate statistics over a local [`SummaryTree`](crate::storage::SummaryTree).

pub mod reporter;
