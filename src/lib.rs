//! Verification Analytics Library
//!
//! Aggregation engine for swap verification records. The `verification_report`
//! binary wires it to auction data directories.

pub mod analytics;

pub use analytics::{Aggregator, AnalyticsConfig, AnalyticsError, AnalyticsSummary};
