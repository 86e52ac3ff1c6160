//! Verification Analytics Engine
//!
//! Turns batches of swap verification records (expected vs. quoted execution
//! results) into multi-dimensional rollups: success and error rates, deviation
//! percentiles, error categories per pool type and protocol version, and
//! version-vs-version comparisons.
//!
//! Data flows one way:
//!
//! ```text
//! raw JSON -> normalize -> classify -> Aggregator (mutable)
//!                                          | finalize
//!                                          v
//!                          AnalyticsSummary (percentiles + cross-tabs)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use verification_analytics::analytics::{AnalyticsConfig, Aggregator};
//!
//! let mut agg = Aggregator::new(AnalyticsConfig::default());
//! for raw in swaps {
//!     // malformed records are counted and skipped
//!     let _ = agg.ingest_raw(&raw, "123_swap_log_verification.json");
//! }
//! let summary = agg.finalize()?;
//! println!("{}", summary.to_json_pretty()?);
//! ```

pub mod aggregator;
pub mod classify;
pub mod config;
pub mod crosstab;
pub mod error;
pub mod normalize;
pub mod percentile;
pub mod source;
pub mod summary;

pub use aggregator::*;
pub use classify::*;
pub use config::*;
pub use crosstab::*;
pub use error::*;
pub use normalize::*;
pub use percentile::*;
pub use summary::*;
