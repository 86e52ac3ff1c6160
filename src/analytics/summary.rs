//! Immutable batch summary.
//!
//! Produced once by [`Aggregator::finalize`](super::aggregator::Aggregator::finalize).
//! Every figure a report shows is stored here, so renderers never re-derive
//! anything from raw samples.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::aggregator::{ErrorTally, GlobalTotals, GroupEntry, GroupKey, GroupStats, VersionRollup};
use super::classify::QualityTier;
use super::config::AnalyticsConfig;
use super::crosstab::{rankings, utilization, version_comparisons, Rankings, UtilizationRow, VersionComparison};
use super::percentile::{percentiles_sorted, Percentiles};

/// Frozen figures for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    /// Ordinal of the group in first-appearance order (0 for the first group seen).
    pub first_seen: usize,
    /// Counters; `samples` is sorted ascending.
    pub stats: GroupStats,
    pub percentiles: Percentiles,
    pub success_rate: f64,
    pub failure_rate: f64,
    pub perfect_rate: f64,
    pub tier: QualityTier,
    /// Error tallies, largest count first.
    pub errors: Vec<ErrorTally>,
}

impl GroupSummary {
    fn from_entry(first_seen: usize, entry: GroupEntry) -> Self {
        let GroupEntry {
            key,
            mut stats,
            mut errors,
        } = entry;
        stats.samples.sort_by(f64::total_cmp);
        let percentiles = percentiles_sorted(&stats.samples);
        let success_rate = stats.success_rate();
        let perfect_rate = stats.perfect_rate();
        errors.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            key,
            first_seen,
            percentiles,
            success_rate,
            failure_rate: stats.failure_rate(),
            perfect_rate,
            tier: QualityTier::from_rates(stats.total, success_rate, perfect_rate),
            stats,
            errors,
        }
    }

    /// Share of this group's failures in `count`, as a percentage.
    pub fn share_of_failures(&self, count: u64) -> f64 {
        if self.stats.failed == 0 {
            0.0
        } else {
            count as f64 / self.stats.failed as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub generated_at: DateTime<Utc>,
    pub config: AnalyticsConfig,
    pub totals: GlobalTotals,
    /// Groups in order of first appearance.
    pub groups: Vec<GroupSummary>,
    pub versions: Vec<VersionRollup>,
    /// Available entities per primary key.
    pub availability: BTreeMap<String, u64>,
    pub availability_sources: u64,
    pub comparisons: Vec<VersionComparison>,
    pub utilization: Vec<UtilizationRow>,
    pub rankings: Rankings,
}

impl AnalyticsSummary {
    pub(crate) fn build(
        config: AnalyticsConfig,
        totals: GlobalTotals,
        groups: Vec<GroupEntry>,
        versions: Vec<VersionRollup>,
        availability: BTreeMap<String, u64>,
        availability_sources: u64,
    ) -> Self {
        let groups: Vec<GroupSummary> = groups
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| GroupSummary::from_entry(idx, entry))
            .collect();

        let comparisons = version_comparisons(&groups, &config.comparisons);
        let utilization = utilization(&availability, &groups);
        let rankings = rankings(&groups, &totals.by_category, config.top_n);

        Self {
            generated_at: Utc::now(),
            config,
            totals,
            groups,
            versions,
            availability,
            availability_sources,
            comparisons,
            utilization,
            rankings,
        }
    }

    pub fn group(&self, key: &GroupKey) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| &g.key == key)
    }

    pub fn version(&self, label: &str) -> Option<&VersionRollup> {
        self.versions.iter().find(|v| v.label == label)
    }

    /// Groups ordered by (version, primary), the layout of per-version report sections.
    pub fn groups_by_version(&self) -> Vec<&GroupSummary> {
        let mut sorted: Vec<&GroupSummary> = self.groups.iter().collect();
        sorted.sort_by(|a, b| {
            (&a.key.version, &a.key.primary).cmp(&(&b.key.version, &b.key.primary))
        });
        sorted
    }

    /// Deviation samples across every group, for a batch-wide distribution.
    pub fn overall_percentiles(&self) -> Percentiles {
        let samples: Vec<f64> = self
            .groups
            .iter()
            .flat_map(|g| g.stats.samples.iter().copied())
            .collect();
        super::percentile::percentiles(&samples)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
