//! Cross-tabulations derived from the finalized groups.
//!
//! Read-only views: version-vs-version comparison, availability vs usage, and
//! ranked top-N lists.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::aggregator::{CategoryCount, GroupKey};
use super::classify::ErrorCategory;
use super::config::VersionPair;
use super::summary::GroupSummary;

/// One side of a version comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortFigures {
    pub version: String,
    pub total: u64,
    pub success_rate: f64,
    pub perfect_rate: f64,
    /// `None` when the cohort has no deviation samples.
    pub p99: Option<f64>,
}

impl CohortFigures {
    fn from_group(group: &GroupSummary) -> Self {
        Self {
            version: group.key.version.clone(),
            total: group.stats.total,
            success_rate: group.success_rate,
            perfect_rate: group.perfect_rate,
            p99: (!group.stats.samples.is_empty()).then_some(group.percentiles.p99),
        }
    }
}

/// Same primary key seen under both versions of a pair.
///
/// Deltas are `baseline - candidate`; a positive success or perfect-rate delta
/// means the baseline did better, a positive p99 delta means it deviated more.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionComparison {
    pub primary: String,
    pub baseline: CohortFigures,
    pub candidate: CohortFigures,
    pub success_rate_delta: f64,
    pub perfect_rate_delta: f64,
    pub p99_delta: Option<f64>,
}

/// Compare every primary key present under both versions of each pair.
/// Rows follow pair order, then primary key.
pub fn version_comparisons(groups: &[GroupSummary], pairs: &[VersionPair]) -> Vec<VersionComparison> {
    let mut rows = Vec::new();
    for pair in pairs {
        let baseline = by_primary(groups, &pair.baseline);
        let candidate = by_primary(groups, &pair.candidate);

        for (primary, base) in &baseline {
            let Some(cand) = candidate.get(primary) else {
                continue;
            };
            let base = CohortFigures::from_group(base);
            let cand = CohortFigures::from_group(cand);
            let p99_delta = match (base.p99, cand.p99) {
                (Some(b), Some(c)) => Some(b - c),
                _ => None,
            };
            rows.push(VersionComparison {
                primary: primary.to_string(),
                success_rate_delta: base.success_rate - cand.success_rate,
                perfect_rate_delta: base.perfect_rate - cand.perfect_rate,
                p99_delta,
                baseline: base,
                candidate: cand,
            });
        }
    }
    rows
}

fn by_primary<'a>(groups: &'a [GroupSummary], version: &str) -> BTreeMap<&'a str, &'a GroupSummary> {
    groups
        .iter()
        .filter(|g| g.key.version == version)
        .map(|g| (g.key.primary.as_str(), g))
        .collect()
}

/// Availability vs usage for one primary key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationRow {
    pub primary: String,
    pub available: u64,
    pub used: u64,
    /// `used / available`, or 0 when nothing is available.
    pub ratio: f64,
}

/// One row per primary key in either the availability tally or the groups.
pub fn utilization(availability: &BTreeMap<String, u64>, groups: &[GroupSummary]) -> Vec<UtilizationRow> {
    let mut used: BTreeMap<&str, u64> = BTreeMap::new();
    for group in groups {
        *used.entry(group.key.primary.as_str()).or_insert(0) += group.stats.total;
    }

    let keys: BTreeSet<&str> = availability
        .keys()
        .map(String::as_str)
        .chain(used.keys().copied())
        .collect();

    keys.into_iter()
        .map(|primary| {
            let available = availability.get(primary).copied().unwrap_or(0);
            let used = used.get(primary).copied().unwrap_or(0);
            UtilizationRow {
                primary: primary.to_string(),
                available,
                used,
                ratio: utilization_ratio(used, available),
            }
        })
        .collect()
}

#[inline]
pub fn utilization_ratio(used: u64, available: u64) -> f64 {
    if available == 0 {
        0.0
    } else {
        used as f64 / available as f64
    }
}

/// Keep the `n` highest counts. The sort is stable, so equal counts keep
/// their input order (first appearance).
pub fn top_n<T, F>(items: &[T], n: usize, count: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> u64,
{
    let mut ranked: Vec<T> = items.to_vec();
    ranked.sort_by(|a, b| count(b).cmp(&count(a)));
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedGroup {
    pub key: GroupKey,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rankings {
    /// Groups by record volume.
    pub by_total: Vec<RankedGroup>,
    /// Groups with at least one failure, by failure count.
    pub by_failures: Vec<RankedGroup>,
    /// Global failure categories by count.
    pub error_categories: Vec<CategoryCount>,
}

/// `groups` must be in first-appearance order.
pub fn rankings(groups: &[GroupSummary], categories: &[CategoryCount], n: usize) -> Rankings {
    let totals: Vec<RankedGroup> = groups
        .iter()
        .map(|g| RankedGroup {
            key: g.key.clone(),
            count: g.stats.total,
        })
        .collect();
    let failures: Vec<RankedGroup> = groups
        .iter()
        .filter(|g| g.stats.failed > 0)
        .map(|g| RankedGroup {
            key: g.key.clone(),
            count: g.stats.failed,
        })
        .collect();

    Rankings {
        by_total: top_n(&totals, n, |r| r.count),
        by_failures: top_n(&failures, n, |r| r.count),
        error_categories: top_n(categories, n, |c| c.count),
    }
}

/// Category counts of one group, largest first.
pub fn error_breakdown(group: &GroupSummary) -> Vec<(ErrorCategory, u64)> {
    let counts: Vec<(ErrorCategory, u64)> = group
        .errors
        .iter()
        .map(|t| (t.category, t.count))
        .collect();
    top_n(&counts, counts.len(), |(_, count)| *count)
}
