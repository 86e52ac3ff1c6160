//! Verification Aggregator
//!
//! Owns all mutable state of one batch run:
//! - per-group counters and deviation samples
//! - per-group error tallies with bounded example lists
//! - one rollup per configured version label
//! - availability tally (inventory, independent of verification outcome)
//! - global totals
//!
//! # Lifecycle
//!
//! `new` (empty) -> `ingest*` / `merge` -> `finalize` (frozen). Any mutation
//! after `finalize` returns [`AnalyticsError::FinalizedStateMutation`].
//!
//! # Sharding
//!
//! An aggregator is not shared between threads. Parallel ingestion gives each
//! worker its own aggregator over a disjoint set of records and combines them
//! with [`Aggregator::merge`]. Counters are summed and sample lists
//! concatenated, so the result does not depend on where the input was split.

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

use super::classify::{bucket_deviation, classify_error, DeviationBucket, ErrorCategory};
use super::config::{AnalyticsConfig, GroupBy, ALL_LABEL};
use super::error::{AnalyticsError, AnalyticsResult};
use super::normalize::{normalize_availability, normalize_with, PoolKinds, Record};
use super::summary::AnalyticsSummary;

/// Examples retained per (group, category).
pub const MAX_ERROR_EXAMPLES: usize = 3;

/// Error text is cut to this many characters in examples.
pub const ERROR_TEXT_LIMIT: usize = 200;

/// Composite group key: (primary, version).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    pub primary: String,
    pub version: String,
}

impl GroupKey {
    pub fn new(primary: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.primary, self.version)
    }
}

#[inline]
fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Running counters for one group.
///
/// `total == succeeded + failed` always holds. Once every success carries a
/// deviation, `succeeded` also equals the sum of the five bucket counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupStats {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub perfect_matches: u64,
    pub within_1: u64,
    pub within_10: u64,
    pub within_100: u64,
    pub over_100: u64,
    /// Absolute deviations of successful records, in bps.
    pub samples: Vec<f64>,
}

impl GroupStats {
    fn record(&mut self, record: &Record) -> Option<DeviationBucket> {
        self.total += 1;
        if !record.succeeded {
            self.failed += 1;
            return None;
        }
        self.succeeded += 1;

        let deviation = record.deviation_bps.filter(|d| d.is_finite())?;
        let bucket = bucket_deviation(deviation);
        match bucket {
            DeviationBucket::Perfect => self.perfect_matches += 1,
            DeviationBucket::Within1 => self.within_1 += 1,
            DeviationBucket::Within10 => self.within_10 += 1,
            DeviationBucket::Within100 => self.within_100 += 1,
            DeviationBucket::Over100 => self.over_100 += 1,
        }
        self.samples.push(deviation.abs());
        Some(bucket)
    }

    fn absorb(&mut self, other: GroupStats) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.perfect_matches += other.perfect_matches;
        self.within_1 += other.within_1;
        self.within_10 += other.within_10;
        self.within_100 += other.within_100;
        self.over_100 += other.over_100;
        self.samples.extend(other.samples);
    }

    /// Successes that landed in a bucket.
    pub fn bucketed(&self) -> u64 {
        self.perfect_matches + self.within_1 + self.within_10 + self.within_100 + self.over_100
    }

    pub fn success_rate(&self) -> f64 {
        pct(self.succeeded, self.total)
    }

    pub fn failure_rate(&self) -> f64 {
        pct(self.failed, self.total)
    }

    pub fn perfect_rate(&self) -> f64 {
        pct(self.perfect_matches, self.total)
    }
}

/// One retained failure, kept for debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorExample {
    pub source: Option<String>,
    pub pool_address: Option<String>,
    pub version: String,
    pub token_in: Option<String>,
    pub token_out: Option<String>,
    pub amount_in: Option<String>,
    pub expected_out: Option<String>,
    pub quoted_out: Option<String>,
    pub error: Option<String>,
}

impl ErrorExample {
    fn from_record(record: &Record, source: Option<&str>) -> Self {
        Self {
            source: source.map(str::to_string),
            pool_address: record.context.pool_address.clone(),
            version: record.version.clone(),
            token_in: record.context.token_in.clone(),
            token_out: record.context.token_out.clone(),
            amount_in: record.amount_in.as_ref().map(|a| a.text.clone()),
            expected_out: record.context.expected_out.clone(),
            quoted_out: record.context.quoted_out.clone(),
            error: record
                .error_text
                .as_ref()
                .map(|e| e.chars().take(ERROR_TEXT_LIMIT).collect()),
        }
    }
}

/// Count and bounded examples for one (group, category) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorTally {
    pub category: ErrorCategory,
    pub count: u64,
    /// Insertion ordered, never more than [`MAX_ERROR_EXAMPLES`].
    pub examples: Vec<ErrorExample>,
}

impl ErrorTally {
    fn new(category: ErrorCategory) -> Self {
        Self {
            category,
            count: 0,
            examples: Vec::new(),
        }
    }

    fn push_example(&mut self, example: ErrorExample) {
        if self.examples.len() < MAX_ERROR_EXAMPLES {
            self.examples.push(example);
        }
    }

    fn absorb(&mut self, other: ErrorTally) {
        self.count += other.count;
        for example in other.examples {
            self.push_example(example);
        }
    }
}

/// Counters for one version label, independent of primary key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRollup {
    pub label: String,
    pub total: u64,
    pub succeeded: u64,
    pub perfect: u64,
    pub failed: u64,
}

impl VersionRollup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            total: 0,
            succeeded: 0,
            perfect: 0,
            failed: 0,
        }
    }

    fn absorb(&mut self, other: &VersionRollup) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.perfect += other.perfect;
        self.failed += other.failed;
    }

    pub fn success_rate(&self) -> f64 {
        pct(self.succeeded, self.total)
    }

    pub fn perfect_rate(&self) -> f64 {
        pct(self.perfect, self.total)
    }

    pub fn failure_rate(&self) -> f64 {
        pct(self.failed, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: ErrorCategory,
    pub count: u64,
}

/// Batch-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalTotals {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub perfect_matches: u64,
    /// Verification records rejected by the normalizer.
    pub skipped: u64,
    /// Availability entries rejected by the normalizer.
    pub skipped_availability: u64,
    /// Failures per category, in order of first appearance.
    pub by_category: Vec<CategoryCount>,
}

impl GlobalTotals {
    fn add_category(&mut self, category: ErrorCategory, count: u64) {
        match self.by_category.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.count += count,
            None => self.by_category.push(CategoryCount { category, count }),
        }
    }

    fn absorb(&mut self, other: GlobalTotals) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.perfect_matches += other.perfect_matches;
        self.skipped += other.skipped;
        self.skipped_availability += other.skipped_availability;
        for entry in other.by_category {
            self.add_category(entry.category, entry.count);
        }
    }

    pub fn category_count(&self, category: ErrorCategory) -> u64 {
        self.by_category
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn success_rate(&self) -> f64 {
        pct(self.succeeded, self.total)
    }

    pub fn failure_rate(&self) -> f64 {
        pct(self.failed, self.total)
    }

    pub fn perfect_rate(&self) -> f64 {
        pct(self.perfect_matches, self.total)
    }
}

/// Per-group state owned by the aggregator.
#[derive(Debug, Clone)]
pub(crate) struct GroupEntry {
    pub(crate) key: GroupKey,
    pub(crate) stats: GroupStats,
    /// Tallies in order of first appearance.
    pub(crate) errors: Vec<ErrorTally>,
}

impl GroupEntry {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            stats: GroupStats::default(),
            errors: Vec::new(),
        }
    }

    fn tally_mut(&mut self, category: ErrorCategory) -> &mut ErrorTally {
        let idx = match self.errors.iter().position(|t| t.category == category) {
            Some(idx) => idx,
            None => {
                self.errors.push(ErrorTally::new(category));
                self.errors.len() - 1
            }
        };
        &mut self.errors[idx]
    }

    fn absorb(&mut self, other: GroupEntry) {
        self.stats.absorb(other.stats);
        for tally in other.errors {
            self.tally_mut(tally.category).absorb(tally);
        }
    }
}

/// A named set of raw records, typically the contents of one input file.
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    pub name: String,
    pub records: Vec<Value>,
    /// Inventory entries that accompany this batch, when present.
    pub availability: Option<Vec<Value>>,
    /// Pool id to kind map for records that carry no kind of their own.
    pub pool_kinds: Option<PoolKinds>,
}

/// Result of feeding one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub ingested: u64,
    pub skipped: u64,
    pub available: u64,
}

/// Single-owner accumulator for one batch run.
#[derive(Debug)]
pub struct Aggregator {
    config: AnalyticsConfig,
    groups: Vec<GroupEntry>,
    index: HashMap<GroupKey, usize>,
    versions: Vec<VersionRollup>,
    availability: BTreeMap<String, u64>,
    availability_sources: u64,
    totals: GlobalTotals,
    finalized: bool,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

impl Aggregator {
    pub fn new(config: AnalyticsConfig) -> Self {
        let versions = config
            .version_labels
            .iter()
            .map(VersionRollup::new)
            .collect();
        Self {
            config,
            groups: Vec::new(),
            index: HashMap::new(),
            versions,
            availability: BTreeMap::new(),
            availability_sources: 0,
            totals: GlobalTotals::default(),
            finalized: false,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn totals(&self) -> &GlobalTotals {
        &self.totals
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_stats(&self, key: &GroupKey) -> Option<&GroupStats> {
        self.index.get(key).map(|&idx| &self.groups[idx].stats)
    }

    pub fn version_rollup(&self, label: &str) -> Option<&VersionRollup> {
        self.versions.iter().find(|v| v.label == label)
    }

    fn ensure_mutable(&self, operation: &'static str) -> AnalyticsResult<()> {
        if self.finalized {
            return Err(AnalyticsError::FinalizedStateMutation { operation });
        }
        Ok(())
    }

    /// Group key for a record under the configured grouping mode.
    pub fn group_key(&self, record: &Record) -> GroupKey {
        match self.config.group_by {
            GroupBy::KindAndVersion => GroupKey::new(&record.kind, &record.version),
            GroupBy::Kind => GroupKey::new(&record.kind, ALL_LABEL),
            GroupBy::Version => GroupKey::new(ALL_LABEL, &record.version),
        }
    }

    fn entry_index(&mut self, key: GroupKey) -> usize {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.groups.len();
        self.index.insert(key.clone(), idx);
        self.groups.push(GroupEntry::new(key));
        idx
    }

    /// Ingest one normalized record.
    pub fn ingest(&mut self, record: &Record) -> AnalyticsResult<()> {
        self.ingest_from(record, None)
    }

    /// Ingest one normalized record, remembering its source for error examples.
    pub fn ingest_from(&mut self, record: &Record, source: Option<&str>) -> AnalyticsResult<()> {
        self.ensure_mutable("ingest")?;

        let key = self.group_key(record);
        let idx = self.entry_index(key);
        let entry = &mut self.groups[idx];
        let bucket = entry.stats.record(record);
        let perfect = bucket == Some(DeviationBucket::Perfect);

        self.totals.total += 1;
        if record.succeeded {
            self.totals.succeeded += 1;
            if perfect {
                self.totals.perfect_matches += 1;
            }
        } else {
            self.totals.failed += 1;
            let category = classify_error(record.error_text.as_deref(), record.amount_in.as_ref());
            let tally = entry.tally_mut(category);
            tally.count += 1;
            tally.push_example(ErrorExample::from_record(record, source));
            self.totals.add_category(category, 1);
        }

        if let Some(rollup) = self.versions.iter_mut().find(|v| v.label == record.version) {
            rollup.total += 1;
            if record.succeeded {
                rollup.succeeded += 1;
                if perfect {
                    rollup.perfect += 1;
                }
            } else {
                rollup.failed += 1;
            }
        }

        Ok(())
    }

    /// Normalize and ingest a raw record.
    ///
    /// A malformed record bumps the skipped counter and is returned as an error;
    /// the aggregator stays usable and the caller decides whether to go on.
    pub fn ingest_raw(&mut self, raw: &Value, source: &str) -> AnalyticsResult<()> {
        self.ingest_raw_with(raw, source, None)
    }

    /// [`ingest_raw`](Self::ingest_raw) with a pool kind lookup for records
    /// that name their pool only by id.
    pub fn ingest_raw_with(
        &mut self,
        raw: &Value,
        source: &str,
        pool_kinds: Option<&PoolKinds>,
    ) -> AnalyticsResult<()> {
        self.ensure_mutable("ingest")?;
        match normalize_with(raw, pool_kinds) {
            Ok(record) => self.ingest_from(&record, Some(source)),
            Err(err) => {
                self.totals.skipped += 1;
                let err = err.with_source(source);
                warn!(source = %source, error = %err, "skipping malformed record");
                Err(err)
            }
        }
    }

    /// Count one available entity of the given primary key.
    pub fn record_available_kind(&mut self, kind: &str) -> AnalyticsResult<()> {
        self.ensure_mutable("record availability")?;
        *self.availability.entry(kind.to_string()).or_insert(0) += 1;
        Ok(())
    }

    /// Count one raw availability entry.
    pub fn record_available(&mut self, raw: &Value) -> AnalyticsResult<()> {
        self.ensure_mutable("record availability")?;
        match normalize_availability(raw) {
            Ok(kind) => self.record_available_kind(&kind),
            Err(err) => {
                self.totals.skipped_availability += 1;
                Err(err)
            }
        }
    }

    /// Note that one availability source (e.g. a liquidity file) was read.
    pub fn note_availability_source(&mut self) -> AnalyticsResult<()> {
        self.ensure_mutable("record availability")?;
        self.availability_sources += 1;
        Ok(())
    }

    /// Feed one batch. Malformed entries are skipped and counted.
    pub fn ingest_batch(&mut self, batch: &RecordBatch) -> AnalyticsResult<BatchOutcome> {
        self.ensure_mutable("ingest")?;
        let mut outcome = BatchOutcome::default();

        if let Some(entries) = &batch.availability {
            self.note_availability_source()?;
            for entry in entries {
                match self.record_available(entry) {
                    Ok(()) => outcome.available += 1,
                    Err(AnalyticsError::MalformedRecord { reason, .. }) => {
                        debug!(source = %batch.name, reason = %reason, "skipping availability entry");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        for raw in &batch.records {
            match self.ingest_raw_with(raw, &batch.name, batch.pool_kinds.as_ref()) {
                Ok(()) => outcome.ingested += 1,
                Err(AnalyticsError::MalformedRecord { .. }) => outcome.skipped += 1,
                Err(err) => return Err(err),
            }
        }

        debug!(
            source = %batch.name,
            ingested = outcome.ingested,
            skipped = outcome.skipped,
            available = outcome.available,
            "batch ingested"
        );
        Ok(outcome)
    }

    /// Fold another shard into this one.
    pub fn merge(&mut self, other: Aggregator) -> AnalyticsResult<()> {
        self.ensure_mutable("merge")?;
        other.ensure_mutable("merge")?;

        for entry in other.groups {
            let idx = self.entry_index(entry.key.clone());
            self.groups[idx].absorb(entry);
        }
        for rollup in &other.versions {
            match self.versions.iter_mut().find(|v| v.label == rollup.label) {
                Some(existing) => existing.absorb(rollup),
                None => self.versions.push(rollup.clone()),
            }
        }
        for (kind, count) in other.availability {
            *self.availability.entry(kind).or_insert(0) += count;
        }
        self.availability_sources += other.availability_sources;
        self.totals.absorb(other.totals);
        Ok(())
    }

    /// Freeze the aggregator and produce the immutable summary.
    pub fn finalize(&mut self) -> AnalyticsResult<AnalyticsSummary> {
        self.ensure_mutable("finalize")?;
        self.finalized = true;

        let groups = std::mem::take(&mut self.groups);
        self.index.clear();
        let summary = AnalyticsSummary::build(
            self.config.clone(),
            std::mem::take(&mut self.totals),
            groups,
            std::mem::take(&mut self.versions),
            std::mem::take(&mut self.availability),
            self.availability_sources,
        );

        info!(
            total = summary.totals.total,
            succeeded = summary.totals.succeeded,
            failed = summary.totals.failed,
            skipped = summary.totals.skipped,
            groups = summary.groups.len(),
            "aggregation finalized"
        );
        Ok(summary)
    }
}

/// Ingest batches in parallel, one aggregator per batch, merged in batch order.
pub fn aggregate_sharded(
    batches: &[RecordBatch],
    config: &AnalyticsConfig,
) -> AnalyticsResult<Aggregator> {
    let shards: Vec<AnalyticsResult<Aggregator>> = batches
        .par_iter()
        .map(|batch| {
            let mut shard = Aggregator::new(config.clone());
            shard.ingest_batch(batch)?;
            Ok(shard)
        })
        .collect();

    let mut merged = Aggregator::new(config.clone());
    for shard in shards {
        merged.merge(shard?)?;
    }
    Ok(merged)
}
