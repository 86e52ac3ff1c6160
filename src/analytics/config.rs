//! Analytics configuration.
//!
//! Selects grouping keys, version cohorts and comparison pairs. Loaded from
//! the environment (with `.env` support) or from a TOML file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Label used for a grouping dimension that is collapsed.
pub const ALL_LABEL: &str = "All";

/// Which record fields form the composite group key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    KindAndVersion,
    Kind,
    Version,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "kind_and_version" | "kind_version" => Ok(GroupBy::KindAndVersion),
            "kind" => Ok(GroupBy::Kind),
            "version" => Ok(GroupBy::Version),
            other => Err(format!("unknown group_by: {}", other)),
        }
    }
}

/// Version cohorts compared side by side. Deltas are `baseline - candidate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPair {
    pub baseline: String,
    pub candidate: String,
}

impl VersionPair {
    pub fn new(baseline: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
            candidate: candidate.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub group_by: GroupBy,
    /// Versions that get a dedicated rollup slot.
    pub version_labels: Vec<String>,
    pub comparisons: Vec<VersionPair>,
    /// Length of ranked lists.
    pub top_n: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            group_by: GroupBy::KindAndVersion,
            version_labels: vec!["V2".to_string(), "V3".to_string()],
            comparisons: vec![VersionPair::new("V2", "V3")],
            top_n: 10,
        }
    }
}

impl AnalyticsConfig {
    /// Read `ANALYTICS_*` variables. Unparseable values keep their defaults.
    ///
    /// - `ANALYTICS_GROUP_BY`: `kind_and_version`, `kind` or `version`
    /// - `ANALYTICS_VERSIONS`: comma separated, e.g. `V2,V3`
    /// - `ANALYTICS_COMPARE`: comma separated `baseline:candidate` pairs
    /// - `ANALYTICS_TOP_N`: integer
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let group_by = std::env::var("ANALYTICS_GROUP_BY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.group_by);

        let version_labels = std::env::var("ANALYTICS_VERSIONS")
            .ok()
            .map(|v| parse_list(&v))
            .filter(|labels| !labels.is_empty())
            .unwrap_or(defaults.version_labels);

        let comparisons = std::env::var("ANALYTICS_COMPARE")
            .ok()
            .map(|v| parse_pairs(&v))
            .filter(|pairs| !pairs.is_empty())
            .unwrap_or(defaults.comparisons);

        let top_n = std::env::var("ANALYTICS_TOP_N")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.top_n);

        Self {
            group_by,
            version_labels,
            comparisons,
            top_n,
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse analytics config")
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&contents)
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_pairs(value: &str) -> Vec<VersionPair> {
    value
        .split(',')
        .filter_map(|pair| {
            let (baseline, candidate) = pair.split_once(':')?;
            let (baseline, candidate) = (baseline.trim(), candidate.trim());
            if baseline.is_empty() || candidate.is_empty() {
                return None;
            }
            Some(VersionPair::new(baseline, candidate))
        })
        .collect()
}
