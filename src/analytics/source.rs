//! Verification file discovery.
//!
//! Layout of an auction data directory:
//! - `<id>_swap_log_verification.json`: `{ "swaps": [ ... ] }`
//! - `<id>_solution_verification.json`: `[ { "swaps": [ ... ] }, ... ]`, one
//!   entry per solution, swaps naming their pool only by `pool_id`
//! - `<id>_liquidity.json` (optional): `{ "liquidity": [ { "id": ..., "kind": ... }, ... ] }`
//!
//! Files are read in name order. Unreadable files are logged and skipped so one
//! bad file never aborts the batch.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use super::aggregator::RecordBatch;
use super::normalize::PoolKinds;

pub const VERIFICATION_SUFFIX: &str = "_swap_log_verification.json";
pub const SOLUTION_VERIFICATION_SUFFIX: &str = "_solution_verification.json";
pub const LIQUIDITY_SUFFIX: &str = "_liquidity.json";

/// Which verifier produced the files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// Per-swap logs. The liquidity sibling is counted as availability.
    #[default]
    SwapLog,
    /// Per-solution files. The liquidity sibling only resolves pool kinds.
    SolutionVerification,
}

impl SourceKind {
    pub fn suffix(self) -> &'static str {
        match self {
            SourceKind::SwapLog => VERIFICATION_SUFFIX,
            SourceKind::SolutionVerification => SOLUTION_VERIFICATION_SUFFIX,
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "swap_log" | "swaps" => Ok(SourceKind::SwapLog),
            "solution" | "solutions" | "solution_verification" => {
                Ok(SourceKind::SolutionVerification)
            }
            other => Err(format!("unknown source kind: {}", other)),
        }
    }
}

/// Files of the given kind in `dir`, sorted by name.
pub fn verification_files(dir: &Path, kind: SourceKind) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read auction directory: {:?}", dir))?;

    let suffix = kind.suffix();
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(suffix))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Liquidity file that belongs to a verification file of the given kind.
pub fn liquidity_path(verification_file: &Path, kind: SourceKind) -> Option<PathBuf> {
    let name = verification_file.file_name()?.to_str()?;
    let prefix = name.strip_suffix(kind.suffix())?;
    Some(verification_file.with_file_name(format!("{}{}", prefix, LIQUIDITY_SUFFIX)))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))
}

fn array_field(value: Value, field: &str) -> Vec<Value> {
    match value {
        Value::Object(mut obj) => match obj.remove(field) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Liquidity entries next to `verification_file`, or `None` when the file is
/// absent or unreadable.
fn load_liquidity(verification_file: &Path, kind: SourceKind) -> Option<Vec<Value>> {
    let path = liquidity_path(verification_file, kind).filter(|p| p.exists())?;
    match read_json(&path) {
        Ok(value) => Some(array_field(value, "liquidity")),
        Err(e) => {
            warn!(file = ?path, error = %e, "skipping unreadable liquidity file");
            None
        }
    }
}

/// Load one swap log file and its liquidity sibling, if any.
///
/// The liquidity file is read first. When only the swap log is unreadable the
/// batch still carries the inventory, with no records.
pub fn load_batch(verification_file: &Path) -> Result<RecordBatch> {
    let name = file_name(verification_file);
    let availability = load_liquidity(verification_file, SourceKind::SwapLog);

    let records = match read_json(verification_file) {
        Ok(value) => array_field(value, "swaps"),
        Err(e) if availability.is_some() => {
            warn!(file = %name, error = %e, "unreadable swap log, keeping liquidity only");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    debug!(
        file = %name,
        records = records.len(),
        has_liquidity = availability.is_some(),
        "loaded verification batch"
    );
    Ok(RecordBatch {
        name,
        records,
        availability,
        pool_kinds: None,
    })
}

/// Load one solution verification file. Swaps of every solution are
/// flattened in order; the liquidity sibling becomes the pool kind lookup.
pub fn load_solution_batch(verification_file: &Path) -> Result<RecordBatch> {
    let name = file_name(verification_file);
    let solutions = match read_json(verification_file)? {
        Value::Array(solutions) => solutions,
        _ => bail!("{:?} is not a list of solutions", verification_file),
    };
    let records: Vec<Value> = solutions
        .into_iter()
        .flat_map(|solution| array_field(solution, "swaps"))
        .collect();

    let pool_kinds = load_liquidity(verification_file, SourceKind::SolutionVerification)
        .map(|entries| PoolKinds::from_liquidity(&entries))
        .filter(|kinds| !kinds.is_empty());

    debug!(
        file = %name,
        records = records.len(),
        pool_kinds = pool_kinds.as_ref().map_or(0, PoolKinds::len),
        "loaded solution verification batch"
    );
    Ok(RecordBatch {
        name,
        records,
        availability: None,
        pool_kinds,
    })
}

/// Load every batch of the given kind in `dir`. Files that fail to load are
/// skipped.
pub fn discover(dir: &Path, kind: SourceKind) -> Result<Vec<RecordBatch>> {
    let files = verification_files(dir, kind)?;
    let mut batches = Vec::with_capacity(files.len());
    for file in &files {
        let loaded = match kind {
            SourceKind::SwapLog => load_batch(file),
            SourceKind::SolutionVerification => load_solution_batch(file),
        };
        match loaded {
            Ok(batch) => batches.push(batch),
            Err(e) => warn!(file = ?file, error = %e, "skipping unreadable verification file"),
        }
    }
    Ok(batches)
}

/// Swap log batches in `dir`.
pub fn discover_batches(dir: &Path) -> Result<Vec<RecordBatch>> {
    discover(dir, SourceKind::SwapLog)
}

/// Solution verification batches in `dir`.
pub fn discover_solution_batches(dir: &Path) -> Result<Vec<RecordBatch>> {
    discover(dir, SourceKind::SolutionVerification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, value: Value) {
        std::fs::write(dir.join(name), value.to_string()).unwrap();
    }

    #[test]
    fn test_liquidity_path() {
        let path = Path::new("/data/123_swap_log_verification.json");
        assert_eq!(
            liquidity_path(path, SourceKind::SwapLog),
            Some(PathBuf::from("/data/123_liquidity.json"))
        );
        assert_eq!(
            liquidity_path(
                Path::new("/data/9_solution_verification.json"),
                SourceKind::SolutionVerification
            ),
            Some(PathBuf::from("/data/9_liquidity.json"))
        );
        assert_eq!(
            liquidity_path(Path::new("/data/123_auction.json"), SourceKind::SwapLog),
            None
        );
    }

    #[test]
    fn test_source_kind_from_str() {
        assert_eq!("swap-log".parse::<SourceKind>(), Ok(SourceKind::SwapLog));
        assert_eq!(
            "Solutions".parse::<SourceKind>(),
            Ok(SourceKind::SolutionVerification)
        );
        assert!("auction".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_array_field_tolerates_shape() {
        assert_eq!(array_field(json!({ "swaps": [1, 2] }), "swaps").len(), 2);
        assert!(array_field(json!({ "swaps": {} }), "swaps").is_empty());
        assert!(array_field(json!([1, 2]), "swaps").is_empty());
    }

    #[test]
    fn test_discover_sorted_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path();
        write(path, "2_swap_log_verification.json", json!({ "swaps": [{ "kind": "b" }] }));
        write(path, "1_swap_log_verification.json", json!({ "swaps": [{ "kind": "a" }] }));
        write(path, "1_liquidity.json", json!({ "liquidity": [{ "kind": "a" }, { "kind": "a" }] }));
        write(path, "3_auction.json", json!({}));
        std::fs::write(path.join("4_swap_log_verification.json"), "{ not json").unwrap();

        let batches = discover_batches(path).unwrap();
        let names: Vec<_> = batches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["1_swap_log_verification.json", "2_swap_log_verification.json"]
        );
        assert_eq!(batches[0].availability.as_ref().map(Vec::len), Some(2));
        assert!(batches[1].availability.is_none());
    }

    #[test]
    fn test_unreadable_swap_log_keeps_liquidity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path();
        std::fs::write(path.join("5_swap_log_verification.json"), "{ truncated").unwrap();
        write(path, "5_liquidity.json", json!({ "liquidity": [{ "kind": "stable" }] }));

        let batches = discover_batches(path).unwrap();
        assert_eq!(batches.len(), 1);
        assert!(batches[0].records.is_empty());
        assert_eq!(batches[0].availability.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_discover_solution_batches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path();
        write(
            path,
            "7_solution_verification.json",
            json!([
                { "solution_index": 0, "swaps": [{ "pool_id": "0xa" }, { "pool_id": "0xb" }] },
                { "solution_index": 1, "swaps": [{ "pool_id": "0xa" }] },
                { "solution_index": 2 },
            ]),
        );
        write(
            path,
            "7_liquidity.json",
            json!({ "liquidity": [{ "id": "0xa", "kind": "stable" }] }),
        );
        write(path, "8_solution_verification.json", json!({ "swaps": [] }));
        write(path, "9_swap_log_verification.json", json!({ "swaps": [{ "kind": "a" }] }));

        let batches = discover_solution_batches(path).unwrap();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];
        assert_eq!(batch.name, "7_solution_verification.json");
        assert_eq!(batch.records.len(), 3);
        assert!(batch.availability.is_none());
        let kinds = batch.pool_kinds.as_ref().unwrap();
        assert_eq!(kinds.kind_of("0xa"), Some("stable"));
        assert_eq!(kinds.kind_of("0xb"), None);
    }

    #[test]
    fn test_missing_directory_is_error() {
        assert!(discover_batches(Path::new("/definitely/not/here")).is_err());
    }
}
