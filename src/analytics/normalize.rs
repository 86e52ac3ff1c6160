//! Record Normalization
//!
//! Converts loosely-typed verification records (JSON objects produced by the
//! solver verification pipeline) into canonical [`Record`] values.
//!
//! Raw shapes are plain serde structs with one optional field per accepted
//! alias. Resolution chains the aliases in order and the first non-null value
//! wins. Scalars that may arrive as strings or numbers go through the
//! `deserialize_*` helpers at the bottom of the raw section.

use chrono::{DateTime, TimeZone, Utc};
use num_bigint::BigUint;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

use super::error::{AnalyticsError, AnalyticsResult};

/// Version label used when a record carries none.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Accepted names for the primary key, in resolution order.
pub const KIND_FIELDS: &[&str] = &["kind", "pool_kind", "poolKind", "pool_type"];

/// Raw token amount: source text plus its arbitrary-precision value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawAmount {
    pub text: String,
    #[serde(serialize_with = "serialize_biguint")]
    pub value: BigUint,
}

impl RawAmount {
    pub fn is_zero(&self) -> bool {
        self.value.bits() == 0
    }
}

fn serialize_biguint<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

/// Debugging context carried along with a record, only used for error examples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwapContext {
    pub pool_address: Option<String>,
    pub token_in: Option<String>,
    pub token_out: Option<String>,
    pub expected_out: Option<String>,
    pub quoted_out: Option<String>,
}

/// Canonical verification record. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub kind: String,
    pub version: String,
    pub succeeded: bool,
    /// Signed deviation from the expected value in basis points.
    pub deviation_bps: Option<f64>,
    /// Only populated for failed records.
    pub error_text: Option<String>,
    pub amount_in: Option<RawAmount>,
    pub timestamp: Option<DateTime<Utc>>,
    pub context: SwapContext,
}

impl Record {
    /// Minimal constructor, mostly useful for callers that build records directly.
    pub fn new(kind: impl Into<String>, version: impl Into<String>, succeeded: bool) -> Self {
        Self {
            kind: kind.into(),
            version: version.into(),
            succeeded,
            deviation_bps: None,
            error_text: None,
            amount_in: None,
            timestamp: None,
            context: SwapContext::default(),
        }
    }

    pub fn with_deviation(mut self, deviation_bps: f64) -> Self {
        self.deviation_bps = deviation_bps.is_finite().then_some(deviation_bps);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error_text = Some(error.into());
        self
    }

    pub fn with_amount(mut self, text: &str) -> Self {
        self.amount_in = parse_amount(text).map(|value| RawAmount {
            text: text.to_string(),
            value,
        });
        self
    }
}

/// Raw swap verification record, as written by the swap log and solution
/// verifiers. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSwapRecord {
    kind: Option<String>,
    pool_kind: Option<String>,
    #[serde(rename = "poolKind")]
    pool_kind_camel: Option<String>,
    pool_type: Option<String>,

    #[serde(deserialize_with = "deserialize_text")]
    pool_version: Option<String>,
    #[serde(rename = "poolVersion", deserialize_with = "deserialize_text")]
    pool_version_camel: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    version: Option<String>,

    #[serde(deserialize_with = "deserialize_flag")]
    verified: Option<bool>,
    #[serde(deserialize_with = "deserialize_flag")]
    succeeded: Option<bool>,
    #[serde(deserialize_with = "deserialize_flag")]
    success: Option<bool>,

    #[serde(deserialize_with = "deserialize_number_or_string")]
    difference_bps: Option<f64>,
    #[serde(rename = "differenceBps", deserialize_with = "deserialize_number_or_string")]
    difference_bps_camel: Option<f64>,
    #[serde(deserialize_with = "deserialize_number_or_string")]
    deviation_bps: Option<f64>,
    #[serde(deserialize_with = "deserialize_number_or_string")]
    deviation: Option<f64>,

    #[serde(deserialize_with = "deserialize_text")]
    error: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    quote_error: Option<String>,
    #[serde(rename = "quoteError", deserialize_with = "deserialize_text")]
    quote_error_camel: Option<String>,

    #[serde(deserialize_with = "deserialize_amount")]
    amount_in: Option<RawAmount>,
    #[serde(rename = "amountIn", deserialize_with = "deserialize_amount")]
    amount_in_camel: Option<RawAmount>,
    #[serde(rename = "sellAmount", deserialize_with = "deserialize_amount")]
    sell_amount_camel: Option<RawAmount>,
    #[serde(deserialize_with = "deserialize_amount")]
    sell_amount: Option<RawAmount>,

    #[serde(deserialize_with = "deserialize_timestamp")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", deserialize_with = "deserialize_timestamp")]
    created_at_camel: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "deserialize_text")]
    pool_address: Option<String>,
    #[serde(rename = "poolAddress", deserialize_with = "deserialize_text")]
    pool_address_camel: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pool_id: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    token_in: Option<String>,
    #[serde(rename = "tokenIn", deserialize_with = "deserialize_text")]
    token_in_camel: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    token_out: Option<String>,
    #[serde(rename = "tokenOut", deserialize_with = "deserialize_text")]
    token_out_camel: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    expected_amount_out: Option<String>,
    #[serde(rename = "expectedAmountOut", deserialize_with = "deserialize_text")]
    expected_amount_out_camel: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    quoted_amount_out: Option<String>,
    #[serde(rename = "quotedAmountOut", deserialize_with = "deserialize_text")]
    quoted_amount_out_camel: Option<String>,
}

impl RawSwapRecord {
    fn kind(&self) -> Option<&String> {
        self.kind
            .as_ref()
            .or(self.pool_kind.as_ref())
            .or(self.pool_kind_camel.as_ref())
            .or(self.pool_type.as_ref())
    }

    fn pool_address(&self) -> Option<String> {
        self.pool_address
            .clone()
            .or_else(|| self.pool_address_camel.clone())
            .or_else(|| self.pool_id.clone())
    }
}

/// Raw liquidity inventory entry.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLiquidityEntry {
    #[serde(deserialize_with = "deserialize_text")]
    id: Option<String>,
    kind: Option<String>,
    pool_kind: Option<String>,
    #[serde(rename = "poolKind")]
    pool_kind_camel: Option<String>,
    pool_type: Option<String>,
}

impl RawLiquidityEntry {
    fn kind(&self) -> Option<&String> {
        self.kind
            .as_ref()
            .or(self.pool_kind.as_ref())
            .or(self.pool_kind_camel.as_ref())
            .or(self.pool_type.as_ref())
    }
}

/// Scalar that may arrive as any JSON type. Anything unusable lands in `Other`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    String(String),
    Other(IgnoredAny),
}

fn deserialize_loose<'de, D>(deserializer: D) -> Result<Option<LooseScalar>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LooseScalar>::deserialize(deserializer)
}

/// Text from a string, number or bool.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match deserialize_loose(deserializer)? {
        Some(LooseScalar::String(s)) => Some(s),
        Some(LooseScalar::Unsigned(n)) => Some(n.to_string()),
        Some(LooseScalar::Signed(n)) => Some(n.to_string()),
        Some(LooseScalar::Float(n)) => Some(n.to_string()),
        Some(LooseScalar::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Boolean, or the strings `"true"` / `"false"`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match deserialize_loose(deserializer)? {
        Some(LooseScalar::Bool(b)) => Some(b),
        Some(LooseScalar::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Deserialize a number that may come as a string or number. Unparseable and
/// non-finite values are treated as absent.
fn deserialize_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match deserialize_loose(deserializer)? {
        Some(LooseScalar::Unsigned(n)) => Some(n as f64),
        Some(LooseScalar::Signed(n)) => Some(n as f64),
        Some(LooseScalar::Float(n)) => Some(n),
        Some(LooseScalar::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()))
}

/// uint256 amount from a decimal string, a `0x` hex string or a JSON integer.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<RawAmount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match deserialize_loose(deserializer)? {
        Some(LooseScalar::String(text)) => {
            parse_amount(&text).map(|value| RawAmount { text, value })
        }
        Some(LooseScalar::Unsigned(n)) => Some(RawAmount {
            text: n.to_string(),
            value: BigUint::from(n),
        }),
        _ => None,
    })
}

/// Unix seconds (number or numeric string) or RFC 3339.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let from_secs = |secs: i64| Utc.timestamp_opt(secs, 0).single();
    Ok(match deserialize_loose(deserializer)? {
        Some(LooseScalar::Unsigned(n)) => i64::try_from(n).ok().and_then(from_secs),
        Some(LooseScalar::Signed(n)) => from_secs(n),
        Some(LooseScalar::String(s)) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(secs) => from_secs(secs),
                Err(_) => DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc)),
            }
        }
        _ => None,
    })
}

/// Pool id to pool kind, built from a liquidity inventory.
///
/// Solution verification swaps name their pool only by id; this map supplies
/// the kind for records that carry no kind field of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolKinds {
    by_id: HashMap<String, String>,
}

impl PoolKinds {
    /// Entries without an id or a non-empty kind are ignored. A repeated id
    /// keeps its first kind.
    pub fn from_liquidity(entries: &[Value]) -> Self {
        let mut kinds = Self::default();
        for entry in entries {
            let Ok(raw) = parse_raw::<RawLiquidityEntry>(entry, "liquidity entry") else {
                continue;
            };
            let kind = raw.kind().filter(|k| !k.trim().is_empty());
            if let (Some(id), Some(kind)) = (raw.id.clone(), kind) {
                kinds.insert(id, kind.as_str());
            }
        }
        kinds
    }

    pub fn insert(&mut self, id: impl Into<String>, kind: impl Into<String>) {
        self.by_id.entry(id.into()).or_insert_with(|| kind.into());
    }

    pub fn kind_of(&self, pool_id: &str) -> Option<&str> {
        self.by_id.get(pool_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn parse_raw<'a, T: Deserialize<'a>>(raw: &'a Value, what: &str) -> AnalyticsResult<T> {
    if !raw.is_object() {
        return Err(AnalyticsError::malformed(format!("{} is not a JSON object", what)));
    }
    T::deserialize(raw).map_err(|e| AnalyticsError::malformed(format!("invalid {}: {}", what, e)))
}

fn checked_kind(kind: &str) -> AnalyticsResult<String> {
    if kind.trim().is_empty() {
        return Err(AnalyticsError::malformed("primary key is empty"));
    }
    Ok(kind.to_string())
}

/// Normalize one raw verification record.
pub fn normalize(raw: &Value) -> AnalyticsResult<Record> {
    normalize_with(raw, None)
}

/// Normalize one raw verification record. When it has no kind field, the
/// pool address (`pool_address`, `poolAddress`, `pool_id`) is looked up in
/// `pool_kinds`.
///
/// Without an explicit success flag, a record counts as succeeded when it has
/// a deviation and no error text.
pub fn normalize_with(raw: &Value, pool_kinds: Option<&PoolKinds>) -> AnalyticsResult<Record> {
    let raw: RawSwapRecord = parse_raw(raw, "record")?;
    let pool_address = raw.pool_address();

    let kind = match raw.kind() {
        Some(kind) => checked_kind(kind)?,
        None => {
            let looked_up = pool_kinds
                .zip(pool_address.as_deref())
                .and_then(|(kinds, id)| kinds.kind_of(id));
            match looked_up {
                Some(kind) => checked_kind(kind)?,
                None => {
                    return Err(AnalyticsError::malformed(format!(
                        "no primary key field (tried {}, then pool id lookup)",
                        KIND_FIELDS.join(", ")
                    )))
                }
            }
        }
    };

    let version = raw
        .pool_version
        .or(raw.pool_version_camel)
        .or(raw.version)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string());
    let deviation_bps = raw
        .difference_bps
        .or(raw.difference_bps_camel)
        .or(raw.deviation_bps)
        .or(raw.deviation);
    let error = raw
        .error
        .or(raw.quote_error)
        .or(raw.quote_error_camel)
        .filter(|e| !e.is_empty());
    let succeeded = raw
        .verified
        .or(raw.succeeded)
        .or(raw.success)
        .unwrap_or(error.is_none() && deviation_bps.is_some());
    let error_text = if succeeded { None } else { error };
    let amount_in = raw
        .amount_in
        .or(raw.amount_in_camel)
        .or(raw.sell_amount_camel)
        .or(raw.sell_amount);
    let timestamp = raw.timestamp.or(raw.created_at).or(raw.created_at_camel);

    let context = SwapContext {
        pool_address,
        token_in: raw.token_in.or(raw.token_in_camel),
        token_out: raw.token_out.or(raw.token_out_camel),
        expected_out: raw.expected_amount_out.or(raw.expected_amount_out_camel),
        quoted_out: raw.quoted_amount_out.or(raw.quoted_amount_out_camel),
    };

    Ok(Record {
        kind,
        version,
        succeeded,
        deviation_bps,
        error_text,
        amount_in,
        timestamp,
        context,
    })
}

/// Normalize one availability (liquidity inventory) entry to its primary key.
pub fn normalize_availability(raw: &Value) -> AnalyticsResult<String> {
    let raw: RawLiquidityEntry = parse_raw(raw, "availability entry")?;
    match raw.kind() {
        Some(kind) => checked_kind(kind),
        None => Err(AnalyticsError::malformed(format!(
            "no primary key field (tried {})",
            KIND_FIELDS.join(", ")
        ))),
    }
}

/// Parse a uint256-style amount: decimal, or hexadecimal with a `0x` prefix.
pub fn parse_amount(text: &str) -> Option<BigUint> {
    let text = text.trim();
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_record() {
        let raw = json!({
            "kind": "weightedProduct",
            "pool_version": "V2",
            "verified": true,
            "difference_bps": -3.5,
            "amount_in": "1000",
            "pool_address": "0xabc",
            "timestamp": 1_700_000_000,
        });
        let record = normalize(&raw).unwrap();
        assert_eq!(record.kind, "weightedProduct");
        assert_eq!(record.version, "V2");
        assert!(record.succeeded);
        assert_eq!(record.deviation_bps, Some(-3.5));
        assert_eq!(record.amount_in.unwrap().value, BigUint::from(1000u32));
        assert_eq!(record.context.pool_address.as_deref(), Some("0xabc"));
        assert_eq!(record.timestamp.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_kind_is_malformed() {
        let raw = json!({ "pool_version": "V3", "verified": true });
        assert!(matches!(
            normalize(&raw),
            Err(AnalyticsError::MalformedRecord { .. })
        ));
        assert!(normalize(&json!({ "kind": "" })).is_err());
        assert!(normalize(&json!({ "kind": 7 })).is_err());
        assert!(normalize(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_alias_resolution_first_non_null_wins() {
        let raw = json!({
            "kind": null,
            "pool_kind": "stable",
            "sellAmount": null,
            "sell_amount": "0x10",
        });
        let record = normalize(&raw).unwrap();
        assert_eq!(record.kind, "stable");
        let amount = record.amount_in.unwrap();
        assert_eq!(amount.text, "0x10");
        assert_eq!(amount.value, BigUint::from(16u32));

        let both = json!({ "kind": "a", "amount_in": "5", "amountIn": "7" });
        assert_eq!(normalize(&both).unwrap().amount_in.unwrap().text, "5");
    }

    #[test]
    fn test_defaults_when_fields_absent() {
        let record = normalize(&json!({ "kind": "gyroE" })).unwrap();
        assert_eq!(record.version, UNKNOWN_VERSION);
        assert!(!record.succeeded);
        assert_eq!(record.deviation_bps, None);
        assert_eq!(record.error_text, None);
        assert_eq!(record.amount_in, None);
        assert_eq!(record.context, SwapContext::default());
    }

    #[test]
    fn test_error_text_dropped_for_success() {
        let raw = json!({ "kind": "a", "verified": true, "error": "stale" });
        assert_eq!(normalize(&raw).unwrap().error_text, None);

        let raw = json!({ "kind": "a", "verified": false, "quote_error": "VM execution error" });
        assert_eq!(
            normalize(&raw).unwrap().error_text.as_deref(),
            Some("VM execution error")
        );
    }

    #[test]
    fn test_parse_amount_beyond_u64() {
        let max_u256 = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let parsed = parse_amount(max_u256).unwrap();
        assert_eq!(parsed.bits(), 256);
        assert_eq!(parsed.to_string(), max_u256);

        let hex = format!("0x{}", "f".repeat(64));
        assert_eq!(parse_amount(&hex).unwrap(), parsed);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("0x"), None);
        assert_eq!(parse_amount("12a"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("0xzz"), None);
    }

    #[test]
    fn test_deviation_from_string_and_non_finite() {
        let record = normalize(&json!({ "kind": "a", "difference_bps": "12.5" })).unwrap();
        assert_eq!(record.deviation_bps, Some(12.5));
        let record = normalize(&json!({ "kind": "a", "difference_bps": "NaN" })).unwrap();
        assert_eq!(record.deviation_bps, None);
        let record = normalize(&json!({ "kind": "a", "difference_bps": "inf" })).unwrap();
        assert_eq!(record.deviation_bps, None);
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let raw = json!({ "kind": "a", "created_at": "2024-01-25T00:00:00Z" });
        let ts = normalize(&raw).unwrap().timestamp.unwrap();
        assert_eq!(ts.timestamp(), 1_706_140_800);
    }

    #[test]
    fn test_normalize_availability() {
        assert_eq!(
            normalize_availability(&json!({ "kind": "weightedProduct", "id": "1" })).unwrap(),
            "weightedProduct"
        );
        assert!(normalize_availability(&json!({ "id": "1" })).is_err());
    }

    #[test]
    fn test_record_builder_helpers() {
        let record = Record::new("a", "V2", false)
            .with_error("boom")
            .with_amount("0")
            .with_deviation(f64::NAN);
        assert!(record.amount_in.as_ref().unwrap().is_zero());
        assert_eq!(record.deviation_bps, None);
        assert_eq!(record.error_text.as_deref(), Some("boom"));
    }

    #[test]
    fn test_kind_from_pool_lookup() {
        let liquidity = vec![
            json!({ "id": "0xabc", "kind": "concentratedLiquidity" }),
            json!({ "id": "0xdef", "kind": "weightedProduct" }),
            json!({ "id": "0xabc", "kind": "stable" }),
            json!({ "kind": "orphan" }),
        ];
        let kinds = PoolKinds::from_liquidity(&liquidity);
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds.kind_of("0xabc"), Some("concentratedLiquidity"));

        let raw = json!({
            "pool_id": "0xabc",
            "pool_version": "V3",
            "quote_error": "VM execution error",
            "difference_bps": 4,
        });
        let record = normalize_with(&raw, Some(&kinds)).unwrap();
        assert_eq!(record.kind, "concentratedLiquidity");
        assert!(!record.succeeded);
        assert_eq!(record.error_text.as_deref(), Some("VM execution error"));
        assert_eq!(record.context.pool_address.as_deref(), Some("0xabc"));

        // an explicit kind always wins over the lookup
        let raw = json!({ "kind": "gyroE", "pool_id": "0xabc" });
        assert_eq!(normalize_with(&raw, Some(&kinds)).unwrap().kind, "gyroE");

        assert!(normalize(&json!({ "pool_id": "0xabc" })).is_err());
        assert!(normalize_with(&json!({ "pool_id": "0x999" }), Some(&kinds)).is_err());
    }

    #[test]
    fn test_success_inferred_without_flag() {
        let kinds = PoolKinds::default();
        let clean = json!({ "kind": "a", "difference_bps": 0, "quote_error": null });
        assert!(normalize_with(&clean, Some(&kinds)).unwrap().succeeded);

        let errored = json!({ "kind": "a", "difference_bps": 0, "quote_error": "boom" });
        assert!(!normalize(&errored).unwrap().succeeded);

        let explicit = json!({ "kind": "a", "difference_bps": 0, "verified": "false" });
        assert!(!normalize(&explicit).unwrap().succeeded);
    }

    #[test]
    fn test_loose_scalars() {
        let raw = json!({
            "kind": "a",
            "version": 3,
            "amountIn": 42,
            "deviation": { "bps": 1 },
            "deviation_bps": "7",
            "token_in": ["not", "text"],
        });
        let record = normalize(&raw).unwrap();
        assert_eq!(record.version, "3");
        assert_eq!(record.amount_in.unwrap().value, BigUint::from(42u32));
        assert_eq!(record.deviation_bps, Some(7.0));
        assert_eq!(record.context.token_in, None);
    }
}
