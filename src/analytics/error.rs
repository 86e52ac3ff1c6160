//! Engine error types.

/// Errors surfaced by the analytics engine.
///
/// Divide-by-zero situations (empty groups, zero availability) are not
/// errors; every ratio resolves to `0.0` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Raw record has no resolvable primary key.
    MalformedRecord {
        reason: String,
        source: Option<String>,
    },
    /// Mutation attempted on an aggregator that was already finalized.
    FinalizedStateMutation {
        operation: &'static str,
    },
}

impl AnalyticsError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
            source: None,
        }
    }

    /// Attach the batch name the record came from.
    pub fn with_source(self, name: &str) -> Self {
        match self {
            Self::MalformedRecord { reason, .. } => Self::MalformedRecord {
                reason,
                source: Some(name.to_string()),
            },
            other => other,
        }
    }
}

impl std::fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRecord { reason, source } => match source {
                Some(source) => write!(f, "Malformed record in {}: {}", source, reason),
                None => write!(f, "Malformed record: {}", reason),
            },
            Self::FinalizedStateMutation { operation } => {
                write!(f, "Cannot {} after aggregator was finalized", operation)
            }
        }
    }
}

impl std::error::Error for AnalyticsError {}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_source() {
        let err = AnalyticsError::malformed("missing kind").with_source("a.json");
        assert_eq!(err.to_string(), "Malformed record in a.json: missing kind");
    }

    #[test]
    fn test_with_source_leaves_other_variants() {
        let err = AnalyticsError::FinalizedStateMutation { operation: "ingest" }.with_source("x");
        assert_eq!(
            err,
            AnalyticsError::FinalizedStateMutation { operation: "ingest" }
        );
        assert_eq!(err.to_string(), "Cannot ingest after aggregator was finalized");
    }
}
