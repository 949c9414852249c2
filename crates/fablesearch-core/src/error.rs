use crate::types::SearchTier;

/// Unified error type covering all failure modes of the tiered search client.
///
/// Every variant carries an actionable message guiding the consumer toward
/// resolution. The `TieredSearcher` recovers transient tier failures by
/// degrading to the next tier: `TierTimeout` and `TierBackend` never reach
/// the caller directly. Only validation errors (`DimensionMismatch`,
/// `InvalidLimit`, `InvalidConfig`) and terminal exhaustion
/// (`SearchExhausted`) are surfaced.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    // === Validation errors (fail fast, before any backend call) ===
    /// Query vector length does not match the backend's fixed dimensionality.
    #[error(
        "Dimension mismatch: backend expects {expected}-dim vectors, query has {found}-dim. Use the matching embedding provider."
    )]
    DimensionMismatch {
        /// Dimension the backend was provisioned with.
        expected: usize,
        /// Dimension of the query vector.
        found: usize,
    },

    /// Requested result count is outside the accepted range.
    #[error("Invalid limit {limit}: must be between {min} and {max} results per search.")]
    InvalidLimit {
        /// The rejected limit.
        limit: usize,
        /// Smallest accepted limit.
        min: usize,
        /// Largest accepted limit.
        max: usize,
    },

    /// A configuration value is invalid.
    #[error("Invalid config: {field} = \"{value}\": {reason}")]
    InvalidConfig {
        /// Which config field.
        field: String,
        /// The invalid value.
        value: String,
        /// Why it is invalid.
        reason: String,
    },

    // === Per-tier errors (recovered locally by fallthrough) ===
    /// A single tier's call exceeded its deadline.
    #[error(
        "Tier {tier} timed out after {elapsed_ms}ms (budget: {budget_ms}ms). The next tier will be attempted."
    )]
    TierTimeout {
        /// Which tier timed out.
        tier: SearchTier,
        /// How long the call ran.
        elapsed_ms: u64,
        /// The configured budget.
        budget_ms: u64,
    },

    /// A single tier's backend call failed.
    #[error("Tier {tier} backend call failed: {source}. The next tier will be attempted.")]
    TierBackend {
        /// Which tier failed.
        tier: SearchTier,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // === Terminal errors ===
    /// Every tier errored or returned an empty result set.
    #[error(
        "All {attempts} search tiers exhausted ({classification}): {source}. Retry advisability depends on the classification."
    )]
    SearchExhausted {
        /// Number of tiers attempted before giving up.
        attempts: usize,
        /// User-facing classification of the last underlying error.
        classification: FailureClass,
        /// The last underlying error.
        #[source]
        source: Box<SearchError>,
    },

    // === Cancellation ===
    /// Operation was cancelled via the structured concurrency protocol.
    #[error("Search cancelled during {phase}: {reason}")]
    Cancelled {
        /// Which phase was active when cancelled.
        phase: String,
        /// Cancellation reason.
        reason: String,
    },
}

/// Convenience alias used throughout the fablesearch crate hierarchy.
pub type SearchResult<T> = Result<T, SearchError>;

/// User-facing classification of a terminal search failure.
///
/// Guides retry-or-not decisions upstream: timeouts are usually worth
/// retrying, connectivity failures warrant a backoff, everything else is
/// most likely a caller or backend defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FailureClass {
    /// The last attempt ran out of time.
    Timeout,
    /// The last attempt failed to reach the backend.
    Connectivity,
    /// Anything else.
    Other,
}

impl FailureClass {
    /// Derive a classification from the last underlying tier error.
    ///
    /// Timeout variants classify directly; backend errors are classified by
    /// message inspection since the underlying transport error type is opaque
    /// behind the `TierSearch` interface.
    #[must_use]
    pub fn from_error(error: &SearchError) -> Self {
        match error {
            SearchError::TierTimeout { .. } => Self::Timeout,
            SearchError::TierBackend { source, .. } => {
                let message = source.to_string().to_lowercase();
                if message.contains("timeout") || message.contains("timed out") {
                    Self::Timeout
                } else if message.contains("connect")
                    || message.contains("network")
                    || message.contains("unreachable")
                {
                    Self::Connectivity
                } else {
                    Self::Other
                }
            }
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for FailureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connectivity => write!(f, "connectivity"),
            Self::Other => write!(f, "generic failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_error(tier: SearchTier, message: &str) -> SearchError {
        SearchError::TierBackend {
            tier,
            source: std::io::Error::other(message.to_owned()).into(),
        }
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }

    #[test]
    fn dimension_mismatch_message_names_both_dims() {
        let err = SearchError::DimensionMismatch {
            expected: 1536,
            found: 384,
        };
        let msg = err.to_string();
        assert!(msg.contains("1536"));
        assert!(msg.contains("384"));
    }

    #[test]
    fn invalid_limit_message_names_bounds() {
        let err = SearchError::InvalidLimit {
            limit: 500,
            min: 1,
            max: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn timeout_classifies_as_timeout() {
        let err = SearchError::TierTimeout {
            tier: SearchTier::Premium,
            elapsed_ms: 30_000,
            budget_ms: 30_000,
        };
        assert_eq!(FailureClass::from_error(&err), FailureClass::Timeout);
    }

    #[test]
    fn backend_connection_message_classifies_as_connectivity() {
        let err = backend_error(SearchTier::Optimized, "connection refused");
        assert_eq!(FailureClass::from_error(&err), FailureClass::Connectivity);
    }

    #[test]
    fn backend_timeout_message_classifies_as_timeout() {
        let err = backend_error(SearchTier::Simple, "statement timed out");
        assert_eq!(FailureClass::from_error(&err), FailureClass::Timeout);
    }

    #[test]
    fn opaque_backend_message_classifies_as_other() {
        let err = backend_error(SearchTier::Original, "permission denied for relation");
        assert_eq!(FailureClass::from_error(&err), FailureClass::Other);
    }

    #[test]
    fn exhausted_preserves_source_chain() {
        let last = backend_error(SearchTier::Original, "network is down");
        let classification = FailureClass::from_error(&last);
        let err = SearchError::SearchExhausted {
            attempts: 4,
            classification,
            source: Box::new(last),
        };
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains("connectivity"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn failure_class_display() {
        assert_eq!(FailureClass::Timeout.to_string(), "timeout");
        assert_eq!(FailureClass::Connectivity.to_string(), "connectivity");
        assert_eq!(FailureClass::Other.to_string(), "generic failure");
    }
}
