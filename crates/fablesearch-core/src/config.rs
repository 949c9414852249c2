//! Client configuration for the tiered search orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};
use crate::types::SearchTier;

/// Smallest accepted per-search result limit.
pub const MIN_LIMIT: usize = 1;

/// Largest accepted per-search result limit.
pub const MAX_LIMIT: usize = 100;

/// Backend-wide embedding dimensionality (OpenAI text-embedding family).
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

/// Per-tier call budget.
pub const DEFAULT_TIER_TIMEOUT_MS: u64 = 30_000;

/// Similarity threshold for the premium tier. Looser than the optimized
/// tier because the curated subset is small and uniformly high-quality.
pub const PREMIUM_SIMILARITY_THRESHOLD: f32 = 0.02;

/// Similarity threshold for the optimized tier (strictest full-corpus path).
pub const OPTIMIZED_SIMILARITY_THRESHOLD: f32 = 0.05;

/// Tiered search client configuration.
///
/// Tier ordering is declarative policy: `tier_priority` makes reordering or
/// removing a tier a config change, not a code change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredConfig {
    /// Required query-vector dimensionality.
    pub embedding_dimension: usize,
    /// Per-tier call budget in milliseconds.
    pub tier_timeout_ms: u64,
    /// Tiers to attempt, in order. Must be non-empty, free of duplicates,
    /// and must not contain [`SearchTier::Failed`].
    pub tier_priority: Vec<SearchTier>,
    /// Premium-tier similarity threshold.
    pub premium_threshold: f32,
    /// Optimized-tier similarity threshold.
    pub optimized_threshold: f32,
}

impl Default for TieredConfig {
    fn default() -> Self {
        Self {
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            tier_timeout_ms: DEFAULT_TIER_TIMEOUT_MS,
            tier_priority: SearchTier::FALLBACK_ORDER.to_vec(),
            premium_threshold: PREMIUM_SIMILARITY_THRESHOLD,
            optimized_threshold: OPTIMIZED_SIMILARITY_THRESHOLD,
        }
    }
}

impl TieredConfig {
    /// Default config with the premium tier removed from the priority list.
    #[must_use]
    pub fn without_premium() -> Self {
        let mut config = Self::default();
        config
            .tier_priority
            .retain(|&tier| tier != SearchTier::Premium);
        config
    }

    /// The per-tier call budget as a [`Duration`].
    #[must_use]
    pub const fn tier_timeout(&self) -> Duration {
        Duration::from_millis(self.tier_timeout_ms)
    }

    /// Similarity threshold for a tier; `None` means backend default.
    #[must_use]
    pub fn threshold_for(&self, tier: SearchTier) -> Option<f32> {
        match tier {
            SearchTier::Premium => Some(self.premium_threshold),
            SearchTier::Optimized => Some(self.optimized_threshold),
            SearchTier::Simple | SearchTier::Original | SearchTier::Failed => None,
        }
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] when a field is out of range
    /// or the tier priority list is malformed.
    pub fn validate(&self) -> SearchResult<()> {
        if self.embedding_dimension == 0 {
            return Err(SearchError::InvalidConfig {
                field: "embedding_dimension".to_owned(),
                value: "0".to_owned(),
                reason: "must match the backend's fixed vector dimensionality".to_owned(),
            });
        }
        if self.tier_timeout_ms == 0 {
            return Err(SearchError::InvalidConfig {
                field: "tier_timeout_ms".to_owned(),
                value: "0".to_owned(),
                reason: "a zero budget would time every tier out immediately".to_owned(),
            });
        }
        if self.tier_priority.is_empty() {
            return Err(SearchError::InvalidConfig {
                field: "tier_priority".to_owned(),
                value: "[]".to_owned(),
                reason: "at least one searchable tier is required".to_owned(),
            });
        }
        for (index, &tier) in self.tier_priority.iter().enumerate() {
            if tier == SearchTier::Failed {
                return Err(SearchError::InvalidConfig {
                    field: "tier_priority".to_owned(),
                    value: tier.to_string(),
                    reason: "'failed' is a terminal marker, not a searchable tier".to_owned(),
                });
            }
            if self.tier_priority[..index].contains(&tier) {
                return Err(SearchError::InvalidConfig {
                    field: "tier_priority".to_owned(),
                    value: tier.to_string(),
                    reason: "a tier may appear at most once in the priority list".to_owned(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        TieredConfig::default().validate().expect("default config");
    }

    #[test]
    fn default_priority_is_the_fallback_order() {
        let config = TieredConfig::default();
        assert_eq!(config.tier_priority, SearchTier::FALLBACK_ORDER.to_vec());
    }

    #[test]
    fn without_premium_starts_at_optimized() {
        let config = TieredConfig::without_premium();
        config.validate().expect("valid config");
        assert_eq!(
            config.tier_priority,
            vec![
                SearchTier::Optimized,
                SearchTier::Simple,
                SearchTier::Original
            ]
        );
    }

    #[test]
    fn premium_threshold_is_looser_than_optimized() {
        let config = TieredConfig::default();
        assert!(config.premium_threshold < config.optimized_threshold);
    }

    #[test]
    fn threshold_defaults_by_tier() {
        let config = TieredConfig::default();
        assert_eq!(config.threshold_for(SearchTier::Premium), Some(0.02));
        assert_eq!(config.threshold_for(SearchTier::Optimized), Some(0.05));
        assert_eq!(config.threshold_for(SearchTier::Simple), None);
        assert_eq!(config.threshold_for(SearchTier::Original), None);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let config = TieredConfig {
            embedding_dimension: 0,
            ..TieredConfig::default()
        };
        let err = config.validate().expect_err("must reject");
        assert!(err.to_string().contains("embedding_dimension"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = TieredConfig {
            tier_timeout_ms: 0,
            ..TieredConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_priority_is_rejected() {
        let config = TieredConfig {
            tier_priority: vec![],
            ..TieredConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn failed_tier_in_priority_is_rejected() {
        let config = TieredConfig {
            tier_priority: vec![SearchTier::Premium, SearchTier::Failed],
            ..TieredConfig::default()
        };
        let err = config.validate().expect_err("must reject");
        assert!(err.to_string().contains("terminal"));
    }

    #[test]
    fn duplicate_tier_in_priority_is_rejected() {
        let config = TieredConfig {
            tier_priority: vec![SearchTier::Simple, SearchTier::Simple],
            ..TieredConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = TieredConfig::without_premium();
        let json = serde_json::to_string(&config).expect("serialize");
        let decoded: TieredConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, config);
    }
}
