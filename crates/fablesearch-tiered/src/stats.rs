//! Search usage statistics.
//!
//! [`SearchStatsAggregator`] is an explicit, shared-by-`Arc` instance (no
//! globals) that counts tier usage and latency across searches. Recording
//! sits on the search hot path, so every operation takes the lock briefly
//! and a poisoned lock degrades to a skipped update rather than a panic.

use std::fmt::Write as _;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use fablesearch_core::types::SearchTier;
use fablesearch_quality::QualityAssessment;

/// Premium usage share below which the report suggests checking indexing.
const LOW_PREMIUM_SHARE: f64 = 0.5;

/// Failure share above which the report suggests checking connectivity.
const HIGH_FAILURE_SHARE: f64 = 0.1;

/// Premium average latency above which the report suggests tuning.
const SLOW_PREMIUM_MS: f64 = 10_000.0;

/// Tiers tracked by the aggregator, in reporting order.
const TRACKED_TIERS: [SearchTier; 5] = [
    SearchTier::Premium,
    SearchTier::Optimized,
    SearchTier::Simple,
    SearchTier::Original,
    SearchTier::Failed,
];

#[derive(Debug, Clone, Default)]
struct TierCounters {
    searches: u64,
    successes: u64,
    avg_latency_ms: f64,
    last_quality: Option<QualityAssessment>,
}

impl TierCounters {
    fn record(&mut self, latency: Duration, success: bool) {
        self.searches += 1;
        if success {
            self.successes += 1;
        }
        // Incremental mean keeps the update O(1) without storing samples.
        let latency_ms = latency.as_secs_f64() * 1_000.0;
        #[allow(clippy::cast_precision_loss)]
        let n = self.searches as f64;
        self.avg_latency_ms += (latency_ms - self.avg_latency_ms) / n;
    }
}

/// Usage snapshot for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierUsage {
    pub tier: SearchTier,
    pub searches: u64,
    pub success_rate: f64,
    pub avg_latency_ms: f64,
    /// Most recent quality assessment recorded for this tier, if any.
    pub last_quality: Option<QualityAssessment>,
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub total_searches: u64,
    pub tiers: Vec<TierUsage>,
}

impl SearchStats {
    /// Usage entry for a tier. Every tracked tier is always present.
    #[must_use]
    pub fn tier(&self, tier: SearchTier) -> Option<&TierUsage> {
        self.tiers.iter().find(|usage| usage.tier == tier)
    }
}

/// Thread-safe running counters for tiered search usage.
#[derive(Debug, Default)]
pub struct SearchStatsAggregator {
    inner: Mutex<[TierCounters; 5]>,
}

fn tier_index(tier: SearchTier) -> usize {
    match tier {
        SearchTier::Premium => 0,
        SearchTier::Optimized => 1,
        SearchTier::Simple => 2,
        SearchTier::Original => 3,
        SearchTier::Failed => 4,
    }
}

impl SearchStatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed search attempt against `tier`.
    ///
    /// Callers invoke this exactly once per search: with the serving tier on
    /// success, or with [`SearchTier::Failed`] after exhaustion.
    pub fn record(&self, tier: SearchTier, latency: Duration, success: bool) {
        let Ok(mut counters) = self.inner.lock() else {
            tracing::warn!(
                target: "fablesearch",
                tier = tier.name(),
                "stats lock poisoned; dropping sample"
            );
            return;
        };
        counters[tier_index(tier)].record(latency, success);
    }

    /// Store the most recent quality assessment observed for `tier`.
    pub fn record_quality(&self, tier: SearchTier, assessment: &QualityAssessment) {
        let Ok(mut counters) = self.inner.lock() else {
            return;
        };
        counters[tier_index(tier)].last_quality = Some(assessment.clone());
    }

    /// Consistent point-in-time copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> SearchStats {
        let counters = match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return SearchStats { total_searches: 0, tiers: Vec::new() },
        };
        let tiers = TRACKED_TIERS
            .iter()
            .map(|&tier| {
                let c = &counters[tier_index(tier)];
                #[allow(clippy::cast_precision_loss)]
                let success_rate = if c.searches == 0 {
                    0.0
                } else {
                    c.successes as f64 / c.searches as f64
                };
                TierUsage {
                    tier,
                    searches: c.searches,
                    success_rate,
                    avg_latency_ms: c.avg_latency_ms,
                    last_quality: c.last_quality.clone(),
                }
            })
            .collect::<Vec<_>>();
        let total_searches = tiers.iter().map(|usage| usage.searches).sum();
        SearchStats { total_searches, tiers }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            *counters = <[TierCounters; 5]>::default();
        }
    }

    /// Human-readable usage summary with rule-based tuning suggestions.
    #[must_use]
    pub fn report(&self) -> String {
        let stats = self.snapshot();
        let mut out = String::from("tiered search usage report\n");
        if stats.total_searches == 0 {
            out.push_str("  no searches recorded yet\n");
            return out;
        }

        #[allow(clippy::cast_precision_loss)]
        let total = stats.total_searches as f64;
        for usage in &stats.tiers {
            if usage.searches == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let share = usage.searches as f64 / total;
            let _ = writeln!(
                out,
                "  {:<9} {:>5} searches ({:>5.1}%)  avg {:.0} ms  success {:.0}%  [{}]",
                usage.tier.name(),
                usage.searches,
                share * 100.0,
                usage.avg_latency_ms,
                usage.success_rate * 100.0,
                usage.tier.label(),
            );
        }

        let share = |tier: SearchTier| {
            #[allow(clippy::cast_precision_loss)]
            stats.tier(tier).map_or(0.0, |u| u.searches as f64 / total)
        };
        let mut suggestions: Vec<String> = Vec::new();
        if share(SearchTier::Premium) < LOW_PREMIUM_SHARE {
            suggestions.push(
                "premium tier serves under half of searches; check that the premium index covers the active corpus".into(),
            );
        }
        if share(SearchTier::Failed) > HIGH_FAILURE_SHARE {
            suggestions.push(
                "over 10% of searches exhaust every tier; investigate backend connectivity".into(),
            );
        }
        if stats
            .tier(SearchTier::Premium)
            .is_some_and(|u| u.searches > 0 && u.avg_latency_ms > SLOW_PREMIUM_MS)
        {
            suggestions.push(
                "premium tier averages over 10s; consider raising its similarity threshold or shrinking the candidate set".into(),
            );
        }

        if suggestions.is_empty() {
            out.push_str("  suggestions: none (healthy)\n");
        } else {
            out.push_str("  suggestions:\n");
            for suggestion in &suggestions {
                let _ = writeln!(out, "    - {suggestion}");
            }
        }
        out
    }
}
