//! Degradation-aware tiered search client.
//!
//! [`TieredSearcher`] attempts backend tiers in configured priority order,
//! trading relevance quality for availability: premium first, then
//! optimized, simple, and original. Each attempt races a per-tier deadline;
//! a timeout, backend error, or empty result set falls through to the next
//! tier. The first tier to produce hits wins. Only validation errors and
//! terminal exhaustion reach the caller.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use asupersync::Cx;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use fablesearch_core::config::{MAX_LIMIT, MIN_LIMIT, TieredConfig};
use fablesearch_core::error::{FailureClass, SearchError, SearchResult};
use fablesearch_core::traits::TierSearch;
use fablesearch_core::types::{IllustrationHit, SearchTier, TierRequest};
use fablesearch_core::weights::PartialWeights;
use fablesearch_quality::{QualityAssessment, assess, recommend};

use crate::stats::SearchStatsAggregator;

/// One caller-facing search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query embedding; length must match the configured dimensionality.
    pub query_embedding: Vec<f32>,
    /// Caller weights; gaps are filled from the balanced preset and the
    /// result normalized before any backend sees it.
    pub weights: PartialWeights,
    /// Maximum number of hits to return, in `[1, 100]`.
    pub limit: usize,
    /// Optional query text. Feeds the preset recommendation log line and
    /// the quality assessment; never overrides `weights`.
    pub query_text: Option<String>,
}

/// Outcome of a successful tiered search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredResponse {
    /// Hits, sorted by descending `final_score`, at most `limit` entries.
    pub hits: Vec<IllustrationHit>,
    /// The tier that served this response.
    pub tier: SearchTier,
    /// Wall-clock time spent across all attempts, in milliseconds.
    pub latency_ms: u64,
    /// Quality assessment of the returned hit set.
    pub quality: QualityAssessment,
}

/// The tiered search client.
///
/// Holds one backend per searchable tier (missing tiers are skipped) and a
/// shared statistics aggregator. Cheap to clone via the `Arc`s it contains;
/// all methods take `&self`.
pub struct TieredSearcher {
    backends: Vec<Arc<dyn TierSearch>>,
    config: TieredConfig,
    stats: Arc<SearchStatsAggregator>,
}

impl std::fmt::Debug for TieredSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredSearcher")
            .field(
                "backends",
                &self.backends.iter().map(|b| b.tier()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TieredSearcher {
    /// Build a searcher over the given backend capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] when the configuration fails
    /// validation.
    pub fn new(backends: Vec<Arc<dyn TierSearch>>, config: TieredConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self {
            backends,
            config,
            stats: Arc::new(SearchStatsAggregator::new()),
        })
    }

    /// Replace the statistics aggregator, e.g. to share one across clients.
    #[must_use]
    pub fn with_stats(mut self, stats: Arc<SearchStatsAggregator>) -> Self {
        self.stats = stats;
        self
    }

    /// The statistics aggregator recording this client's searches.
    #[must_use]
    pub fn stats(&self) -> &Arc<SearchStatsAggregator> {
        &self.stats
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &TieredConfig {
        &self.config
    }

    fn backend_for(&self, tier: SearchTier) -> Option<&Arc<dyn TierSearch>> {
        self.backends.iter().find(|backend| backend.tier() == tier)
    }

    /// Execute one search, degrading through tiers until one produces hits.
    ///
    /// Statistics are recorded exactly once per call: against the serving
    /// tier on success, against [`SearchTier::Failed`] before a
    /// [`SearchError::SearchExhausted`] propagates. A cancelled search
    /// records nothing.
    ///
    /// # Errors
    ///
    /// - [`SearchError::DimensionMismatch`] / [`SearchError::InvalidLimit`]
    ///   on invalid input, before any backend is called.
    /// - [`SearchError::SearchExhausted`] when every tier errored, timed
    ///   out, or came back empty.
    /// - [`SearchError::Cancelled`] when `cx` requests cancellation.
    pub async fn search(&self, cx: &Cx, request: &SearchRequest) -> SearchResult<TieredResponse> {
        if request.query_embedding.len() != self.config.embedding_dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.config.embedding_dimension,
                found: request.query_embedding.len(),
            });
        }
        if request.limit < MIN_LIMIT || request.limit > MAX_LIMIT {
            return Err(SearchError::InvalidLimit {
                limit: request.limit,
                min: MIN_LIMIT,
                max: MAX_LIMIT,
            });
        }

        let weights = request.weights.normalized();
        if let Some(text) = request.query_text.as_deref() {
            let suggestion = recommend(text);
            tracing::debug!(
                target: "fablesearch",
                preset = suggestion.preset.name(),
                keyword_hits = suggestion.keyword_hits,
                "preset suggestion for query text (caller weights still apply)"
            );
        }

        let started = Instant::now();
        let mut attempts = 0_usize;
        let mut last_error: Option<SearchError> = None;

        for &tier in &self.config.tier_priority {
            if cx.is_cancel_requested() {
                return Err(SearchError::Cancelled {
                    phase: format!("before {tier} attempt"),
                    reason: "cancellation requested".to_owned(),
                });
            }
            let Some(backend) = self.backend_for(tier) else {
                tracing::debug!(
                    target: "fablesearch",
                    tier = tier.name(),
                    "no backend registered for tier; skipping"
                );
                continue;
            };

            let tier_request = TierRequest {
                embedding: request.query_embedding.clone(),
                weights,
                limit: request.limit,
                similarity_threshold: self.config.threshold_for(tier),
            };

            attempts += 1;
            let attempt_started = Instant::now();
            let budget = self.config.tier_timeout();
            let outcome = asupersync::time::timeout(
                asupersync::time::wall_now(),
                budget,
                Box::pin(backend.search(cx, &tier_request)),
            )
            .await;

            match outcome {
                Ok(Ok(mut hits)) if !hits.is_empty() => {
                    hits.sort_by(IllustrationHit::cmp_by_score);
                    hits.truncate(request.limit);

                    let quality =
                        assess(&hits, request.query_text.as_deref().unwrap_or_default());
                    let elapsed = started.elapsed();
                    self.stats.record(tier, elapsed, true);
                    self.stats.record_quality(tier, &quality);
                    tracing::debug!(
                        target: "fablesearch",
                        tier = tier.name(),
                        result_count = hits.len(),
                        duration_ms = elapsed.as_millis() as u64,
                        grade = %quality.grade,
                        "tier served search"
                    );
                    return Ok(TieredResponse {
                        hits,
                        tier,
                        latency_ms: elapsed.as_millis() as u64,
                        quality,
                    });
                }
                Ok(Ok(_)) => {
                    tracing::debug!(
                        target: "fablesearch",
                        tier = tier.name(),
                        "tier returned no matches; falling through"
                    );
                }
                Ok(Err(err)) => {
                    tracing::debug!(
                        target: "fablesearch",
                        tier = tier.name(),
                        error = %err,
                        "tier backend failed; falling through"
                    );
                    last_error = Some(err);
                }
                Err(_) => {
                    let err = SearchError::TierTimeout {
                        tier,
                        elapsed_ms: attempt_started.elapsed().as_millis() as u64,
                        budget_ms: self.config.tier_timeout_ms,
                    };
                    tracing::debug!(
                        target: "fablesearch",
                        tier = tier.name(),
                        budget_ms = self.config.tier_timeout_ms,
                        "tier timed out; falling through"
                    );
                    last_error = Some(err);
                }
            }
        }

        let source = last_error.unwrap_or_else(|| SearchError::TierBackend {
            tier: SearchTier::Failed,
            source: std::io::Error::other("every attempted tier returned an empty result set")
                .into(),
        });
        let classification = FailureClass::from_error(&source);
        let elapsed = started.elapsed();
        self.stats.record(SearchTier::Failed, elapsed, false);
        tracing::warn!(
            target: "fablesearch",
            attempts,
            classification = %classification,
            duration_ms = elapsed.as_millis() as u64,
            "all search tiers exhausted"
        );
        Err(SearchError::SearchExhausted {
            attempts,
            classification,
            source: Box::new(source),
        })
    }

    /// Run one search per weight configuration concurrently and merge the
    /// results into a single ranked list.
    ///
    /// Shared ids keep their highest `final_score`; the merged list is
    /// sorted descending. Individual configuration failures are skipped; if
    /// every configuration fails, the last error is surfaced.
    ///
    /// # Errors
    ///
    /// Propagates the last per-configuration [`SearchError`] when no
    /// configuration succeeds.
    pub async fn batch_search(
        &self,
        cx: &Cx,
        query_embedding: &[f32],
        weight_configs: &[PartialWeights],
        limit: usize,
    ) -> SearchResult<Vec<IllustrationHit>> {
        if weight_configs.is_empty() {
            return Ok(Vec::new());
        }

        let requests: Vec<SearchRequest> = weight_configs
            .iter()
            .map(|weights| SearchRequest {
                query_embedding: query_embedding.to_vec(),
                weights: weights.clone(),
                limit,
                query_text: None,
            })
            .collect();
        let outcomes = join_all(requests.iter().map(|request| self.search(cx, request))).await;

        let mut merged: HashMap<u64, IllustrationHit> = HashMap::new();
        let mut last_error = None;
        let mut any_success = false;
        for outcome in outcomes {
            match outcome {
                Ok(response) => {
                    any_success = true;
                    for hit in response.hits {
                        match merged.entry(hit.id) {
                            std::collections::hash_map::Entry::Occupied(mut entry) => {
                                // cmp_by_score is descending: Less means the
                                // candidate ranks ahead of the incumbent.
                                if hit.cmp_by_score(entry.get()) == std::cmp::Ordering::Less {
                                    entry.insert(hit);
                                }
                            }
                            std::collections::hash_map::Entry::Vacant(entry) => {
                                entry.insert(hit);
                            }
                        }
                    }
                }
                Err(err) => {
                    tracing::debug!(
                        target: "fablesearch",
                        error = %err,
                        "batch configuration failed; skipping"
                    );
                    last_error = Some(err);
                }
            }
        }

        if !any_success {
            if let Some(err) = last_error {
                return Err(err);
            }
        }
        let mut hits: Vec<IllustrationHit> = merged.into_values().collect();
        hits.sort_by(IllustrationHit::cmp_by_score);
        Ok(hits)
    }
}
