//! Integration tests for fablesearch.
//!
//! End-to-end tests exercising the tiered client against scripted in-memory
//! backends (no real vector store needed).
//!
//! Coverage:
//! 1. Basic tiered flow (premium serves, fallthrough on failure)
//! 2. Exhaustion (every tier fails or comes back empty)
//! 3. Statistics (exactly one record per search, report content)
//! 4. Batch search (concurrent fan-out, max-score merge)
//! 5. Priority policy (`without_premium`, custom ordering)
//! 6. Quality assessment and preset recommendation on the search path

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use asupersync::Cx;
use fablesearch::prelude::*;
use fablesearch::{FailureClass, WeightDimension, recommend};
use fablesearch_core::traits::BoxFuture;

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

const DIM: usize = 8;

fn embedding() -> Vec<f32> {
    (0..DIM).map(|i| (i as f32) / (DIM as f32)).collect()
}

fn config() -> TieredConfig {
    TieredConfig {
        embedding_dimension: DIM,
        ..TieredConfig::default()
    }
}

fn hit(id: u64, score: f32, description: &str) -> IllustrationHit {
    IllustrationHit {
        id,
        title: format!("picture book {id}"),
        image_url: format!("https://img.example/{id}.webp"),
        original_description: description.to_owned(),
        philosophy: "成长".to_owned(),
        action_process: "探索".to_owned(),
        interpersonal_roles: "朋友".to_owned(),
        edu_value: "观察".to_owned(),
        learning_strategy: "模仿".to_owned(),
        creative_play: "想象".to_owned(),
        scene_visuals: "森林".to_owned(),
        final_score: score,
    }
}

/// Backend that always returns the same hit list.
struct FixedBackend {
    tier: SearchTier,
    hits: Vec<IllustrationHit>,
    calls: AtomicUsize,
}

impl FixedBackend {
    fn new(tier: SearchTier, hits: Vec<IllustrationHit>) -> Arc<Self> {
        Arc::new(Self {
            tier,
            hits,
            calls: AtomicUsize::new(0),
        })
    }
}

impl TierSearch for FixedBackend {
    fn tier(&self) -> SearchTier {
        self.tier
    }

    fn search<'a>(
        &'a self,
        _cx: &'a Cx,
        _request: &'a TierRequest,
    ) -> BoxFuture<'a, SearchResult<Vec<IllustrationHit>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(self.hits.clone()) })
    }
}

/// Backend that always fails with the given message.
struct FailingBackend {
    tier: SearchTier,
    message: &'static str,
}

impl FailingBackend {
    fn new(tier: SearchTier, message: &'static str) -> Arc<Self> {
        Arc::new(Self { tier, message })
    }
}

impl TierSearch for FailingBackend {
    fn tier(&self) -> SearchTier {
        self.tier
    }

    fn search<'a>(
        &'a self,
        _cx: &'a Cx,
        _request: &'a TierRequest,
    ) -> BoxFuture<'a, SearchResult<Vec<IllustrationHit>>> {
        Box::pin(async move {
            Err(SearchError::TierBackend {
                tier: self.tier,
                source: std::io::Error::other(self.message.to_owned()).into(),
            })
        })
    }
}

fn request(limit: usize) -> SearchRequest {
    SearchRequest {
        query_embedding: embedding(),
        weights: PartialWeights::default(),
        limit,
        query_text: None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 1. Basic tiered flow
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn premium_tier_serves_first() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let premium = FixedBackend::new(
            SearchTier::Premium,
            vec![hit(1, 0.92, "红色狐狸在秋天的森林里散步")],
        );
        let optimized = FixedBackend::new(
            SearchTier::Optimized,
            vec![hit(2, 0.70, "两只小熊在河边钓鱼")],
        );
        let searcher =
            TieredSearcher::new(vec![premium, optimized.clone()], config()).unwrap();

        let response = searcher.search(&cx, &request(10)).await.unwrap();
        assert_eq!(response.tier, SearchTier::Premium);
        assert_eq!(response.hits[0].id, 1);
        assert_eq!(optimized.calls.load(Ordering::SeqCst), 0);
    });
}

#[test]
fn failure_cascades_down_to_original() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let searcher = TieredSearcher::new(
            vec![
                FailingBackend::new(SearchTier::Premium, "connection refused"),
                FailingBackend::new(SearchTier::Optimized, "connection refused"),
                FixedBackend::new(SearchTier::Simple, vec![]),
                FixedBackend::new(
                    SearchTier::Original,
                    vec![hit(9, 0.35, "一本旧图画书的封面")],
                ),
            ],
            config(),
        )
        .unwrap();

        let response = searcher.search(&cx, &request(10)).await.unwrap();
        assert_eq!(response.tier, SearchTier::Original);
        assert_eq!(response.hits.len(), 1);
    });
}

// ═══════════════════════════════════════════════════════════════════════════
// 2. Exhaustion
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn exhaustion_surfaces_classified_error_and_records_once() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let searcher = TieredSearcher::new(
            vec![
                FailingBackend::new(SearchTier::Premium, "network unreachable"),
                FailingBackend::new(SearchTier::Optimized, "network unreachable"),
            ],
            config(),
        )
        .unwrap();

        let err = searcher.search(&cx, &request(10)).await.unwrap_err();
        let SearchError::SearchExhausted {
            attempts,
            classification,
            ..
        } = err
        else {
            panic!("expected exhaustion, got {err}");
        };
        assert_eq!(attempts, 2);
        assert_eq!(classification, FailureClass::Connectivity);

        let snapshot = searcher.stats().snapshot();
        assert_eq!(snapshot.total_searches, 1);
        assert_eq!(snapshot.tier(SearchTier::Failed).unwrap().searches, 1);
        assert_eq!(snapshot.tier(SearchTier::Premium).unwrap().searches, 0);
    });
}

// ═══════════════════════════════════════════════════════════════════════════
// 3. Statistics
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn stats_accumulate_across_searches() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let searcher = TieredSearcher::new(
            vec![FixedBackend::new(
                SearchTier::Premium,
                vec![hit(1, 0.88, "月光下的灯塔")],
            )],
            config(),
        )
        .unwrap();

        for _ in 0..3 {
            searcher.search(&cx, &request(10)).await.unwrap();
        }

        let snapshot = searcher.stats().snapshot();
        assert_eq!(snapshot.total_searches, 3);
        let premium = snapshot.tier(SearchTier::Premium).unwrap();
        assert_eq!(premium.searches, 3);
        assert!((premium.success_rate - 1.0).abs() < f64::EPSILON);
        assert!(premium.last_quality.is_some());

        let report = searcher.stats().report();
        assert!(report.contains("premium"), "report: {report}");
        assert!(report.contains("healthy"), "report: {report}");
    });
}

#[test]
fn shared_aggregator_sees_both_clients() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let stats = Arc::new(SearchStatsAggregator::new());
        let backend = FixedBackend::new(SearchTier::Simple, vec![hit(5, 0.6, "纸船")]);
        let first = TieredSearcher::new(vec![backend.clone()], config())
            .unwrap()
            .with_stats(Arc::clone(&stats));
        let second = TieredSearcher::new(vec![backend], config())
            .unwrap()
            .with_stats(Arc::clone(&stats));

        first.search(&cx, &request(10)).await.unwrap();
        second.search(&cx, &request(10)).await.unwrap();

        assert_eq!(stats.snapshot().total_searches, 2);
    });
}

// ═══════════════════════════════════════════════════════════════════════════
// 4. Batch search
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn batch_merges_by_highest_score_per_id() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let searcher = TieredSearcher::new(
            vec![FixedBackend::new(
                SearchTier::Premium,
                vec![hit(1, 0.9, "aurora"), hit(2, 0.4, "tide"), hit(3, 0.7, "dune")],
            )],
            config(),
        )
        .unwrap();

        let configs = vec![
            PartialWeights::from(WeightPreset::ReadingWisdom.weights()),
            PartialWeights::from(WeightPreset::CreativeFantasy.weights()),
        ];
        let merged = searcher
            .batch_search(&cx, &embedding(), &configs, 10)
            .await
            .unwrap();

        let ids: Vec<u64> = merged.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3, 2], "descending by score, one entry per id");
    });
}

// ═══════════════════════════════════════════════════════════════════════════
// 5. Priority policy
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn without_premium_starts_at_optimized() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let premium = FixedBackend::new(SearchTier::Premium, vec![hit(1, 0.95, "gold")]);
        let optimized = FixedBackend::new(SearchTier::Optimized, vec![hit(2, 0.8, "silver")]);
        let config = TieredConfig {
            embedding_dimension: DIM,
            ..TieredConfig::without_premium()
        };
        let searcher = TieredSearcher::new(vec![premium.clone(), optimized], config).unwrap();

        let response = searcher.search(&cx, &request(10)).await.unwrap();
        assert_eq!(response.tier, SearchTier::Optimized);
        assert_eq!(premium.calls.load(Ordering::SeqCst), 0);
    });
}

// ═══════════════════════════════════════════════════════════════════════════
// 6. Quality and recommendation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn response_carries_quality_assessment() {
    asupersync::test_utils::run_test_with_cx(|cx| async move {
        let searcher = TieredSearcher::new(
            vec![FixedBackend::new(
                SearchTier::Premium,
                vec![
                    hit(1, 0.9, "红色狐狸穿过秋天的森林"),
                    hit(2, 0.85, "小女孩在海边堆沙堡"),
                    hit(3, 0.82, "爷爷在院子里修理木船"),
                ],
            )],
            config(),
        )
        .unwrap();

        let mut req = request(10);
        req.query_text = Some("森林里的动物".to_owned());
        let response = searcher.search(&cx, &req).await.unwrap();

        assert!(response.quality.avg_score > 0.8);
        assert_eq!(response.quality.distribution.excellent, 3);
        assert_eq!(response.quality.grade, QualityGrade::A);
    });
}

#[test]
fn recommender_is_reachable_from_the_facade() {
    let rec = recommend("阅读 学习 理解");
    assert_eq!(rec.preset, WeightPreset::ReadingWisdom);
    assert_eq!(rec.keyword_hits, 3);
    // The recommended vector is ready to feed straight into a request.
    assert!(rec.weights.get(WeightDimension::EduValue) > 0.0);
}
