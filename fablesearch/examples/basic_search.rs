//! Basic tiered search example with in-memory demo backends.
//!
//! Shows the fallback cascade: the premium backend fails, the optimized
//! backend serves, and the response carries a quality assessment.
//!
//! Run with: `cargo run --example basic_search`

use std::sync::Arc;

use asupersync::Cx;
use fablesearch::prelude::*;
use fablesearch_core::traits::BoxFuture;

/// Demo backend serving a fixed hit list.
struct DemoBackend {
    tier: SearchTier,
    hits: Vec<IllustrationHit>,
}

impl TierSearch for DemoBackend {
    fn tier(&self) -> SearchTier {
        self.tier
    }

    fn search<'a>(
        &'a self,
        _cx: &'a Cx,
        _request: &'a TierRequest,
    ) -> BoxFuture<'a, SearchResult<Vec<IllustrationHit>>> {
        Box::pin(async move { Ok(self.hits.clone()) })
    }
}

/// Demo backend that always fails, to show the fallthrough.
struct BrokenBackend {
    tier: SearchTier,
}

impl TierSearch for BrokenBackend {
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
                source: std::io::Error::other("connection refused").into(),
            })
        })
    }
}

fn demo_hit(id: u64, score: f32, title: &str, description: &str) -> IllustrationHit {
    IllustrationHit {
        id,
        title: title.to_owned(),
        image_url: format!("https://img.example/{id}.webp"),
        original_description: description.to_owned(),
        philosophy: "成长与勇气".to_owned(),
        action_process: "探索 发现".to_owned(),
        interpersonal_roles: "朋友 家人".to_owned(),
        edu_value: "观察自然".to_owned(),
        learning_strategy: "提问 模仿".to_owned(),
        creative_play: "想象游戏".to_owned(),
        scene_visuals: "森林 黄昏".to_owned(),
        final_score: score,
    }
}

const DIM: usize = 8;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fablesearch=debug".into()),
        )
        .init();

    let config = TieredConfig {
        embedding_dimension: DIM,
        ..TieredConfig::default()
    };

    // Premium is down today; optimized will serve.
    let backends: Vec<Arc<dyn TierSearch>> = vec![
        Arc::new(BrokenBackend {
            tier: SearchTier::Premium,
        }),
        Arc::new(DemoBackend {
            tier: SearchTier::Optimized,
            hits: vec![
                demo_hit(1, 0.91, "森林的秘密", "红色狐狸穿过秋天的森林寻找过冬的浆果"),
                demo_hit(2, 0.84, "海边的下午", "小女孩和爷爷在海边堆了一座巨大的沙堡"),
                demo_hit(3, 0.77, "屋顶上的猫", "一只灰猫在雨后的屋顶上看彩虹"),
            ],
        }),
    ];
    let searcher = TieredSearcher::new(backends, config).expect("valid config");

    asupersync::test_utils::run_test_with_cx(|cx| {
        let searcher = &searcher;
        async move {
            let request = SearchRequest {
                query_embedding: (0..DIM).map(|i| i as f32 / DIM as f32).collect(),
                weights: PartialWeights::from(WeightPreset::NatureSeasons.weights()),
                limit: 10,
                query_text: Some("秋天森林里的动物".to_owned()),
            };

            let response = searcher.search(&cx, &request).await.expect("search");

            println!(
                "Served by {} tier in {}ms (grade {}):",
                response.tier, response.latency_ms, response.quality.grade
            );
            for (i, hit) in response.hits.iter().enumerate() {
                println!(
                    "  {}. {} (score: {:.4}) - {}",
                    i + 1,
                    hit.title,
                    hit.final_score,
                    hit.original_description
                );
            }
        }
    });

    println!("\n{}", searcher.stats().report());
}
