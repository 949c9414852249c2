//! Quality assessment and statistics report example.
//!
//! Runs several searches with different weight presets against an in-memory
//! backend, prints each quality grade, and finishes with the aggregated
//! usage report and a preset recommendation.
//!
//! Run with: `cargo run --example quality_report`

use std::sync::Arc;

use asupersync::Cx;
use fablesearch::prelude::*;
use fablesearch::recommend;
use fablesearch_core::traits::BoxFuture;

const DIM: usize = 8;

struct DemoBackend {
    hits: Vec<IllustrationHit>,
}

impl TierSearch for DemoBackend {
    fn tier(&self) -> SearchTier {
        SearchTier::Premium
    }

    fn search<'a>(
        &'a self,
        _cx: &'a Cx,
        _request: &'a TierRequest,
    ) -> BoxFuture<'a, SearchResult<Vec<IllustrationHit>>> {
        Box::pin(async move { Ok(self.hits.clone()) })
    }
}

fn demo_hit(id: u64, score: f32, description: &str) -> IllustrationHit {
    IllustrationHit {
        id,
        title: format!("绘本 {id}"),
        image_url: format!("https://img.example/{id}.webp"),
        original_description: description.to_owned(),
        philosophy: String::new(),
        action_process: String::new(),
        interpersonal_roles: String::new(),
        edu_value: String::new(),
        learning_strategy: String::new(),
        creative_play: String::new(),
        scene_visuals: String::new(),
        final_score: score,
    }
}

fn main() {
    let backend = Arc::new(DemoBackend {
        hits: vec![
            demo_hit(1, 0.92, "红色狐狸穿过秋天的森林"),
            demo_hit(2, 0.87, "小女孩在海边堆沙堡"),
            demo_hit(3, 0.83, "爷爷在院子里修理旧木船"),
            demo_hit(4, 0.64, "雨后的屋顶上有一道彩虹"),
            demo_hit(5, 0.41, "厨房桌上的一篮苹果"),
        ],
    });
    let config = TieredConfig {
        embedding_dimension: DIM,
        ..TieredConfig::default()
    };
    let searcher = TieredSearcher::new(vec![backend], config).expect("valid config");

    // A query in each thematic direction.
    let queries = [
        ("阅读 学习 理解", WeightPreset::ReadingWisdom),
        ("森林 季节 动物", WeightPreset::NatureSeasons),
        ("魔法 冒险 想象", WeightPreset::CreativeFantasy),
    ];

    asupersync::test_utils::run_test_with_cx(|cx| {
        let searcher = &searcher;
        async move {
            for (text, preset) in queries {
                let suggestion = recommend(text);
                println!(
                    "Query \"{text}\": recommended preset {} ({})",
                    suggestion.preset, suggestion.reason
                );
                assert_eq!(suggestion.preset, preset);

                let request = SearchRequest {
                    query_embedding: (0..DIM).map(|i| i as f32 / DIM as f32).collect(),
                    weights: PartialWeights::from(suggestion.weights),
                    limit: 5,
                    query_text: Some(text.to_owned()),
                };
                let response = searcher.search(&cx, &request).await.expect("search");
                println!(
                    "  grade {}  avg {:.4}  diversity {:.4}  ({} excellent / {} good / {} fair / {} poor)\n",
                    response.quality.grade,
                    response.quality.avg_score,
                    response.quality.diversity_index,
                    response.quality.distribution.excellent,
                    response.quality.distribution.good,
                    response.quality.distribution.fair,
                    response.quality.distribution.poor,
                );
            }
        }
    });

    println!("{}", searcher.stats().report());
}
