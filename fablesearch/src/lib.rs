//! fablesearch: weighted multi-tier semantic search.
//!
//! An orchestration layer over a vector-similarity backend for a corpus of
//! children's picture-book illustrations. Queries are ranked across seven
//! fixed relevance dimensions with caller-tunable weights; the client
//! degrades through backend tiers (premium → optimized → simple → original)
//! until one produces results, grades the result set, and keeps running
//! usage statistics.
//!
//! The crate never computes embeddings or similarity itself: those live
//! behind the [`core::traits::TierSearch`] and
//! [`core::traits::QueryEmbedder`] seams.

pub use fablesearch_core as core;
pub use fablesearch_quality as quality;
pub use fablesearch_tiered as tiered;

pub use fablesearch_core::config::TieredConfig;
pub use fablesearch_core::error::{FailureClass, SearchError, SearchResult};
pub use fablesearch_core::types::{IllustrationHit, SearchTier};
pub use fablesearch_core::weights::{PartialWeights, SearchWeights, WeightDimension, WeightPreset};
pub use fablesearch_quality::{QualityAssessment, QualityGrade, Recommendation, assess, recommend};
pub use fablesearch_tiered::{
    SearchRequest, SearchStats, SearchStatsAggregator, TieredResponse, TieredSearcher,
};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use fablesearch_core::config::TieredConfig;
    pub use fablesearch_core::error::{SearchError, SearchResult};
    pub use fablesearch_core::traits::{BoxFuture, QueryEmbedder, TierSearch};
    pub use fablesearch_core::types::{IllustrationHit, SearchTier, TierRequest};
    pub use fablesearch_core::weights::{PartialWeights, SearchWeights, WeightPreset};
    pub use fablesearch_quality::{QualityAssessment, QualityGrade};
    pub use fablesearch_tiered::{
        SearchRequest, SearchStatsAggregator, TieredResponse, TieredSearcher,
    };
}
