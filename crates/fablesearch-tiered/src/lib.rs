//! Tiered fallback search client for fablesearch.
//!
//! [`TieredSearcher`] cascades through backend tiers (premium → optimized →
//! simple → original by default) until one produces results, assessing
//! result quality on the way out and recording usage in a shared
//! [`SearchStatsAggregator`]. [`TieredSearcher::batch_search`] fans one
//! query out across several weight configurations concurrently and merges
//! the ranked results.

pub mod stats;
pub mod tiered;

pub use stats::{SearchStats, SearchStatsAggregator, TierUsage};
pub use tiered::{SearchRequest, TieredResponse, TieredSearcher};
