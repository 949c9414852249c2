//! Seams between the orchestrator and its external collaborators.
//!
//! - [`TierSearch`]: one ranked-search capability of the vector-similarity
//!   backend (premium / optimized / simple / original).
//! - [`QueryEmbedder`]: the text-to-vector provider. The orchestrator only
//!   validates the vector's length; it never computes embeddings.
//!
//! All traits are object-safe (`dyn`-compatible) and `Send + Sync` for use
//! across async contexts.

use std::future::Future;
use std::pin::Pin;

use asupersync::Cx;

use crate::error::SearchResult;
use crate::types::{IllustrationHit, SearchTier, TierRequest};

/// Boxed future returned by object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One callable ranked-search capability of the backend.
///
/// Adding a tier means implementing this trait and listing the tier in the
/// client's priority order; the cascade itself never grows new branches.
///
/// # Contract
///
/// - `search` returns hits ordered by descending `final_score`.
/// - An empty `Vec` is a valid outcome ("no matches at this threshold"),
///   distinct from an error.
/// - Implementations should observe `cx` cancellation where their transport
///   supports it; the client stops waiting on timeout either way.
pub trait TierSearch: Send + Sync {
    /// Which tier this backend capability implements.
    fn tier(&self) -> SearchTier;

    /// Execute one ranked query against this tier.
    fn search<'a>(
        &'a self,
        cx: &'a Cx,
        request: &'a TierRequest,
    ) -> BoxFuture<'a, SearchResult<Vec<IllustrationHit>>>;
}

/// Narrow interface to the embedding provider.
///
/// # Contract
///
/// - `embed()` returns a vector with exactly `self.dimension()` elements.
/// - `dimension()` must be constant for the lifetime of the provider and
///   match the backend corpus it was provisioned for.
/// - `id()` must be stable across process restarts (it appears in telemetry).
pub trait QueryEmbedder: Send + Sync {
    /// Embed a single text string into a fixed-dimensionality vector.
    fn embed(&self, text: &str) -> SearchResult<Vec<f32>>;

    /// The dimensionality of vectors produced by this provider.
    fn dimension(&self) -> usize;

    /// A unique, stable identifier for this provider.
    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time checks for trait object safety.
    #[test]
    fn tier_search_trait_is_object_safe() {
        fn _takes_dyn_tier_search(_: &dyn TierSearch) {}
    }

    #[test]
    fn query_embedder_trait_is_object_safe() {
        fn _takes_dyn_embedder(_: &dyn QueryEmbedder) {}
    }
}
