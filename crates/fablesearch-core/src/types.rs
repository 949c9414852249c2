use serde::{Deserialize, Serialize};

use crate::weights::SearchWeights;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One matched illustration as returned by the ranking backend.
///
/// Immutable once received: the `final_score` is produced by the backend's
/// weighted ranking and is never recomputed client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IllustrationHit {
    /// Unique record identifier.
    pub id: u64,
    /// Book or illustration title.
    pub title: String,
    /// Reference to the stored image.
    pub image_url: String,
    /// Original free-text description; the diversity index is computed
    /// from this field.
    pub original_description: String,
    /// Per-dimension descriptive text: theme and philosophy.
    pub philosophy: String,
    /// Per-dimension descriptive text: actions and processes.
    pub action_process: String,
    /// Per-dimension descriptive text: relationships and roles.
    pub interpersonal_roles: String,
    /// Per-dimension descriptive text: educational value.
    pub edu_value: String,
    /// Per-dimension descriptive text: learning strategies.
    pub learning_strategy: String,
    /// Per-dimension descriptive text: creative and playful elements.
    pub creative_play: String,
    /// Per-dimension descriptive text: scene and visuals.
    pub scene_visuals: String,
    /// Weighted ranking score in [0, 1].
    pub final_score: f32,
}

impl IllustrationHit {
    /// Ordering by `final_score` descending with NaN-safe semantics.
    /// NaN sorts below all real values (treated as worst possible score).
    #[must_use]
    pub fn cmp_by_score(&self, other: &Self) -> std::cmp::Ordering {
        let a = if self.final_score.is_nan() {
            f32::NEG_INFINITY
        } else {
            self.final_score
        };
        let b = if other.final_score.is_nan() {
            f32::NEG_INFINITY
        } else {
            other.final_score
        };
        // Descending: higher scores first.
        b.total_cmp(&a)
    }
}

// ---------------------------------------------------------------------------
// Search tiers
// ---------------------------------------------------------------------------

/// One ordered, fallback-capable backend search capability.
///
/// The fixed fallback priority is premium → optimized → simple → original:
/// degradation trades relevance quality for availability, never the reverse.
/// `Failed` is terminal and record-only: it marks an exhausted search in
/// the statistics, no backend implements it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTier {
    /// Curated, smaller, higher-quality subset of the corpus.
    Premium,
    /// Full corpus, strictest threshold, fastest index path.
    Optimized,
    /// Full corpus, reduced dimensionality, quick but coarser.
    Simple,
    /// Full corpus, most permissive and slowest compatibility path.
    Original,
    /// Every tier was exhausted; used only in statistics.
    Failed,
}

impl SearchTier {
    /// The fixed fallback priority among the searchable tiers.
    pub const FALLBACK_ORDER: [Self; 4] =
        [Self::Premium, Self::Optimized, Self::Simple, Self::Original];

    /// Lowercase name used in logs and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Optimized => "optimized",
            Self::Simple => "simple",
            Self::Original => "original",
            Self::Failed => "failed",
        }
    }

    /// Short human description used in the statistics report.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Premium => "curated premium subset",
            Self::Optimized => "7-dimension precise matching",
            Self::Simple => "fast semantic matching",
            Self::Original => "basic compatibility matching",
            Self::Failed => "exhausted",
        }
    }
}

impl std::fmt::Display for SearchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Request / response envelopes
// ---------------------------------------------------------------------------

/// The per-tier call contract handed to a [`crate::traits::TierSearch`]
/// backend. Weights are already normalized by the time a backend sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRequest {
    /// Fixed-dimensionality query embedding.
    pub embedding: Vec<f32>,
    /// Normalized relevance weights.
    pub weights: SearchWeights,
    /// Maximum number of results to return.
    pub limit: usize,
    /// Similarity threshold override; `None` means backend default.
    pub similarity_threshold: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn hit(id: u64, score: f32) -> IllustrationHit {
        IllustrationHit {
            id,
            title: format!("book-{id}"),
            image_url: format!("https://img.example/{id}.png"),
            original_description: "a quiet walk through the autumn forest".to_owned(),
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

    #[test]
    fn fallback_order_is_premium_first() {
        assert_eq!(
            SearchTier::FALLBACK_ORDER,
            [
                SearchTier::Premium,
                SearchTier::Optimized,
                SearchTier::Simple,
                SearchTier::Original,
            ]
        );
    }

    #[test]
    fn failed_is_not_in_fallback_order() {
        assert!(!SearchTier::FALLBACK_ORDER.contains(&SearchTier::Failed));
    }

    #[test]
    fn tier_display_names() {
        assert_eq!(SearchTier::Premium.to_string(), "premium");
        assert_eq!(SearchTier::Failed.to_string(), "failed");
    }

    #[test]
    fn tier_serde_uses_snake_case() {
        let json = serde_json::to_string(&SearchTier::Optimized).expect("serialize");
        assert_eq!(json, "\"optimized\"");
        let decoded: SearchTier = serde_json::from_str("\"original\"").expect("deserialize");
        assert_eq!(decoded, SearchTier::Original);
    }

    #[test]
    fn hit_nan_safe_ordering() {
        let real = hit(1, 0.9);
        let nan = hit(2, f32::NAN);
        // NaN sorts below real values: the real hit comes first.
        assert_eq!(real.cmp_by_score(&nan), std::cmp::Ordering::Less);
        assert_eq!(nan.cmp_by_score(&real), std::cmp::Ordering::Greater);
    }

    #[test]
    fn hits_sort_descending_by_score() {
        let mut hits = vec![hit(1, 0.2), hit(2, 0.9), hit(3, 0.5)];
        hits.sort_by(IllustrationHit::cmp_by_score);
        let ids: Vec<u64> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn hit_serde_roundtrip() {
        let original = hit(42, 0.77);
        let json = serde_json::to_string(&original).expect("serialize");
        let decoded: IllustrationHit = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, original);
    }

    #[test]
    fn tier_request_serde_roundtrip() {
        let request = TierRequest {
            embedding: vec![0.1, 0.2, 0.3],
            weights: crate::weights::WeightPreset::Balanced.weights(),
            limit: 20,
            similarity_threshold: Some(0.02),
        };
        let json = serde_json::to_string(&request).expect("serialize");
        let decoded: TierRequest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, request);
    }
}
