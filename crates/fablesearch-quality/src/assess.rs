//! Result-set quality assessment.
//!
//! Scores a returned result set on two axes: how relevant the backend
//! considered the hits (score statistics and distribution) and how varied
//! the hits are among themselves (keyword-set diversity). The combination
//! yields a coarse A-D grade used for telemetry and degradation monitoring.
//!
//! Assessments are derived, non-persistent values: computed on demand,
//! reported, and discarded. They are never system-of-record state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use fablesearch_core::types::IllustrationHit;

/// Maximum keywords extracted per result description.
const MAX_KEYWORDS_PER_RESULT: usize = 20;

/// Stop words dropped during keyword extraction. The corpus descriptions
/// are predominantly Chinese; function words carry no diversity signal.
const STOP_WORDS: [&str; 18] = [
    "的", "了", "在", "是", "有", "和", "与", "或", "但", "而", "因为", "所以", "如果", "那么",
    "这个", "那个", "一个", "一些",
];

/// Separators for keyword extraction: whitespace plus CJK punctuation.
const CJK_PUNCTUATION: [char; 14] = [
    '，', '。', '！', '？', '、', '；', '：', '“', '”', '（', '）', '【', '】', '・',
];

/// Four-bucket relevance score distribution with fixed, strict boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    /// Scores above 0.8.
    pub excellent: usize,
    /// Scores in (0.6, 0.8].
    pub good: usize,
    /// Scores in (0.4, 0.6].
    pub fair: usize,
    /// Scores at or below 0.4.
    pub poor: usize,
}

/// Letter grade combining average relevance and diversity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    A,
    B,
    C,
    D,
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
        }
    }
}

/// Derived quality summary for one search's result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Mean `final_score`, rounded to 4 decimal places.
    pub avg_score: f64,
    /// Lowest `final_score`, rounded to 4 decimal places.
    pub min_score: f64,
    /// Highest `final_score`, rounded to 4 decimal places.
    pub max_score: f64,
    /// Bucketed score distribution.
    pub distribution: ScoreDistribution,
    /// 1 minus the average pairwise keyword-set similarity, in [0, 1].
    pub diversity_index: f64,
    /// Combined letter grade.
    pub grade: QualityGrade,
}

impl QualityAssessment {
    /// The defined assessment of an empty result set: all zeros, grade D.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            avg_score: 0.0,
            min_score: 0.0,
            max_score: 0.0,
            distribution: ScoreDistribution {
                excellent: 0,
                good: 0,
                fair: 0,
                poor: 0,
            },
            diversity_index: 0.0,
            grade: QualityGrade::D,
        }
    }
}

/// Assess a result set's quality.
///
/// An empty input yields [`QualityAssessment::empty`], a defined edge case
/// rather than an error. `query_text` is accepted for interface symmetry with the
/// recommender; it is reserved for query-aware weighting and does not
/// currently affect the computation.
#[must_use]
pub fn assess(results: &[IllustrationHit], query_text: &str) -> QualityAssessment {
    let _ = query_text;
    if results.is_empty() {
        return QualityAssessment::empty();
    }

    let scores: Vec<f64> = results.iter().map(|r| f64::from(r.final_score)).collect();
    let sum: f64 = scores.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let avg_score = sum / scores.len() as f64;
    let min_score = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Bucket in f32: widening 0.8_f32 to f64 lands just above the 0.8_f64
    // literal and would misplace exact-boundary scores.
    let mut distribution = ScoreDistribution::default();
    for result in results {
        let score = result.final_score;
        if score > 0.8 {
            distribution.excellent += 1;
        } else if score > 0.6 {
            distribution.good += 1;
        } else if score > 0.4 {
            distribution.fair += 1;
        } else {
            distribution.poor += 1;
        }
    }

    let diversity_index = diversity_index(results);

    // First matching row wins; the order is deliberate.
    let grade = if avg_score > 0.8 && diversity_index > 0.7 {
        QualityGrade::A
    } else if avg_score > 0.6 && diversity_index > 0.5 {
        QualityGrade::B
    } else if avg_score > 0.4 && diversity_index > 0.3 {
        QualityGrade::C
    } else {
        QualityGrade::D
    };

    QualityAssessment {
        avg_score: round4(avg_score),
        min_score: round4(min_score),
        max_score: round4(max_score),
        distribution,
        diversity_index: round4(diversity_index),
        grade,
    }
}

/// Compute the diversity index of a result set.
///
/// Diversity is 1 minus the average pairwise Jaccard similarity of the
/// per-result keyword sets. A single-result set has no pairs to compare and
/// is defined as diversity 0.
#[must_use]
pub fn diversity_index(results: &[IllustrationHit]) -> f64 {
    if results.len() <= 1 {
        return 0.0;
    }

    let keyword_sets: Vec<HashSet<String>> = results
        .iter()
        .map(|r| extract_keywords(&r.original_description))
        .collect();

    let mut total_similarity = 0.0;
    let mut comparisons = 0_u32;
    for i in 0..keyword_sets.len() {
        for j in (i + 1)..keyword_sets.len() {
            total_similarity += jaccard_similarity(&keyword_sets[i], &keyword_sets[j]);
            comparisons += 1;
        }
    }

    let avg_similarity = if comparisons > 0 {
        total_similarity / f64::from(comparisons)
    } else {
        0.0
    };
    1.0 - avg_similarity
}

/// Jaccard similarity between two keyword sets; 0.0 when both are empty.
fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    #[allow(clippy::cast_precision_loss)]
    let similarity = intersection as f64 / union as f64;
    similarity
}

/// Extract a bounded keyword set from descriptive text.
///
/// Lowercases, splits on whitespace and CJK punctuation, drops stop words
/// and single-character tokens, and caps at [`MAX_KEYWORDS_PER_RESULT`].
fn extract_keywords(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || CJK_PUNCTUATION.contains(&c))
        .filter(|token| token.chars().count() > 1 && !STOP_WORDS.contains(token))
        .map(str::to_owned)
        .take(MAX_KEYWORDS_PER_RESULT)
        .collect()
}

/// Round to 4 decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
