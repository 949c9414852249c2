//! Keyword-driven weight preset recommendation.
//!
//! Maps free-text query content to the weight preset most likely to rank
//! well for it. Stateless and infallible: a query with no recognizable
//! keywords still yields the default preset with a zero-count reason.
//!
//! The recommendation is advisory. The tiered client consults it for
//! telemetry when query text is available, but caller-supplied weights
//! always take precedence.

use serde::{Deserialize, Serialize};

use fablesearch_core::weights::{SearchWeights, WeightPreset};

/// Multiplier for a category's own keyword count.
const OWN_WEIGHT: usize = 3;

/// Multiplier for the related category's keyword count. Reflects that
/// adjacent categories (reading/philosophy, nature/creative) overlap
/// semantically in this corpus.
const CROSS_WEIGHT: usize = 1;

/// Reading and education terms.
const READING_KEYWORDS: [&str; 12] = [
    "阅读", "读书", "学习", "理解", "知识", "认字", "书本", "故事",
    "reading", "book", "study", "learn",
];

/// Philosophy and personal-growth terms.
const PHILOSOPHY_KEYWORDS: [&str; 11] = [
    "哲理", "成长", "思考", "感悟", "人生", "道理", "智慧", "勇气",
    "wisdom", "growth", "courage",
];

/// Family and warmth terms.
const FAMILY_KEYWORDS: [&str; 15] = [
    "家人", "家庭", "妈妈", "爸爸", "爷爷", "奶奶", "朋友", "陪伴", "关爱", "亲情", "分享",
    "family", "friend", "mother", "father",
];

/// Nature and seasons terms.
const NATURE_KEYWORDS: [&str; 15] = [
    "自然", "季节", "春天", "夏天", "秋天", "冬天", "森林", "花", "树", "动物", "风景",
    "nature", "season", "forest", "animal",
];

/// Creative and fantasy terms.
const CREATIVE_KEYWORDS: [&str; 14] = [
    "创意", "想象", "幻想", "魔法", "冒险", "童话", "梦想", "色彩", "游戏",
    "creative", "magic", "fantasy", "adventure", "imagination",
];

/// Outcome of a weight recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The selected preset.
    pub preset: WeightPreset,
    /// The preset's weight vector, ready to use.
    pub weights: SearchWeights,
    /// Human-readable justification citing the counted keyword hits.
    pub reason: String,
    /// Number of the winning category's own keywords found in the query.
    pub keyword_hits: usize,
}

/// Per-category keyword hit counts for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CategoryHits {
    reading: usize,
    philosophy: usize,
    family: usize,
    nature: usize,
    creative: usize,
}

impl CategoryHits {
    fn count(query: &str) -> Self {
        let text = query.to_lowercase();
        let hits = |keywords: &[&str]| keywords.iter().filter(|kw| text.contains(*kw)).count();
        Self {
            reading: hits(&READING_KEYWORDS),
            philosophy: hits(&PHILOSOPHY_KEYWORDS),
            family: hits(&FAMILY_KEYWORDS),
            nature: hits(&NATURE_KEYWORDS),
            creative: hits(&CREATIVE_KEYWORDS),
        }
    }

    /// Score for a preset: 3 × own count + 1 × related-category count.
    ///
    /// Related pairs: reading ↔ philosophy, family ← reading (shared
    /// story-time vocabulary), nature ↔ creative.
    fn score(self, preset: WeightPreset) -> usize {
        let (own, related) = match preset {
            WeightPreset::ReadingWisdom => (self.reading, self.philosophy),
            WeightPreset::PhilosophyGrowth => (self.philosophy, self.reading),
            WeightPreset::FamilyWarmth => (self.family, self.reading),
            WeightPreset::NatureSeasons => (self.nature, self.creative),
            WeightPreset::CreativeFantasy => (self.creative, self.nature),
            WeightPreset::Balanced | WeightPreset::Custom => (0, 0),
        };
        OWN_WEIGHT * own + CROSS_WEIGHT * related
    }

    const fn own_count(self, preset: WeightPreset) -> usize {
        match preset {
            WeightPreset::ReadingWisdom => self.reading,
            WeightPreset::PhilosophyGrowth => self.philosophy,
            WeightPreset::FamilyWarmth => self.family,
            WeightPreset::NatureSeasons => self.nature,
            WeightPreset::CreativeFantasy => self.creative,
            WeightPreset::Balanced | WeightPreset::Custom => 0,
        }
    }
}

/// Candidate presets in tie-breaking order; the first entry is the default.
const CANDIDATES: [WeightPreset; 5] = [
    WeightPreset::ReadingWisdom,
    WeightPreset::PhilosophyGrowth,
    WeightPreset::FamilyWarmth,
    WeightPreset::NatureSeasons,
    WeightPreset::CreativeFantasy,
];

const CATEGORY_LABELS: [(&str, &str); 5] = [
    ("reading_wisdom", "reading/education"),
    ("philosophy_growth", "philosophy/growth"),
    ("family_warmth", "family/warmth"),
    ("nature_seasons", "nature/seasons"),
    ("creative_fantasy", "creative/fantasy"),
];

fn category_label(preset: WeightPreset) -> &'static str {
    CATEGORY_LABELS
        .iter()
        .find(|(name, _)| *name == preset.name())
        .map_or("unknown", |(_, label)| label)
}

/// Recommend a weight preset for a free-text query.
///
/// Selects the preset with the strictly highest score; ties (including the
/// all-zero case) resolve to [`WeightPreset::ReadingWisdom`]. Never fails.
#[must_use]
pub fn recommend(query_text: &str) -> Recommendation {
    let hits = CategoryHits::count(query_text);

    let mut best = CANDIDATES[0];
    let mut best_score = hits.score(best);
    for &candidate in &CANDIDATES[1..] {
        let score = hits.score(candidate);
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }

    let keyword_hits = hits.own_count(best);
    let reason = if best_score == 0 {
        format!(
            "no category keywords detected (0 hits); defaulting to the {best} preset"
        )
    } else {
        format!(
            "matched {keyword_hits} {} keyword(s); recommending the {best} preset",
            category_label(best)
        )
    };

    tracing::debug!(
        target: "fablesearch",
        preset = best.name(),
        keyword_hits,
        score = best_score,
        "weight preset recommended"
    );

    Recommendation {
        preset: best,
        weights: best.weights(),
        reason,
        keyword_hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_query_is_deterministic() {
        for _ in 0..3 {
            let rec = recommend("阅读 学习 理解");
            assert_eq!(rec.preset, WeightPreset::ReadingWisdom);
            assert_eq!(rec.keyword_hits, 3);
            assert!(rec.reason.contains('3'), "reason: {}", rec.reason);
        }
    }

    #[test]
    fn empty_query_defaults_to_reading_wisdom() {
        let rec = recommend("");
        assert_eq!(rec.preset, WeightPreset::ReadingWisdom);
        assert_eq!(rec.keyword_hits, 0);
        assert!(rec.reason.contains('0'), "reason: {}", rec.reason);
    }

    #[test]
    fn unrelated_query_defaults_with_zero_hits() {
        let rec = recommend("quarterly revenue projections");
        assert_eq!(rec.preset, WeightPreset::ReadingWisdom);
        assert_eq!(rec.keyword_hits, 0);
    }

    #[test]
    fn family_query_selects_family_warmth() {
        let rec = recommend("妈妈 爸爸 陪伴 亲情");
        assert_eq!(rec.preset, WeightPreset::FamilyWarmth);
        assert_eq!(rec.keyword_hits, 4);
        assert_eq!(rec.weights, WeightPreset::FamilyWarmth.weights());
    }

    #[test]
    fn nature_query_selects_nature_seasons() {
        let rec = recommend("森林 动物 秋天 风景");
        assert_eq!(rec.preset, WeightPreset::NatureSeasons);
        assert_eq!(rec.keyword_hits, 4);
    }

    #[test]
    fn creative_query_selects_creative_fantasy() {
        let rec = recommend("魔法 冒险 童话");
        assert_eq!(rec.preset, WeightPreset::CreativeFantasy);
        assert_eq!(rec.keyword_hits, 3);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let rec = recommend("A MAGIC ADVENTURE in a FANTASY world");
        assert_eq!(rec.preset, WeightPreset::CreativeFantasy);
        assert_eq!(rec.keyword_hits, 3);
    }

    #[test]
    fn cross_credit_breaks_near_ties() {
        // Two philosophy terms and one reading term: philosophy scores
        // 3*2 + 1 = 7, reading scores 3*1 + 2 = 5.
        let rec = recommend("成长 智慧 阅读");
        assert_eq!(rec.preset, WeightPreset::PhilosophyGrowth);
        assert_eq!(rec.keyword_hits, 2);
    }

    #[test]
    fn exact_tie_resolves_to_default() {
        // One family term and one nature term score 3 each; family precedes
        // nature in candidate order and a tie never displaces the incumbent.
        let rec = recommend("朋友 森林");
        assert_eq!(rec.preset, WeightPreset::FamilyWarmth);
    }

    #[test]
    fn recommendation_never_fails_on_odd_input() {
        let rec = recommend("🦀🦀🦀 \u{0} \t\n");
        assert_eq!(rec.preset, WeightPreset::ReadingWisdom);
    }

    #[test]
    fn recommendation_serde_roundtrip() {
        let rec = recommend("阅读 魔法");
        let json = serde_json::to_string(&rec).expect("serialize");
        let decoded: Recommendation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, rec);
    }
}
