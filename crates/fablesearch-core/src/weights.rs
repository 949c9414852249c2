//! Named-dimension relevance weights and their presets.
//!
//! The backend ranks illustrations across seven fixed descriptive dimensions.
//! Callers may supply a full weight vector, a partial one, or none at all;
//! [`PartialWeights::normalized`] always produces a complete vector whose
//! components sum to ≈1.0.
//!
//! Weights are immutable value objects: every adjustment returns a fresh
//! copy, nothing is mutated in place.

use serde::{Deserialize, Serialize};

/// Sum tolerance before normalization forces a rescale.
///
/// Small caller imprecision (e.g. hand-written `0.33 + 0.33 + 0.34` splits
/// across fewer dimensions) is accepted as-is rather than introducing
/// renormalization noise.
pub const SUM_TOLERANCE: f32 = 0.1;

/// The seven fixed relevance dimensions of the illustration corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDimension {
    /// Underlying theme or philosophy of the story.
    Philosophy,
    /// Concrete actions and processes depicted.
    ActionProcess,
    /// Interpersonal relationships and character roles.
    InterpersonalRoles,
    /// Educational value.
    EduValue,
    /// Learning strategies conveyed.
    LearningStrategy,
    /// Creative and playful elements.
    CreativePlay,
    /// Scene composition and visual atmosphere.
    SceneVisuals,
}

impl WeightDimension {
    /// All dimensions in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Philosophy,
        Self::ActionProcess,
        Self::InterpersonalRoles,
        Self::EduValue,
        Self::LearningStrategy,
        Self::CreativePlay,
        Self::SceneVisuals,
    ];

    /// Stable snake_case name, matching the backend's column naming.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Philosophy => "philosophy",
            Self::ActionProcess => "action_process",
            Self::InterpersonalRoles => "interpersonal_roles",
            Self::EduValue => "edu_value",
            Self::LearningStrategy => "learning_strategy",
            Self::CreativePlay => "creative_play",
            Self::SceneVisuals => "scene_visuals",
        }
    }
}

impl std::fmt::Display for WeightDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A complete weight vector over the seven dimensions.
///
/// Values are accepted without clamping: normalization only considers the
/// sum, so negative or >1 inputs pass through rescaling unchanged in sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchWeights {
    pub philosophy: f32,
    pub action_process: f32,
    pub interpersonal_roles: f32,
    pub edu_value: f32,
    pub learning_strategy: f32,
    pub creative_play: f32,
    pub scene_visuals: f32,
}

impl SearchWeights {
    /// Weight assigned to a single dimension.
    #[must_use]
    pub const fn get(&self, dimension: WeightDimension) -> f32 {
        match dimension {
            WeightDimension::Philosophy => self.philosophy,
            WeightDimension::ActionProcess => self.action_process,
            WeightDimension::InterpersonalRoles => self.interpersonal_roles,
            WeightDimension::EduValue => self.edu_value,
            WeightDimension::LearningStrategy => self.learning_strategy,
            WeightDimension::CreativePlay => self.creative_play,
            WeightDimension::SceneVisuals => self.scene_visuals,
        }
    }

    /// Sum of all seven components.
    #[must_use]
    pub fn sum(&self) -> f32 {
        WeightDimension::ALL.iter().map(|&d| self.get(d)).sum()
    }

    /// Returns a copy rescaled so the components sum to 1.0, unless the sum
    /// is already within [`SUM_TOLERANCE`] of 1.0, in which case the vector
    /// is returned unchanged.
    ///
    /// Idempotent: normalizing a normalized vector is a no-op.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if (sum - 1.0).abs() <= SUM_TOLERANCE {
            return *self;
        }
        let scale = 1.0 / sum;
        Self {
            philosophy: self.philosophy * scale,
            action_process: self.action_process * scale,
            interpersonal_roles: self.interpersonal_roles * scale,
            edu_value: self.edu_value * scale,
            learning_strategy: self.learning_strategy * scale,
            creative_play: self.creative_play * scale,
            scene_visuals: self.scene_visuals * scale,
        }
    }
}

impl Default for SearchWeights {
    /// The balanced preset: all dimensions weighted near-equally.
    fn default() -> Self {
        WeightPreset::Balanced.weights()
    }
}

/// Caller-supplied weights with any subset of dimensions present.
///
/// Missing dimensions are filled from the balanced preset before
/// normalization, so partial input is always completable and the weight
/// model has no error path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialWeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub philosophy: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_process: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpersonal_roles: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edu_value: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_strategy: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_play: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_visuals: Option<f32>,
}

impl PartialWeights {
    /// Fill missing dimensions from the balanced preset.
    #[must_use]
    pub fn complete(&self) -> SearchWeights {
        let balanced = WeightPreset::Balanced.weights();
        SearchWeights {
            philosophy: self.philosophy.unwrap_or(balanced.philosophy),
            action_process: self.action_process.unwrap_or(balanced.action_process),
            interpersonal_roles: self
                .interpersonal_roles
                .unwrap_or(balanced.interpersonal_roles),
            edu_value: self.edu_value.unwrap_or(balanced.edu_value),
            learning_strategy: self
                .learning_strategy
                .unwrap_or(balanced.learning_strategy),
            creative_play: self.creative_play.unwrap_or(balanced.creative_play),
            scene_visuals: self.scene_visuals.unwrap_or(balanced.scene_visuals),
        }
    }

    /// Complete and normalize in one step.
    #[must_use]
    pub fn normalized(&self) -> SearchWeights {
        self.complete().normalized()
    }
}

impl From<SearchWeights> for PartialWeights {
    fn from(weights: SearchWeights) -> Self {
        Self {
            philosophy: Some(weights.philosophy),
            action_process: Some(weights.action_process),
            interpersonal_roles: Some(weights.interpersonal_roles),
            edu_value: Some(weights.edu_value),
            learning_strategy: Some(weights.learning_strategy),
            creative_play: Some(weights.creative_play),
            scene_visuals: Some(weights.scene_visuals),
        }
    }
}

/// Named, statically defined weight vectors tuned per content category.
///
/// Presets are process-wide constants; `weights()` is pure lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPreset {
    /// All dimensions near-equal. The fill-in source for partial input.
    Balanced,
    /// Reading and comprehension content; leans on educational value.
    ReadingWisdom,
    /// Themes of personal growth and reflection.
    PhilosophyGrowth,
    /// Family bonds and interpersonal warmth.
    FamilyWarmth,
    /// Nature, seasons, and scenery.
    NatureSeasons,
    /// Imaginative and playful content.
    CreativeFantasy,
    /// Caller-supplied weights; carries no fixed vector of its own.
    Custom,
}

impl WeightPreset {
    /// All presets backed by a fixed vector, in display order.
    pub const NAMED: [Self; 6] = [
        Self::Balanced,
        Self::ReadingWisdom,
        Self::PhilosophyGrowth,
        Self::FamilyWarmth,
        Self::NatureSeasons,
        Self::CreativeFantasy,
    ];

    /// The static weight vector for this preset.
    ///
    /// `Custom` has no fixed vector and yields the balanced weights; callers
    /// using `Custom` are expected to supply their own `PartialWeights`.
    #[must_use]
    pub const fn weights(self) -> SearchWeights {
        match self {
            Self::Balanced | Self::Custom => SearchWeights {
                philosophy: 0.14,
                action_process: 0.14,
                interpersonal_roles: 0.14,
                edu_value: 0.14,
                learning_strategy: 0.14,
                creative_play: 0.15,
                scene_visuals: 0.15,
            },
            Self::ReadingWisdom => SearchWeights {
                philosophy: 0.2,
                action_process: 0.1,
                interpersonal_roles: 0.1,
                edu_value: 0.4,
                learning_strategy: 0.15,
                creative_play: 0.03,
                scene_visuals: 0.02,
            },
            Self::PhilosophyGrowth => SearchWeights {
                philosophy: 0.4,
                action_process: 0.1,
                interpersonal_roles: 0.1,
                edu_value: 0.2,
                learning_strategy: 0.1,
                creative_play: 0.05,
                scene_visuals: 0.05,
            },
            Self::FamilyWarmth => SearchWeights {
                philosophy: 0.15,
                action_process: 0.1,
                interpersonal_roles: 0.4,
                edu_value: 0.15,
                learning_strategy: 0.1,
                creative_play: 0.05,
                scene_visuals: 0.05,
            },
            Self::NatureSeasons => SearchWeights {
                philosophy: 0.1,
                action_process: 0.1,
                interpersonal_roles: 0.1,
                edu_value: 0.1,
                learning_strategy: 0.1,
                creative_play: 0.1,
                scene_visuals: 0.4,
            },
            Self::CreativeFantasy => SearchWeights {
                philosophy: 0.1,
                action_process: 0.15,
                interpersonal_roles: 0.1,
                edu_value: 0.1,
                learning_strategy: 0.1,
                creative_play: 0.4,
                scene_visuals: 0.05,
            },
        }
    }

    /// Stable snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::ReadingWisdom => "reading_wisdom",
            Self::PhilosophyGrowth => "philosophy_growth",
            Self::FamilyWarmth => "family_warmth",
            Self::NatureSeasons => "nature_seasons",
            Self::CreativeFantasy => "creative_fantasy",
            Self::Custom => "custom",
        }
    }

    /// Look a preset up by name. Returns `None` for unrecognized names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "balanced" => Some(Self::Balanced),
            "reading_wisdom" => Some(Self::ReadingWisdom),
            "philosophy_growth" => Some(Self::PhilosophyGrowth),
            "family_warmth" => Some(Self::FamilyWarmth),
            "nature_seasons" => Some(Self::NatureSeasons),
            "creative_fantasy" => Some(Self::CreativeFantasy),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
