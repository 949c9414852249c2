//! Core traits, types, and error types for the fablesearch tiered search
//! orchestrator.
//!
//! This crate defines the shared interfaces (`TierSearch`, `QueryEmbedder`),
//! the weight model (`SearchWeights`, `WeightPreset`), result and tier types
//! (`IllustrationHit`, `SearchTier`), error types (`SearchError`), and the
//! workspace tracing conventions used across all fablesearch crates.
//!
//! It has minimal external dependencies and is intended to be depended on by
//! every other crate in the workspace.

pub mod config;
pub mod error;
pub mod tracing_config;
pub mod traits;
pub mod types;
pub mod weights;

pub use config::TieredConfig;
pub use error::{FailureClass, SearchError, SearchResult};
pub use traits::{BoxFuture, QueryEmbedder, TierSearch};
pub use types::{IllustrationHit, SearchTier, TierRequest};
pub use weights::{PartialWeights, SearchWeights, WeightDimension, WeightPreset};
