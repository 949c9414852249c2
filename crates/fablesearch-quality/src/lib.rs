//! Result-quality assessment and weight recommendation for fablesearch.
//!
//! Two pure, synchronous services over [`fablesearch_core`] types:
//!
//! - [`assess`]: grade a result set (score statistics, distribution,
//!   keyword diversity, an A-D letter grade).
//! - [`recommend`]: map free-text query content to the weight preset most
//!   likely to rank well for it.
//!
//! Both are infallible and allocation-light; the tiered client calls them
//! inline on the hot path.

pub mod assess;
pub mod recommend;

pub use assess::{QualityAssessment, QualityGrade, ScoreDistribution, assess, diversity_index};
pub use recommend::{Recommendation, recommend};
