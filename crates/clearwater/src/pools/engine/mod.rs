//! Pure water-chemistry evaluation engine.
//!
//! Every function here is deterministic and side-effect free: the same reading,
//! visit, or series always produces the same verdicts, scores, and grades, so
//! callers recompute on read instead of caching derived results.

pub mod bands;
mod evaluation;
mod grade;
mod quality;
mod recommendation;
mod trend;

pub use evaluation::{evaluate, EvaluationResult};
pub use grade::{
    chemistry_subscore, clarity_score, equipment_score, letter_grade, LetterGrade,
};
pub use quality::visit_quality_score;
pub use recommendation::{
    recommend, Recommendation, RecommendationKind, RecommendationPriority, TEST_NEEDED_MESSAGE,
};
pub use trend::{classify as classify_trend, Trend};
