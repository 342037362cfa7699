//! Pool registry, water-chemistry evaluation, and service-visit scoring.

pub mod domain;
pub mod engine;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentSubmission, BandVerdict, ChemistryParameter, EquipmentItem, InvalidReadingError,
    IssueSeverity, LatestReading, PoolId, PoolProfile, PoolRegistration, ReadingSubmission,
    ServiceVisit, TaskStatus, VisitIssue, VisitSubmission, VisitTask, WaterChemistryReading,
    WaterClarity,
};
pub use engine::{
    EvaluationResult, LetterGrade, Recommendation, RecommendationKind, RecommendationPriority,
    Trend,
};
pub use intake::IntakeError;
pub use repository::{
    AlertError, AlertPublisher, AssessmentView, CareAlert, ChemistryStatusView, PoolRecord,
    PoolRepository, PoolStatusView, RepositoryError, VisitScoreView,
};
pub use router::pool_router;
pub use service::{PoolCareError, PoolCareService};
