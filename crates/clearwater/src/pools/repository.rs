use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{LatestReading, PoolId, PoolProfile, ServiceVisit, WaterChemistryReading};
use super::engine::{EvaluationResult, LetterGrade, Recommendation, Trend};

/// Repository record holding a pool's profile plus its reading and visit
/// history. Readings stay ordered most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub profile: PoolProfile,
    pub readings: Vec<WaterChemistryReading>,
    pub visits: Vec<ServiceVisit>,
}

impl PoolRecord {
    pub fn new(profile: PoolProfile) -> Self {
        Self {
            profile,
            readings: Vec::new(),
            visits: Vec::new(),
        }
    }

    pub fn latest_reading(&self) -> LatestReading {
        match self.readings.first() {
            Some(reading) => LatestReading::Recorded(reading.clone()),
            None => LatestReading::Missing,
        }
    }

    /// pH series in most-recent-first order, for trend classification.
    pub fn ph_history(&self) -> Vec<f64> {
        self.readings.iter().map(|reading| reading.ph).collect()
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait PoolRepository: Send + Sync {
    fn register(&self, profile: PoolProfile) -> Result<PoolRecord, RepositoryError>;
    fn fetch(&self, id: &PoolId) -> Result<Option<PoolRecord>, RepositoryError>;
    fn record_reading(
        &self,
        id: &PoolId,
        reading: WaterChemistryReading,
    ) -> Result<(), RepositoryError>;
    fn record_visit(&self, id: &PoolId, visit: ServiceVisit) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound alert hooks (e.g., SMS or e-mail adapters).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: CareAlert) -> Result<(), AlertError>;
}

/// Simple alert payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareAlert {
    pub template: String,
    pub pool_id: PoolId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized registration/status response for a pool.
#[derive(Debug, Clone, Serialize)]
pub struct PoolStatusView {
    pub pool_id: PoolId,
    pub name: String,
    pub readings_recorded: usize,
    pub visits_logged: usize,
}

impl From<&PoolRecord> for PoolStatusView {
    fn from(record: &PoolRecord) -> Self {
        Self {
            pool_id: record.profile.pool_id.clone(),
            name: record.profile.name.clone(),
            readings_recorded: record.readings.len(),
            visits_logged: record.visits.len(),
        }
    }
}

/// Chemistry state of a pool as exposed over HTTP. `evaluation` is absent
/// exactly when no reading is on file, which is itself an attention trigger.
#[derive(Debug, Clone, Serialize)]
pub struct ChemistryStatusView {
    pub pool_id: PoolId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationResult>,
    pub needs_attention: bool,
    pub recommendations: Vec<Recommendation>,
}

/// Outcome of logging a service visit.
#[derive(Debug, Clone, Serialize)]
pub struct VisitScoreView {
    pub pool_id: PoolId,
    pub visited_on: NaiveDate,
    pub quality_score: u8,
}

/// Weekly assessment response: sub-scores, composite grade, and the pH trend
/// across the stored history.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub pool_id: PoolId,
    pub chemistry_score: f64,
    pub clarity_score: f64,
    pub equipment_score: f64,
    pub overall_grade: LetterGrade,
    pub ph_trend: Trend,
}
