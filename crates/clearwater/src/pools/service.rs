use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::imports::{ImportError, LabCsvImporter};

use super::domain::{
    AssessmentSubmission, InvalidReadingError, LatestReading, PoolId, PoolRegistration,
    ReadingSubmission, VisitSubmission,
};
use super::engine::{self, Recommendation, RecommendationPriority};
use super::intake::{IntakeError, IntakeGuard};
use super::repository::{
    AlertError, AlertPublisher, AssessmentView, CareAlert, ChemistryStatusView, PoolRepository,
    PoolStatusView, RepositoryError, VisitScoreView,
};

/// Service composing the intake guard, repository, alert hook, and the
/// evaluation engine.
pub struct PoolCareService<R, A> {
    guard: IntakeGuard,
    repository: Arc<R>,
    alerts: Arc<A>,
}

impl<R, A> PoolCareService<R, A>
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            alerts,
        }
    }

    /// Register a new pool, returning the repository-backed status view.
    pub fn register_pool(
        &self,
        registration: PoolRegistration,
    ) -> Result<PoolStatusView, PoolCareError> {
        let profile = self.guard.pool_from_registration(registration)?;
        let record = self.repository.register(profile)?;
        info!(pool_id = %record.profile.pool_id.0, "pool registered");
        Ok(PoolStatusView::from(&record))
    }

    /// Fetch a pool's registration/status view.
    pub fn pool_status(&self, pool_id: &PoolId) -> Result<PoolStatusView, PoolCareError> {
        let record = self
            .repository
            .fetch(pool_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(PoolStatusView::from(&record))
    }

    /// Admit a new reading, evaluate it, and publish a chemistry alert when an
    /// urgent recommendation fires.
    pub fn record_reading(
        &self,
        pool_id: &PoolId,
        submission: ReadingSubmission,
        now: DateTime<Utc>,
    ) -> Result<ChemistryStatusView, PoolCareError> {
        let reading = self.guard.reading_from_submission(submission)?;
        self.repository.record_reading(pool_id, reading.clone())?;

        let latest = LatestReading::Recorded(reading);
        let view = self.chemistry_view(pool_id, &latest, &[], now)?;

        let urgent_actions: Vec<&str> = view
            .recommendations
            .iter()
            .filter(|recommendation| recommendation.priority == RecommendationPriority::Urgent)
            .map(|recommendation| recommendation.message.as_str())
            .collect();
        if !urgent_actions.is_empty() {
            let mut details = BTreeMap::new();
            details.insert("priority".to_string(), "urgent".to_string());
            details.insert("actions".to_string(), urgent_actions.join("; "));
            self.alerts.publish(CareAlert {
                template: "chemistry_alert".to_string(),
                pool_id: pool_id.clone(),
                details,
            })?;
        }

        Ok(view)
    }

    /// Evaluate the latest reading on file. A pool with no readings is a valid
    /// state that needs attention.
    pub fn chemistry_status(
        &self,
        pool_id: &PoolId,
        now: DateTime<Utc>,
    ) -> Result<ChemistryStatusView, PoolCareError> {
        let record = self
            .repository
            .fetch(pool_id)?
            .ok_or(RepositoryError::NotFound)?;
        self.chemistry_view(pool_id, &record.latest_reading(), &[], now)
    }

    /// Recommendations for the latest reading plus any owner-reported symptoms.
    pub fn recommendations(
        &self,
        pool_id: &PoolId,
        symptoms: &[String],
    ) -> Result<Vec<Recommendation>, PoolCareError> {
        let record = self
            .repository
            .fetch(pool_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(engine::recommend(&record.latest_reading(), symptoms)?)
    }

    /// Log a service visit and score its outcome quality.
    pub fn log_visit(
        &self,
        pool_id: &PoolId,
        submission: VisitSubmission,
    ) -> Result<VisitScoreView, PoolCareError> {
        let visit = self.guard.visit_from_submission(submission)?;
        let quality_score = engine::visit_quality_score(&visit);
        let visited_on = visit.visited_on;
        self.repository.record_visit(pool_id, visit)?;

        Ok(VisitScoreView {
            pool_id: pool_id.clone(),
            visited_on,
            quality_score,
        })
    }

    /// Build the weekly assessment: sub-scores, composite letter grade, and
    /// the pH trend across the stored history.
    pub fn weekly_assessment(
        &self,
        pool_id: &PoolId,
        submission: AssessmentSubmission,
        now: DateTime<Utc>,
    ) -> Result<AssessmentView, PoolCareError> {
        let record = self
            .repository
            .fetch(pool_id)?
            .ok_or(RepositoryError::NotFound)?;
        let evaluated_at = submission.evaluated_at.unwrap_or(now);

        let chemistry_score = match record.latest_reading() {
            LatestReading::Missing => 0.0,
            LatestReading::Recorded(reading) => {
                engine::chemistry_subscore(&engine::evaluate(&reading, evaluated_at)?)
            }
        };
        let clarity_score = engine::clarity_score(submission.clarity);
        let equipment_score = engine::equipment_score(&submission.equipment);
        let overall_grade = engine::letter_grade(chemistry_score, clarity_score, equipment_score);
        let ph_trend = engine::classify_trend(&record.ph_history());

        Ok(AssessmentView {
            pool_id: pool_id.clone(),
            chemistry_score,
            clarity_score,
            equipment_score,
            overall_grade,
            ph_trend,
        })
    }

    /// Ingest a lab export of historical readings. Returns how many readings
    /// were recorded.
    pub fn import_readings<Rd: Read>(
        &self,
        pool_id: &PoolId,
        reader: Rd,
    ) -> Result<usize, PoolCareError> {
        let readings = LabCsvImporter::from_reader(reader)?;
        let imported = readings.len();
        for reading in readings {
            self.repository.record_reading(pool_id, reading)?;
        }
        info!(pool_id = %pool_id.0, imported, "lab export ingested");
        Ok(imported)
    }

    fn chemistry_view(
        &self,
        pool_id: &PoolId,
        latest: &LatestReading,
        symptoms: &[String],
        now: DateTime<Utc>,
    ) -> Result<ChemistryStatusView, PoolCareError> {
        let (evaluation, needs_attention) = match latest {
            LatestReading::Missing => (None, true),
            LatestReading::Recorded(reading) => {
                let evaluation = engine::evaluate(reading, now)?;
                (Some(evaluation), evaluation.needs_attention)
            }
        };
        let recommendations = engine::recommend(latest, symptoms)?;

        Ok(ChemistryStatusView {
            pool_id: pool_id.clone(),
            evaluation,
            needs_attention,
            recommendations,
        })
    }
}

/// Error raised by the pool-care service.
#[derive(Debug, thiserror::Error)]
pub enum PoolCareError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Reading(#[from] InvalidReadingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
    #[error(transparent)]
    Import(#[from] ImportError),
}
