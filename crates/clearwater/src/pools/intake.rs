use super::domain::{
    InvalidReadingError, PoolId, PoolProfile, PoolRegistration, ReadingSubmission, ServiceVisit,
    VisitSubmission, WaterChemistryReading,
};

/// Validation errors raised while admitting raw submissions.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Reading(#[from] InvalidReadingError),
    #[error("customer rating must be between 1 and 5 (found {0})")]
    RatingOutOfRange(u8),
    #[error("a service visit needs at least one task")]
    EmptyVisit,
    #[error("pool id cannot be empty")]
    MissingPoolId,
    #[error("pool name cannot be empty")]
    MissingPoolName,
}

/// Guard responsible for producing validated domain values from raw payloads.
/// Invalid shapes are caller contract violations and never reach the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn pool_from_registration(
        &self,
        registration: PoolRegistration,
    ) -> Result<PoolProfile, IntakeError> {
        if registration.pool_id.trim().is_empty() {
            return Err(IntakeError::MissingPoolId);
        }
        if registration.name.trim().is_empty() {
            return Err(IntakeError::MissingPoolName);
        }

        Ok(PoolProfile {
            pool_id: PoolId(registration.pool_id),
            name: registration.name,
            volume_gallons: registration.volume_gallons,
        })
    }

    pub fn reading_from_submission(
        &self,
        submission: ReadingSubmission,
    ) -> Result<WaterChemistryReading, IntakeError> {
        let reading = WaterChemistryReading {
            ph: submission.ph,
            free_chlorine_ppm: submission.free_chlorine_ppm,
            total_alkalinity_ppm: submission.total_alkalinity_ppm,
            calcium_hardness_ppm: submission.calcium_hardness_ppm,
            cyanuric_acid_ppm: submission.cyanuric_acid_ppm,
            temperature_f: submission.temperature_f,
            taken_at: submission.taken_at,
            notes: submission.notes,
        };
        reading.validate()?;
        Ok(reading)
    }

    pub fn visit_from_submission(
        &self,
        submission: VisitSubmission,
    ) -> Result<ServiceVisit, IntakeError> {
        if submission.tasks.is_empty() {
            return Err(IntakeError::EmptyVisit);
        }
        if let Some(rating) = submission.customer_rating {
            if !(1..=5).contains(&rating) {
                return Err(IntakeError::RatingOutOfRange(rating));
            }
        }

        Ok(ServiceVisit {
            visited_on: submission.visited_on,
            tasks: submission.tasks,
            issues: submission.issues,
            customer_rating: submission.customer_rating,
        })
    }
}
