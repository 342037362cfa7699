use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::pools::domain::{
    PoolId, PoolProfile, PoolRegistration, ReadingSubmission, ServiceVisit, TaskStatus, VisitTask,
    VisitSubmission, WaterChemistryReading,
};
use crate::pools::repository::{
    AlertError, AlertPublisher, CareAlert, PoolRecord, PoolRepository, RepositoryError,
};
use crate::pools::router::pool_router;
use crate::pools::service::PoolCareService;

pub(super) fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 5, 12, 0, 0).single().expect("valid timestamp")
}

pub(super) fn sampled_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 5, 9, 0, 0).single().expect("valid timestamp")
}

pub(super) fn registration(suffix: &str) -> PoolRegistration {
    PoolRegistration {
        pool_id: format!("pool-{suffix}"),
        name: "Lakeside Residence".to_string(),
        volume_gallons: 18_000,
    }
}

pub(super) fn reading_submission(ph: f64, chlorine: f64, alkalinity: f64) -> ReadingSubmission {
    ReadingSubmission {
        ph,
        free_chlorine_ppm: chlorine,
        total_alkalinity_ppm: alkalinity,
        calcium_hardness_ppm: 250.0,
        cyanuric_acid_ppm: 40.0,
        temperature_f: 82.0,
        taken_at: sampled_at(),
        notes: None,
    }
}

pub(super) fn visit_submission(statuses: &[TaskStatus]) -> VisitSubmission {
    VisitSubmission {
        visited_on: NaiveDate::from_ymd_opt(2026, 6, 5).expect("valid date"),
        tasks: statuses
            .iter()
            .map(|status| VisitTask {
                name: "Brush walls".to_string(),
                status: *status,
            })
            .collect(),
        issues: Vec::new(),
        customer_rating: None,
    }
}

pub(super) fn build_service() -> (
    PoolCareService<MemoryRepository, MemoryAlerts>,
    Arc<MemoryRepository>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = PoolCareService::new(repository.clone(), alerts.clone());
    (service, repository, alerts)
}

pub(super) fn build_router() -> axum::Router {
    let (service, _, _) = build_service();
    pool_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<PoolId, PoolRecord>>>,
}

impl PoolRepository for MemoryRepository {
    fn register(&self, profile: PoolProfile) -> Result<PoolRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&profile.pool_id) {
            return Err(RepositoryError::Conflict);
        }
        let record = PoolRecord::new(profile);
        guard.insert(record.profile.pool_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &PoolId) -> Result<Option<PoolRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn record_reading(
        &self,
        id: &PoolId,
        reading: WaterChemistryReading,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let position = record
            .readings
            .iter()
            .position(|existing| existing.taken_at < reading.taken_at)
            .unwrap_or(record.readings.len());
        record.readings.insert(position, reading);
        Ok(())
    }

    fn record_visit(&self, id: &PoolId, visit: ServiceVisit) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.visits.push(visit);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<CareAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<CareAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: CareAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
