use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use clearwater::pools::{
    AlertError, AlertPublisher, CareAlert, PoolId, PoolProfile, PoolRecord, PoolRepository,
    RepositoryError, ServiceVisit, WaterChemistryReading,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPoolRepository {
    records: Arc<Mutex<HashMap<PoolId, PoolRecord>>>,
}

impl PoolRepository for InMemoryPoolRepository {
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
        // History stays most-recent-first; imports may arrive in file order.
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
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<CareAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: CareAlert) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<CareAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
