//! Integration scenarios for the pool-care intake, evaluation, and scoring
//! workflow, driven through the public service facade and HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};

    use clearwater::pools::{
        AlertError, AlertPublisher, CareAlert, PoolCareService, PoolId, PoolProfile, PoolRecord,
        PoolRegistration, PoolRepository, ReadingSubmission, RepositoryError, ServiceVisit,
        WaterChemistryReading,
    };

    pub(super) fn evaluation_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 5, 12, 0, 0).single().expect("valid timestamp")
    }

    pub(super) fn registration(suffix: &str) -> PoolRegistration {
        PoolRegistration {
            pool_id: format!("pool-{suffix}"),
            name: "Juniper Court HOA".to_string(),
            volume_gallons: 32_000,
        }
    }

    pub(super) fn reading(ph: f64, chlorine: f64, alkalinity: f64) -> ReadingSubmission {
        ReadingSubmission {
            ph,
            free_chlorine_ppm: chlorine,
            total_alkalinity_ppm: alkalinity,
            calcium_hardness_ppm: 275.0,
            cyanuric_acid_ppm: 35.0,
            temperature_f: 84.0,
            taken_at: Utc.with_ymd_and_hms(2026, 6, 5, 9, 0, 0).single().expect("valid timestamp"),
            notes: Some("weekly test".to_string()),
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<PoolId, PoolRecord>>>,
    }

    impl PoolRepository for MemoryRepository {
        fn register(&self, profile: PoolProfile) -> Result<PoolRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&profile.pool_id) {
                return Err(RepositoryError::Conflict);
            }
            let record = PoolRecord::new(profile);
            guard.insert(record.profile.pool_id.clone(), record.clone());
            Ok(record)
        }

        fn fetch(&self, id: &PoolId) -> Result<Option<PoolRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn record_reading(
            &self,
            id: &PoolId,
            reading: WaterChemistryReading,
        ) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
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
            let mut guard = self.records.lock().expect("lock");
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
            self.events.lock().expect("lock").clone()
        }
    }

    impl AlertPublisher for MemoryAlerts {
        fn publish(&self, alert: CareAlert) -> Result<(), AlertError> {
            self.events.lock().expect("lock").push(alert);
            Ok(())
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
}

mod evaluation {
    use super::common::*;
    use clearwater::pools::{BandVerdict, RecommendationPriority};

    #[test]
    fn unbalanced_reading_flows_from_intake_to_recommendations() {
        let (service, _, alerts) = build_service();
        let registered = service
            .register_pool(registration("eval"))
            .expect("registration succeeds");

        let view = service
            .record_reading(&registered.pool_id, reading(7.8, 0.5, 100.0), evaluation_time())
            .expect("reading records");

        let evaluation = view.evaluation.expect("evaluation present");
        assert_eq!(evaluation.ph, BandVerdict::Above);
        assert_eq!(evaluation.free_chlorine, BandVerdict::Below);
        assert_eq!(evaluation.total_alkalinity, BandVerdict::Within);
        assert!(view.needs_attention);

        assert_eq!(view.recommendations.len(), 2);
        assert_eq!(view.recommendations[0].priority, RecommendationPriority::High);
        assert_eq!(
            view.recommendations[1].priority,
            RecommendationPriority::Urgent
        );

        assert_eq!(alerts.events().len(), 1, "urgent chlorine raises an alert");
    }

    #[test]
    fn balanced_reading_raises_nothing() {
        let (service, _, alerts) = build_service();
        let registered = service
            .register_pool(registration("calm"))
            .expect("registration succeeds");

        let view = service
            .record_reading(&registered.pool_id, reading(7.4, 2.0, 100.0), evaluation_time())
            .expect("reading records");

        assert!(!view.needs_attention);
        assert!(view.recommendations.is_empty());
        assert!(alerts.events().is_empty());
    }
}

mod scoring {
    use super::common::*;
    use chrono::NaiveDate;
    use clearwater::pools::{
        AssessmentSubmission, EquipmentItem, IssueSeverity, LetterGrade, TaskStatus, Trend,
        VisitIssue, VisitSubmission, VisitTask, WaterClarity,
    };

    fn task(name: &str, status: TaskStatus) -> VisitTask {
        VisitTask {
            name: name.to_string(),
            status,
        }
    }

    #[test]
    fn visit_quality_and_weekly_grade_agree_with_the_worked_examples() {
        let (service, _, _) = build_service();
        let registered = service
            .register_pool(registration("score"))
            .expect("registration succeeds");
        service
            .record_reading(&registered.pool_id, reading(7.8, 2.0, 100.0), evaluation_time())
            .expect("reading records");

        let visit = VisitSubmission {
            visited_on: NaiveDate::from_ymd_opt(2026, 6, 5).expect("valid date"),
            tasks: vec![
                task("Skim surface", TaskStatus::Completed),
                task("Backwash filter", TaskStatus::Failed),
                task("Brush walls", TaskStatus::Completed),
            ],
            issues: vec![VisitIssue {
                severity: IssueSeverity::Critical,
                description: "Return jet blocked".to_string(),
            }],
            customer_rating: Some(5),
        };
        let scored = service
            .log_visit(&registered.pool_id, visit)
            .expect("visit logs");
        assert_eq!(scored.quality_score, 80);

        let assessment = service
            .weekly_assessment(
                &registered.pool_id,
                AssessmentSubmission {
                    clarity: Some(WaterClarity::VeryCloudy),
                    equipment: vec![
                        EquipmentItem { name: "Pump".to_string(), working: true },
                        EquipmentItem { name: "Filter".to_string(), working: true },
                        EquipmentItem { name: "Heater".to_string(), working: false },
                        EquipmentItem { name: "Chlorinator".to_string(), working: true },
                    ],
                    evaluated_at: Some(evaluation_time()),
                },
                evaluation_time(),
            )
            .expect("assessment builds");

        assert_eq!(assessment.overall_grade, LetterGrade::D);
        assert_eq!(assessment.ph_trend, Trend::InsufficientData);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use clearwater::pools::pool_router;

    fn build_router() -> axum::Router {
        let (service, _, _) = build_service();
        pool_router(Arc::new(service))
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn register_record_and_inspect_over_http() {
        let router = build_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/pools")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "pool_id": "pool-http",
                            "name": "Juniper Court HOA",
                            "volume_gallons": 32_000,
                        }))
                        .expect("serialize"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);

        let taken_at = (Utc::now() - Duration::hours(1)).to_rfc3339();
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/pools/pool-http/readings")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "ph": 7.1,
                            "free_chlorine_ppm": 2.0,
                            "total_alkalinity_ppm": 70.0,
                            "calcium_hardness_ppm": 275.0,
                            "temperature_f": 84.0,
                            "taken_at": taken_at,
                        }))
                        .expect("serialize"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let payload = read_json(response).await;
        assert_eq!(payload.get("needs_attention"), Some(&json!(true)));

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/pools/pool-http/recommendations")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({ "symptoms": ["cloudy water"] }))
                            .expect("serialize"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        let recommendations = payload
            .get("recommendations")
            .and_then(Value::as_array)
            .expect("recommendations array");
        // Low pH, low alkalinity, then the cloudy-water follow-up.
        assert_eq!(recommendations.len(), 3);
        assert_eq!(
            recommendations[2].get("kind"),
            Some(&json!("maintenance"))
        );
    }
}
