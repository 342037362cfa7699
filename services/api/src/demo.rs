use crate::infra::{InMemoryAlertPublisher, InMemoryPoolRepository};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use clearwater::error::AppError;
use clearwater::imports::LabCsvImporter;
use clearwater::pools::engine;
use clearwater::pools::intake::IntakeGuard;
use clearwater::pools::{
    AssessmentSubmission, EquipmentItem, IssueSeverity, LatestReading, PoolCareService,
    PoolRegistration, ReadingSubmission, TaskStatus, VisitIssue, VisitSubmission, VisitTask,
    WaterClarity,
};

#[derive(Args, Debug)]
pub(crate) struct ChemistryReportArgs {
    /// Measured pH
    #[arg(long)]
    pub(crate) ph: f64,
    /// Free chlorine in ppm
    #[arg(long)]
    pub(crate) chlorine: f64,
    /// Total alkalinity in ppm
    #[arg(long)]
    pub(crate) alkalinity: f64,
    /// Calcium hardness in ppm
    #[arg(long, default_value_t = 250.0)]
    pub(crate) hardness: f64,
    /// Cyanuric acid in ppm
    #[arg(long, default_value_t = 0.0)]
    pub(crate) cyanuric_acid: f64,
    /// Water temperature in Fahrenheit
    #[arg(long, default_value_t = 80.0)]
    pub(crate) temperature: f64,
    /// Owner-reported symptoms (repeatable)
    #[arg(long)]
    pub(crate) symptom: Vec<String>,
    /// Optional lab CSV export to classify the pH trend
    #[arg(long)]
    pub(crate) lab_csv: Option<PathBuf>,
    /// Override the evaluation instant (RFC 3339; defaults to now)
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) evaluated_at: Option<DateTime<Utc>>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional lab CSV export to backfill the demo pool's history
    #[arg(long)]
    pub(crate) lab_csv: Option<PathBuf>,
}

pub(crate) fn run_chemistry_report(args: ChemistryReportArgs) -> Result<(), AppError> {
    let evaluated_at = args.evaluated_at.unwrap_or_else(Utc::now);

    let submission = ReadingSubmission {
        ph: args.ph,
        free_chlorine_ppm: args.chlorine,
        total_alkalinity_ppm: args.alkalinity,
        calcium_hardness_ppm: args.hardness,
        cyanuric_acid_ppm: args.cyanuric_acid,
        temperature_f: args.temperature,
        taken_at: evaluated_at,
        notes: None,
    };
    let reading = match IntakeGuard.reading_from_submission(submission) {
        Ok(reading) => reading,
        Err(err) => {
            println!("Reading rejected: {err}");
            return Ok(());
        }
    };

    println!("Chemistry report (evaluated {evaluated_at})");
    let latest = LatestReading::Recorded(reading);
    if let LatestReading::Recorded(reading) = &latest {
        let evaluation = match engine::evaluate(reading, evaluated_at) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                println!("Evaluation unavailable: {err}");
                return Ok(());
            }
        };
        println!(
            "- pH {} | chlorine {} | alkalinity {}",
            evaluation.ph.label(),
            evaluation.free_chlorine.label(),
            evaluation.total_alkalinity.label()
        );
        println!(
            "- needs attention: {}{}",
            evaluation.needs_attention,
            if evaluation.stale { " (stale reading)" } else { "" }
        );
    }

    let recommendations = match engine::recommend(&latest, &args.symptom) {
        Ok(recommendations) => recommendations,
        Err(err) => {
            println!("Recommendations unavailable: {err}");
            return Ok(());
        }
    };
    if recommendations.is_empty() {
        println!("- no recommended actions");
    } else {
        println!("Recommended actions:");
        for recommendation in &recommendations {
            println!(
                "  - [{:?}/{:?}] {}",
                recommendation.kind, recommendation.priority, recommendation.message
            );
        }
    }

    if let Some(path) = args.lab_csv {
        let csv = std::fs::read_to_string(path)?;
        let mut history = LabCsvImporter::from_reader(csv.as_bytes())?;
        history.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
        let ph_values: Vec<f64> = history.iter().map(|reading| reading.ph).collect();
        println!(
            "pH trend across {} samples: {}",
            history.len(),
            engine::classify_trend(&ph_values).label()
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Pool-care demo");

    let repository = Arc::new(InMemoryPoolRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = PoolCareService::new(repository, alerts.clone());

    let registered = match service.register_pool(PoolRegistration {
        pool_id: "pool-demo".to_string(),
        name: "Juniper Court HOA".to_string(),
        volume_gallons: 32_000,
    }) {
        Ok(view) => view,
        Err(err) => {
            println!("  Registration rejected: {err}");
            return Ok(());
        }
    };
    println!("- Registered {} ({})", registered.pool_id.0, registered.name);

    if let Some(path) = args.lab_csv {
        let csv = std::fs::read_to_string(path)?;
        match service.import_readings(&registered.pool_id, csv.as_bytes()) {
            Ok(imported) => println!("- Imported {imported} historical readings"),
            Err(err) => println!("  Import skipped: {err}"),
        }
    }

    let now = Utc::now();
    let reading = ReadingSubmission {
        ph: 7.8,
        free_chlorine_ppm: 0.5,
        total_alkalinity_ppm: 100.0,
        calcium_hardness_ppm: 250.0,
        cyanuric_acid_ppm: 40.0,
        temperature_f: 84.0,
        taken_at: now - Duration::hours(2),
        notes: Some("afternoon test".to_string()),
    };
    let status = match service.record_reading(&registered.pool_id, reading, now) {
        Ok(view) => view,
        Err(err) => {
            println!("  Reading rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Recorded reading -> needs attention: {}",
        status.needs_attention
    );
    for recommendation in &status.recommendations {
        println!("    - {}", recommendation.message);
    }

    let visit = VisitSubmission {
        visited_on: now.date_naive(),
        tasks: vec![
            VisitTask { name: "Skim surface".to_string(), status: TaskStatus::Completed },
            VisitTask { name: "Backwash filter".to_string(), status: TaskStatus::Failed },
            VisitTask { name: "Brush walls".to_string(), status: TaskStatus::Completed },
        ],
        issues: vec![VisitIssue {
            severity: IssueSeverity::Critical,
            description: "Heater fault".to_string(),
        }],
        customer_rating: Some(5),
    };
    match service.log_visit(&registered.pool_id, visit) {
        Ok(view) => println!("- Visit quality score: {}", view.quality_score),
        Err(err) => println!("  Visit rejected: {err}"),
    }

    let assessment = match service.weekly_assessment(
        &registered.pool_id,
        AssessmentSubmission {
            clarity: Some(WaterClarity::SlightlyCloudy),
            equipment: vec![
                EquipmentItem { name: "Pump".to_string(), working: true },
                EquipmentItem { name: "Filter".to_string(), working: true },
                EquipmentItem { name: "Heater".to_string(), working: false },
            ],
            evaluated_at: Some(now),
        },
        now,
    ) {
        Ok(view) => view,
        Err(err) => {
            println!("  Assessment unavailable: {err}");
            return Ok(());
        }
    };
    match serde_json::to_string_pretty(&assessment) {
        Ok(json) => println!("- Weekly assessment:\n{json}"),
        Err(err) => println!("  Assessment payload unavailable: {err}"),
    }

    let events = alerts.events();
    if events.is_empty() {
        println!("- External alerts: none dispatched");
    } else {
        println!("- External alerts:");
        for alert in events {
            println!("    - template={} -> {}", alert.template, alert.pool_id.0);
        }
    }

    Ok(())
}
