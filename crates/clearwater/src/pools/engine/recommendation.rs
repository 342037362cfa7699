use serde::{Deserialize, Serialize};

use super::super::domain::{InvalidReadingError, LatestReading, WaterChemistryReading};
use super::bands;

/// Category of a suggested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Chemical,
    Safety,
    Urgent,
    Maintenance,
}

/// Display/sort priority for a recommendation. Ordering is derived so callers
/// can sort most-urgent-first; the generator itself appends in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A typed, prioritized suggested action. Produced fresh from a reading and
/// reported symptoms; surfaced, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: RecommendationPriority,
    pub message: String,
}

impl Recommendation {
    fn new(
        kind: RecommendationKind,
        priority: RecommendationPriority,
        message: &str,
    ) -> Self {
        Self {
            kind,
            priority,
            message: message.to_string(),
        }
    }
}

pub const TEST_NEEDED_MESSAGE: &str = "Water chemistry test needed immediately";

/// Derive recommendations from the latest reading and any reported symptoms.
///
/// With no reading on file the answer is a single urgent request for a test and
/// nothing else; symptoms are not consulted in that case. Otherwise chemistry
/// checks append in fixed order (pH, chlorine, alkalinity), then symptom
/// matches in the order the symptoms were supplied.
pub fn recommend(
    latest: &LatestReading,
    symptoms: &[String],
) -> Result<Vec<Recommendation>, InvalidReadingError> {
    let reading = match latest {
        LatestReading::Missing => {
            return Ok(vec![Recommendation::new(
                RecommendationKind::Urgent,
                RecommendationPriority::Urgent,
                TEST_NEEDED_MESSAGE,
            )]);
        }
        LatestReading::Recorded(reading) => reading,
    };
    reading.validate()?;

    let mut recommendations = Vec::new();
    chemistry_checks(reading, &mut recommendations);
    symptom_checks(symptoms, &mut recommendations);
    Ok(recommendations)
}

fn chemistry_checks(reading: &WaterChemistryReading, out: &mut Vec<Recommendation>) {
    if reading.ph < bands::PH.low() {
        out.push(Recommendation::new(
            RecommendationKind::Chemical,
            RecommendationPriority::High,
            "pH is low; raise it with soda ash (sodium carbonate)",
        ));
    } else if reading.ph > bands::PH.high() {
        out.push(Recommendation::new(
            RecommendationKind::Chemical,
            RecommendationPriority::High,
            "pH is high; lower it with muriatic acid or sodium bisulfate",
        ));
    }

    if reading.free_chlorine_ppm < bands::FREE_CHLORINE_PPM.low() {
        out.push(Recommendation::new(
            RecommendationKind::Chemical,
            RecommendationPriority::Urgent,
            "Free chlorine is low; shock the pool or add liquid chlorine",
        ));
    } else if reading.free_chlorine_ppm > bands::FREE_CHLORINE_PPM.high() {
        out.push(Recommendation::new(
            RecommendationKind::Safety,
            RecommendationPriority::Medium,
            "Chlorine is elevated; allow levels to decrease before swimming",
        ));
    }

    if reading.total_alkalinity_ppm < bands::TOTAL_ALKALINITY_PPM.low() {
        out.push(Recommendation::new(
            RecommendationKind::Chemical,
            RecommendationPriority::Medium,
            "Total alkalinity is low; raise it with sodium bicarbonate",
        ));
    } else if reading.total_alkalinity_ppm > bands::TOTAL_ALKALINITY_PPM.high() {
        out.push(Recommendation::new(
            RecommendationKind::Chemical,
            RecommendationPriority::Medium,
            "Total alkalinity is high; lower it with muriatic acid",
        ));
    }
}

fn symptom_checks(symptoms: &[String], out: &mut Vec<Recommendation>) {
    for symptom in symptoms {
        let lowered = symptom.to_lowercase();
        if lowered.contains("algae") {
            out.push(Recommendation::new(
                RecommendationKind::Chemical,
                RecommendationPriority::High,
                "Shock treatment recommended to clear algae growth",
            ));
        }
        if lowered.contains("cloudy") {
            out.push(Recommendation::new(
                RecommendationKind::Maintenance,
                RecommendationPriority::Medium,
                "Inspect the filter and consider a clarifier for cloudy water",
            ));
        }
        if lowered.contains("smell") {
            out.push(Recommendation::new(
                RecommendationKind::Chemical,
                RecommendationPriority::Medium,
                "Strong smell suggests chloramines; test and shock the pool",
            ));
        }
    }
}
