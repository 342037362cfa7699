use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{BandVerdict, InvalidReadingError, WaterChemistryReading};
use super::bands;

/// Per-parameter verdicts plus the aggregate attention flag for one reading.
/// Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub ph: BandVerdict,
    pub free_chlorine: BandVerdict,
    pub total_alkalinity: BandVerdict,
    pub stale: bool,
    pub needs_attention: bool,
}

/// Classify a reading against the target bands.
///
/// Calcium hardness and cyanuric acid are recorded but never banded. A reading
/// taken more than [`bands::READING_FRESHNESS_DAYS`] before `now` is stale, and
/// staleness alone is enough to need attention.
pub fn evaluate(
    reading: &WaterChemistryReading,
    now: DateTime<Utc>,
) -> Result<EvaluationResult, InvalidReadingError> {
    reading.validate()?;

    let ph = bands::PH.verdict(reading.ph);
    let free_chlorine = bands::FREE_CHLORINE_PPM.verdict(reading.free_chlorine_ppm);
    let total_alkalinity = bands::TOTAL_ALKALINITY_PPM.verdict(reading.total_alkalinity_ppm);
    let stale = now - reading.taken_at > Duration::days(bands::READING_FRESHNESS_DAYS);

    let needs_attention =
        stale || !ph.is_within() || !free_chlorine.is_within() || !total_alkalinity.is_within();

    Ok(EvaluationResult {
        ph,
        free_chlorine,
        total_alkalinity,
        stale,
        needs_attention,
    })
}
