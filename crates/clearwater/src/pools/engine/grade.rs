use serde::{Deserialize, Serialize};

use super::super::domain::{EquipmentItem, WaterClarity};
use super::bands;
use super::evaluation::EvaluationResult;

/// Letter classification for a weekly composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub const fn label(self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

/// Highest first; first match wins. The D band is two notches wide, like the
/// plus/plain pairs above it.
const CUTOFFS: [(f64, LetterGrade); 7] = [
    (97.0, LetterGrade::APlus),
    (93.0, LetterGrade::A),
    (87.0, LetterGrade::BPlus),
    (83.0, LetterGrade::B),
    (77.0, LetterGrade::CPlus),
    (73.0, LetterGrade::C),
    (63.0, LetterGrade::D),
];

/// Grade the unweighted mean of the three weekly sub-scores.
pub fn letter_grade(chemistry_score: f64, clarity_score: f64, equipment_score: f64) -> LetterGrade {
    let overall = (chemistry_score + clarity_score + equipment_score) / 3.0;
    for (cutoff, grade) in CUTOFFS {
        if overall >= cutoff {
            return grade;
        }
    }
    LetterGrade::F
}

/// Clarity sub-score from the reported observation; unreported clarity gets
/// the neutral fallback.
pub fn clarity_score(clarity: Option<WaterClarity>) -> f64 {
    match clarity {
        Some(WaterClarity::CrystalClear) => 100.0,
        Some(WaterClarity::SlightlyCloudy) => 80.0,
        Some(WaterClarity::Cloudy) => 60.0,
        Some(WaterClarity::VeryCloudy) => 40.0,
        Some(WaterClarity::Murky) => 20.0,
        None => bands::UNKNOWN_SUBSCORE,
    }
}

/// Equipment sub-score: fraction of inventory in working order, or the neutral
/// fallback when nothing is on file.
pub fn equipment_score(equipment: &[EquipmentItem]) -> f64 {
    if equipment.is_empty() {
        return bands::UNKNOWN_SUBSCORE;
    }
    let working = equipment.iter().filter(|item| item.working).count();
    100.0 * working as f64 / equipment.len() as f64
}

/// Weekly chemistry sub-score: flat deduction per out-of-band parameter,
/// floored at zero. Deliberately a different formula from the visit quality
/// score; the two are never unified.
pub fn chemistry_subscore(evaluation: &EvaluationResult) -> f64 {
    let mut score = 100.0;
    if !evaluation.ph.is_within() {
        score -= bands::PH_DEVIATION_PENALTY;
    }
    if !evaluation.free_chlorine.is_within() {
        score -= bands::CHLORINE_DEVIATION_PENALTY;
    }
    if !evaluation.total_alkalinity.is_within() {
        score -= bands::ALKALINITY_DEVIATION_PENALTY;
    }
    score.max(0.0)
}
