use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for pools under management.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolId(pub String);

/// Registered pool metadata carried alongside readings and visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolProfile {
    pub pool_id: PoolId,
    pub name: String,
    pub volume_gallons: u32,
}

/// Parameters captured by a field test kit.
///
/// Calcium hardness and cyanuric acid are recorded but carry no target band;
/// only the first three are ever banded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChemistryParameter {
    Ph,
    FreeChlorine,
    TotalAlkalinity,
    CalciumHardness,
    CyanuricAcid,
}

impl ChemistryParameter {
    pub const fn label(self) -> &'static str {
        match self {
            ChemistryParameter::Ph => "pH",
            ChemistryParameter::FreeChlorine => "free chlorine",
            ChemistryParameter::TotalAlkalinity => "total alkalinity",
            ChemistryParameter::CalciumHardness => "calcium hardness",
            ChemistryParameter::CyanuricAcid => "cyanuric acid",
        }
    }
}

impl fmt::Display for ChemistryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single test-kit reading. Immutable once recorded; a pool owns an ordered
/// history of these keyed by `taken_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterChemistryReading {
    pub ph: f64,
    pub free_chlorine_ppm: f64,
    pub total_alkalinity_ppm: f64,
    pub calcium_hardness_ppm: f64,
    pub cyanuric_acid_ppm: f64,
    pub temperature_f: f64,
    pub taken_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl WaterChemistryReading {
    /// Check the declared invariants: pH inside the measurable range and no
    /// negative concentrations. Out-of-band values are not violations.
    pub fn validate(&self) -> Result<(), InvalidReadingError> {
        if !(0.0..=14.0).contains(&self.ph) {
            return Err(InvalidReadingError::PhOutOfRange(self.ph));
        }

        let concentrations = [
            (ChemistryParameter::FreeChlorine, self.free_chlorine_ppm),
            (ChemistryParameter::TotalAlkalinity, self.total_alkalinity_ppm),
            (ChemistryParameter::CalciumHardness, self.calcium_hardness_ppm),
            (ChemistryParameter::CyanuricAcid, self.cyanuric_acid_ppm),
        ];
        for (parameter, value) in concentrations {
            if !(value >= 0.0) {
                return Err(InvalidReadingError::NegativeConcentration { parameter, value });
            }
        }

        Ok(())
    }
}

/// Raised when a reading violates its declared invariants. Callers are
/// expected to validate before construction; the engine refuses to band such a
/// reading rather than produce a misleading verdict.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidReadingError {
    #[error("pH {0} is outside the measurable 0-14 range")]
    PhOutOfRange(f64),
    #[error("{parameter} concentration cannot be negative (found {value})")]
    NegativeConcentration {
        parameter: ChemistryParameter,
        value: f64,
    },
}

/// The most recent reading on file for a pool. Absence is a meaningful state
/// of its own, not a null to guard against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LatestReading {
    Missing,
    Recorded(WaterChemistryReading),
}

/// Classification of a measured value against its target band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandVerdict {
    Below,
    Within,
    Above,
}

impl BandVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            BandVerdict::Below => "below",
            BandVerdict::Within => "within",
            BandVerdict::Above => "above",
        }
    }

    pub const fn is_within(self) -> bool {
        matches!(self, BandVerdict::Within)
    }
}

/// Observed water clarity reported during a weekly assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterClarity {
    CrystalClear,
    SlightlyCloudy,
    Cloudy,
    VeryCloudy,
    Murky,
}

/// One piece of pool equipment and whether it is currently operational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub name: String,
    pub working: bool,
}

/// Lifecycle of a single task on a service visit checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
    Failed,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
            TaskStatus::Failed => "failed",
        }
    }
}

/// Severity of an issue discovered during a service visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Minor,
    Moderate,
    Major,
    Critical,
}

/// A checklist entry on a service visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitTask {
    pub name: String,
    pub status: TaskStatus,
}

/// An issue found during a service visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitIssue {
    pub severity: IssueSeverity,
    pub description: String,
}

/// Snapshot of a logged service visit, frozen once the visit completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceVisit {
    pub visited_on: NaiveDate,
    pub tasks: Vec<VisitTask>,
    pub issues: Vec<VisitIssue>,
    pub customer_rating: Option<u8>,
}

/// Raw pool registration payload, validated by the intake guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRegistration {
    pub pool_id: String,
    pub name: String,
    pub volume_gallons: u32,
}

/// Raw reading payload as supplied by a technician or owner app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSubmission {
    pub ph: f64,
    pub free_chlorine_ppm: f64,
    pub total_alkalinity_ppm: f64,
    pub calcium_hardness_ppm: f64,
    #[serde(default)]
    pub cyanuric_acid_ppm: f64,
    pub temperature_f: f64,
    pub taken_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Raw service-visit payload, validated by the intake guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitSubmission {
    pub visited_on: NaiveDate,
    pub tasks: Vec<VisitTask>,
    #[serde(default)]
    pub issues: Vec<VisitIssue>,
    #[serde(default)]
    pub customer_rating: Option<u8>,
}

/// Inputs for a weekly assessment beyond what the reading history provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    #[serde(default)]
    pub clarity: Option<WaterClarity>,
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}
