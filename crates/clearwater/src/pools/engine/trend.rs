use serde::{Deserialize, Serialize};

use super::bands;

/// Direction of a parameter's recent movement across its reading history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
            Trend::InsufficientData => "insufficient_data",
        }
    }
}

/// Classify a most-recent-first series of values for one parameter.
///
/// The series splits into the ceil(n/2) most recent values versus the
/// remainder; the half means are compared and changes inside the stability
/// tolerance count as stable. Fewer than two points cannot be classified.
pub fn classify(values: &[f64]) -> Trend {
    if values.len() < 2 {
        return Trend::InsufficientData;
    }

    let split = values.len().div_ceil(2);
    let recent_mean = mean(&values[..split]);
    let older_mean = mean(&values[split..]);

    // A zero older mean (chlorine can sit at 0 ppm) leaves percent change
    // undefined; compare the means directly instead.
    if older_mean.abs() < f64::EPSILON {
        return if (recent_mean - older_mean).abs() < f64::EPSILON {
            Trend::Stable
        } else if recent_mean > older_mean {
            Trend::Increasing
        } else {
            Trend::Decreasing
        };
    }

    let percent_change = (recent_mean - older_mean) / older_mean * 100.0;
    if percent_change.abs() < bands::STABLE_TREND_TOLERANCE_PCT {
        Trend::Stable
    } else if percent_change > 0.0 {
        Trend::Increasing
    } else {
        Trend::Decreasing
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
