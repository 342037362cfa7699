use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One row of a lab export, before invariant validation.
#[derive(Debug)]
pub(crate) struct LabRecord {
    pub(crate) sampled_at: Option<DateTime<Utc>>,
    pub(crate) ph: f64,
    pub(crate) free_chlorine_ppm: f64,
    pub(crate) total_alkalinity_ppm: f64,
    pub(crate) calcium_hardness_ppm: f64,
    pub(crate) cyanuric_acid_ppm: f64,
    pub(crate) temperature_f: f64,
    pub(crate) notes: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<LabRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<LabRow>() {
        let row = record?;
        records.push(LabRecord {
            sampled_at: row.sampled_at.as_deref().and_then(parse_timestamp),
            ph: row.ph,
            free_chlorine_ppm: row.free_chlorine_ppm,
            total_alkalinity_ppm: row.total_alkalinity_ppm,
            calcium_hardness_ppm: row.calcium_hardness_ppm,
            cyanuric_acid_ppm: row.cyanuric_acid_ppm.unwrap_or(0.0),
            temperature_f: row.temperature_f,
            notes: row.notes,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct LabRow {
    #[serde(rename = "Sampled At", default, deserialize_with = "empty_string_as_none")]
    sampled_at: Option<String>,
    #[serde(rename = "pH")]
    ph: f64,
    #[serde(rename = "Free Chlorine (ppm)")]
    free_chlorine_ppm: f64,
    #[serde(rename = "Total Alkalinity (ppm)")]
    total_alkalinity_ppm: f64,
    #[serde(rename = "Calcium Hardness (ppm)")]
    calcium_hardness_ppm: f64,
    #[serde(rename = "Cyanuric Acid (ppm)", default)]
    cyanuric_acid_ppm: Option<f64>,
    #[serde(rename = "Temperature (F)")]
    temperature_f: f64,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc());
    }

    None
}
