//! Lab-export ingestion: turn a CSV feed of historical water tests into
//! validated readings.

mod parser;

use std::io::Read;

use crate::pools::domain::{InvalidReadingError, WaterChemistryReading};

/// Error raised while ingesting a lab export.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read lab export: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: missing or unparseable sample timestamp")]
    MissingTimestamp { row: usize },
    #[error("row {row}: {source}")]
    InvalidReading {
        row: usize,
        #[source]
        source: InvalidReadingError,
    },
}

/// Importer for water-test lab exports.
///
/// Expected columns: `Sampled At, pH, Free Chlorine (ppm), Total Alkalinity
/// (ppm), Calcium Hardness (ppm), Cyanuric Acid (ppm), Temperature (F), Notes`.
/// Timestamps accept RFC 3339 or plain `YYYY-MM-DD` dates. Rows are returned
/// in file order; every reading is validated before it is returned.
pub struct LabCsvImporter;

impl LabCsvImporter {
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<WaterChemistryReading>, ImportError> {
        let records = parser::parse_records(reader)?;
        let mut readings = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            // Header is line 1; data rows start at 2.
            let row = index + 2;
            let taken_at = record
                .sampled_at
                .ok_or(ImportError::MissingTimestamp { row })?;

            let reading = WaterChemistryReading {
                ph: record.ph,
                free_chlorine_ppm: record.free_chlorine_ppm,
                total_alkalinity_ppm: record.total_alkalinity_ppm,
                calcium_hardness_ppm: record.calcium_hardness_ppm,
                cyanuric_acid_ppm: record.cyanuric_acid_ppm,
                temperature_f: record.temperature_f,
                taken_at,
                notes: record.notes,
            };
            reading
                .validate()
                .map_err(|source| ImportError::InvalidReading { row, source })?;
            readings.push(reading);
        }

        Ok(readings)
    }
}
