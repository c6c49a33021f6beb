mod parser;
pub mod website;

use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub use website::{WebsiteLink, NO_WEBSITE};

/// One restaurant location.
///
/// `row` is the 0-based position in the source table, assigned before
/// validation so it stays stable when invalid rows are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub row: usize,
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub missing_coordinates: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read location table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid location CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("location table is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// The validated working set of locations. Every record has coordinates.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    summary: LoadSummary,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let parsed = parser::parse_records(reader)?;
        let summary = LoadSummary {
            rows_read: parsed.rows_read,
            missing_coordinates: parsed.missing_coordinates,
        };

        debug!(
            rows = summary.rows_read,
            excluded = summary.missing_coordinates,
            "dropped locations without coordinates"
        );

        Ok(Self {
            records: parsed.records,
            summary,
        })
    }

    /// Builds a dataset from records that are already validated.
    pub fn from_records(records: Vec<Record>) -> Self {
        let summary = LoadSummary {
            rows_read: records.len(),
            missing_coordinates: 0,
        };
        Self { records, summary }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn record_at_row(&self, row: usize) -> Option<&Record> {
        self.records.iter().find(|record| record.row == row)
    }

    pub fn summary(&self) -> LoadSummary {
        self.summary
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
