use super::website::clean_website;
use super::{DatasetError, Record};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const REQUIRED_COLUMNS: [&str; 7] = [
    "name",
    "address",
    "city",
    "province",
    "latitude",
    "longitude",
    "websites",
];

/// Rows that survived coordinate validation plus how many were dropped.
#[derive(Debug)]
pub(crate) struct ParsedRows {
    pub(crate) records: Vec<Record>,
    pub(crate) rows_read: usize,
    pub(crate) missing_coordinates: usize,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<ParsedRows, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    let mut rows_read = 0;
    let mut missing_coordinates = 0;

    for (row, result) in csv_reader.deserialize::<LocationRow>().enumerate() {
        let location = result?;
        rows_read += 1;

        match location.into_record(row) {
            Some(record) => records.push(record),
            None => missing_coordinates += 1,
        }
    }

    Ok(ParsedRows {
        records,
        rows_read,
        missing_coordinates,
    })
}

#[derive(Debug, Deserialize)]
struct LocationRow {
    name: String,
    address: String,
    city: String,
    province: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    latitude: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    longitude: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    websites: Option<String>,
}

impl LocationRow {
    fn into_record(self, row: usize) -> Option<Record> {
        let latitude = self.latitude.as_deref().and_then(parse_coordinate)?;
        let longitude = self.longitude.as_deref().and_then(parse_coordinate)?;

        Some(Record {
            row,
            name: self.name,
            address: self.address,
            city: self.city,
            province: self.province,
            latitude,
            longitude,
            website: clean_website(self.websites),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|coordinate| coordinate.is_finite())
}

#[cfg(test)]
pub(crate) fn parse_coordinate_for_tests(value: &str) -> Option<f64> {
    parse_coordinate(value)
}
