use crate::dataset::{Record, WebsiteLink};
use serde::Serialize;

pub const MAP_ZOOM: u8 = 11;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub website: WebsiteLink,
}

impl From<&Record> for LocationView {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            address: record.address.clone(),
            city: record.city.clone(),
            province: record.province.clone(),
            website: WebsiteLink::from_website(record.website.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// Point-and-label map layer centred on the mean position of its points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
    pub points: Vec<MapPoint>,
}

impl MapView {
    /// Returns `None` when there is nothing to plot.
    pub fn from_records(records: &[&Record]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let count = records.len() as f64;
        let center_latitude = records.iter().map(|record| record.latitude).sum::<f64>() / count;
        let center_longitude = records.iter().map(|record| record.longitude).sum::<f64>() / count;
        let points = records
            .iter()
            .map(|record| MapPoint {
                latitude: record.latitude,
                longitude: record.longitude,
                name: record.name.clone(),
            })
            .collect();

        Some(Self {
            center_latitude,
            center_longitude,
            zoom: MAP_ZOOM,
            points,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatorView {
    pub region: String,
    pub city: String,
    pub chain: String,
    pub locations: Vec<LocationView>,
    pub map: MapView,
}

impl LocatorView {
    pub fn heading(&self) -> String {
        format!(
            "Locations for {} in {}, {}:",
            self.chain, self.city, self.region
        )
    }
}

/// What the locator section shows for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocatorOutcome {
    NoCitySelected,
    NoResults { region: String, city: String },
    Found(LocatorView),
}

impl LocatorOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            Self::NoCitySelected => None,
            Self::NoResults { region, city } => Some(format!(
                "No fast food locations found in {city}, {region}."
            )),
            Self::Found(view) => Some(view.heading()),
        }
    }
}
