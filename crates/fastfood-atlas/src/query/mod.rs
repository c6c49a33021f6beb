mod aggregates;
mod options;
pub mod views;

use crate::dataset::{Dataset, Record};
use std::fmt;

pub use aggregates::{
    compare_regions, top_chains, ChainCount, RegionComparison, RegionCount, DEFAULT_TOP_CHAINS,
};
pub use options::{chain_options, chains, cities, regions};
pub use views::{LocationView, LocatorOutcome, LocatorView, MapPoint, MapView, MAP_ZOOM};

/// Chain selector for the locator. `All` disables the chain filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainFilter {
    #[default]
    All,
    Named(String),
}

impl ChainFilter {
    pub const ALL_LABEL: &'static str = "All";

    /// A missing, blank or literal `All` selection means no chain filter.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(Self::ALL_LABEL) => Self::All,
            Some(name) => Self::Named(name.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for ChainFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Records in `region` (exact match) and `city` (case-insensitive), narrowed
/// to one chain (case-insensitive) unless `chain` is `All`.
pub fn filter<'d>(
    dataset: &'d Dataset,
    region: &str,
    city: &str,
    chain: &ChainFilter,
) -> Vec<&'d Record> {
    let city = city.to_lowercase();
    let chain = match chain {
        ChainFilter::All => None,
        ChainFilter::Named(name) => Some(name.to_lowercase()),
    };

    dataset
        .records()
        .iter()
        .filter(|record| record.province == region)
        .filter(|record| record.city.to_lowercase() == city)
        .filter(|record| {
            chain
                .as_deref()
                .map_or(true, |chain| record.name.to_lowercase() == chain)
        })
        .collect()
}
