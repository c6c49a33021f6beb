use crate::dataset::Dataset;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_TOP_CHAINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub distinct_chains: usize,
}

/// Two bars of the region comparison chart. Both sides are kept even when the
/// same region is picked twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionComparison {
    pub first: RegionCount,
    pub second: RegionCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainCount {
    pub name: String,
    pub locations: usize,
}

pub fn compare_regions(dataset: &Dataset, first: &str, second: &str) -> RegionComparison {
    RegionComparison {
        first: region_count(dataset, first),
        second: region_count(dataset, second),
    }
}

fn region_count(dataset: &Dataset, region: &str) -> RegionCount {
    let distinct_chains = dataset
        .records()
        .iter()
        .filter(|record| record.province == region)
        .map(|record| record.name.as_str())
        .collect::<HashSet<_>>()
        .len();

    RegionCount {
        region: region.to_string(),
        distinct_chains,
    }
}

/// The `limit` most common chain names, by location count, descending. Ties
/// keep the order in which names first appear in the dataset.
pub fn top_chains(dataset: &Dataset, limit: usize) -> Vec<ChainCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ChainCount> = Vec::new();

    for record in dataset.records() {
        match positions.get(record.name.as_str()) {
            Some(&index) => counts[index].locations += 1,
            None => {
                positions.insert(record.name.as_str(), counts.len());
                counts.push(ChainCount {
                    name: record.name.clone(),
                    locations: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|left, right| right.locations.cmp(&left.locations));
    counts.truncate(limit);
    counts
}
