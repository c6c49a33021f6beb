use super::ChainFilter;
use crate::dataset::Dataset;
use std::collections::BTreeSet;

pub fn regions(dataset: &Dataset) -> Vec<String> {
    dataset
        .records()
        .iter()
        .map(|record| record.province.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Cities are listed as spelled in the data, so one city can appear under
/// several spellings.
pub fn cities(dataset: &Dataset, region: &str) -> Vec<String> {
    dataset
        .records()
        .iter()
        .filter(|record| record.province == region)
        .map(|record| record.city.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn chains(dataset: &Dataset) -> Vec<String> {
    dataset
        .records()
        .iter()
        .map(|record| record.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Chain selector entries: the `All` sentinel followed by every chain.
pub fn chain_options(dataset: &Dataset) -> Vec<String> {
    std::iter::once(ChainFilter::ALL_LABEL.to_string())
        .chain(chains(dataset))
        .collect()
}
