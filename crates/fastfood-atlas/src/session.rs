use crate::canonical::{
    rules_from_path, CanonicalizationReport, Canonicalizer, ConflictPolicy, RuleError,
};
use crate::config::DatasetConfig;
use crate::dataset::{Dataset, DatasetError};
use crate::query::{
    self, ChainCount, ChainFilter, LocationView, LocatorOutcome, LocatorView, MapView,
    RegionComparison,
};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Rules(#[from] RuleError),
}

/// A loaded, canonicalized dataset. Canonicalization runs once here; every
/// query afterwards reads the records without changing them.
#[derive(Debug)]
pub struct AtlasSession {
    dataset: Dataset,
    report: CanonicalizationReport,
}

impl AtlasSession {
    pub fn new(mut dataset: Dataset, canonicalizer: &Canonicalizer) -> Self {
        let report = canonicalizer.canonicalize(dataset.records_mut());
        Self { dataset, report }
    }

    pub fn load(config: &DatasetConfig) -> Result<Self, SessionError> {
        let canonicalizer = match &config.rules_path {
            Some(path) => Canonicalizer::new(rules_from_path(path)?, ConflictPolicy::default())?,
            None => Canonicalizer::standard()?,
        };
        let dataset = Dataset::from_path(&config.path)?;
        let summary = dataset.summary();

        info!(
            path = %config.path.display(),
            locations = dataset.len(),
            excluded = summary.missing_coordinates,
            "loaded location table"
        );

        Ok(Self::new(dataset, &canonicalizer))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn report(&self) -> &CanonicalizationReport {
        &self.report
    }

    pub fn regions(&self) -> Vec<String> {
        query::regions(&self.dataset)
    }

    pub fn cities(&self, region: &str) -> Vec<String> {
        query::cities(&self.dataset, region)
    }

    pub fn chain_options(&self) -> Vec<String> {
        query::chain_options(&self.dataset)
    }

    /// The locator section for a selection. Without a city there is nothing
    /// to show.
    pub fn locate(&self, region: &str, city: Option<&str>, chain: &ChainFilter) -> LocatorOutcome {
        let Some(city) = city.map(str::trim).filter(|city| !city.is_empty()) else {
            return LocatorOutcome::NoCitySelected;
        };

        let records = query::filter(&self.dataset, region, city, chain);
        let Some(map) = MapView::from_records(&records) else {
            return LocatorOutcome::NoResults {
                region: region.to_string(),
                city: city.to_string(),
            };
        };

        LocatorOutcome::Found(LocatorView {
            region: region.to_string(),
            city: city.to_string(),
            chain: chain.label().to_string(),
            locations: records.into_iter().map(LocationView::from).collect(),
            map,
        })
    }

    pub fn compare_regions(&self, first: &str, second: &str) -> RegionComparison {
        query::compare_regions(&self.dataset, first, second)
    }

    pub fn top_chains(&self, limit: usize) -> Vec<ChainCount> {
        query::top_chains(&self.dataset, limit)
    }
}
