use clap::Args;
use fastfood_atlas::config::AppConfig;
use fastfood_atlas::error::AppError;
use fastfood_atlas::query::{
    ChainCount, ChainFilter, LocatorOutcome, RegionComparison, DEFAULT_TOP_CHAINS,
};
use fastfood_atlas::AtlasSession;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

#[derive(Args, Debug)]
pub(crate) struct LocateArgs {
    /// Region (province/state code), matched exactly
    #[arg(long)]
    pub(crate) region: String,
    /// City within the region, matched ignoring case
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Chain name, or "All" for every chain
    #[arg(long)]
    pub(crate) chain: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// First region to compare
    #[arg(long)]
    pub(crate) first: String,
    /// Second region to compare
    #[arg(long)]
    pub(crate) second: String,
}

#[derive(Args, Debug)]
pub(crate) struct TopArgs {
    /// Number of chains to list
    #[arg(long, default_value_t = DEFAULT_TOP_CHAINS)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    /// List the cities of this region instead of the region list
    #[arg(long)]
    pub(crate) region: Option<String>,
}

pub(crate) fn run_locate(config: &AppConfig, args: LocateArgs) -> Result<(), AppError> {
    let session = AtlasSession::load(&config.dataset)?;
    let chain = ChainFilter::parse(args.chain.as_deref());
    let outcome = session.locate(&args.region, args.city.as_deref(), &chain);
    print!("{}", render_locator(&outcome));
    Ok(())
}

pub(crate) fn run_compare(config: &AppConfig, args: CompareArgs) -> Result<(), AppError> {
    let session = AtlasSession::load(&config.dataset)?;
    let comparison = session.compare_regions(&args.first, &args.second);
    print!("{}", render_comparison(&comparison));
    Ok(())
}

pub(crate) fn run_top(config: &AppConfig, args: TopArgs) -> Result<(), AppError> {
    let session = AtlasSession::load(&config.dataset)?;
    let top = session.top_chains(args.limit);
    print!("{}", render_top_chains(&top));
    Ok(())
}

pub(crate) fn run_options(config: &AppConfig, args: OptionsArgs) -> Result<(), AppError> {
    let session = AtlasSession::load(&config.dataset)?;

    let mut out = String::new();
    match args.region {
        Some(region) => {
            let cities = session.cities(&region);
            if cities.is_empty() {
                return Err(AppError::UnknownRegion(region));
            }
            let _ = writeln!(out, "Cities in {region}");
            for city in cities {
                let _ = writeln!(out, "- {city}");
            }
        }
        None => {
            let _ = writeln!(out, "Regions");
            for region in session.regions() {
                let _ = writeln!(out, "- {region}");
            }
            let _ = writeln!(out, "\nChains");
            for chain in session.chain_options() {
                let _ = writeln!(out, "- {chain}");
            }
        }
    }

    print!("{out}");
    Ok(())
}

pub(crate) fn render_locator(outcome: &LocatorOutcome) -> String {
    let mut out = String::new();
    match outcome {
        LocatorOutcome::NoCitySelected => {}
        LocatorOutcome::NoResults { .. } => {
            if let Some(message) = outcome.message() {
                let _ = writeln!(out, "{message}");
            }
        }
        LocatorOutcome::Found(view) => {
            let _ = writeln!(out, "{}", view.heading());
            for location in &view.locations {
                let link = location.website.href().unwrap_or(location.website.label());
                let _ = writeln!(
                    out,
                    "- {} | {} | {} | {}",
                    location.name, location.address, location.city, link
                );
            }
            let _ = writeln!(
                out,
                "\nMap centre {:.5}, {:.5} (zoom {}, {} points)",
                view.map.center_latitude,
                view.map.center_longitude,
                view.map.zoom,
                view.map.points.len()
            );
        }
    }
    out
}

pub(crate) fn render_comparison(comparison: &RegionComparison) -> String {
    let max = comparison
        .first
        .distinct_chains
        .max(comparison.second.distinct_chains);

    let mut out = String::new();
    let _ = writeln!(out, "Distinct chains by region");
    for entry in [&comparison.first, &comparison.second] {
        let _ = writeln!(
            out,
            "{:<6} {} {}",
            entry.region,
            bar(entry.distinct_chains, max),
            entry.distinct_chains
        );
    }
    out
}

pub(crate) fn render_top_chains(top: &[ChainCount]) -> String {
    let max = top.first().map(|entry| entry.locations).unwrap_or(0);
    let width = top
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "Most common chains");
    for entry in top {
        let _ = writeln!(
            out,
            "{:<width$} {} {}",
            entry.name,
            bar(entry.locations, max),
            entry.locations
        );
    }
    out
}

fn bar(value: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat(value * BAR_WIDTH / max)
}
