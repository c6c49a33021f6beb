use crate::commands::{
    run_compare, run_locate, run_options, run_top, CompareArgs, LocateArgs, OptionsArgs, TopArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fastfood_atlas::config::AppConfig;
use fastfood_atlas::error::AppError;
use fastfood_atlas::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Fast Food Atlas",
    about = "Find fast food locations and compare chains across regions",
    version
)]
struct Cli {
    #[command(flatten)]
    dataset: DatasetArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List locations for a region, city and optional chain
    Locate(LocateArgs),
    /// Compare the number of distinct chains in two regions
    Compare(CompareArgs),
    /// Rank the most common chains nationwide
    Top(TopArgs),
    /// List selectable regions, cities and chains
    Options(OptionsArgs),
}

#[derive(Args, Debug, Default)]
struct DatasetArgs {
    /// Location CSV to load (overrides APP_DATASET_PATH)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// JSON rule table replacing the built-in chain rules (overrides APP_RULES_PATH)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(path) = cli.dataset.dataset {
        config.dataset.path = path;
    }
    if let Some(path) = cli.dataset.rules {
        config.dataset.rules_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Locate(args) => run_locate(&config, args),
        Command::Compare(args) => run_compare(&config, args),
        Command::Top(args) => run_top(&config, args),
        Command::Options(args) => run_options(&config, args),
    }
}
