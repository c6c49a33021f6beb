mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use fastfood_atlas::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
