use std::process::ExitCode;

use clap::Parser;
use genomecrispr_backend::{config::Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().unwrap_or_default();
    let cli = Cli::parse();

    run(cli).await
}
