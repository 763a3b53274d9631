mod seed;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "coffeedrop-cli")]
#[command(about = "Coffee Drop command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import locations from the legacy CSV export, geocoding each postcode.
    Seed {
        /// Path to the CSV file (header row; postcode plus seven opening
        /// and seven closing time columns).
        #[arg(long, default_value = "location_data.csv")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Seed { file } => seed::run(&file).await,
    }
}
