mod region;
mod search;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use salonmap_core::{AppConfig, FilterCriteria, Region, TypeChoice};
use salonmap_locator::{OverpassClient, QueryPipeline};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "salonmap")]
#[command(about = "Find hair and beauty businesses from OpenStreetMap")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, filter, and print matching businesses
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Fetch, filter, and write matching businesses as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Check whether a piece of text falls inside the configured region
    Region {
        /// City, address, or any free text
        text: String,
    },
    /// List the business type choices accepted by `--type`
    Types,
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Business type: all, hairdresser, beauty, spa, barber, salon, saloon
    #[arg(long = "type", default_value = "all", value_parser = parse_type_choice)]
    type_choice: TypeChoice,

    /// Free-text search; the region keyword (e.g. "niagara") matches the whole region
    #[arg(long, short, default_value = "")]
    query: String,

    /// Keep only businesses whose city is in the region
    #[arg(long)]
    region_only: bool,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.type_choice, self.query.as_str())
    }
}

#[allow(clippy::unnecessary_wraps)]
fn parse_type_choice(raw: &str) -> Result<TypeChoice, String> {
    Ok(TypeChoice::parse_lenient(raw))
}

fn load_region(config: &AppConfig) -> anyhow::Result<Region> {
    match &config.region_path {
        Some(path) => Ok(salonmap_core::load_region(path)?),
        None => Ok(Region::niagara()),
    }
}

fn build_pipeline(config: &AppConfig) -> anyhow::Result<QueryPipeline<OverpassClient>> {
    let client = OverpassClient::from_config(config)?;
    Ok(QueryPipeline::new(
        client,
        Duration::from_secs(config.cache_ttl_secs),
        load_region(config)?,
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = salonmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search { filter, json } => {
            let pipeline = build_pipeline(&config)?;
            search::run_search(&pipeline, &filter.criteria(), filter.region_only, json).await?;
        }
        Commands::Export { filter, output } => {
            let pipeline = build_pipeline(&config)?;
            search::run_export(
                &pipeline,
                &filter.criteria(),
                filter.region_only,
                output.as_deref(),
            )
            .await?;
        }
        Commands::Region { text } => {
            let region = load_region(&config)?;
            region::run_region(&region, &text);
        }
        Commands::Types => {
            for choice in TypeChoice::ORDERED {
                println!("{}", choice.label());
            }
        }
    }

    Ok(())
}
