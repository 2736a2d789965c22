//! GeoInunda Geocode CLI
//!
//! Resolves addresses the way the map's search box does, previews query
//! normalization and checks flood datasets.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geoinunda_domain::{FloodDataset, GeocodeClient, MapConfig};
use geoinunda_geocode::{Config, DatasetReport, NormalizeReport, ReqwestTransport, ResolveReport};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "geoinunda-geocode")]
#[command(about = "Geocode addresses and check flood data for the GeoInunda map")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Geocoder endpoint (overrides GEOCODER_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Region qualifier appended to queries (overrides GEOCODER_REGION)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Print machine-readable JSON instead of a summary line
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an address against the geocoding provider
    Resolve {
        /// Free-text address, as typed in the search box
        query: String,
    },

    /// Show the normalized query and its fallback without any network call
    Normalize {
        /// Free-text address
        query: String,
    },

    /// Parse a flood polygon file and report its contents
    Dataset {
        /// Path to the GeoJSON FeatureCollection
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env().with_overrides(args.endpoint.clone(), args.region.clone());

    // Initialize logging; domain `log` records are bridged by the subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("geoinunda_geocode={}", config.log_level).parse()?)
                .add_directive(format!("geoinunda_domain={}", config.log_level).parse()?),
        )
        .init();

    match args.command {
        Command::Resolve { ref query } => resolve(&config, query, args.json).await,
        Command::Normalize { ref query } => emit(&NormalizeReport::new(query), args.json),
        Command::Dataset { ref path } => dataset(path, args.json),
    }
}

async fn resolve(config: &Config, query: &str, json: bool) -> Result<()> {
    let transport = ReqwestTransport::new(&config.geocoder).context("building HTTP client")?;
    let client = GeocodeClient::new(transport, config.geocoder.clone());

    info!("Resolving '{}' via {}", query, config.geocoder.endpoint);

    match client.resolve(query).await {
        Ok(result) => {
            let report = ResolveReport::new(query, &result, MapConfig::default().home);
            emit(&report, json)
        }
        Err(err) => {
            if let Some(message) = err.user_message() {
                warn!("{}", message);
            }
            Err(err.into())
        }
    }
}

fn dataset(path: &str, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let dataset = FloodDataset::from_json(&raw).with_context(|| format!("parsing {path}"))?;
    emit(&DatasetReport::new(path, &raw, &dataset), json)
}

fn emit<R: Serialize + std::fmt::Display>(report: &R, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        info!("{}", report);
    }
    Ok(())
}
