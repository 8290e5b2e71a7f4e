//! Church finder CLI
//!
//! Finds Catholic churches near an address using OpenStreetMap data.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod messages;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use application::SearchRequest;
use clap::{Parser, Subcommand, ValueEnum};
use domain::value_objects::Coordinate;
use infrastructure::{AppConfig, FilterGroupConfig, create_search_service, init_telemetry};
use tracing::debug;

/// Exit code after Ctrl-C, following the shell convention
const EXIT_INTERRUPTED: i32 = 130;

/// Church finder CLI
#[derive(Debug, Parser)]
#[command(name = "church-finder")]
#[command(author, version, about = "Find Catholic churches near an address", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./church-finder.toml if present)
    #[arg(short, long, env = "CHURCH_FINDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for churches around an address or coordinate
    ///
    /// Example: church-finder search "123 Main St, Springfield" --radius 2000
    /// Example: church-finder search --lat 41.9029 --lon 12.4534
    Search {
        /// Address to search around
        address: Option<String>,

        /// Search radius in meters (clamped to the configured maximum)
        #[arg(short, long)]
        radius: Option<u32>,

        /// Latitude of the search center when no address is given
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the search center when no address is given
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Replace the configured filters with one group of key=value tags
        #[arg(short, long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
        tags: Vec<(String, String)>,

        /// Sort results by distance from the center
        #[arg(long)]
        nearest: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Result output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable list
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse a `key=value` tag argument
fn parse_tag(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(format!("tag key and value must not be empty in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => AppConfig::load().context("failed to load configuration"),
    }
}

/// Replace configured filters with one group built from `--tag` arguments
///
/// No tags keeps the configuration as is.
fn override_filters(config: &mut AppConfig, tags: Vec<(String, String)>) {
    if !tags.is_empty() {
        config.search.filters = vec![FilterGroupConfig::from_pairs(tags)];
    }
}

/// Build the request from command-line arguments and configured defaults
fn build_request(
    config: &AppConfig,
    address: Option<String>,
    radius: Option<u32>,
    center: Option<(f64, f64)>,
) -> anyhow::Result<SearchRequest> {
    let default_center = match center {
        Some((lat, lon)) => Some(
            Coordinate::new(lat, lon).with_context(|| format!("invalid coordinate {lat}, {lon}"))?,
        ),
        None => config
            .search
            .default_center()
            .context("invalid search.default_center")?,
    };

    Ok(SearchRequest {
        address,
        radius_meters: radius.unwrap_or(config.search.radius_meters),
        default_center,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Search {
            address,
            radius,
            lat,
            lon,
            tags,
            nearest,
            format,
        } => {
            override_filters(&mut config, tags);

            let center = lat.zip(lon);
            let request = build_request(&config, address, radius, center)?;
            debug!(?request, "Starting search");

            let service = match create_search_service(&config) {
                Ok(service) => service,
                Err(e) => {
                    eprintln!("❌ {}", messages::user_message(e.kind()));
                    eprintln!("   {e}");
                    std::process::exit(messages::exit_code(e.kind()));
                },
            };

            let result = tokio::select! {
                result = service.search(request) => result,
                _ = tokio::signal::ctrl_c() => {
                    eprintln!("Search cancelled");
                    std::process::exit(EXIT_INTERRUPTED);
                }
            };

            match result {
                Ok(outcome) => match format {
                    OutputFormat::Text => print!("{}", output::render_text(&outcome, nearest)),
                    OutputFormat::Json => println!("{}", output::render_json(&outcome)?),
                },
                Err(e) => {
                    eprintln!("❌ {}", messages::user_message(e.kind()));
                    debug!(error = %e, kind = %e.kind(), "Search failed");
                    std::process::exit(messages::exit_code(e.kind()));
                },
            }
        },
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        },
    }

    Ok(())
}
