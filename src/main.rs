mod aggregate;
mod plot;
mod predict;
mod registry;
mod service;
mod web;

use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::process::ExitCode;

use crate::plot::PlotStyle;
use crate::predict::{ElementSet, Propagator, Sgp4Propagator, TimeWindow};
use crate::service::GroundTrackService;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "groundtrack")]
#[command(about = "Satellite ground-track propagation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// YAML configuration file
        #[arg(long)]
        config: Option<String>,
    },
    /// Propagate one element set and print the track as JSON
    Track {
        /// File holding the two element lines
        #[arg(long)]
        tle: String,
        #[arg(long)]
        name: Option<String>,
        /// RFC3339 start time
        #[arg(long, value_parser = parse_datetime)]
        start: DateTime<Utc>,
        /// RFC3339 end time, inclusive
        #[arg(long, value_parser = parse_datetime, conflicts_with = "span")]
        end: Option<DateTime<Utc>>,
        /// Window length instead of --end, e.g. "90m" or "2h"
        #[arg(long, value_parser = parse_span)]
        span: Option<Duration>,
        /// Step in minutes
        #[arg(long, default_value_t = 1.0)]
        step: f64,
        /// Also emit the map descriptor
        #[arg(long)]
        plot: bool,
        #[arg(long)]
        zoom: Option<f64>,
    },
    /// Check an element set and propagate it once
    Validate {
        #[arg(long)]
        tle: String,
        /// RFC3339 instant to propagate at (default: now)
        #[arg(long, value_parser = parse_datetime)]
        at: Option<DateTime<Utc>>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Track {
            tle,
            name,
            start,
            end,
            span,
            step,
            plot,
            zoom,
        } => {
            let end = match (end, span) {
                (Some(end), _) => end,
                (None, Some(span)) => start + span,
                (None, None) => {
                    eprintln!("Either --end or --span is required");
                    return ExitCode::FAILURE;
                }
            };
            let window = TimeWindow::new(start, end, step);
            track(&tle, name.as_deref(), &window, plot, zoom)
        }
        Commands::Validate { tle, at } => validate(&tle, at.unwrap_or_else(Utc::now)),
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let config = match path {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn track(
    path: &str,
    name: Option<&str>,
    window: &TimeWindow,
    plot: bool,
    zoom: Option<f64>,
) -> ExitCode {
    let text = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = GroundTrackService::new(Sgp4Propagator, PlotStyle::default());
    let output = if plot {
        service
            .compute_ground_track(name, &text, window, zoom)
            .map(|g| serde_json::to_string_pretty(&g))
    } else {
        service
            .compute_track(name, &text, window)
            .map(|t| serde_json::to_string_pretty(&t))
    };

    match output {
        Ok(Ok(json)) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &str, at: DateTime<Utc>) -> ExitCode {
    let text = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let elements = match ElementSet::parse(None, &text) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match Sgp4Propagator.propagate(&elements, at) {
        Ok(state) => {
            println!("Element set is valid ({})", elements.label());
            println!(
                "  at {}: lat {:.3}°, lon {:.3}°, alt {:.1} km",
                at,
                state.latitude_deg,
                state.longitude_deg,
                state.altitude_m / 1000.0
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Propagation error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

fn parse_span(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}
