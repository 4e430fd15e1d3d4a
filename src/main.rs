use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use firefinder::api::FixFormatter;
use firefinder::validation::parse_sighting_spec;
use firefinder::{ConfigError, ConfigFile, FixRequest, Locator, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "firefinder",
    version,
    about = "Locate a target from two or three lookout bearings"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file with resolver options and stations
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute a fix from two or three sightings
    Locate {
        /// Sighting as STATION:BEARING; STATION is a registry name or lat,lon
        #[arg(
            short,
            long = "sighting",
            value_name = "STATION:BEARING",
            required = true,
            allow_hyphen_values = true
        )]
        sightings: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Append per-station diagnostics to text output
        #[arg(long)]
        details: bool,
    },
    /// List the stations in the registry
    Stations,
    /// Write a starter configuration with the built-in stations
    InitConfig {
        path: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Maps,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Maps => OutputFormat::MapsUrl,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            ConfigFile::load_from_file(path)
        }
        None => Ok(ConfigFile::default()),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Locate {
            sightings,
            format,
            details,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let locator = Locator::from_config(&config)?;

            let inputs = sightings
                .iter()
                .map(|spec| parse_sighting_spec(spec))
                .collect::<Result<Vec<_>, _>>()?;
            let response = locator.locate(&FixRequest::new(inputs))?;

            let output = FixFormatter::new()
                .with_format(format.into())
                .with_details(details)
                .render(&response)?;
            println!("{}", output);
        }
        Command::Stations => {
            let config = load_config(cli.config.as_deref())?;
            let registry = config.registry()?;
            for station in registry.stations() {
                println!(
                    "{:<24} {:>12.8} {:>13.8}",
                    station.name, station.location.lat, station.location.lon
                );
            }
        }
        Command::InitConfig { path, force } => {
            ConfigFile::default().save_to_file(&path, force)?;
            println!("Wrote configuration to {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
