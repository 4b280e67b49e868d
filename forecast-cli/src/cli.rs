use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastClient, ForecastTime, Units};
use inquire::{Confirm, CustomType, Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key, units and caching.
    Configure,

    /// Show the forecast for a location.
    Show {
        /// Latitude in decimal degrees.
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in decimal degrees.
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Epoch seconds or YYYY-MM-DDTHH:MM:SS[Z|+HHMM]; if absent, means "now".
        #[arg(long)]
        time: Option<String>,

        /// Units mode: us, si, ca, uk or auto. Overrides the configured value.
        #[arg(long)]
        units: Option<String>,

        /// Bypass the response cache.
        #[arg(long)]
        no_cache: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                latitude,
                longitude,
                time,
                units,
                no_cache,
            } => show(latitude, longitude, time, units, no_cache).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Text::new("API key:")
        .with_default(cfg.api_key.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read API key")?;
    cfg.set_api_key(api_key.trim().to_string());

    let choices = vec!["default", "us", "si", "ca", "uk", "auto"];
    let current = cfg
        .units
        .and_then(|u| choices.iter().position(|c| *c == u.as_str()))
        .unwrap_or(0);
    let units = Select::new("Units:", choices)
        .with_starting_cursor(current)
        .prompt()
        .context("Failed to read units")?;
    cfg.units = match units {
        "default" => None,
        other => Some(Units::try_from(other)?),
    };

    cfg.cache_enabled = Confirm::new("Cache responses?")
        .with_default(cfg.cache_enabled)
        .prompt()
        .context("Failed to read cache choice")?;

    if cfg.cache_enabled {
        cfg.cache_lifetime_minutes = CustomType::<u32>::new("Cache lifetime (minutes):")
            .with_default(cfg.cache_lifetime_minutes)
            .prompt()
            .context("Failed to read cache lifetime")?;
    }

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    latitude: f64,
    longitude: f64,
    time: Option<String>,
    units: Option<String>,
    no_cache: bool,
) -> Result<()> {
    let mut cfg = Config::load()?;
    cfg.require_api_key()?;

    if let Some(units) = units {
        cfg.units = Some(Units::try_from(units.as_str())?);
    }
    if no_cache {
        cfg.cache_enabled = false;
    }

    let time = time
        .map(|t| t.parse::<ForecastTime>())
        .transpose()?;

    tracing::debug!(
        "Using units {:?}, cache {}",
        cfg.units,
        if cfg.cache_enabled { "enabled" } else { "disabled" }
    );

    let client = ForecastClient::from_config(&cfg)?;
    let forecast = client
        .fetch(latitude, longitude, time.as_ref())
        .await
        .with_context(|| format!("Failed to fetch forecast for {latitude},{longitude}"))?;

    print!("{}", render::render(&forecast)?);
    Ok(())
}
