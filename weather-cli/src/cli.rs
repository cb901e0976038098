use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use inquire::{Password, Select, Text};
use tracing::debug;
use weather_digest_core::{Config, DateZone, OpenWeatherService};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-digest", version, about = "OpenWeather digests for a coordinate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key, language and date zone.
    Configure,

    /// Show current conditions.
    Current {
        #[command(flatten)]
        query: Query,
    },

    /// Show per-day min/max temperatures for the next five days.
    Week {
        #[command(flatten)]
        query: Query,
    },
}

#[derive(Debug, Args)]
pub struct Query {
    /// Latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Zone used for dates and sun times; defaults to the configured one.
    #[arg(long, value_enum)]
    pub zone: Option<ZoneArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ZoneArg {
    Local,
    Utc,
    Location,
}

impl From<ZoneArg> for DateZone {
    fn from(value: ZoneArg) -> Self {
        match value {
            ZoneArg::Local => DateZone::Local,
            ZoneArg::Utc => DateZone::Utc,
            ZoneArg::Location => DateZone::Location,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { query } => {
                let view = service(&query)?.current_weather(query.lat, query.lon).await?;
                if query.json {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                } else {
                    print!("{}", output::render_current(&view));
                }
                Ok(())
            }
            Command::Week { query } => {
                let days = service(&query)?.week_forecast(query.lat, query.lon).await?;
                if query.json {
                    println!("{}", serde_json::to_string_pretty(&days)?);
                } else {
                    print!("{}", output::render_week(&days));
                }
                Ok(())
            }
        }
    }
}

fn service(query: &Query) -> anyhow::Result<OpenWeatherService> {
    let config = Config::load_with_env()?;
    let mut service = OpenWeatherService::from_config(&config)?;
    if let Some(zone) = query.zone {
        service = service.with_date_zone(zone.into());
    }
    debug!(lang = %config.lang, zone = ?query.zone, "configured OpenWeather service");
    Ok(service)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    config.lang = Text::new("Description language:")
        .with_default(&config.lang)
        .prompt()
        .context("Failed to read language")?;

    let zones = DateZone::all().to_vec();
    let cursor = zones.iter().position(|z| *z == config.date_zone).unwrap_or(0);
    config.date_zone = Select::new("Zone for dates and sun times:", zones)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read date zone")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    if !config.is_configured() {
        println!("No API key set yet; OPENWEATHER_API_KEY will be used if present.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_with_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather-digest", "current", "--lat", "-33.87", "--lon", "151.21"])
            .expect("args must parse");

        match cli.command {
            Command::Current { query } => {
                assert_eq!(query.lat, -33.87);
                assert_eq!(query.lon, 151.21);
                assert!(!query.json);
                assert_eq!(query.zone, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_week_with_flags() {
        let cli = Cli::try_parse_from([
            "weather-digest", "week", "--lat", "37.56", "--lon", "126.97", "--json", "--zone", "location",
        ])
        .expect("args must parse");

        match cli.command {
            Command::Week { query } => {
                assert!(query.json);
                assert_eq!(query.zone.map(DateZone::from), Some(DateZone::Location));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn coordinates_are_required() {
        assert!(Cli::try_parse_from(["weather-digest", "current", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn rejects_unknown_zone() {
        let args = ["weather-digest", "week", "--lat", "1", "--lon", "2", "--zone", "mars"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
