//! Core library for the `weather-digest` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather service (current conditions, daily forecast digest)
//! - View models and the daily min/max aggregation
//!
//! It is used by `weather-digest-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod timestamp;

pub use aggregate::aggregate_forecast;
pub use config::Config;
pub use error::WeatherError;
pub use model::{CurrentWeatherView, DailyForecastSummary, Observation};
pub use provider::OpenWeatherService;
pub use timestamp::{DateZone, Zone};
