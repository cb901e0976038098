use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Simplified current conditions, every reading rendered with its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeatherView {
    pub temp: String,
    pub description: String,
    pub feel_temp: String,
    pub humidity: String,
    pub wind_speed: String,
    pub cloud: String,
    pub sunrise: String,
    pub sunset: String,
    pub country: String,
    pub rain_info: bool,
    pub rain1h: String,
}

/// Temperature range for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastSummary {
    pub date: NaiveDate,
    pub min_temperature: f64,
    pub max_temperature: f64,
}

/// One timestamped entry of the provider's forecast list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    pub dt: i64,
    pub main: Readings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Readings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    pub description: String,
}

/// Render a reading the way a JVM `double` prints: integral values keep
/// one decimal place.
pub fn format_reading(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
