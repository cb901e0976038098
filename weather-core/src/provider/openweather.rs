use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    aggregate::aggregate_forecast,
    config::Config,
    error::WeatherError,
    model::{Condition, CurrentWeatherView, DailyForecastSummary, Observation, Readings, format_reading},
    timestamp::{DateZone, Zone, render_date_time},
};

use super::truncate_body;

pub const CURRENT_ENDPOINT: &str = "weather";
pub const FORECAST_ENDPOINT: &str = "forecast";
const UNITS: &str = "metric";

/// Client for the OpenWeather current-weather and 5-day forecast endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherService {
    api_key: String,
    base_url: String,
    lang: String,
    date_zone: DateZone,
    http: Client,
}

impl OpenWeatherService {
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let api_key = config.api_key().ok_or(WeatherError::MissingApiKey)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(WeatherError::Client)?;

        Ok(Self {
            api_key: api_key.to_owned(),
            base_url: config.base_url.clone(),
            lang: config.lang.clone(),
            date_zone: config.date_zone,
            http,
        })
    }

    /// Same service with a different date zone policy.
    pub fn with_date_zone(mut self, date_zone: DateZone) -> Self {
        self.date_zone = date_zone;
        self
    }

    /// Current conditions at the given coordinates.
    #[instrument(skip(self))]
    pub async fn current_weather(&self, lat: f64, lon: f64) -> Result<CurrentWeatherView, WeatherError> {
        let parsed: OwCurrentResponse = self.fetch(CURRENT_ENDPOINT, lat, lon).await?;
        let zone = Zone::resolve(self.date_zone, parsed.timezone);
        current_view(parsed, zone)
    }

    /// Per-day temperature ranges from the 5-day / 3-hour forecast.
    #[instrument(skip(self))]
    pub async fn week_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<DailyForecastSummary>, WeatherError> {
        let parsed: OwForecastResponse = self.fetch(FORECAST_ENDPOINT, lat, lon).await?;
        let zone = Zone::resolve(self.date_zone, parsed.city.and_then(|c| c.timezone));

        let summaries = aggregate_forecast(&parsed.list, zone);
        debug!(observations = parsed.list.len(), days = summaries.len(), "aggregated forecast");
        Ok(summaries)
    }

    /// Full request URL for `endpoint`, including the API key.
    pub fn request_url(&self, endpoint: &str, lat: f64, lon: f64) -> Result<Url, WeatherError> {
        let mut base = Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(WeatherError::MalformedRequest(format!(
                "unsupported scheme '{}' in base URL {}",
                base.scheme(),
                self.base_url
            )));
        }
        // Without a trailing slash `join` would replace the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut url = base.join(endpoint)?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string())
            .append_pair("lang", &self.lang)
            .append_pair("units", UNITS)
            .append_pair("appid", &self.api_key);

        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, lat: f64, lon: f64) -> Result<T, WeatherError> {
        let url = self.request_url(endpoint, lat, lon)?;
        debug!(endpoint, host = url.host_str().unwrap_or_default(), "requesting OpenWeather");

        // reqwest errors embed the URL, which carries the API key.
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::Transport(e.without_url()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::Transport(e.without_url()))?;

        if !status.is_success() {
            warn!(%status, endpoint, "OpenWeather request failed");
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(WeatherError::Decode)
    }
}

fn current_view(parsed: OwCurrentResponse, zone: Zone) -> Result<CurrentWeatherView, WeatherError> {
    let local_time = |ts: i64| {
        zone.date_time(ts)
            .map(|dt| render_date_time(&dt))
            .ok_or(WeatherError::InvalidTimestamp(ts))
    };

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .unwrap_or_else(|| "Unknown".to_string());

    let (rain_info, rain1h) = match parsed.rain {
        Some(OwRain { one_hour: Some(mm) }) => (true, format!("{}mm", format_reading(mm))),
        Some(OwRain { one_hour: None }) => (true, "0mm".to_string()),
        None => (false, "0mm".to_string()),
    };

    Ok(CurrentWeatherView {
        temp: format!("{} C", format_reading(parsed.main.temp)),
        description,
        feel_temp: format!("{} C", format_reading(parsed.main.feels_like)),
        humidity: format!("{} %", parsed.main.humidity),
        wind_speed: format!("{} m/s", format_reading(parsed.wind.speed)),
        cloud: format!("{} %", parsed.clouds.all),
        sunrise: local_time(parsed.sys.sunrise)?,
        sunset: local_time(parsed.sys.sunset)?,
        country: parsed.sys.country,
        rain_info,
        rain1h,
    })
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u32,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    weather: Vec<Condition>,
    main: Readings,
    wind: OwWind,
    clouds: OwClouds,
    sys: OwSys,
    rain: Option<OwRain>,
    /// Seconds east of UTC at the queried location.
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<Observation>,
    city: Option<OwCity>,
}
