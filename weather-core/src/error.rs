use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by [`OpenWeatherService`](crate::OpenWeatherService).
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "No OpenWeather API key configured.\n\
         Hint: run `weather-digest configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,

    /// The request URL could not be composed from the configured base URL.
    #[error("Malformed OpenWeather request: {0}")]
    MalformedRequest(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to reach OpenWeather: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("OpenWeather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse OpenWeather JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Timestamp {0} is outside the representable date range")]
    InvalidTimestamp(i64),
}

impl WeatherError {
    /// True when the failure happened before anything was sent to the provider.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            WeatherError::MissingApiKey | WeatherError::MalformedRequest(_) | WeatherError::Client(_)
        )
    }
}

impl From<url::ParseError> for WeatherError {
    fn from(err: url::ParseError) -> Self {
        WeatherError::MalformedRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_errors_are_request_errors() {
        let err: WeatherError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, WeatherError::MalformedRequest(_)));
        assert!(err.is_request_error());
    }

    #[test]
    fn provider_status_is_not_a_request_error() {
        let err = WeatherError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "Invalid API key".into(),
        };
        assert!(!err.is_request_error());
        assert!(err.to_string().contains("401"));
    }
}
