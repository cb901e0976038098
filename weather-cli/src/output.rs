use std::fmt::Write;

use weather_digest_core::{CurrentWeatherView, DailyForecastSummary};

pub fn render_current(view: &CurrentWeatherView) -> String {
    let rain = if view.rain_info { view.rain1h.as_str() } else { "none" };

    let rows = [
        ("Conditions", view.description.as_str()),
        ("Temperature", view.temp.as_str()),
        ("Feels like", view.feel_temp.as_str()),
        ("Humidity", view.humidity.as_str()),
        ("Wind", view.wind_speed.as_str()),
        ("Clouds", view.cloud.as_str()),
        ("Rain (1h)", rain),
        ("Sunrise", view.sunrise.as_str()),
        ("Sunset", view.sunset.as_str()),
        ("Country", view.country.as_str()),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<12} {value}");
    }
    out
}

pub fn render_week(days: &[DailyForecastSummary]) -> String {
    if days.is_empty() {
        return "No forecast data.\n".to_string();
    }

    let mut out = String::new();
    for day in days {
        let _ = writeln!(
            out,
            "{}  min {:>6.1} C  max {:>6.1} C",
            day.date.format("%a %Y-%m-%d"),
            day.min_temperature,
            day.max_temperature,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn view(rain_info: bool) -> CurrentWeatherView {
        CurrentWeatherView {
            temp: "21.3 C".into(),
            description: "맑음".into(),
            feel_temp: "21.0 C".into(),
            humidity: "64 %".into(),
            wind_speed: "2.57 m/s".into(),
            cloud: "0 %".into(),
            sunrise: "2024-06-02T05:11:42".into(),
            sunset: "2024-06-02T19:52:03".into(),
            country: "KR".into(),
            rain_info,
            rain1h: if rain_info { "0.5mm".into() } else { "0mm".into() },
        }
    }

    #[test]
    fn current_lists_every_reading() {
        let text = render_current(&view(false));

        assert!(text.contains("Temperature  21.3 C"));
        assert!(text.contains("Rain (1h)    none"));
        assert_eq!(text.lines().count(), 10);
    }

    #[test]
    fn current_shows_rainfall_when_present() {
        assert!(render_current(&view(true)).contains("Rain (1h)    0.5mm"));
    }

    #[test]
    fn week_has_one_line_per_day() {
        let days = [
            DailyForecastSummary {
                date: chrono_date(1),
                min_temperature: 10.0,
                max_temperature: 15.0,
            },
            DailyForecastSummary {
                date: chrono_date(2),
                min_temperature: 18.0,
                max_temperature: 20.25,
            },
        ];

        let text = render_week(&days);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Sat 2024-06-01  min   10.0 C  max   15.0 C");
        assert!(lines[1].starts_with("Sun 2024-06-02"));
    }

    #[test]
    fn empty_week_says_so() {
        assert_eq!(render_week(&[]), "No forecast data.\n");
    }

    fn chrono_date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }
}
