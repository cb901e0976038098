//! Daily min/max aggregation over forecast observations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::{
    model::{DailyForecastSummary, Observation},
    timestamp::Zone,
};

/// Group observations by calendar date in `zone` and compute each day's
/// temperature range. Output is ordered by ascending date, one entry per
/// distinct date. Observations whose timestamp has no calendar date are skipped.
pub fn aggregate_forecast(observations: &[Observation], zone: Zone) -> Vec<DailyForecastSummary> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

    for obs in observations {
        match zone.date(obs.dt) {
            Some(date) => by_date.entry(date).or_default().push(obs.main.temp),
            None => warn!(dt = obs.dt, "skipping forecast entry with unrepresentable timestamp"),
        }
    }

    by_date
        .into_iter()
        .map(|(date, temps)| DailyForecastSummary {
            date,
            min_temperature: temps.iter().copied().reduce(f64::min).unwrap_or(f64::NAN),
            max_temperature: temps.iter().copied().reduce(f64::max).unwrap_or(f64::NAN),
        })
        .collect()
}
