//! Epoch-seconds to calendar conversions.
//!
//! The zone used for "what day is this observation" is a configuration
//! choice. `Local` follows the machine running the service, which makes
//! results depend on where it is deployed; `Utc` and `Location` do not.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configured zone policy, as stored in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateZone {
    /// Time zone of the executing machine.
    #[default]
    Local,
    Utc,
    /// Offset reported by the provider for the queried coordinates.
    Location,
}

impl DateZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateZone::Local => "local",
            DateZone::Utc => "utc",
            DateZone::Location => "location",
        }
    }

    pub const fn all() -> &'static [DateZone] {
        &[DateZone::Local, DateZone::Utc, DateZone::Location]
    }
}

impl std::fmt::Display for DateZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zone resolved for one provider response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Zone {
    /// Resolve the policy against the offset (seconds east of UTC) the
    /// provider reported. `Location` without a usable offset falls back to UTC.
    pub fn resolve(policy: DateZone, location_offset_secs: Option<i32>) -> Self {
        match policy {
            DateZone::Local => Zone::Local,
            DateZone::Utc => Zone::Utc,
            DateZone::Location => match location_offset_secs.and_then(FixedOffset::east_opt) {
                Some(offset) => Zone::Fixed(offset),
                None => {
                    debug!(?location_offset_secs, "no usable location offset, using UTC");
                    Zone::Utc
                }
            },
        }
    }

    /// Wall-clock date-time of `epoch_secs` in this zone.
    /// `None` when the instant, or the instant shifted by the zone offset,
    /// falls outside chrono's date range.
    pub fn date_time(&self, epoch_secs: i64) -> Option<NaiveDateTime> {
        let utc = DateTime::<Utc>::from_timestamp(epoch_secs, 0)?.naive_utc();
        let offset = match self {
            Zone::Utc => return Some(utc),
            Zone::Local => Local.offset_from_utc_datetime(&utc).fix(),
            Zone::Fixed(offset) => *offset,
        };
        utc.checked_add_signed(Duration::seconds(offset.local_minus_utc().into()))
    }

    /// Calendar date of `epoch_secs` in this zone.
    pub fn date(&self, epoch_secs: i64) -> Option<NaiveDate> {
        self.date_time(epoch_secs).map(|dt| dt.date())
    }
}

/// ISO-8601 local date-time without offset, e.g. `2024-06-01T05:11:42`.
/// Whole minutes drop the seconds field (`2024-06-01T05:11`).
pub fn render_date_time(dt: &NaiveDateTime) -> String {
    if dt.second() == 0 {
        dt.format("%Y-%m-%dT%H:%M").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-01T23:30:00Z
    const LATE_EVENING_UTC: i64 = 1_717_284_600;

    #[test]
    fn utc_date_is_stable() {
        let date = Zone::Utc.date(LATE_EVENING_UTC).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(Zone::Utc.date(LATE_EVENING_UTC), Zone::Utc.date(LATE_EVENING_UTC));
    }

    #[test]
    fn location_offset_moves_the_date() {
        // Seoul, UTC+9
        let zone = Zone::resolve(DateZone::Location, Some(9 * 3600));
        let date = zone.date(LATE_EVENING_UTC).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    }

    #[test]
    fn location_without_offset_falls_back_to_utc() {
        assert_eq!(Zone::resolve(DateZone::Location, None), Zone::Utc);
        assert_eq!(Zone::resolve(DateZone::Location, Some(100_000)), Zone::Utc);
    }

    #[test]
    fn policy_is_kept_for_local_and_utc() {
        assert_eq!(Zone::resolve(DateZone::Local, Some(3600)), Zone::Local);
        assert_eq!(Zone::resolve(DateZone::Utc, Some(3600)), Zone::Utc);
    }

    #[test]
    fn renders_iso_local_date_time() {
        let dt = Zone::Utc.date_time(LATE_EVENING_UTC + 42).unwrap();
        assert_eq!(render_date_time(&dt), "2024-06-01T23:30:42");
    }

    #[test]
    fn whole_minutes_omit_seconds() {
        let dt = Zone::Utc.date_time(LATE_EVENING_UTC).unwrap();
        assert_eq!(render_date_time(&dt), "2024-06-01T23:30");
    }

    #[test]
    fn out_of_range_timestamp_is_none() {
        assert!(Zone::Utc.date(i64::MAX).is_none());
    }

    #[test]
    fn offset_past_the_date_range_is_none() {
        let last = NaiveDateTime::MAX.and_utc().timestamp();
        let first = NaiveDateTime::MIN.and_utc().timestamp();
        let east = Zone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap());
        let west = Zone::Fixed(FixedOffset::west_opt(5 * 3600).unwrap());

        assert!(east.date_time(last).is_none());
        assert!(east.date(last).is_none());
        assert!(west.date_time(first).is_none());
        assert_eq!(Zone::Utc.date(last), Some(NaiveDateTime::MAX.date()));
    }

    #[test]
    fn local_zone_matches_the_machine_zone() {
        for ts in [0, LATE_EVENING_UTC, LATE_EVENING_UTC + 6 * 3600 + 17] {
            let expected = Local.timestamp_opt(ts, 0).single().unwrap();

            assert_eq!(Zone::Local.date_time(ts), Some(expected.naive_local()));
            assert_eq!(Zone::Local.date(ts), Some(expected.date_naive()));
        }
    }

    #[test]
    fn date_zone_names_match_config_spelling() {
        for zone in DateZone::all() {
            assert_eq!(serde_json::to_value(zone).unwrap(), serde_json::json!(zone.as_str()));
            assert_eq!(zone.to_string(), zone.as_str());
        }
    }
}
