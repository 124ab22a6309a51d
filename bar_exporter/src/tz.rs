//! Time zone parsing and epoch-timestamp rendering.
//!
//! What this module provides:
//! - [`parse_tz`]: Parse an IANA zone name (e.g. "America/New_York", or the legacy
//!   alias "US/Eastern") into a [`chrono_tz::Tz`].
//! - [`render_datetime`]: Render a UTC instant as a wall-clock string, either in UTC
//!   or converted to a zone, without an offset suffix.
//!
//! Notes:
//! - Output is always `%Y-%m-%d %H:%M:%S`. Zoned output drops the offset, so the two
//!   wall times that occur during a "fall back" hour render identically; the rows still
//!   keep provider order.
//!
//! Examples
//! - 1704205800000 ms, naive UTC -> "2024-01-02 14:30:00"
//! - 1704205800000 ms, US/Eastern -> "2024-01-02 09:30:00" (EST, UTC-5)
//! - 1710163800000 ms, US/Eastern -> "2024-03-11 09:30:00" (EDT, UTC-4)

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::models::table::DatetimeMode;

/// Format used for the `Datetime` column.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zone the per-symbol preset converts to.
pub const US_EASTERN: Tz = chrono_tz::US::Eastern;

/// Time zone name could not be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown time zone: {name}")]
pub struct UnknownTimeZone {
    pub name: String,
}

/// Parse an IANA zone name.
pub fn parse_tz(name: &str) -> Result<Tz, UnknownTimeZone> {
    name.trim().parse::<Tz>().map_err(|_| UnknownTimeZone {
        name: name.to_string(),
    })
}

/// Render a UTC instant according to `mode`.
pub fn render_datetime(dt: DateTime<Utc>, mode: DatetimeMode) -> String {
    match mode {
        DatetimeMode::NaiveUtc => dt.naive_utc().format(DATETIME_FORMAT).to_string(),
        DatetimeMode::Zoned(tz) => dt.with_timezone(&tz).format(DATETIME_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn legacy_us_eastern_alias_parses() {
        assert_eq!(parse_tz("US/Eastern").unwrap(), US_EASTERN);
        assert_eq!(parse_tz(" America/New_York ").unwrap(), chrono_tz::America::New_York);
    }

    #[test]
    fn unknown_zone_is_error() {
        let err = parse_tz("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err.name, "Mars/Olympus_Mons");
    }

    #[test]
    fn naive_utc_has_no_suffix() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
        assert_eq!(render_datetime(dt, DatetimeMode::NaiveUtc), "2024-01-02 14:30:00");
    }

    #[test]
    fn eastern_tracks_daylight_saving() {
        // Winter: UTC-5
        let winter = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
        assert_eq!(
            render_datetime(winter, DatetimeMode::Zoned(US_EASTERN)),
            "2024-01-02 09:30:00"
        );

        // After the 2024-03-10 spring-forward: UTC-4
        let summer = Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 0).unwrap();
        assert_eq!(
            render_datetime(summer, DatetimeMode::Zoned(US_EASTERN)),
            "2024-03-11 09:30:00"
        );
    }

    #[test]
    fn zoned_render_crosses_midnight() {
        // 02:00Z on Jan 3 is still Jan 2 in New York.
        let dt = Utc.with_ymd_and_hms(2024, 1, 3, 2, 0, 0).unwrap();
        assert_eq!(
            render_datetime(dt, DatetimeMode::Zoned(US_EASTERN)),
            "2024-01-02 21:00:00"
        );
    }
}
