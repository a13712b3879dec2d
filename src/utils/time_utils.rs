//! Time utilities for the daily visibility scans
//!
//! Dates are evaluated at 00:00 UTC. hifitime supplies the leap-second
//! table needed to move from UTC to TT for the solar theory.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use hifitime::{Duration, Epoch};

use crate::error::ResolutionError;
use crate::utils::config::{
    DAYS_PER_JULIAN_CENTURY, J2000_JD, JD_MJD_OFFSET, REFERENCE_YEAR, SCAN_DAYS, TT_TAI_SECONDS,
};

/// Convert chrono `DateTime<Utc>` to hifitime `Epoch`
#[inline]
pub fn chrono_to_epoch(dt: &DateTime<Utc>) -> Epoch {
    let nanos = (dt.timestamp() as i128) * 1_000_000_000 + (dt.timestamp_subsec_nanos() as i128);
    Epoch::from_unix_duration(Duration::from_total_nanoseconds(nanos))
}

/// Get TAI-UTC offset in seconds (leap seconds) for a DateTime
///
/// Returns None before 1972 when the IERS leap-second table starts
#[inline]
pub fn get_tai_utc_offset(dt: &DateTime<Utc>) -> Option<f64> {
    chrono_to_epoch(dt).leap_seconds(true)
}

/// Get TT-UTC offset in seconds (TT-TAI + TAI-UTC = 32.184 + leap_seconds)
#[inline]
pub fn get_tt_utc_offset_seconds(dt: &DateTime<Utc>) -> f64 {
    get_tai_utc_offset(dt).map_or(69.184, |tai_utc| TT_TAI_SECONDS + tai_utc)
}

/// Convert DateTime to two-part Julian Date (JD1=2400000.5, JD2=MJD)
#[inline]
pub fn datetime_to_jd(dt: &DateTime<Utc>) -> (f64, f64) {
    (JD_MJD_OFFSET, chrono_to_epoch(dt).to_mjd_utc_days())
}

/// Midnight UTC of a calendar date
#[inline]
pub fn date_to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Julian centuries of TT since J2000.0 at 00:00 UTC of `date`
pub fn julian_centuries_tt(date: NaiveDate) -> f64 {
    let dt = date_to_utc(date);
    let (jd1, jd2) = datetime_to_jd(&dt);
    let tt_days = get_tt_utc_offset_seconds(&dt) / 86400.0;
    ((jd1 - J2000_JD) + jd2 + tt_days) / DAYS_PER_JULIAN_CENTURY
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(input: &str) -> Result<NaiveDate, ResolutionError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|source| {
        ResolutionError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

/// Month/day label, e.g. `0209` for 9 February
pub fn format_mmdd(date: NaiveDate) -> String {
    format!("{:02}{:02}", date.month(), date.day())
}

/// Day 0 (1 January) of the reference year followed by the scanned days
pub fn reference_year_days() -> Vec<NaiveDate> {
    let Some(new_year) = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1) else {
        return Vec::new();
    };
    (0..=SCAN_DAYS)
        .filter_map(|n| new_year.checked_add_days(Days::new(n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_datetime_to_jd() {
        // 2000-01-01 12:00:00 UTC = MJD 51544.5
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let (jd1, jd2) = datetime_to_jd(&dt);
        assert!((jd1 + jd2 - 2451545.0).abs() < 1e-6);
    }

    #[test]
    fn test_tt_offset_2001() {
        // 32 leap seconds were in effect throughout 2001
        let dt = Utc.with_ymd_and_hms(2001, 6, 1, 0, 0, 0).unwrap();
        assert!((get_tt_utc_offset_seconds(&dt) - 64.184).abs() < 1e-9);
    }

    #[test]
    fn test_julian_centuries_at_j2000_midnight() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        // Half a day before J2000.0 plus TT-UTC (32 + 32.184 s)
        let expected = (-0.5 + 64.184 / 86400.0) / 36525.0;
        assert!((julian_centuries_tt(date) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2022-11-21").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 11, 21).unwrap());
        assert!(matches!(
            parse_date("2022-13-01"),
            Err(ResolutionError::InvalidDate { .. })
        ));
        assert!(parse_date("21/11/2022").is_err());
    }

    #[test]
    fn test_format_mmdd() {
        let date = NaiveDate::from_ymd_opt(2001, 2, 9).unwrap();
        assert_eq!(format_mmdd(date), "0209");
    }

    #[test]
    fn test_reference_year_days() {
        let days = reference_year_days();
        assert_eq!(days.len(), 365);
        assert_eq!(format_mmdd(days[0]), "0101");
        assert_eq!(format_mmdd(days[364]), "1231");
        assert!(days.iter().all(|d| d.year() == REFERENCE_YEAR));
    }
}
