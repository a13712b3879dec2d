/// JPL Horizons API integration for the Sun's geocentric position
///
/// One VECTORS query covers a whole span of dates; individual dates are
/// then linearly interpolated from the daily Horizons rows.
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use hifitime::Epoch;
use std::cmp::Ordering;
use url::Url;

use super::SunEphemeris;
use crate::error::EphemerisError;
use crate::utils::config::{HORIZONS_API_URL, SUN_NAIF_ID};
use crate::utils::http::http_agent;
use crate::utils::time_utils::{chrono_to_epoch, date_to_utc};

/// Sun positions fetched from Horizons for a fixed span of dates
#[derive(Debug, Clone)]
pub struct HorizonsSun {
    first_date: NaiveDate,
    last_date: NaiveDate,
    times: Vec<DateTime<Utc>>,
    positions: Vec<[f64; 3]>,
}

impl HorizonsSun {
    /// Query Horizons for geocentric Sun vectors covering `first..=last`
    ///
    /// The query is padded by a day on each side because Horizons rows are
    /// stamped in TDB, about a minute away from 00:00 UTC.
    pub fn fetch(first: NaiveDate, last: NaiveDate) -> Result<Self, EphemerisError> {
        let start = first
            .checked_sub_days(Days::new(1))
            .ok_or(EphemerisError::OutOfRange(first))?;
        let stop = last
            .checked_add_days(Days::new(1))
            .ok_or(EphemerisError::OutOfRange(last))?;

        let url = query_url(start, stop)?;
        log::info!("Querying Horizons for Sun vectors {start} to {stop}");
        log::debug!("Horizons URL: {url}");

        let response = http_agent()
            .get(url.as_str())
            .call()
            .map_err(|e| EphemerisError::Horizons(format!("request failed: {e}")))?;

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| EphemerisError::Horizons(format!("failed to read response: {e}")))?;

        Self::from_response(&body, first, last)
    }

    /// Build from a Horizons CSV text response
    pub fn from_response(
        body: &str,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Self, EphemerisError> {
        let (times, positions) = parse_horizons_csv_response(body)?;
        log::debug!("Parsed {} Horizons rows", times.len());
        Ok(HorizonsSun {
            first_date: first,
            last_date: last,
            times,
            positions,
        })
    }
}

impl SunEphemeris for HorizonsSun {
    fn sun_gcrs(&self, date: NaiveDate) -> Result<[f64; 3], EphemerisError> {
        if date < self.first_date || date > self.last_date {
            return Err(EphemerisError::OutOfRange(date));
        }
        interpolate_position(&self.times, &self.positions, &date_to_utc(date))
            .ok_or(EphemerisError::OutOfRange(date))
    }

    fn name(&self) -> String {
        format!("HorizonsSun({} to {})", self.first_date, self.last_date)
    }
}

/// Build the Horizons API URL with ICRF/equatorial output (VECTORS format)
///
/// CENTER='@399' = geocentric, REF_PLANE='FRAME' = ICRF axes,
/// VEC_CORR='LT+S' = apparent direction (light time and aberration)
fn query_url(start: NaiveDate, stop: NaiveDate) -> Result<Url, EphemerisError> {
    let command = format!("'{SUN_NAIF_ID}'");
    let start_time = format!("'{}'", start.format("%Y-%m-%d"));
    let stop_time = format!("'{}'", stop.format("%Y-%m-%d"));
    Url::parse_with_params(
        HORIZONS_API_URL,
        &[
            ("format", "text"),
            ("COMMAND", command.as_str()),
            ("OBJ_DATA", "'NO'"),
            ("MAKE_EPHEM", "'YES'"),
            ("EPHEM_TYPE", "'VECTORS'"),
            ("VEC_TABLE", "'1'"),
            ("VEC_CORR", "'LT+S'"),
            ("CENTER", "'@399'"),
            ("REF_PLANE", "'FRAME'"),
            ("START_TIME", start_time.as_str()),
            ("STOP_TIME", stop_time.as_str()),
            ("STEP_SIZE", "'1d'"),
            ("OUT_UNITS", "'KM-S'"),
            ("CSV_FORMAT", "'YES'"),
        ],
    )
    .map_err(|e| EphemerisError::Horizons(format!("invalid query URL: {e}")))
}

type HorizonsRows = (Vec<DateTime<Utc>>, Vec<[f64; 3]>);

/// Parse the rows between `$$SOE` and `$$EOE`
fn parse_horizons_csv_response(response: &str) -> Result<HorizonsRows, EphemerisError> {
    let mut data_lines = Vec::new();

    let mut in_data_section = false;
    for line in response.lines() {
        if line.contains("$$SOE") {
            in_data_section = true;
            continue;
        }
        if line.contains("$$EOE") {
            break;
        }
        if in_data_section && !line.trim().is_empty() {
            data_lines.push(line);
        }
    }

    if data_lines.is_empty() {
        return Err(EphemerisError::InvalidResponse(
            "no ephemeris data found in Horizons response".to_string(),
        ));
    }

    let mut times = Vec::with_capacity(data_lines.len());
    let mut positions = Vec::with_capacity(data_lines.len());

    for line in data_lines {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 5 {
            continue; // need JDTDB, CalDate, X, Y, Z
        }

        let time = parse_horizons_datetime(parts[0].trim())?;

        let mut xyz = [0.0; 3];
        for (slot, part) in xyz.iter_mut().zip(parts.iter().skip(2)) {
            *slot = part.trim().parse::<f64>().map_err(|_| {
                EphemerisError::InvalidResponse(format!("failed to parse number: '{}'", part.trim()))
            })?;
        }

        times.push(time);
        positions.push(xyz);
    }

    if positions.is_empty() {
        return Err(EphemerisError::InvalidResponse(
            "could not parse any ephemeris rows from Horizons".to_string(),
        ));
    }

    Ok((times, positions))
}

/// Parse Horizons JDTDB to DateTime<Utc>
fn parse_horizons_datetime(s: &str) -> Result<DateTime<Utc>, EphemerisError> {
    let jd_tdb: f64 = s
        .parse()
        .map_err(|_| EphemerisError::InvalidResponse(format!("invalid Julian Date: {s}")))?;

    // Horizons times are in TDB; convert to UTC via hifitime.
    let epoch = Epoch::from_jde_tdb(jd_tdb);
    let unix_seconds = epoch.to_unix_seconds();
    if !unix_seconds.is_finite() {
        return Err(EphemerisError::InvalidResponse(format!(
            "invalid Unix seconds from JD {jd_tdb}"
        )));
    }

    let mut secs = unix_seconds.floor() as i64;
    let mut nsecs = ((unix_seconds - secs as f64) * 1e9).round() as i64;
    if nsecs == 1_000_000_000 {
        secs += 1;
        nsecs = 0;
    }
    if nsecs < 0 {
        secs -= 1;
        nsecs += 1_000_000_000;
    }

    Utc.timestamp_opt(secs, nsecs as u32)
        .single()
        .ok_or_else(|| EphemerisError::InvalidResponse(format!("invalid timestamp from JD {jd_tdb}")))
}

/// Linearly interpolate a position at `requested`
///
/// Returns None when `requested` lies outside the tabulated rows.
fn interpolate_position(
    times: &[DateTime<Utc>],
    positions: &[[f64; 3]],
    requested: &DateTime<Utc>,
) -> Option<[f64; 3]> {
    let base_epoch = chrono_to_epoch(times.first()?);
    let seconds: Vec<f64> = times
        .iter()
        .map(|t| (chrono_to_epoch(t) - base_epoch).to_seconds())
        .collect();
    let req_seconds = (chrono_to_epoch(requested) - base_epoch).to_seconds();

    let idx = match seconds
        .binary_search_by(|t| t.partial_cmp(&req_seconds).unwrap_or(Ordering::Equal))
    {
        Ok(exact_idx) => return positions.get(exact_idx).copied(),
        Err(insert_idx) => insert_idx,
    };

    if idx == 0 || idx >= seconds.len() {
        return None;
    }

    let (left, right) = (idx - 1, idx);
    let denom = seconds[right] - seconds[left];
    let weight = if denom == 0.0 {
        0.0
    } else {
        (req_seconds - seconds[left]) / denom
    };

    let mut out = [0.0; 3];
    for (j, slot) in out.iter_mut().enumerate() {
        *slot = positions[left][j] + weight * (positions[right][j] - positions[left][j]);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SAMPLE_RESPONSE: &str = "\
*******************************************************************************
Ephemeris / API_USER
 Target body name: Sun (10)                        {source: DE441}
 Center body name: Earth (399)                     {source: DE441}
*******************************************************************************
            JDTDB,            Calendar Date (TDB),                      X,                      Y,                      Z,
**************************************************************************************************************************
$$SOE
2451909.500000000, A.D. 2000-Dec-31 00:00:00.0000,  2.635450858068005E+07, -1.326380542398564E+08, -5.750184419627698E+07,
2451910.500000000, A.D. 2001-Jan-01 00:00:00.0000,  2.892720178023716E+07, -1.322064553015451E+08, -5.731474046005530E+07,
2451911.500000000, A.D. 2001-Jan-02 00:00:00.0000,  3.148892380101826E+07, -1.317390924651018E+08, -5.711213022318919E+07,
$$EOE
*******************************************************************************
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    #[ignore] // Ignore by default since it requires network access
    fn test_fetch_horizons_sun() {
        let sun = HorizonsSun::fetch(date(2001, 1, 1), date(2001, 1, 3)).unwrap();
        let pos = sun.sun_gcrs(date(2001, 1, 2)).unwrap();
        let r = (pos[0].powi(2) + pos[1].powi(2) + pos[2].powi(2)).sqrt();
        assert!(r > 1.47e8 && r < 1.48e8);
    }

    #[test]
    fn test_parse_sample_response() {
        let (times, positions) = parse_horizons_csv_response(SAMPLE_RESPONSE).unwrap();
        assert_eq!(times.len(), 3);
        assert!((positions[1][0] - 2.892720178023716e7).abs() < 1e-3);
        // 00:00 TDB precedes 00:00 UTC by TT-UTC plus a periodic term (~64 s in 2001)
        let offset = (date_to_utc(date(2001, 1, 1)) - times[1]).num_milliseconds();
        assert!((63_000..66_000).contains(&offset), "offset = {offset} ms");
    }

    #[test]
    fn test_sun_gcrs_interpolates_within_span() {
        let sun =
            HorizonsSun::from_response(SAMPLE_RESPONSE, date(2001, 1, 1), date(2001, 1, 1)).unwrap();
        let pos = sun.sun_gcrs(date(2001, 1, 1)).unwrap();
        // 00:00 UTC sits just after the 2001-Jan-01 TDB row
        assert!(pos[0] > 2.892720178023716e7 && pos[0] < 2.9e7);
        assert!(matches!(
            sun.sun_gcrs(date(2001, 1, 2)),
            Err(EphemerisError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_response_without_data() {
        let result = parse_horizons_csv_response("No ephemeris for target \"Sun\"");
        assert!(matches!(result, Err(EphemerisError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_horizons_datetime_tdb_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 1, 12, 34, 56).unwrap();
        let jd_tdb = chrono_to_epoch(&dt).to_jde_tdb_days();
        let parsed = parse_horizons_datetime(&format!("{:.12}", jd_tdb))
            .expect("parse_horizons_datetime failed");
        let diff_ns = (parsed - dt).num_nanoseconds().unwrap().abs();
        assert!(diff_ns < 1_000_000);
    }

    #[test]
    fn test_interpolate_position_linear() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = t0 + Duration::seconds(10);
        let positions = vec![[0.0, 0.0, 0.0], [10.0, 20.0, 30.0]];
        let result =
            interpolate_position(&[t0, t1], &positions, &(t0 + Duration::seconds(5))).unwrap();

        assert!((result[0] - 5.0).abs() < 1e-9);
        assert!((result[1] - 10.0).abs() < 1e-9);
        assert!((result[2] - 15.0).abs() < 1e-9);
        assert!(interpolate_position(&[t0, t1], &positions, &(t1 + Duration::seconds(1))).is_none());
    }
}
