//! Low-precision analytic solar coordinates
//!
//! Geometric mean longitude, mean anomaly and equation of centre give the
//! Sun's true longitude of date. The longitude is reduced to the J2000
//! ecliptic, annual aberration is applied and the result is rotated to the
//! equator with the J2000 obliquity, so the direction shares the ICRS axes
//! of catalog coordinates. Accuracy is about 0.01°, which is well inside
//! the tolerance of daily visibility sampling.

use chrono::{Datelike, NaiveDate};

use super::SunEphemeris;
use crate::error::EphemerisError;
use crate::utils::config::{AU_KM, OBLIQUITY_J2000_DEG};
use crate::utils::time_utils::julian_centuries_tt;

/// Years over which the series is trusted
const VALID_YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Precession in longitude, degrees per Julian century
const GENERAL_PRECESSION_DEG: f64 = 1.397;
/// Constant of annual aberration, degrees
const ABERRATION_DEG: f64 = 0.005_69;

/// Built-in solar theory; needs no data files or network access
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticSun;

impl AnalyticSun {
    pub fn new() -> Self {
        AnalyticSun
    }

    /// Apparent ecliptic longitude (J2000 equinox, degrees) and distance (AU)
    pub fn ecliptic_longitude_distance(t: f64) -> (f64, f64) {
        let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
        let m = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
        let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

        let m_rad = m.to_radians();
        let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
            + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
            + 0.000289 * (3.0 * m_rad).sin();

        let true_longitude = l0 + c;
        let true_anomaly = (m + c).to_radians();
        let distance_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

        let longitude = true_longitude - GENERAL_PRECESSION_DEG * t - ABERRATION_DEG;
        (longitude.rem_euclid(360.0), distance_au)
    }
}

impl SunEphemeris for AnalyticSun {
    fn sun_gcrs(&self, date: NaiveDate) -> Result<[f64; 3], EphemerisError> {
        if !VALID_YEARS.contains(&date.year()) {
            return Err(EphemerisError::OutOfRange(date));
        }

        let t = julian_centuries_tt(date);
        let (longitude_deg, distance_au) = Self::ecliptic_longitude_distance(t);

        let lambda = longitude_deg.to_radians();
        let eps = OBLIQUITY_J2000_DEG.to_radians();
        let r_km = distance_au * AU_KM;

        Ok([
            r_km * lambda.cos(),
            r_km * eps.cos() * lambda.sin(),
            r_km * eps.sin() * lambda.sin(),
        ])
    }

    fn name(&self) -> String {
        "AnalyticSun".to_string()
    }
}
