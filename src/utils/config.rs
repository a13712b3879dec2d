//! Constants and runtime settings
//!
//! Mission thresholds and physical constants are fixed at compile time.
//! Endpoints and file locations can be overridden through environment
//! variables (a `.env` file is honoured by the binary).

use once_cell::sync::Lazy;
use std::path::PathBuf;

// Mission Sun-avoidance limits (degrees)
pub const CHEOPS_MIN_SEP_DEG: f64 = 120.0;
pub const JWST_MIN_SEP_DEG: f64 = 85.0;
pub const JWST_MAX_SEP_DEG: f64 = 137.0;

/// Non-leap year used as a calendar scaffold for annual scans
pub const REFERENCE_YEAR: i32 = 2001;
/// Days visited after day 0 in an annual scan
pub const SCAN_DAYS: u64 = 364;

// Time scales
pub const TT_TAI_SECONDS: f64 = 32.184;
pub const JD_MJD_OFFSET: f64 = 2400000.5;
pub const J2000_JD: f64 = 2451545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

// Geometry
pub const AU_KM: f64 = 149_597_870.7;
/// Mean obliquity of the ecliptic at J2000 (IAU 1980), degrees
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_1;

// Name resolution (same mirrors astropy uses)
pub const SESAME_URLS: &[&str] = &[
    "https://cds.unistra.fr/cgi-bin/nph-sesame/",
    "http://vizier.cfa.harvard.edu/viz-bin/nph-sesame/",
];
pub const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";
pub const SUN_NAIF_ID: i32 = 10;
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// Environment variables
pub const SESAME_URL_ENV: &str = "SUN_AVOIDANCE_SESAME_URL";
pub const CATALOG_PATH_ENV: &str = "SUN_AVOIDANCE_CATALOG";
pub const OFFLINE_ENV: &str = "SUN_AVOIDANCE_OFFLINE";
pub const EPHEMERIS_ENV: &str = "SUN_AVOIDANCE_EPHEMERIS";

pub static CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sun_avoidance")
});

pub static DEFAULT_CATALOG_PATH: Lazy<PathBuf> = Lazy::new(|| CONFIG_DIR.join("catalog.json"));

/// Source of the Sun's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EphemerisSource {
    /// Built-in low-precision solar theory, no network access
    #[default]
    Analytic,
    /// JPL Horizons vectors, fetched once per query span
    Horizons,
}

impl std::str::FromStr for EphemerisSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analytic" => Ok(EphemerisSource::Analytic),
            "horizons" => Ok(EphemerisSource::Horizons),
            other => Err(format!(
                "Unknown ephemeris source: {other}. Valid options: analytic, horizons"
            )),
        }
    }
}

/// Settings resolved from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub sesame_urls: Vec<String>,
    pub catalog_path: PathBuf,
    pub offline: bool,
    pub ephemeris: EphemerisSource,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sesame_urls: SESAME_URLS.iter().map(|u| u.to_string()).collect(),
            catalog_path: DEFAULT_CATALOG_PATH.clone(),
            offline: false,
            ephemeris: EphemerisSource::default(),
        }
    }
}

impl Settings {
    /// Defaults overridden by any `SUN_AVOIDANCE_*` variables that are set
    pub fn from_env() -> Self {
        let mut settings = Settings::default();

        if let Ok(url) = std::env::var(SESAME_URL_ENV) {
            settings.sesame_urls = url
                .split(',')
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .collect();
        }
        if let Ok(path) = std::env::var(CATALOG_PATH_ENV) {
            settings.catalog_path = PathBuf::from(path);
        }
        if let Ok(flag) = std::env::var(OFFLINE_ENV) {
            settings.offline = parse_flag(&flag);
        }
        if let Ok(source) = std::env::var(EPHEMERIS_ENV) {
            match source.parse() {
                Ok(parsed) => settings.ephemeris = parsed,
                Err(e) => log::warn!("Ignoring {EPHEMERIS_ENV}: {e}"),
            }
        }

        settings
    }
}

/// Truthy environment flag: `1`, `true` or `yes`, in any case
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
