//! Solar ephemeris providers
//!
//! A provider returns the geocentric position of the Sun for a calendar
//! date (00:00 UTC) in GCRS axes. Callers re-express that vector as a
//! direction in the catalog frame before measuring separations.

pub mod analytic_sun;
pub mod horizons;

pub use analytic_sun::AnalyticSun;
pub use horizons::HorizonsSun;

use chrono::{Days, NaiveDate};

use crate::error::EphemerisError;
use crate::utils::config::EphemerisSource;

/// Trait for sources of the Sun's geocentric position
pub trait SunEphemeris: Send + Sync {
    /// Geocentric Sun position in km (GCRS axes) at 00:00 UTC of `date`
    fn sun_gcrs(&self, date: NaiveDate) -> Result<[f64; 3], EphemerisError>;

    /// Get provider name
    fn name(&self) -> String;
}

/// Build the provider for `source` covering `start..=end`
///
/// The analytic theory needs no preparation; Horizons is queried once for
/// the whole span.
pub fn build_ephemeris(
    source: EphemerisSource,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Box<dyn SunEphemeris>, EphemerisError> {
    match source {
        EphemerisSource::Analytic => Ok(Box::new(AnalyticSun::new())),
        EphemerisSource::Horizons => {
            // Horizons needs distinct start/stop dates
            let stop = if end > start {
                end
            } else {
                start
                    .checked_add_days(Days::new(1))
                    .ok_or(EphemerisError::OutOfRange(start))?
            };
            Ok(Box::new(HorizonsSun::fetch(start, stop)?))
        }
    }
}
