//! Sun-avoidance visibility checks
//!
//! [`VisibilityChecker`] ties a name resolver to a solar ephemeris. Single
//! date checks and annual scans both measure the great-circle separation
//! between the target and the Sun at 00:00 UTC.

use chrono::NaiveDate;
use ndarray::Array2;

use crate::catalog::{LocalCatalog, NameResolver, ResolverChain};
use crate::constraints::Mission;
use crate::coordinates::SkyPosition;
use crate::ephemeris::{build_ephemeris, AnalyticSun, SunEphemeris};
use crate::error::Result;
use crate::utils::config::Settings;
use crate::utils::time_utils::{parse_date, reference_year_days};
use crate::utils::vector_math::angular_separations_batch;
use crate::visibility::{AnnualTrack, VisibilityReport};

pub struct VisibilityChecker {
    resolver: Box<dyn NameResolver>,
    ephemeris: Box<dyn SunEphemeris>,
}

impl VisibilityChecker {
    pub fn new(resolver: Box<dyn NameResolver>, ephemeris: Box<dyn SunEphemeris>) -> Self {
        VisibilityChecker {
            resolver,
            ephemeris,
        }
    }

    /// Built-in catalog and the analytic Sun; never touches the network
    pub fn offline() -> Self {
        VisibilityChecker::new(Box::new(LocalCatalog::builtin()), Box::new(AnalyticSun::new()))
    }

    /// Resolver chain and ephemeris chosen by `settings`
    ///
    /// `first..=last` is the span of dates the ephemeris must cover; only
    /// the Horizons source uses it.
    pub fn from_settings(settings: &Settings, first: NaiveDate, last: NaiveDate) -> Result<Self> {
        let resolver = ResolverChain::from_settings(settings)?;
        let ephemeris = build_ephemeris(settings.ephemeris, first, last)?;
        log::debug!(
            "Visibility checker using {} and {}",
            resolver.name(),
            ephemeris.name()
        );
        Ok(VisibilityChecker::new(Box::new(resolver), ephemeris))
    }

    pub fn resolve(&self, name: &str) -> Result<SkyPosition> {
        Ok(self.resolver.resolve(name)?)
    }

    /// Apparent direction of the Sun at 00:00 UTC of `date`
    pub fn sun_position(&self, date: NaiveDate) -> Result<SkyPosition> {
        let sun = self.ephemeris.sun_gcrs(date)?;
        Ok(SkyPosition::from_vector(&sun))
    }

    /// Sun-target separation in degrees, in [0, 180]
    pub fn solar_separation(&self, target: &SkyPosition, date: NaiveDate) -> Result<f64> {
        let separation = self.sun_position(date)?.separation(target);
        log::debug!("Sun separation of {target} on {date}: {separation:.4}°");
        Ok(separation)
    }

    pub fn is_visible(&self, target: &SkyPosition, date: NaiveDate, mission: Mission) -> Result<bool> {
        Ok(mission.allows(self.solar_separation(target, date)?))
    }

    /// Resolve `name`, parse `date` (`YYYY-MM-DD`) and check visibility
    pub fn is_visible_by_name(&self, name: &str, date: &str, mission: Mission) -> Result<bool> {
        let date = parse_date(date)?;
        let target = self.resolve(name)?;
        self.is_visible(&target, date, mission)
    }

    pub fn cheops_visible(&self, name: &str, date: &str) -> Result<bool> {
        self.is_visible_by_name(name, date, Mission::Cheops)
    }

    pub fn jwst_visible(&self, name: &str, date: &str) -> Result<bool> {
        self.is_visible_by_name(name, date, Mission::Jwst)
    }

    /// Daily separations over the reference year
    pub fn annual_track(&self, target: &SkyPosition) -> Result<AnnualTrack> {
        let days = reference_year_days();
        let mut sun_vectors = Array2::<f64>::zeros((days.len(), 3));
        for (i, &day) in days.iter().enumerate() {
            let sun = self.ephemeris.sun_gcrs(day)?;
            for (j, component) in sun.iter().enumerate() {
                sun_vectors[[i, j]] = *component;
            }
        }
        let separations = angular_separations_batch(&target.unit_vector(), &sun_vectors);
        Ok(AnnualTrack::new(days, separations))
    }

    /// Visibility ranges of `name` over the reference year
    pub fn annual_visibility(&self, name: &str, mission: Mission) -> Result<VisibilityReport> {
        let target = self.resolve(name)?;
        let visibility = self.annual_track(&target)?.visibility(mission);
        log::info!("{name} ({mission}): {visibility}");
        Ok(VisibilityReport {
            target: name.to_string(),
            mission,
            visibility,
        })
    }

    /// Largest Sun-target separation over the reference year, in degrees
    pub fn max_solar_angle(&self, name: &str) -> Result<f64> {
        let target = self.resolve(name)?;
        let max = self.annual_track(&target)?.max_separation();
        log::info!("{name}: maximum Sun separation {max:.2}°");
        Ok(max)
    }
}
