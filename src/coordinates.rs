use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::vector_math::{angular_separation_deg, radec_to_unit_vector, vector_to_radec};

/// A fixed point on the celestial sphere (ICRS axes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    /// Right ascension in degrees
    pub ra_deg: f64,
    /// Declination in degrees
    pub dec_deg: f64,
}

impl SkyPosition {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        SkyPosition { ra_deg, dec_deg }
    }

    /// Direction of a Cartesian vector expressed in the same inertial axes.
    /// The vector's length is discarded.
    pub fn from_vector(v: &[f64; 3]) -> Self {
        let (ra_deg, dec_deg) = vector_to_radec(v);
        SkyPosition { ra_deg, dec_deg }
    }

    pub fn unit_vector(&self) -> [f64; 3] {
        radec_to_unit_vector(self.ra_deg, self.dec_deg)
    }

    /// Great-circle separation in degrees, in [0, 180]
    pub fn separation(&self, other: &SkyPosition) -> f64 {
        angular_separation_deg(self.ra_deg, self.dec_deg, other.ra_deg, other.dec_deg)
    }
}

impl fmt::Display for SkyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RA={:.5}° Dec={:+.5}°", self.ra_deg, self.dec_deg)
    }
}
