use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::sun_avoidance::{SunAvoidanceConfig, CHEOPS_SUN_AVOIDANCE, JWST_SUN_AVOIDANCE};

/// Which telescope's Sun-avoidance zone a target is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mission {
    /// Narrow-angle mission "A": separation > 120°
    #[default]
    Cheops,
    /// Wide-angle mission "B": 85° <= separation <= 137°
    Jwst,
    /// Both zones at once
    Both,
}

impl Mission {
    pub const ALL: [Mission; 3] = [Mission::Cheops, Mission::Jwst, Mission::Both];

    /// Zones that must all be satisfied
    pub fn constraints(&self) -> &'static [SunAvoidanceConfig] {
        const CHEOPS: &[SunAvoidanceConfig] = &[CHEOPS_SUN_AVOIDANCE];
        const JWST: &[SunAvoidanceConfig] = &[JWST_SUN_AVOIDANCE];
        const BOTH: &[SunAvoidanceConfig] = &[CHEOPS_SUN_AVOIDANCE, JWST_SUN_AVOIDANCE];
        match self {
            Mission::Cheops => CHEOPS,
            Mission::Jwst => JWST,
            Mission::Both => BOTH,
        }
    }

    /// Classify a Sun-target separation in degrees
    pub fn allows(&self, separation_deg: f64) -> bool {
        self.constraints()
            .iter()
            .all(|zone| zone.is_satisfied(separation_deg))
    }

    /// Names of the zones, e.g. `SunAvoidance(>120°)`
    pub fn zone_names(&self) -> Vec<String> {
        self.constraints().iter().map(|zone| zone.name()).collect()
    }

    /// One description per zone that rejects `separation_deg`
    pub fn violations(&self, separation_deg: f64) -> Vec<String> {
        self.constraints()
            .iter()
            .filter_map(|zone| zone.violation_description(separation_deg))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mission::Cheops => "CHEOPS",
            Mission::Jwst => "JWST",
            Mission::Both => "BOTH",
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "CHEOPS" => Ok(Mission::Cheops),
            "B" | "JWST" => Ok(Mission::Jwst),
            "BOTH" => Ok(Mission::Both),
            other => Err(format!(
                "Unknown mission: {other}. Valid options: A/CHEOPS, B/JWST, BOTH"
            )),
        }
    }
}
