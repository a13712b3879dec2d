/// Sun-avoidance constraint: allowed band of Sun-target separation
use serde::{Deserialize, Serialize};

use crate::utils::config::{CHEOPS_MIN_SEP_DEG, JWST_MAX_SEP_DEG, JWST_MIN_SEP_DEG};

/// Configuration for a Sun-avoidance zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunAvoidanceConfig {
    /// Minimum allowed angular separation from Sun in degrees
    pub min_angle: f64,
    /// Whether a separation exactly at `min_angle` is allowed
    #[serde(default)]
    pub min_inclusive: bool,
    /// Maximum allowed angular separation from Sun in degrees (optional, inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_angle: Option<f64>,
}

/// CHEOPS: strictly more than 120° from the Sun
pub const CHEOPS_SUN_AVOIDANCE: SunAvoidanceConfig = SunAvoidanceConfig {
    min_angle: CHEOPS_MIN_SEP_DEG,
    min_inclusive: false,
    max_angle: None,
};

/// JWST: between 85° and 137° from the Sun, both ends allowed
pub const JWST_SUN_AVOIDANCE: SunAvoidanceConfig = SunAvoidanceConfig {
    min_angle: JWST_MIN_SEP_DEG,
    min_inclusive: true,
    max_angle: Some(JWST_MAX_SEP_DEG),
};

impl SunAvoidanceConfig {
    pub fn is_satisfied(&self, angle_deg: f64) -> bool {
        let above_min = if self.min_inclusive {
            angle_deg >= self.min_angle
        } else {
            angle_deg > self.min_angle
        };
        above_min && self.max_angle.map_or(true, |max| angle_deg <= max)
    }

    pub fn name(&self) -> String {
        let lower = if self.min_inclusive { ">=" } else { ">" };
        match self.max_angle {
            Some(max) => format!("SunAvoidance({lower}{}°, <={}°)", self.min_angle, max),
            None => format!("SunAvoidance({lower}{}°)", self.min_angle),
        }
    }

    /// Why `angle_deg` violates this zone, or None if it does not
    pub fn violation_description(&self, angle_deg: f64) -> Option<String> {
        if self.is_satisfied(angle_deg) {
            return None;
        }
        match self.max_angle {
            Some(max) if angle_deg > max => Some(format!(
                "Target {angle_deg:.1}° from Sun (max allowed: {max:.1}°)"
            )),
            _ => Some(format!(
                "Target within {:.1}° of Sun (min allowed: {:.1}°)",
                angle_deg, self.min_angle
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cheops_lower_bound_is_strict() {
        assert!(!CHEOPS_SUN_AVOIDANCE.is_satisfied(120.0));
        assert!(CHEOPS_SUN_AVOIDANCE.is_satisfied(120.000001));
        assert!(CHEOPS_SUN_AVOIDANCE.is_satisfied(180.0));
        assert!(!CHEOPS_SUN_AVOIDANCE.is_satisfied(45.0));
    }

    #[test]
    fn test_jwst_band_is_inclusive() {
        assert!(JWST_SUN_AVOIDANCE.is_satisfied(85.0));
        assert!(JWST_SUN_AVOIDANCE.is_satisfied(137.0));
        assert!(JWST_SUN_AVOIDANCE.is_satisfied(110.0));
        assert!(!JWST_SUN_AVOIDANCE.is_satisfied(84.999));
        assert!(!JWST_SUN_AVOIDANCE.is_satisfied(137.001));
    }

    #[test]
    fn test_names() {
        assert_eq!(CHEOPS_SUN_AVOIDANCE.name(), "SunAvoidance(>120°)");
        assert_eq!(JWST_SUN_AVOIDANCE.name(), "SunAvoidance(>=85°, <=137°)");
    }

    #[test]
    fn test_json_roundtrip() {
        let json = serde_json::to_string(&JWST_SUN_AVOIDANCE).unwrap();
        let back: SunAvoidanceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, JWST_SUN_AVOIDANCE);

        // max_angle is omitted when absent and min_inclusive defaults to false
        let cheops: SunAvoidanceConfig = serde_json::from_str(r#"{"min_angle":120.0}"#).unwrap();
        assert_eq!(cheops, CHEOPS_SUN_AVOIDANCE);
        assert!(!serde_json::to_string(&CHEOPS_SUN_AVOIDANCE)
            .unwrap()
            .contains("max_angle"));
    }

    #[test]
    fn test_violation_description() {
        assert!(JWST_SUN_AVOIDANCE.violation_description(100.0).is_none());
        let far = JWST_SUN_AVOIDANCE.violation_description(150.0).unwrap();
        assert!(far.contains("max allowed: 137.0°"));
        let near = CHEOPS_SUN_AVOIDANCE.violation_description(90.0).unwrap();
        assert!(near.contains("min allowed: 120.0°"));
    }
}
