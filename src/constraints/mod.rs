//! Sun-avoidance constraints
//!
//! Each mission is a fixed set of separation zones; a target is visible to
//! a mission when every zone accepts the current Sun-target separation.

pub mod mission;
pub mod sun_avoidance;

// Re-export main types
pub use mission::Mission;
pub use sun_avoidance::{SunAvoidanceConfig, CHEOPS_SUN_AVOIDANCE, JWST_SUN_AVOIDANCE};
