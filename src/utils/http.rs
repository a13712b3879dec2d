//! Shared blocking HTTP agent for the Sesame and Horizons clients

use std::time::Duration;

use crate::utils::config::HTTP_TIMEOUT_SECS;

/// Agent with a global timeout so a dead mirror cannot hang a scan
pub fn http_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
        .build();
    ureq::Agent::new_with_config(config)
}
