//! Error types for name resolution and solar ephemeris lookups

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// A target name or date string could not be turned into something usable
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Unable to resolve target '{0}'")]
    UnknownTarget(String),

    #[error("Invalid date '{input}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Name resolver request failed: {0}")]
    Service(String),

    #[error("Failed to read catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog {path}: {source}")]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The Sun's position could not be produced for a date
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("No solar ephemeris available for {0}")]
    OutOfRange(NaiveDate),

    #[error("Horizons query failed: {0}")]
    Horizons(String),

    #[error("Invalid ephemeris response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

pub type Result<T> = std::result::Result<T, Error>;
