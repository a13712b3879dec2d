// Module declarations
pub mod catalog;
pub mod checker;
pub mod constraints;
pub mod coordinates;
pub mod ephemeris;
pub mod error;
pub mod utils;
pub mod visibility;

// Re-export public API
pub use catalog::{LocalCatalog, NameResolver, ResolverChain, SesameResolver};
pub use checker::VisibilityChecker;
pub use constraints::{Mission, SunAvoidanceConfig};
pub use coordinates::SkyPosition;
pub use ephemeris::{AnalyticSun, HorizonsSun, SunEphemeris};
pub use error::{EphemerisError, Error, ResolutionError, Result};
pub use utils::config::{EphemerisSource, Settings};
pub use visibility::{AnnualTrack, AnnualVisibility, VisibilityRange, VisibilityReport};
