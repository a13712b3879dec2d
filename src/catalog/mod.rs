//! Target name resolution
//!
//! Names are resolved through a chain of resolvers: the local catalog
//! (built-in demonstration targets plus an optional user JSON file) and,
//! unless running offline, the CDS Sesame service.

pub mod local;
pub mod sesame;

pub use local::{CatalogEntry, LocalCatalog};
pub use sesame::SesameResolver;

use crate::coordinates::SkyPosition;
use crate::error::ResolutionError;
use crate::utils::config::Settings;

/// Trait for services that turn a catalog name into a sky position
pub trait NameResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<SkyPosition, ResolutionError>;

    /// Get resolver name
    fn name(&self) -> String;
}

/// Tries each resolver in order; the first hit wins
pub struct ResolverChain {
    resolvers: Vec<Box<dyn NameResolver>>,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn NameResolver>>) -> Self {
        ResolverChain { resolvers }
    }

    /// Local catalog (built-in plus the configured file, if present) followed
    /// by Sesame unless `settings.offline` is set
    pub fn from_settings(settings: &Settings) -> Result<Self, ResolutionError> {
        let mut catalog = LocalCatalog::builtin();
        if settings.catalog_path.exists() {
            catalog.merge(LocalCatalog::load(&settings.catalog_path)?);
        } else {
            log::debug!(
                "No user catalog at {}, using built-in entries only",
                settings.catalog_path.display()
            );
        }

        let mut resolvers: Vec<Box<dyn NameResolver>> = vec![Box::new(catalog)];
        if !settings.offline {
            resolvers.push(Box::new(SesameResolver::new(settings.sesame_urls.clone())));
        }
        Ok(ResolverChain::new(resolvers))
    }
}

impl NameResolver for ResolverChain {
    fn resolve(&self, name: &str) -> Result<SkyPosition, ResolutionError> {
        let mut last_failure = None;

        for resolver in &self.resolvers {
            match resolver.resolve(name) {
                Ok(position) => {
                    log::info!("Resolved '{name}' via {}: {position}", resolver.name());
                    return Ok(position);
                }
                Err(ResolutionError::UnknownTarget(_)) => {
                    log::debug!("{} does not know '{name}'", resolver.name());
                }
                Err(e) => {
                    log::warn!("{} failed for '{name}': {e}", resolver.name());
                    last_failure = Some(e);
                }
            }
        }

        Err(last_failure.unwrap_or_else(|| ResolutionError::UnknownTarget(name.to_string())))
    }

    fn name(&self) -> String {
        let names: Vec<String> = self.resolvers.iter().map(|r| r.name()).collect();
        format!("ResolverChain({})", names.join(" -> "))
    }
}
