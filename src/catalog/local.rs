//! Local target catalog
//!
//! Ships approximate ICRS positions for the demonstration targets and a
//! few well-known exoplanet hosts, and can be extended with a JSON file:
//!
//! ```json
//! [{"name": "WASP-12", "aliases": ["TYC 1891-2030-1"], "ra": 97.6366, "dec": 29.6723}]
//! ```
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::NameResolver;
use crate::coordinates::SkyPosition;
use crate::error::ResolutionError;

/// One catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Right ascension in degrees
    #[serde(alias = "ra")]
    pub ra_deg: f64,
    /// Declination in degrees
    #[serde(alias = "dec")]
    pub dec_deg: f64,
}

impl CatalogEntry {
    fn new(name: &str, aliases: &[&str], ra_deg: f64, dec_deg: f64) -> Self {
        CatalogEntry {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            ra_deg,
            dec_deg,
        }
    }

    pub fn position(&self) -> SkyPosition {
        SkyPosition::new(self.ra_deg, self.dec_deg)
    }
}

/// In-memory name → position lookup
#[derive(Debug, Clone, Default)]
pub struct LocalCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl LocalCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut catalog = LocalCatalog::default();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    pub fn builtin() -> Self {
        LocalCatalog::new(vec![
            CatalogEntry::new("55 Cnc", &["rho01 Cnc", "rho1 Cnc", "HD 75732"], 133.1492129, 28.3308208),
            CatalogEntry::new("WASP-12", &[], 97.6366417, 29.6723028),
            CatalogEntry::new("TOI-500", &["TIC 134200185"], 106.559315, -47.587175),
            CatalogEntry::new("beta Pic", &["bet Pic", "HD 39060", "HR 2020"], 86.8211987, -51.0665114),
            CatalogEntry::new("HD 209458", &["V376 Peg"], 330.7950291, 18.8843175),
            CatalogEntry::new("HD 189733", &["V452 Vul"], 300.1821223, 22.7097759),
            CatalogEntry::new("GJ 1214", &[], 258.8289154, 4.9638409),
            CatalogEntry::new("TRAPPIST-1", &["2MASS J23062928-0502285"], 346.6223683, -5.0413990),
        ])
    }

    /// Read a JSON array of [`CatalogEntry`] records
    pub fn load(path: &Path) -> Result<Self, ResolutionError> {
        let text = std::fs::read_to_string(path).map_err(|source| ResolutionError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(&text).map_err(|source| ResolutionError::CatalogFormat {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded {} catalog entries from {}", entries.len(), path.display());
        Ok(LocalCatalog::new(entries))
    }

    /// Add entries from `other`; on name clashes `other` wins
    pub fn merge(&mut self, other: LocalCatalog) {
        for entry in other.entries {
            self.insert(entry);
        }
    }

    pub fn insert(&mut self, entry: CatalogEntry) {
        let idx = self.entries.len();
        self.index.insert(normalize_name(&entry.name), idx);
        for alias in &entry.aliases {
            self.index.insert(normalize_name(alias), idx);
        }
        self.entries.push(entry);
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.index
            .get(&normalize_name(name))
            .and_then(|&idx| self.entries.get(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NameResolver for LocalCatalog {
    fn resolve(&self, name: &str) -> Result<SkyPosition, ResolutionError> {
        self.get(name)
            .map(CatalogEntry::position)
            .ok_or_else(|| ResolutionError::UnknownTarget(name.to_string()))
    }

    fn name(&self) -> String {
        "LocalCatalog".to_string()
    }
}

/// Case, whitespace and separator insensitive key
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case_and_separators() {
        let catalog = LocalCatalog::builtin();
        assert!(catalog.get("wasp12").is_some());
        assert!(catalog.get("WASP 12").is_some());
        assert!(catalog.get("Beta Pic").is_some());
        assert_eq!(catalog.get("bet pic").unwrap().name, "beta Pic");
        assert_eq!(catalog.get("HD75732").unwrap().name, "55 Cnc");
        assert!(catalog.get("WASP-121").is_none());
    }

    #[test]
    fn test_load_and_merge_file() {
        let path = std::env::temp_dir().join(format!(
            "sun_avoidance_catalog_{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[
                {"name": "WASP-121", "aliases": ["TOI-495"], "ra": 107.6002, "dec": -39.0972},
                {"name": "WASP-12", "ra_deg": 97.0, "dec_deg": 29.0}
            ]"#,
        )
        .unwrap();

        let mut catalog = LocalCatalog::builtin();
        let builtin_len = catalog.len();
        catalog.merge(LocalCatalog::load(&path).unwrap());
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), builtin_len + 2);
        let wasp121 = catalog.resolve("TOI-495").unwrap();
        assert!((wasp121.dec_deg + 39.0972).abs() < 1e-9);
        // The file overrides the built-in entry
        assert_eq!(catalog.resolve("WASP-12").unwrap().ra_deg, 97.0);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("sun_avoidance_does_not_exist.json");
        assert!(matches!(
            LocalCatalog::load(&path),
            Err(ResolutionError::Catalog { .. })
        ));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join(format!(
            "sun_avoidance_bad_catalog_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"name": "not a list"}"#).unwrap();
        let result = LocalCatalog::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ResolutionError::CatalogFormat { .. })));
    }
}
