use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::types::catalog_error::CatalogError;

/// A known store and the drinks it sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "drink")]
    pub drinks: Vec<String>,
}

/// Immutable store → drinks table, loaded once at startup and shared
/// read-only between searches.
#[derive(Debug)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
}

impl CatalogStore {
    /// An entry with an empty name would be a substring of every place name,
    /// so those are rejected.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if let Some(index) = entries.iter().position(|e| e.name.trim().is_empty()) {
            return Err(CatalogError::EmptyName { index });
        }

        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_json(&raw)?;
        info!(
            "Loaded {} catalog entries from {}",
            store.len(),
            path.display()
        );

        Ok(store)
    }

    /// Entries whose drink list holds an element exactly equal to the
    /// trimmed query. Case-sensitive, no normalization.
    pub fn filter_by_drink(&self, drink_name: &str) -> Vec<&CatalogEntry> {
        let drink_name = drink_name.trim();

        self.entries
            .iter()
            .filter(|e| e.drinks.iter().any(|d| d == drink_name))
            .collect()
    }

    /// Distinct drink names, in the order they first appear.
    pub fn drinks(&self) -> Vec<&str> {
        let mut seen = HashSet::<&str>::new();

        self.entries
            .iter()
            .flat_map(|e| e.drinks.iter())
            .map(String::as_str)
            .filter(|d| seen.insert(*d))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
