//! Static city catalog backing the navigation screens.
//!
//! The catalog is loaded once at startup from an embedded JSON definition and
//! never mutated afterwards. Entries keep their definition order, which drives
//! the button order of the city-list screen.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Embedded catalog definition. A JSON array keeps the load order explicit.
const EMBEDDED_CITIES: &str = include_str!("../data/cities.json");

/// A single navigable city with its display data.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Stable key, unique within the catalog. Also embedded in callback
    /// tokens, see `crate::token`.
    pub id: String,
    pub name: String,
    pub description: String,
    pub attractions: Vec<String>,
    pub food: Vec<String>,
}

/// Read-only, insertion-ordered collection of catalog entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from a JSON array of entries, rejecting duplicate ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.id == entry.id) {
                bail!("Duplicate catalog id: {}", entry.id);
            }
        }

        Ok(Self { entries })
    }

    /// Load the embedded catalog shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CITIES).context("Embedded catalog is invalid")
    }

    /// Look up an entry by id. Unknown ids are a handled condition for
    /// callers, never a panic.
    pub fn lookup(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries in load order.
    pub fn all(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
