use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::item::CatalogItem;
use crate::core::types::EquipmentKind;
use crate::utils::validation::{check_catalog_limit, compact_model};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("{0}")]
    TooManyItems(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub items: Vec<CatalogItem>,
}

/// A read-only snapshot of purchasable equipment, grouped by class
#[derive(Debug, Default)]
pub struct EquipmentCatalog {
    /// Items per class, in load order
    by_kind: HashMap<EquipmentKind, Vec<CatalogItem>>,

    /// Creation timestamp of the loaded snapshot, if any
    pub created_at: Option<String>,
}

impl EquipmentCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded sample catalog.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the embedded JSON cannot be parsed.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time via build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/marine_equipment.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the JSON is malformed or holds too many items.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }

        let mut catalog = Self::new();
        catalog.created_at = Some(data.created_at);
        for item in data.items {
            catalog.add_item(item)?;
        }

        Ok(catalog)
    }

    /// Add an item to the catalog. Items without a model are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TooManyItems` once the catalog is full.
    pub fn add_item(&mut self, item: CatalogItem) -> Result<(), CatalogError> {
        if let Some(message) = check_catalog_limit(self.len()) {
            return Err(CatalogError::TooManyItems(message));
        }

        if !item.has_model() {
            warn!("Skipping {} catalog entry without a model", item.kind);
            return Ok(());
        }

        self.by_kind.entry(item.kind).or_default().push(item);
        Ok(())
    }

    /// Items of one class, the slice fed to a selection engine
    pub fn items_of(&self, kind: EquipmentKind) -> &[CatalogItem] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All items, grouped by class in a fixed class order
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        EquipmentKind::ALL
            .into_iter()
            .flat_map(move |kind| self.items_of(kind).iter())
    }

    /// Find an item by model, ignoring case and whitespace
    pub fn get(&self, kind: EquipmentKind, model: &str) -> Option<&CatalogItem> {
        let key = compact_model(model);
        self.items_of(kind)
            .iter()
            .find(|item| compact_model(&item.model) == key)
    }

    /// Export catalog to JSON.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            items: self.items().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of items in catalog
    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
