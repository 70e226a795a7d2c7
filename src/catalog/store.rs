use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::catalog::tsv::parse_tsv_text;
use crate::core::condition::ConditionRecord;
use crate::core::types::ConditionId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog format: {0}")]
    InvalidFormat(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub conditions: Vec<ConditionRecord>,
}

/// The reference table of known conditions, in table order
#[derive(Debug, Clone)]
pub struct ConditionCatalog {
    /// All known conditions
    pub conditions: Vec<ConditionRecord>,

    /// Index: condition ID -> index in conditions vec
    id_to_index: HashMap<ConditionId, usize>,
}

impl ConditionCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Build a catalog from records already in memory
    pub fn from_records(records: impl IntoIterator<Item = ConditionRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.add_condition(record);
        }
        catalog
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/conditions.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a file. `.tsv` and `.csv` files are read as delimited
    /// rows, anything else as the JSON catalog format.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("tsv") => Ok(Self::from_records(parse_tsv_text(&content, '\t')?)),
            Some("csv") => Ok(Self::from_records(parse_tsv_text(&content, ',')?)),
            _ => Self::from_json(&content),
        }
    }

    /// Load a custom catalog if a path is given, the embedded one otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_embedded(),
        }
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        Ok(Self::from_records(data.conditions))
    }

    /// Add a condition to the end of the table
    pub fn add_condition(&mut self, record: ConditionRecord) {
        let index = self.conditions.len();
        self.id_to_index.entry(record.id()).or_insert(index);
        self.conditions.push(record);
    }

    /// Get a condition by ID
    pub fn get(&self, id: &ConditionId) -> Option<&ConditionRecord> {
        self.id_to_index.get(id).map(|&idx| &self.conditions[idx])
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            conditions: self.conditions.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of conditions in catalog
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Default for ConditionCatalog {
    fn default() -> Self {
        Self::new()
    }
}
