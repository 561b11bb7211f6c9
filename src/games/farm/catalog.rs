//! Crop catalog: static lookup data for every plantable crop.
//!
//! The built-in table lives in `crops.json` and is parsed once on first use.
//! Engine code never branches on a particular crop; everything goes through
//! [`CropCatalog::get`], so adding a crop is a data change only.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_CROPS: &str = include_str!("crops.json");

/// Identifier of a crop, e.g. `"carrot"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropId(pub String);

impl CropId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CropId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Static info about one crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropInfo {
    pub id: CropId,
    /// Display name.
    pub name: String,
    /// Cost of a single seed.
    pub seed_price: u64,
    /// Money earned per harvested plot.
    pub sell_price: u64,
    /// Days from planting until the crop is mature.
    pub growth_days: u32,
    /// Glyph shown on the farm grid once mature.
    pub glyph: char,
}

/// Problems found while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("crop table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("crop table is empty")]
    Empty,
    #[error("crop entry has an empty id")]
    EmptyId,
    #[error("crop '{0}' is listed more than once")]
    DuplicateId(CropId),
    #[error("crop '{crop}': {field} must be at least 1")]
    NonPositive { crop: CropId, field: &'static str },
}

/// Ordered, read-only crop table.
#[derive(Clone, Debug, PartialEq)]
pub struct CropCatalog {
    crops: Vec<CropInfo>,
}

impl CropCatalog {
    /// Build a catalog from entries, validating each one.
    pub fn new(crops: Vec<CropInfo>) -> Result<Self, CatalogError> {
        if crops.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for crop in &crops {
            if crop.id.as_str().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !seen.insert(crop.id.clone()) {
                return Err(CatalogError::DuplicateId(crop.id.clone()));
            }
            let checks = [
                ("seed_price", crop.seed_price == 0),
                ("sell_price", crop.sell_price == 0),
                ("growth_days", crop.growth_days == 0),
            ];
            if let Some((field, _)) = checks.iter().find(|(_, bad)| *bad) {
                return Err(CatalogError::NonPositive {
                    crop: crop.id.clone(),
                    field: *field,
                });
            }
        }
        Ok(Self { crops })
    }

    /// Parse a JSON array of crop entries.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let crops: Vec<CropInfo> = serde_json::from_str(json)?;
        Self::new(crops)
    }

    /// The process-wide built-in catalog, parsed on first access.
    pub fn builtin() -> &'static CropCatalog {
        static CATALOG: OnceLock<CropCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let catalog = CropCatalog::from_json(BUILTIN_CROPS)
                .expect("embedded crops.json must be a valid crop table");
            log::debug!("loaded {} crops into the catalog", catalog.len());
            catalog
        })
    }

    pub fn get(&self, id: &CropId) -> Option<&CropInfo> {
        self.crops.iter().find(|c| &c.id == id)
    }

    /// Entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &CropInfo> {
        self.crops.iter()
    }

    /// Entry at a display position (0-based).
    pub fn nth(&self, index: usize) -> Option<&CropInfo> {
        self.crops.get(index)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }
}
