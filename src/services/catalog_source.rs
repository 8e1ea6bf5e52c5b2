use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::catalog::{Catalog, CatalogError, Product};

#[derive(Error, Debug)]
pub enum CatalogSourceError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Where the price list comes from
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Catalog, CatalogSourceError>;

    fn describe(&self) -> String;
}

/// The shop's own price list, compiled in.
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn load(&self) -> Result<Catalog, CatalogSourceError> {
        Ok(Catalog::artemisa()?)
    }

    fn describe(&self) -> String {
        "built-in price list".to_string()
    }
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    name: String,
    unit_price: Decimal,
}

/// Price list read from a JSON array of `{"name", "unit_price"}` objects.
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> Result<Catalog, CatalogSourceError> {
        debug!("Reading catalog from {}", self.path.display());

        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogSourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let records: Vec<ProductRecord> =
            serde_json::from_str(&raw).map_err(|source| CatalogSourceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let products = records
            .into_iter()
            .map(|record| Product::new(record.name, record.unit_price))
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Catalog::new(products)?;
        info!(
            "Loaded {} products from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

/// Picks the JSON file when a path is configured, the built-in list otherwise.
pub fn catalog_source_for(path: Option<&Path>) -> Box<dyn CatalogSource> {
    match path {
        Some(path) => Box::new(JsonFileCatalog::new(path)),
        None => Box::new(BuiltinCatalog),
    }
}
