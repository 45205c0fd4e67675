//! The product catalog store.
//!
//! The catalog is loaded whole from a JSON file at process start-up and is
//! read-only for the lifetime of the process. All lookups are linear scans;
//! the catalog is small and lives entirely in memory.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use kitchencraft_core::{Product, ProductId};

/// Errors that can occur while loading the catalog.
///
/// These are configuration-time failures: they abort start-up and are never
/// produced once the catalog is in memory.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON for the expected shape.
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two catalog entries share an id.
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),

    /// A catalog entry has a zero or negative price.
    #[error("product {0} has a non-positive price")]
    InvalidPrice(ProductId),
}

/// On-disk catalog shape: a top-level `products` array.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// The in-memory, read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// catalog violates its invariants (unique ids, positive prices).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: CatalogFile =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_products(file.products)
    }

    /// Build a catalog from an already-loaded product list, validating the
    /// catalog invariants.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or non-positive prices.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price <= Decimal::ZERO {
                return Err(CatalogError::InvalidPrice(product.id));
            }
        }

        Ok(Self { products })
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True if the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a single product by id.
    ///
    /// An unknown id is a normal empty result, not an error.
    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The subsequence of the catalog whose ids appear in `ids`.
    ///
    /// Results are in CATALOG order, not the caller's request order; callers
    /// that need request order must re-map by id themselves.
    #[must_use]
    pub fn products_by_ids(&self, ids: &[ProductId]) -> Vec<&Product> {
        self.products.iter().filter(|p| ids.contains(&p.id)).collect()
    }
}
