use serde::{Deserialize, Serialize};

use super::Status;

/// A product record as held by the store.
///
/// Only `stock` and `demand` ever change after seeding; status is not a field
/// here, see [`Product::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub warehouse: String,
    pub stock: u64,
    pub demand: u64,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sku: impl Into<String>,
        warehouse: impl Into<String>,
        stock: u64,
        demand: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: sku.into(),
            warehouse: warehouse.into(),
            stock,
            demand,
        }
    }

    pub fn status(&self) -> Status {
        Status::classify(self.stock, self.demand)
    }

    /// Case-insensitive substring match on name, sku or id.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.sku.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
    }
}

/// Read-side shape of a product, with the status resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub warehouse: String,
    pub stock: u64,
    pub demand: u64,
    pub status: Status,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            warehouse: product.warehouse.clone(),
            stock: product.stock,
            demand: product.demand,
            status: product.status(),
        }
    }
}
