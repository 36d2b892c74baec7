//! Ordered in-memory product store with the query and mutation operations.
//!
//! The store is plain data: it is owned by the inventory actor and never
//! shared, so none of these methods need locking.

use std::collections::{BTreeSet, HashSet};

use crate::domain::{Product, Status};
use crate::error::InventoryError;

pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Filters and page window for listing products.
///
/// Empty or whitespace-only `search` and empty `warehouse` behave like `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub warehouse: Option<String>,
    pub status: Option<Status>,
    pub offset: usize,
    pub limit: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: None,
            warehouse: None,
            status: None,
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[cfg(test)]
impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn warehouse(mut self, warehouse: impl Into<String>) -> Self {
        self.warehouse = Some(warehouse.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }
}

impl ProductQuery {
    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn warehouse_filter(&self) -> Option<&str> {
        self.warehouse.as_deref().filter(|w| !w.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// Builds a store, keeping the given order.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if two records share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, InventoryError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(InventoryError::InvalidArgument(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Applies the query filters (AND-composed) then the page window.
    ///
    /// Results keep insertion order. A window past the end is just empty.
    pub fn list(&self, query: &ProductQuery) -> Vec<&Product> {
        let needle = query.needle();
        let warehouse = query.warehouse_filter();

        self.products
            .iter()
            .filter(|p| needle.as_deref().map_or(true, |n| p.matches_search(n)))
            .filter(|p| warehouse.map_or(true, |w| p.warehouse == w))
            .filter(|p| query.status.map_or(true, |s| p.status() == s))
            .skip(query.offset)
            .take(query.limit)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct warehouse codes, sorted ascending.
    pub fn warehouses(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.warehouse.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Replaces a product's demand.
    ///
    /// # Errors
    /// `InvalidArgument` for a negative demand, `NotFound` for an unknown id.
    /// The store is untouched on either error.
    pub fn update_demand(&mut self, id: &str, demand: i64) -> Result<&Product, InventoryError> {
        let demand = u64::try_from(demand).map_err(|_| {
            InventoryError::InvalidArgument(format!("demand must be non-negative (got {demand})"))
        })?;
        let product = self.get_mut(id)?;
        product.demand = demand;
        Ok(&*product)
    }

    /// Adds `delta` to a product's stock, clamping at zero.
    ///
    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn transfer_stock(&mut self, id: &str, delta: i64) -> Result<&Product, InventoryError> {
        let product = self.get_mut(id)?;
        product.stock = product.stock.saturating_add_signed(delta);
        Ok(&*product)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Product, InventoryError> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }
}
