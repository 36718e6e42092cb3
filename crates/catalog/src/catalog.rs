use std::io;
use std::path::Path;
use std::sync::Arc;

use gyuto_core::entity::first_duplicate_id;
use gyuto_core::{DomainError, DomainResult, ProductId};

use crate::filter::FilterState;
use crate::product::{Finish, KnifeType, Product};
use crate::query::query;

const BUILTIN_PRODUCTS: &str = include_str!("../data/products.json");

/// The static product set, validated once at load time.
///
/// Products are held behind `Arc` so query results and cart entries share the
/// catalog's products instead of copying them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
}

impl Catalog {
    /// Build a catalog, enforcing per-product invariants and id uniqueness.
    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        for product in &products {
            product.validate()?;
        }

        if let Some(id) = first_duplicate_id(&products) {
            return Err(DomainError::conflict(format!("duplicate product id: {id}")));
        }

        tracing::debug!(products = products.len(), "catalog loaded");

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("malformed catalog data: {e}")))?;
        Self::from_products(products)
    }

    /// Read a JSON product file from disk.
    ///
    /// A missing file is `NotFound`; unreadable or malformed contents are
    /// `Validation` errors.
    pub fn load(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                DomainError::not_found(format!("catalog file {}", path.display()))
            }
            _ => DomainError::validation(format!(
                "cannot read catalog file {}: {e}",
                path.display()
            )),
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "catalog loaded from file");
        Ok(catalog)
    }

    /// The storefront's bundled product set.
    pub fn builtin() -> DomainResult<Self> {
        Self::from_json(BUILTIN_PRODUCTS)
    }

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Run a query over the whole catalog.
    pub fn query(&self, filters: &FilterState) -> Vec<Arc<Product>> {
        query(&self.products, filters)
    }

    /// Distinct steel names, in first-seen catalog order.
    pub fn steels(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.steel.as_str()))
    }

    /// Distinct steel families ("Aogami Super" and "Aogami #1" share "Aogami").
    pub fn steel_families(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.steel_family()))
    }

    pub fn types(&self) -> Vec<KnifeType> {
        distinct(self.products.iter().map(|p| p.kind))
    }

    pub fn finishes(&self) -> Vec<Finish> {
        distinct(self.products.iter().map(|p| p.finish))
    }

    /// Shortest and longest blade, or `None` for an empty catalog.
    pub fn length_bounds(&self) -> Option<(u32, u32)> {
        bounds(self.products.iter().map(|p| p.length))
    }

    /// Cheapest and most expensive price, or `None` for an empty catalog.
    pub fn price_bounds(&self) -> Option<(u64, u64)> {
        bounds(self.products.iter().map(|p| p.price))
    }

    /// Filter state seeded from this catalog's bounds.
    pub fn default_filters(&self) -> FilterState {
        FilterState::for_catalog(self)
    }
}

fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn bounds<T: Ord + Copy>(mut values: impl Iterator<Item = T>) -> Option<(T, T)> {
    let first = values.next()?;
    Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}
