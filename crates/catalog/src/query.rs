//! Catalog query engine: filter, then stable sort.

use std::sync::Arc;

use crate::filter::{FilterState, SortOrder};
use crate::product::Product;

/// Apply `filters` to `products` and return the matching products in the
/// requested order.
///
/// Pure: the input slice is untouched and every call yields a fresh vector.
/// Sorting is stable, so ties keep catalog order.
pub fn query(products: &[Arc<Product>], filters: &FilterState) -> Vec<Arc<Product>> {
    let needle = filters.query.to_lowercase();

    let mut matched: Vec<Arc<Product>> = products
        .iter()
        .filter(|p| matches_with_needle(p, filters, &needle))
        .cloned()
        .collect();

    sort_products(&mut matched, filters.sort);
    matched
}

/// Whether `product` passes every predicate of `filters`.
pub fn matches(product: &Product, filters: &FilterState) -> bool {
    matches_with_needle(product, filters, &filters.query.to_lowercase())
}

fn matches_with_needle(product: &Product, filters: &FilterState, needle: &str) -> bool {
    matches_text(product, needle)
        && (filters.steel.is_empty() || filters.steel.contains(&product.steel))
        && (filters.types.is_empty() || filters.types.contains(&product.kind))
        && (filters.finish.is_empty() || filters.finish.contains(&product.finish))
        && filters.length.contains(product.length)
        && product.price <= filters.price_max
}

fn matches_text(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.kind.as_str().to_lowercase().contains(needle)
}

fn sort_products(products: &mut [Arc<Product>], order: SortOrder) {
    match order {
        SortOrder::Featured => products.sort_by_key(|p| !p.featured),
        SortOrder::PriceAsc => products.sort_by_key(|p| p.price),
        SortOrder::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::LengthAsc => products.sort_by_key(|p| p.length),
    }
}
