//! Filter state consumed by the query engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use gyuto_core::{DomainError, ValueObject};

use crate::catalog::Catalog;
use crate::product::{Finish, KnifeType, LENGTH_MAX_MM, LENGTH_MIN_MM};

/// Default price ceiling (top of the price slider), in kroner.
pub const DEFAULT_PRICE_MAX: u64 = 7000;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Featured products first, catalog order otherwise.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    LengthAsc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::LengthAsc => "length-asc",
        }
    }
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(SortOrder::Featured),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "length-asc" => Ok(SortOrder::LengthAsc),
            other => Err(DomainError::validation(format!("unknown sort order: {other}"))),
        }
    }
}

/// Inclusive blade length range in millimeters.
///
/// A range with `min > max` is accepted and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: u32,
    pub max: u32,
}

impl LengthRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, length: u32) -> bool {
        self.min <= length && length <= self.max
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self::new(LENGTH_MIN_MM, LENGTH_MAX_MM)
    }
}

impl ValueObject for LengthRange {}

/// All user-controlled inputs of a catalog query.
///
/// Facet sets follow "empty means everything": an empty set never excludes a
/// product, a non-empty set keeps products whose value is a member (OR within
/// a facet, AND across facets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Case-insensitive substring matched against name and knife type.
    pub query: String,
    pub steel: BTreeSet<String>,
    pub finish: BTreeSet<Finish>,
    pub types: BTreeSet<KnifeType>,
    pub length: LengthRange,
    /// Inclusive price ceiling in kroner.
    pub price_max: u64,
    pub sort: SortOrder,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            steel: BTreeSet::new(),
            finish: BTreeSet::new(),
            types: BTreeSet::new(),
            length: LengthRange::default(),
            price_max: DEFAULT_PRICE_MAX,
            sort: SortOrder::default(),
        }
    }
}

impl ValueObject for FilterState {}

impl FilterState {
    /// Defaults widened to the bounds of `catalog`, so that nothing in the
    /// catalog is hidden before the user touches a control.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        let mut state = Self::default();
        if let Some((min, max)) = catalog.length_bounds() {
            state.length = LengthRange::new(min.min(LENGTH_MIN_MM), max.max(LENGTH_MAX_MM));
        }
        if let Some((_, max)) = catalog.price_bounds() {
            state.price_max = max.max(DEFAULT_PRICE_MAX);
        }
        state
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_steel(mut self, steel: impl Into<String>) -> Self {
        self.steel.insert(steel.into());
        self
    }

    pub fn with_finish(mut self, finish: Finish) -> Self {
        self.finish.insert(finish);
        self
    }

    pub fn with_type(mut self, kind: KnifeType) -> Self {
        self.types.insert(kind);
        self
    }

    pub fn with_length(mut self, min: u32, max: u32) -> Self {
        self.length = LengthRange::new(min, max);
        self
    }

    pub fn with_price_max(mut self, price_max: u64) -> Self {
        self.price_max = price_max;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Select `steel` if unselected, deselect it otherwise.
    pub fn toggle_steel(&mut self, steel: &str) {
        if !self.steel.remove(steel) {
            self.steel.insert(steel.to_string());
        }
    }

    pub fn toggle_finish(&mut self, finish: Finish) {
        if !self.finish.remove(&finish) {
            self.finish.insert(finish);
        }
    }

    pub fn toggle_type(&mut self, kind: KnifeType) {
        if !self.types.remove(&kind) {
            self.types.insert(kind);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
