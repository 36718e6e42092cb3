//! Product catalog and query engine.
//!
//! The catalog is a read-only product set loaded once; [`query`] is a pure
//! projection over it driven by a [`FilterState`] (no IO, no shared state).

pub mod catalog;
pub mod filter;
pub mod product;
pub mod query;

pub use catalog::Catalog;
pub use filter::{DEFAULT_PRICE_MAX, FilterState, LengthRange, SortOrder};
pub use product::{Finish, KnifeType, LENGTH_MAX_MM, LENGTH_MIN_MM, PRICE_MAX_NOK, Product};
pub use query::{matches, query};
