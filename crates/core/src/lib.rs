//! `gyuto-core` — storefront domain building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, cart
//! and checkout crates (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CartId, ProductId};
pub use money::Nok;
pub use value_object::ValueObject;
