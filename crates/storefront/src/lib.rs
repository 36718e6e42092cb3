//! `gyuto-storefront` — the presentation-layer side of the storefront.
//!
//! [`Storefront`] owns one shopper session: the catalog, the current filter
//! state and the cart. It is what a UI (or the demo binary) calls into.

pub mod config;
pub mod session;

pub use config::StorefrontConfig;
pub use session::Storefront;
