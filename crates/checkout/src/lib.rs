//! Checkout collaborator boundary.
//!
//! The storefront hands a [`gyuto_cart::CheckoutSnapshot`] to a
//! [`CheckoutCollaborator`]; everything provider-specific lives behind that
//! trait. [`SimulatedCheckout`] is the demo implementation: it never talks to
//! a payment provider.

pub mod collaborator;
pub mod config;
pub mod shipping;
pub mod simulated;

pub use collaborator::{CheckoutCollaborator, CheckoutError, CheckoutOutcome, PaymentProvider};
pub use config::CheckoutConfig;
pub use shipping::{FREE_SHIPPING_THRESHOLD, ShippingPolicy};
pub use simulated::SimulatedCheckout;
