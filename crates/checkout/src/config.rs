//! Checkout configuration from the environment.

/// Stripe test-mode settings. Both values must be present for Stripe to be
/// considered configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub stripe_publishable_key: Option<String>,
    pub stripe_price_id: Option<String>,
}

impl CheckoutConfig {
    pub const STRIPE_PK_VAR: &'static str = "STRIPE_PK";
    pub const STRIPE_PRICE_ID_VAR: &'static str = "STRIPE_PRICE_ID_DEFAULT";

    /// Read `STRIPE_PK` and `STRIPE_PRICE_ID_DEFAULT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            stripe_publishable_key: read(Self::STRIPE_PK_VAR),
            stripe_price_id: read(Self::STRIPE_PRICE_ID_VAR),
        }
    }

    pub fn stripe_configured(&self) -> bool {
        self.stripe_publishable_key.is_some() && self.stripe_price_id.is_some()
    }
}
