use serde::{Deserialize, Serialize};
use thiserror::Error;

use gyuto_cart::CheckoutSnapshot;
use gyuto_core::DomainError;

/// Payment providers offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Stripe,
    Vipps,
}

impl core::fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PaymentProvider::Stripe => f.write_str("Stripe"),
            PaymentProvider::Vipps => f.write_str("Vipps"),
        }
    }
}

/// What the collaborator did with a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutOutcome {
    /// No payment took place; `notice` explains what a real setup would do.
    Simulated {
        provider: PaymentProvider,
        notice: String,
        subtotal: u64,
        free_shipping: bool,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,

    #[error("payment provider {0} is not available yet")]
    ProviderUnavailable(PaymentProvider),

    /// The hand-off succeeded but the cart could not be updated afterwards.
    #[error("cart update failed: {0}")]
    Cart(#[from] DomainError),
}

/// Receives the cart contents when the shopper proceeds to checkout.
///
/// Implementations own all payment-provider interaction. The snapshot is a
/// detached copy; nothing an implementation does can alter the cart.
pub trait CheckoutCollaborator {
    fn begin(
        &self,
        snapshot: &CheckoutSnapshot,
        provider: PaymentProvider,
    ) -> Result<CheckoutOutcome, CheckoutError>;
}
