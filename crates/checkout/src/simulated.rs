use gyuto_cart::CheckoutSnapshot;
use gyuto_core::Nok;

use crate::collaborator::{CheckoutCollaborator, CheckoutError, CheckoutOutcome, PaymentProvider};
use crate::config::CheckoutConfig;
use crate::shipping::ShippingPolicy;

/// Demo checkout: explains what would happen instead of charging anyone.
#[derive(Debug, Clone, Default)]
pub struct SimulatedCheckout {
    config: CheckoutConfig,
    shipping: ShippingPolicy,
}

impl SimulatedCheckout {
    pub fn new(config: CheckoutConfig) -> Self {
        Self {
            config,
            shipping: ShippingPolicy::default(),
        }
    }

    pub fn with_shipping(mut self, shipping: ShippingPolicy) -> Self {
        self.shipping = shipping;
        self
    }

    fn stripe_notice(&self, snapshot: &CheckoutSnapshot) -> String {
        let total = Nok(snapshot.subtotal);
        if self.config.stripe_configured() {
            format!(
                "Demo: Stripe test keys are set, but this build only simulates payment of {total}."
            )
        } else {
            format!(
                "Demo: set {} and {} to enable Stripe test checkout. Payment of {total} was simulated.",
                CheckoutConfig::STRIPE_PK_VAR,
                CheckoutConfig::STRIPE_PRICE_ID_VAR
            )
        }
    }
}

impl CheckoutCollaborator for SimulatedCheckout {
    fn begin(
        &self,
        snapshot: &CheckoutSnapshot,
        provider: PaymentProvider,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        match provider {
            PaymentProvider::Stripe => {
                let free_shipping = self.shipping.qualifies_for_free_shipping(snapshot.subtotal);
                tracing::info!(
                    %provider,
                    items = snapshot.item_count,
                    subtotal = snapshot.subtotal,
                    free_shipping,
                    stripe_configured = self.config.stripe_configured(),
                    "checkout simulated"
                );
                Ok(CheckoutOutcome::Simulated {
                    provider,
                    notice: self.stripe_notice(snapshot),
                    subtotal: snapshot.subtotal,
                    free_shipping,
                })
            }
            PaymentProvider::Vipps => {
                tracing::info!(%provider, "payment provider not available");
                Err(CheckoutError::ProviderUnavailable(provider))
            }
        }
    }
}
