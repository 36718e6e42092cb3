//! Read-only views of cart contents.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use gyuto_catalog::Product;
use gyuto_core::{Nok, ValueObject};

/// One cart row as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Arc<Product>,
    pub quantity: u32,
    /// `quantity * product.price`, in kroner.
    pub line_total: u64,
}

impl CartLine {
    pub fn new(product: Arc<Product>, quantity: u32) -> Self {
        Self {
            line_total: line_total(quantity, product.price),
            product,
            quantity,
        }
    }
}

impl ValueObject for CartLine {}

/// `quantity * price`, saturating instead of wrapping.
pub(crate) fn line_total(quantity: u32, price: u64) -> u64 {
    u64::from(quantity).saturating_mul(price)
}

/// Point-in-time copy of the cart handed to a checkout collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSnapshot {
    pub items: Vec<CartLine>,
    /// Sum of line totals, before shipping.
    pub subtotal: u64,
    /// Sum of quantities.
    pub item_count: u32,
}

impl CheckoutSnapshot {
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let subtotal = items.iter().map(|l| l.line_total).fold(0, u64::saturating_add);
        let item_count = items.iter().map(|l| l.quantity).fold(0, u32::saturating_add);
        Self {
            items,
            subtotal,
            item_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal_nok(&self) -> Nok {
        Nok(self.subtotal)
    }
}

impl ValueObject for CheckoutSnapshot {}
