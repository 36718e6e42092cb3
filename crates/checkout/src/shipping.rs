/// Subtotal (in kroner) from which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: u64 = 1500;

/// Shipping rules applied downstream of the subtotal. Only the free-shipping
/// threshold is known here; the actual freight cost is computed by the
/// payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub free_threshold: u64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: FREE_SHIPPING_THRESHOLD,
        }
    }
}

impl ShippingPolicy {
    pub fn qualifies_for_free_shipping(&self, subtotal: u64) -> bool {
        subtotal >= self.free_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let policy = ShippingPolicy::default();
        assert!(!policy.qualifies_for_free_shipping(1499));
        assert!(policy.qualifies_for_free_shipping(1500));
        assert!(policy.qualifies_for_free_shipping(4200));
    }
}
