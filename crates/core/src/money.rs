//! Single-currency money display.
//!
//! Prices are whole Norwegian kroner stored as `u64`. All arithmetic on prices
//! stays in integers; `Nok` only exists to render amounts.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// An amount in whole kroner.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nok(pub u64);

impl ValueObject for Nok {}

impl From<u64> for Nok {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Nok {
    /// Renders as `kr 1 800`: thousands grouped by spaces, no decimals.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }
        write!(f, "kr {grouped}")
    }
}
