//! Shopping cart domain module (event-sourced).
//!
//! The cart ledger maps product ids to quantities in first-add order and
//! derives subtotals and checkout snapshots. Pure domain logic: no IO, no
//! persistence, a new session starts with an empty cart.

pub mod ledger;
pub mod snapshot;

pub use ledger::{
    AddItem, CartCommand, CartEntry, CartEvent, CartLedger, ClearCart, DecrementItem, ItemAdded,
    ItemDecremented, ItemRemoved,
};
pub use snapshot::{CartLine, CheckoutSnapshot};
