use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gyuto_catalog::Product;
use gyuto_core::{Aggregate, AggregateRoot, CartId, DomainError, DomainResult, Entity, ProductId};
use gyuto_events::Event;

use crate::snapshot::{CartLine, CheckoutSnapshot, line_total};

/// A product in the cart with its quantity (always >= 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    product: Arc<Product>,
    quantity: u32,
}

impl CartEntry {
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    fn line(&self) -> CartLine {
        CartLine::new(Arc::clone(&self.product), self.quantity)
    }
}

impl Entity for CartEntry {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product.id
    }
}

/// Aggregate root: CartLedger.
///
/// Entries are kept in the order their product was first added. A product
/// that is removed and added again goes to the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLedger {
    id: CartId,
    entries: Vec<CartEntry>,
    version: u64,
}

impl CartLedger {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            entries: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> CartId {
        self.id
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct products.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of units across all entries (cart badge).
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).fold(0, u32::saturating_add)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.entry(product_id).map_or(0, |e| e.quantity)
    }

    /// Sum of `quantity * price` over all entries; 0 for an empty cart.
    ///
    /// Saturates at `u64::MAX` for products built outside a validated catalog.
    pub fn subtotal(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| line_total(e.quantity, e.product.price))
            .fold(0, u64::saturating_add)
    }

    /// Owned copy of the cart rows in first-add order.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.entries.iter().map(CartEntry::line).collect()
    }

    pub fn checkout_snapshot(&self) -> CheckoutSnapshot {
        CheckoutSnapshot::from_lines(self.snapshot())
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: Arc<Product>) -> DomainResult<()> {
        let command = CartCommand::AddItem(AddItem {
            cart_id: self.id,
            product,
            occurred_at: Utc::now(),
        });
        self.execute(&command)?;
        Ok(())
    }

    /// Remove one unit of `product_id`; absent products are ignored.
    pub fn decrement(&mut self, product_id: &ProductId) -> DomainResult<()> {
        let command = CartCommand::DecrementItem(DecrementItem {
            cart_id: self.id,
            product_id: product_id.clone(),
            occurred_at: Utc::now(),
        });
        self.execute(&command)?;
        Ok(())
    }

    /// Empty the cart (e.g. after the checkout hand-off).
    pub fn clear(&mut self) -> DomainResult<()> {
        let command = CartCommand::Clear(ClearCart {
            cart_id: self.id,
            occurred_at: Utc::now(),
        });
        self.execute(&command)?;
        Ok(())
    }

    fn entry(&self, product_id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id() == product_id)
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == product_id)
    }
}

impl AggregateRoot for CartLedger {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub cart_id: CartId,
    pub product: Arc<Product>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DecrementItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecrementItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCart {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    DecrementItem(DecrementItem),
    Clear(ClearCart),
}

/// Event: ItemAdded. `quantity` is the entry's quantity after the add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub cart_id: CartId,
    pub product: Arc<Product>,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemDecremented. `quantity` is the remaining quantity (>= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDecremented {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    ItemDecremented(ItemDecremented),
    ItemRemoved(ItemRemoved),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item.added",
            CartEvent::ItemDecremented(_) => "cart.item.decremented",
            CartEvent::ItemRemoved(_) => "cart.item.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemDecremented(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for CartLedger {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => match self.position(&e.product.id) {
                Some(i) => self.entries[i].quantity = e.quantity,
                None => self.entries.push(CartEntry {
                    product: Arc::clone(&e.product),
                    quantity: e.quantity,
                }),
            },
            CartEvent::ItemDecremented(e) => {
                if let Some(i) = self.position(&e.product_id) {
                    self.entries[i].quantity = e.quantity;
                }
            }
            CartEvent::ItemRemoved(e) => {
                if let Some(i) = self.position(&e.product_id) {
                    self.entries.remove(i);
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => {
                self.ensure_cart_id(cmd.cart_id)?;
                self.decide_add(&cmd.product, cmd.occurred_at)
            }
            CartCommand::DecrementItem(cmd) => {
                self.ensure_cart_id(cmd.cart_id)?;
                Ok(self.decide_decrement(&cmd.product_id, cmd.occurred_at))
            }
            CartCommand::Clear(cmd) => {
                self.ensure_cart_id(cmd.cart_id)?;
                Ok(self.decide_clear(cmd.occurred_at))
            }
        }
    }
}

impl CartLedger {
    fn ensure_cart_id(&self, cart_id: CartId) -> Result<(), DomainError> {
        if self.id != cart_id {
            return Err(DomainError::invariant("cart_id mismatch"));
        }
        Ok(())
    }

    fn decide_add(
        &self,
        product: &Arc<Product>,
        occurred_at: DateTime<Utc>,
    ) -> Result<Vec<CartEvent>, DomainError> {
        let quantity = self
            .quantity_of(&product.id)
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("cart quantity overflow"))?;

        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            cart_id: self.id,
            product: Arc::clone(product),
            quantity,
            occurred_at,
        })])
    }

    /// Quantity 1 removes the entry, so the ledger never holds a zero.
    fn decide_decrement(&self, product_id: &ProductId, occurred_at: DateTime<Utc>) -> Vec<CartEvent> {
        match self.quantity_of(product_id) {
            0 => Vec::new(),
            1 => vec![CartEvent::ItemRemoved(ItemRemoved {
                cart_id: self.id,
                product_id: product_id.clone(),
                occurred_at,
            })],
            n => vec![CartEvent::ItemDecremented(ItemDecremented {
                cart_id: self.id,
                product_id: product_id.clone(),
                quantity: n - 1,
                occurred_at,
            })],
        }
    }

    fn decide_clear(&self, occurred_at: DateTime<Utc>) -> Vec<CartEvent> {
        self.entries
            .iter()
            .map(|e| {
                CartEvent::ItemRemoved(ItemRemoved {
                    cart_id: self.id,
                    product_id: e.product.id.clone(),
                    occurred_at,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyuto_catalog::{Finish, KnifeType, PRICE_MAX_NOK};

    fn test_cart() -> CartLedger {
        CartLedger::new(CartId::new())
    }

    fn knife(id: &str, kind: KnifeType, price: u64) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id).unwrap(),
            name: format!("{kind} {id}"),
            brand: "Test".to_string(),
            kind,
            steel: "VG-10".to_string(),
            finish: Finish::Migaki,
            length: 210,
            price,
            featured: false,
            image: None,
        })
    }

    fn gyuto() -> Arc<Product> {
        knife("gyuto-240", KnifeType::Gyuto, 1800)
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn new_cart_is_empty_and_zero() {
        let cart = test_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.entry_count(), 0);
        assert!(cart.snapshot().is_empty());
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn add_inserts_then_increments() {
        let mut cart = test_cart();
        let p = gyuto();
        cart.add(p.clone()).unwrap();
        assert_eq!(cart.quantity_of(&p.id), 1);
        cart.add(p.clone()).unwrap();
        assert_eq!(cart.quantity_of(&p.id), 2);
        assert_eq!(cart.entry_count(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn add_twice_decrement_once_leaves_one() {
        let mut cart = test_cart();
        let p = gyuto();
        cart.add(p.clone()).unwrap();
        cart.add(p.clone()).unwrap();
        cart.decrement(&p.id).unwrap();

        let lines = cart.snapshot();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(cart.subtotal(), 1800);
    }

    #[test]
    fn decrement_at_one_removes_entry() {
        let mut cart = test_cart();
        let p = gyuto();
        cart.add(p.clone()).unwrap();
        cart.decrement(&p.id).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(&p.id), 0);
    }

    #[test]
    fn decrement_absent_product_is_a_noop() {
        let mut cart = test_cart();
        cart.add(gyuto()).unwrap();
        let before = cart.clone();

        cart.decrement(&ProductId::new("not-in-cart").unwrap()).unwrap();
        assert_eq!(cart, before);
    }

    #[test]
    fn subtotal_multiplies_quantity_by_price() {
        let mut cart = test_cart();
        let p1 = knife("p1", KnifeType::Gyuto, 1200);
        let p2 = knife("p2", KnifeType::Santoku, 3400);
        cart.add(p1.clone()).unwrap();
        cart.add(p1).unwrap();
        cart.add(p2).unwrap();

        assert_eq!(cart.subtotal(), 2 * 1200 + 3400);
        assert_eq!(cart.subtotal(), 5800);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.entry_count(), 2);
    }

    #[test]
    fn snapshot_keeps_first_add_order() {
        let mut cart = test_cart();
        let a = knife("a", KnifeType::Nakiri, 100);
        let b = knife("b", KnifeType::Petty, 200);
        let c = knife("c", KnifeType::Bunka, 300);
        cart.add(b.clone()).unwrap();
        cart.add(a.clone()).unwrap();
        cart.add(c.clone()).unwrap();
        cart.add(b.clone()).unwrap();

        let order: Vec<&str> = cart.entries().iter().map(|e| e.product().id.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);

        let lines = cart.snapshot();
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].line_total, 400);
    }

    #[test]
    fn snapshot_is_detached_from_ledger() {
        let mut cart = test_cart();
        let p = gyuto();
        cart.add(p.clone()).unwrap();

        let mut lines = cart.snapshot();
        lines[0].quantity = 99;
        assert_eq!(cart.quantity_of(&p.id), 1);

        let snap = cart.checkout_snapshot();
        cart.add(p).unwrap();
        assert_eq!(snap.items[0].quantity, 1);
        assert_eq!(snap.subtotal, 1800);
    }

    #[test]
    fn entries_share_catalog_products() {
        let mut cart = test_cart();
        let p = gyuto();
        cart.add(p.clone()).unwrap();
        assert!(Arc::ptr_eq(cart.entries()[0].product(), &p));
    }

    #[test]
    fn checkout_snapshot_carries_totals() {
        let mut cart = test_cart();
        cart.add(knife("p1", KnifeType::Gyuto, 1200)).unwrap();
        cart.add(knife("p2", KnifeType::Santoku, 3400)).unwrap();

        let snap = cart.checkout_snapshot();
        assert_eq!(snap.subtotal, 4600);
        assert_eq!(snap.item_count, 2);
        assert_eq!(snap.items.len(), 2);
        assert_eq!(snap.subtotal_nok().to_string(), "kr 4 600");
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = test_cart();
        cart.add(knife("p1", KnifeType::Gyuto, 1200)).unwrap();
        cart.add(knife("p2", KnifeType::Santoku, 3400)).unwrap();
        cart.clear().unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn clear_emits_item_removed_per_entry() {
        let mut cart = test_cart();
        cart.add(knife("p1", KnifeType::Gyuto, 1200)).unwrap();
        cart.add(knife("p1", KnifeType::Gyuto, 1200)).unwrap();
        cart.add(knife("p2", KnifeType::Santoku, 3400)).unwrap();

        let cmd = CartCommand::Clear(ClearCart {
            cart_id: cart.id_typed(),
            occurred_at: test_time(),
        });
        let events = cart.execute(&cmd).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.event_type() == "cart.item.removed"));
        assert!(cart.is_empty());
        assert_eq!(cart.version(), 5);

        assert!(cart.execute(&cmd).unwrap().is_empty());
    }

    #[test]
    fn clear_for_another_cart_is_rejected() {
        let mut cart = test_cart();
        cart.add(gyuto()).unwrap();
        let cmd = CartCommand::Clear(ClearCart {
            cart_id: CartId::new(),
            occurred_at: test_time(),
        });
        assert!(matches!(
            cart.execute(&cmd),
            Err(DomainError::InvariantViolation(_))
        ));
        assert_eq!(cart.entry_count(), 1);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let mut cart = test_cart();
        let unbounded = knife("unbounded", KnifeType::Gyuto, u64::MAX);
        cart.add(unbounded.clone()).unwrap();
        cart.add(unbounded).unwrap();

        assert_eq!(cart.subtotal(), u64::MAX);
        assert_eq!(cart.snapshot()[0].line_total, u64::MAX);
        assert_eq!(cart.checkout_snapshot().subtotal, u64::MAX);
    }

    #[test]
    fn ceiling_price_times_max_quantity_fits() {
        let line = CartLine::new(knife("top", KnifeType::Gyuto, PRICE_MAX_NOK), u32::MAX);
        assert_eq!(line.line_total, u64::from(u32::MAX) * PRICE_MAX_NOK);
    }

    #[test]
    fn handle_rejects_foreign_cart_id() {
        let cart = test_cart();
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: CartId::new(),
            product: gyuto(),
            occurred_at: test_time(),
        });

        let err = cart.handle(&cmd).unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation error for cart_id mismatch"),
        }
    }

    #[test]
    fn handle_decrement_of_absent_product_emits_nothing() {
        let cart = test_cart();
        let cmd = CartCommand::DecrementItem(DecrementItem {
            cart_id: cart.id_typed(),
            product_id: ProductId::new("missing").unwrap(),
            occurred_at: test_time(),
        });
        assert!(cart.handle(&cmd).unwrap().is_empty());
    }

    #[test]
    fn decrement_at_one_emits_item_removed() {
        let mut cart = test_cart();
        let p = gyuto();
        cart.add(p.clone()).unwrap();

        let cmd = CartCommand::DecrementItem(DecrementItem {
            cart_id: cart.id_typed(),
            product_id: p.id.clone(),
            occurred_at: test_time(),
        });
        let events = cart.handle(&cmd).unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            CartEvent::ItemRemoved(e) => assert_eq!(e.product_id, p.id),
            _ => panic!("Expected ItemRemoved event"),
        }
        assert_eq!(events[0].event_type(), "cart.item.removed");
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut cart = test_cart();
        cart.add(gyuto()).unwrap();
        let before = cart.clone();

        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart.id_typed(),
            product: gyuto(),
            occurred_at: test_time(),
        });
        let events1 = cart.handle(&cmd).unwrap();
        let events2 = cart.handle(&cmd).unwrap();

        assert_eq!(cart, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn version_increments_on_apply() {
        let mut cart = test_cart();
        let p = gyuto();
        cart.add(p.clone()).unwrap();
        assert_eq!(cart.version(), 1);
        cart.add(p.clone()).unwrap();
        assert_eq!(cart.version(), 2);
        cart.decrement(&p.id).unwrap();
        assert_eq!(cart.version(), 3);
        cart.decrement(&p.id).unwrap();
        assert_eq!(cart.version(), 4);
        cart.decrement(&p.id).unwrap();
        assert_eq!(cart.version(), 4);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize),
            Decrement(usize),
        }

        fn catalog() -> Vec<Arc<Product>> {
            vec![
                knife("p0", KnifeType::Gyuto, 1800),
                knife("p1", KnifeType::Santoku, 3200),
                knife("p2", KnifeType::Nakiri, 1500),
                knife("p3", KnifeType::Petty, 0),
            ]
        }

        fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
            prop::collection::vec(
                prop_oneof![
                    (0usize..4).prop_map(Op::Add),
                    (0usize..4).prop_map(Op::Decrement),
                ],
                0..40,
            )
        }

        fn run(ops: &[Op], products: &[Arc<Product>]) -> CartLedger {
            let mut cart = CartLedger::new(CartId::new());
            for op in ops {
                match op {
                    Op::Add(i) => cart.add(products[*i].clone()).unwrap(),
                    Op::Decrement(i) => cart.decrement(&products[*i].id).unwrap(),
                }
            }
            cart
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: the ledger never holds a zero-quantity entry.
            #[test]
            fn no_zero_quantity_entries(ops in arb_ops()) {
                let cart = run(&ops, &catalog());
                prop_assert!(cart.entries().iter().all(|e| e.quantity() >= 1));
            }

            /// Property: add followed by decrement restores the prior contents.
            #[test]
            fn add_then_decrement_is_identity(ops in arb_ops(), pick in 0usize..4) {
                let products = catalog();
                let mut cart = run(&ops, &products);
                let before = cart.snapshot();

                cart.add(products[pick].clone()).unwrap();
                cart.decrement(&products[pick].id).unwrap();

                prop_assert_eq!(cart.snapshot(), before);
            }

            /// Property: subtotal and item count agree with a recount of the ops.
            #[test]
            fn totals_match_model(ops in arb_ops()) {
                let products = catalog();
                let cart = run(&ops, &products);

                let mut model = [0u32; 4];
                for op in &ops {
                    match op {
                        Op::Add(i) => model[*i] += 1,
                        Op::Decrement(i) => model[*i] = model[*i].saturating_sub(1),
                    }
                }

                let expected_subtotal: u64 = model
                    .iter()
                    .zip(&products)
                    .map(|(q, p)| u64::from(*q) * p.price)
                    .sum();
                prop_assert_eq!(cart.subtotal(), expected_subtotal);
                prop_assert_eq!(cart.item_count(), model.iter().sum::<u32>());
                prop_assert_eq!(
                    cart.entry_count(),
                    model.iter().filter(|q| **q > 0).count()
                );
            }
        }
    }
}
