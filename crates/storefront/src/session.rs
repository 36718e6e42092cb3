use std::sync::Arc;

use gyuto_cart::{CartLedger, CartLine, CheckoutSnapshot};
use gyuto_catalog::{Catalog, FilterState, Finish, KnifeType, LengthRange, Product, SortOrder};
use gyuto_checkout::{CheckoutCollaborator, CheckoutError, CheckoutOutcome, PaymentProvider};
use gyuto_core::{CartId, DomainError, DomainResult, ProductId};

/// One shopper session: catalog, filter controls and cart.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    filters: FilterState,
    cart: CartLedger,
}

impl Storefront {
    /// Start a session with filters seeded from the catalog and an empty cart.
    pub fn new(catalog: Catalog) -> Self {
        let filters = catalog.default_filters();
        Self {
            catalog,
            filters,
            cart: CartLedger::new(CartId::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    /// Products to render for the current filter state.
    pub fn visible_products(&self) -> Vec<Arc<Product>> {
        self.catalog.query(&self.filters)
    }

    /// Replace the whole filter state at once.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = query.into();
    }

    /// Steel chips to offer; each one is a value [`Storefront::toggle_steel`]
    /// matches exactly.
    pub fn steel_choices(&self) -> Vec<&str> {
        self.catalog.steels()
    }

    pub fn toggle_steel(&mut self, steel: &str) {
        self.filters.toggle_steel(steel);
    }

    pub fn toggle_type(&mut self, kind: KnifeType) {
        self.filters.toggle_type(kind);
    }

    pub fn toggle_finish(&mut self, finish: Finish) {
        self.filters.toggle_finish(finish);
    }

    pub fn set_length_range(&mut self, min: u32, max: u32) {
        self.filters.length = LengthRange::new(min, max);
    }

    pub fn set_price_max(&mut self, price_max: u64) {
        self.filters.price_max = price_max;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.filters.sort = sort;
    }

    pub fn reset_filters(&mut self) {
        self.filters = self.catalog.default_filters();
    }

    /// Add one unit of a catalog product to the cart.
    pub fn add_to_cart(&mut self, product_id: &ProductId) -> DomainResult<()> {
        let product = self
            .catalog
            .get(product_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;
        self.cart.add(product)?;
        tracing::debug!(product = %product_id, items = self.cart.item_count(), "added to cart");
        Ok(())
    }

    /// Remove one unit; unknown or absent products are ignored.
    pub fn decrement(&mut self, product_id: &ProductId) -> DomainResult<()> {
        self.cart.decrement(product_id)
    }

    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.cart.snapshot()
    }

    pub fn subtotal(&self) -> u64 {
        self.cart.subtotal()
    }

    /// Cart badge count (total units).
    pub fn cart_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Hand the current cart to `collaborator`.
    ///
    /// The cart is left untouched; a UI decides whether to clear it after a
    /// successful hand-off (see [`Storefront::complete_checkout`]).
    pub fn checkout(
        &self,
        collaborator: &dyn CheckoutCollaborator,
        provider: PaymentProvider,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let snapshot: CheckoutSnapshot = self.cart.checkout_snapshot();
        tracing::info!(
            cart = %self.cart.id_typed(),
            %provider,
            subtotal = snapshot.subtotal,
            "proceeding to checkout"
        );
        collaborator.begin(&snapshot, provider)
    }

    /// Check out and, on success, empty the cart.
    pub fn complete_checkout(
        &mut self,
        collaborator: &dyn CheckoutCollaborator,
        provider: PaymentProvider,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let outcome = self.checkout(collaborator, provider)?;
        self.cart.clear()?;
        Ok(outcome)
    }
}
