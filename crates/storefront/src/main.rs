use anyhow::Context;

use gyuto_catalog::{KnifeType, SortOrder};
use gyuto_checkout::{CheckoutOutcome, PaymentProvider, SimulatedCheckout};
use gyuto_core::Nok;
use gyuto_storefront::{Storefront, StorefrontConfig};

/// Scripted walk through one shopper session: browse, filter, fill the cart,
/// check out with both providers.
fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env();
    gyuto_observability::init(config.log_format);

    let catalog = config.load_catalog()?;
    let mut shop = Storefront::new(catalog);
    let checkout = SimulatedCheckout::new(config.checkout.clone());

    println!("{} products", shop.visible_products().len());
    print_steels(&shop);

    shop.toggle_type(KnifeType::Gyuto);
    shop.set_sort(SortOrder::PriceAsc);
    shop.set_price_max(4000);
    let gyutos = shop.visible_products();
    println!("\nGyuto under {}, cheapest first: {} products", Nok(4000), gyutos.len());
    for p in &gyutos {
        println!(
            "  {:<40} {:>10}  {} · {} · {} mm",
            p.name,
            Nok(p.price).to_string(),
            p.kind,
            p.steel,
            p.length
        );
    }

    let first = gyutos.first().context("no gyuto under the price ceiling")?;
    shop.add_to_cart(&first.id)?;
    shop.add_to_cart(&first.id)?;
    shop.reset_filters();
    let petty = shop
        .catalog()
        .products()
        .iter()
        .find(|p| p.kind == KnifeType::Petty)
        .map(|p| p.id.clone());
    if let Some(petty) = petty {
        shop.add_to_cart(&petty)?;
    }
    shop.decrement(&first.id)?;

    println!("\nCart ({} items)", shop.cart_count());
    for line in shop.cart_lines() {
        println!("  {} × {}  {}", line.quantity, line.product.name, Nok(line.line_total));
    }
    println!("  Subtotal {}", Nok(shop.subtotal()));

    match shop.checkout(&checkout, PaymentProvider::Vipps) {
        Ok(_) => println!("\nVipps: accepted"),
        Err(e) => println!("\nVipps: {e}"),
    }

    let CheckoutOutcome::Simulated {
        notice,
        free_shipping,
        ..
    } = shop.complete_checkout(&checkout, PaymentProvider::Stripe)?;
    println!("Stripe: {notice}");
    if free_shipping {
        println!("Free shipping applies.");
    }
    println!("Cart after checkout: {} items", shop.cart_count());

    Ok(())
}

fn print_steels(shop: &Storefront) {
    let steels = shop.steel_choices().join(", ");
    println!("Steels: {steels}");
}
