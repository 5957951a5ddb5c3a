//! Storefront walkthrough: fills a cart from fixture products, shows the
//! threshold toasts firing as lines are added, and prints the composed
//! WhatsApp order message with its deep link.
//!
//! The cart persists to `cart-storage.json` in the chosen directory, so
//! running the demo twice continues the same cart.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

use hawker::prelude::*;

const SETTINGS_FIXTURE_YAML: &str = include_str!("../../fixtures/settings/demo.yml");
const PRODUCTS_FIXTURE_YAML: &str = include_str!("../../fixtures/products/demo.yml");

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
struct DemoArgs {
    /// Number of add-to-cart actions to perform
    #[clap(short, long, default_value_t = 6)]
    n: usize,

    /// Settings YAML path (defaults to the bundled demo settings)
    #[clap(short, long)]
    settings: Option<PathBuf>,

    /// Directory holding the persisted cart
    #[clap(short, long, default_value = ".")]
    cart_dir: PathBuf,
}

/// Toast outlet that writes straight to the terminal.
#[derive(Debug)]
struct StdoutSink;

impl NotificationSink for StdoutSink {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        let tag = match kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        };

        println!("  [{tag}] {message}");
    }
}

/// One rendered cart line.
#[derive(Debug, Tabled)]
struct LineRow {
    #[tabled(rename = "#")]
    index: usize,
    title: String,
    code: String,
    unit: Decimal,
    qty: u32,
    total: Decimal,
}

impl LineRow {
    fn from_line(index: usize, line: &CartLine) -> Self {
        Self {
            index: index + 1,
            title: line.product.title.clone(),
            code: line.product.product_code.clone(),
            unit: line.unit_price().normalize(),
            qty: line.quantity,
            total: line.line_total().normalize(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = DemoArgs::parse();

    let settings = match &args.settings {
        Some(path) => StoreSettings::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => StoreSettings::from_yaml(SETTINGS_FIXTURE_YAML)?,
    };

    let catalog: Vec<Product> =
        serde_norway::from_str(PRODUCTS_FIXTURE_YAML).context("parsing product fixtures")?;
    anyhow::ensure!(!catalog.is_empty(), "product fixture set is empty");

    let mut cart = Cart::open(JsonFileStorage::in_dir(&args.cart_dir));
    let mut notifier = ThresholdNotifier::new(&calculate_totals(cart.lines(), &settings));
    let mut sink = StdoutSink;

    println!("Adding up to {} items to the cart:", args.n);

    for product in catalog.iter().cycle().take(args.n) {
        if cart.add_item(product) {
            println!("+ {} ({})", product.title, product.product_code);

            let totals = calculate_totals(cart.lines(), &settings);
            notifier.on_cart_changed(&totals, cart.item_count(), &mut sink);
        } else {
            println!("~ {} is out of stock, skipped", product.title);
        }
    }

    let rows: Vec<LineRow> = cart
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| LineRow::from_line(index, line))
        .collect();

    println!("\n{}", Table::new(rows));

    let totals = calculate_totals(cart.lines(), &settings);
    let after_discount = totals.subtotal - totals.discount;

    println!("\nSubtotal: {} {}", totals.subtotal.normalize(), totals.currency);
    println!("Discount: {} {}", totals.discount.normalize(), totals.currency);
    println!(
        "Delivery: {}",
        if totals.is_free_delivery {
            "FREE".to_owned()
        } else {
            format!("{} {}", totals.delivery_charge.normalize(), totals.currency)
        }
    );
    println!("Total:    {} {}", totals.total.normalize(), totals.currency);

    let delivery = delivery_progress(
        after_discount,
        totals.free_delivery_threshold,
        &totals.currency,
    );
    let discount = discount_progress(
        totals.subtotal,
        totals.discount_150_threshold,
        totals.discount_200_threshold,
        &totals.currency,
    );

    println!("\n{}", delivery.message);
    println!("{}", discount.message);

    let message = order_message(cart.lines(), &settings);
    let link = checkout_link(&settings.whatsapp_number, &message)?;

    println!("\n--- WhatsApp message ---\n{message}");
    println!("Link: {link}");

    Ok(())
}
