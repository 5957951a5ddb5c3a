//! Cart
//!
//! The cart is an explicitly constructed state container over a
//! [`CartStorage`] backend: each instance owns its lines, enforces the
//! per-product quantity caps and writes every successful mutation through to
//! storage before returning. Mutating operations report whether they changed
//! anything, which is what drives threshold notifications downstream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{products::Product, storage::CartStorage};

/// One product in the cart with the quantity being bought.
///
/// The product is a snapshot taken at add time: its price and availability are
/// frozen for as long as the line exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot captured when the line was created.
    pub product: Product,

    /// Units of the product in the cart; always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line holding a single unit of `product`.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Unit price paid for this line (sale price when present).
    pub fn unit_price(&self) -> Decimal {
        self.product.effective_price()
    }

    /// Total for this line: unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }

    /// Units available according to the snapshot stored on this line.
    pub fn available(&self) -> u32 {
        self.product.available()
    }
}

/// A customer's cart: insertion-ordered lines, one per product id.
///
/// Mutations never fail. Adding beyond stock, updating an absent line or
/// setting a non-positive quantity are all silent no-ops (routed to removal
/// where that is the defined outcome), keeping the cart valid and displayable
/// regardless of caller mistakes. Persistence failures are absorbed and
/// logged; the in-memory state always wins.
#[derive(Debug)]
pub struct Cart<S: CartStorage> {
    lines: Vec<CartLine>,
    storage: S,
}

impl<S: CartStorage> Cart<S> {
    /// Open a cart backed by `storage`, restoring any persisted lines.
    ///
    /// A load failure is recovered by starting empty.
    pub fn open(storage: S) -> Self {
        let lines = storage.load().unwrap_or_else(|error| {
            warn!(%error, "failed to load persisted cart, starting empty");
            Vec::new()
        });

        Self { lines, storage }
    }

    /// Add one unit of `product`, or bump the existing line's quantity.
    ///
    /// Returns `false` without changing anything when the line (or the new
    /// unit) would exceed the available quantity captured on the snapshot.
    /// Callers are expected to disable the add affordance when stock is
    /// exhausted; this guard is not an error condition.
    pub fn add_item(&mut self, product: &Product) -> bool {
        if let Some(line) = self.find_mut(&product.id) {
            if line.quantity >= line.available() {
                return false;
            }

            line.quantity += 1;
        } else {
            if product.available() == 0 {
                return false;
            }

            self.lines.push(CartLine::new(product.clone()));
        }

        self.persist();

        true
    }

    /// Remove the line for `product_id`, if any. Idempotent.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.product.id != product_id);

        if self.lines.len() == before {
            return false;
        }

        self.persist();

        true
    }

    /// Set the quantity for `product_id`.
    ///
    /// A quantity of 0 removes the line. Anything above the snapshot's
    /// available quantity is clamped down to it. Returns `false` when the
    /// line does not exist or the quantity is already the requested value.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        let Some(line) = self.find_mut(product_id) else {
            return false;
        };

        let clamped = quantity.min(line.available());

        if line.quantity == clamped {
            return false;
        }

        line.quantity = clamped;
        self.persist();

        true
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }

        self.lines.clear();
        self.persist();

        true
    }

    /// Total price across all lines (sale prices where present).
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities across lines. A single line of quantity 3 counts
    /// as 3, not 1.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Whether a line for `product_id` exists.
    pub fn contains(&self, product_id: &str) -> bool {
        self.lines.iter().any(|line| line.product.id == product_id)
    }

    /// The cart lines, in the order the products were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consume the cart, handing back its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }

    /// Write-through after a successful mutation. A save failure leaves the
    /// in-memory state authoritative for the rest of the session.
    fn persist(&self) {
        match self.storage.save(&self.lines) {
            Ok(()) => debug!(lines = self.lines.len(), "cart persisted"),
            Err(error) => warn!(%error, "failed to persist cart"),
        }
    }
}
